use super::{CommandSource, InputSource, Normalizer};
use crate::command::Command;
use crate::consts;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// An input source polled on its own thread.
///
/// The worker only ever hands normalized commands to the control loop
/// through a bounded queue; it never touches game state.  A held direction
/// is sent once rather than on every poll, so it cannot crowd Pause, Restart,
/// or Exit out of the queue.  Dropping the `InputThread` stops and joins the
/// worker.
#[derive(Debug)]
pub(crate) struct InputThread {
    receiver: Receiver<Command>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub(crate) fn spawn<I>(
        mut source: I,
        mut normalizer: Normalizer,
        poll_interval: Duration,
    ) -> io::Result<InputThread>
    where
        I: InputSource + Send + 'static,
    {
        let (sender, receiver) = sync_channel(consts::COMMAND_QUEUE_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stopping = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name(String::from("input"))
            .spawn(move || {
                let mut outbox = Outbox::new(sender);
                while !stopping.load(Ordering::Relaxed) {
                    let polled = normalizer.poll(&mut source, Instant::now());
                    if !outbox.offer(polled) {
                        break;
                    }
                    thread::sleep(poll_interval);
                }
                tracing::debug!("Input thread stopped");
            })?;
        Ok(InputThread {
            receiver,
            stop,
            handle: Some(handle),
        })
    }
}

/// The worker's end of the command queue
#[derive(Debug)]
struct Outbox {
    sender: SyncSender<Command>,

    /// Toggles that did not fit in the queue yet, oldest first
    pending: VecDeque<Command>,

    /// The direction most recently sent while its line has stayed the winner
    last_direction: Option<Command>,
}

impl Outbox {
    fn new(sender: SyncSender<Command>) -> Outbox {
        Outbox {
            sender,
            pending: VecDeque::new(),
            last_direction: None,
        }
    }

    /// Queue the result of one poll.  Returns `false` once the control loop
    /// has hung up.
    fn offer(&mut self, polled: Option<Command>) -> bool {
        match polled {
            Some(cmd) if cmd.is_toggle() => {
                self.last_direction = None;
                self.pending.push_back(cmd);
            }
            Some(cmd) if self.last_direction == Some(cmd) => (),
            Some(cmd) if !self.pending.is_empty() => {
                tracing::debug!(?cmd, "Command queue full; dropping direction");
            }
            Some(cmd) => match self.sender.try_send(cmd) {
                Ok(()) => self.last_direction = Some(cmd),
                Err(TrySendError::Full(cmd)) => {
                    tracing::debug!(?cmd, "Command queue full; dropping direction");
                }
                Err(TrySendError::Disconnected(_)) => return false,
            },
            None => self.last_direction = None,
        }
        self.flush()
    }

    /// Move as many pending toggles into the queue as fit
    fn flush(&mut self) -> bool {
        while let Some(&cmd) = self.pending.front() {
            match self.sender.try_send(cmd) {
                Ok(()) => {
                    self.pending.pop_front();
                }
                Err(TrySendError::Full(_)) => break,
                Err(TrySendError::Disconnected(_)) => return false,
            }
        }
        true
    }
}

impl CommandSource for InputThread {
    fn next_command(&mut self, _now: Instant) -> Option<Command> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Input thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::{pressed, ScriptedInput};
    use crate::input::{InputLine, LineState};

    fn collect(thread: &mut InputThread, want: usize) -> Vec<Command> {
        let mut got = Vec::new();
        for _ in 0..500 {
            if let Some(cmd) = thread.next_command(Instant::now()) {
                got.push(cmd);
                if got.len() == want {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(2));
            }
        }
        got
    }

    #[test]
    fn delivers_commands_in_order() {
        let source = ScriptedInput::new([
            pressed(&[InputLine::Key2]),
            LineState::default(),
            pressed(&[InputLine::Up]),
            pressed(&[InputLine::Left, InputLine::Key3]),
        ]);
        let mut thread =
            InputThread::spawn(source, Normalizer::new(Duration::ZERO), Duration::from_millis(1))
                .unwrap();
        assert_eq!(
            collect(&mut thread, 3),
            [Command::Restart, Command::MoveUp, Command::MoveLeft]
        );
    }

    #[test]
    fn exit_after_held_direction_is_delivered() {
        let source = ScriptedInput::new(
            std::iter::repeat_n(pressed(&[InputLine::Up]), 20)
                .chain(std::iter::once(pressed(&[InputLine::Key3]))),
        );
        let mut thread =
            InputThread::spawn(source, Normalizer::new(Duration::ZERO), Duration::from_millis(1))
                .unwrap();
        thread::sleep(Duration::from_millis(200));
        assert_eq!(collect(&mut thread, 2), [Command::MoveUp, Command::Exit]);
    }

    #[test]
    fn toggles_beyond_capacity_wait_for_room() {
        let presses = std::iter::repeat_n(
            [pressed(&[InputLine::Key1]), LineState::default()],
            consts::COMMAND_QUEUE_CAPACITY + 4,
        )
        .flatten();
        let mut thread = InputThread::spawn(
            ScriptedInput::new(presses),
            Normalizer::new(Duration::ZERO),
            Duration::from_millis(1),
        )
        .unwrap();
        thread::sleep(Duration::from_millis(200));
        assert_eq!(
            collect(&mut thread, consts::COMMAND_QUEUE_CAPACITY + 4),
            vec![Command::Pause; consts::COMMAND_QUEUE_CAPACITY + 4]
        );
    }

    #[test]
    fn direction_is_resent_after_release() {
        let source = ScriptedInput::new([
            pressed(&[InputLine::Up]),
            pressed(&[InputLine::Up]),
            LineState::default(),
            pressed(&[InputLine::Up]),
            pressed(&[InputLine::Key2]),
        ]);
        let mut thread =
            InputThread::spawn(source, Normalizer::new(Duration::ZERO), Duration::from_millis(1))
                .unwrap();
        assert_eq!(
            collect(&mut thread, 3),
            [Command::MoveUp, Command::MoveUp, Command::Restart]
        );
        thread::sleep(Duration::from_millis(20));
        assert_eq!(thread.next_command(Instant::now()), None);
    }

    #[test]
    fn drop_stops_worker() {
        let thread = InputThread::spawn(
            ScriptedInput::default(),
            Normalizer::default(),
            Duration::from_millis(1),
        )
        .unwrap();
        drop(thread);
    }
}
