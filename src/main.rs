mod command;
mod config;
mod consts;
mod display;
mod driver;
mod game;
mod highscore;
mod input;
mod render;
use crate::config::Config;
use crate::display::TerminalDisplay;
use crate::driver::{Driver, Timing};
use crate::game::Game;
use crate::highscore::HighScoreFile;
use crate::input::{Controls, InputThread, Normalizer, Polled, TerminalInput};
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Arguments::Run { config } => run(config.as_deref()),
            Arguments::Help => {
                println!("Usage: lcdsnake [-c|--config <FILE>]");
                println!();
                println!("Snake for a 128x128 LCD HAT, played in the terminal");
                println!();
                println!("Controls:");
                println!("  Arrows/WASD/HJKL  Steer");
                println!("  Enter/Space/1/p   Pause");
                println!("  2/r               Start a new game");
                println!("  3/q/Esc           Quit");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>  Read configuration from the given file");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Arguments::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> ExitCode {
    let r = Arguments::from_parser(Parser::from_env())
        .map_err(anyhow::Error::from)
        .and_then(Arguments::run);
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lcdsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(p) => Config::load(p, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    if let Some(log_file) = config.files.log_file() {
        init_logging(&log_file).context("failed to set up logging")?;
    }
    let high_score_file = config
        .files
        .high_score_file()
        .context("failed to determine path to high score file")?;
    let store = HighScoreFile::new(high_score_file.into_owned());
    tracing::debug!(path = %store.path().display(), "Using high score file");
    let game = Game::new(store, config.game);
    let normalizer = Normalizer::new(config.input.debounce);
    let controls = if config.input.threaded {
        Controls::from(
            InputThread::spawn(TerminalInput, normalizer, config.input.poll_interval)
                .context("failed to start input thread")?,
        )
    } else {
        Controls::from(Polled::new(TerminalInput, normalizer))
    };
    tracing::info!(?config, "Starting");
    let terminal = ratatui::init();
    let r = {
        let display = TerminalDisplay::new(terminal, config.display.scale);
        Driver::new(controls, display, game, Timing::default()).run()
    };
    ratatui::restore();
    r.context("display failed")
}

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|ioerr| ioerr.kind() == ErrorKind::BrokenPipe)
}
