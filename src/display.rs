//! Showing frames on a screen
use crate::render::FrameBuffer;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect, Size},
    style::Color,
    widgets::Widget,
    Terminal,
};
use serde::Deserialize;
use std::io;

/// Somewhere finished frames can be sent
pub(crate) trait DisplaySink {
    fn show(&mut self, frame: &FrameBuffer) -> io::Result<()>;

    /// Blank the screen
    fn clear(&mut self) -> io::Result<()>;
}

/// How many LCD pixels each terminal cell column covers
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Scale {
    /// One pixel per column, two per row: needs a 128×64 terminal
    #[default]
    Full,

    /// Every other pixel: fits in a 64×32 terminal
    Half,
}

impl Scale {
    fn step(self) -> u32 {
        match self {
            Scale::Full => 1,
            Scale::Half => 2,
        }
    }

    /// Size of the region of the terminal that a frame occupies
    pub(crate) fn size(self) -> Size {
        let width = FrameBuffer::WIDTH / self.step();
        let height = FrameBuffer::HEIGHT / self.step() / 2;
        Size {
            width: u16::try_from(width).unwrap_or(u16::MAX),
            height: u16::try_from(height).unwrap_or(u16::MAX),
        }
    }
}

/// A simulated LCD drawn in the terminal with half-block characters, each
/// cell showing one pixel in its foreground and the one below it in its
/// background
#[derive(Debug)]
pub(crate) struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
    scale: Scale,
}

impl<B: Backend> TerminalDisplay<B> {
    pub(crate) fn new(terminal: Terminal<B>, scale: Scale) -> TerminalDisplay<B> {
        TerminalDisplay { terminal, scale }
    }
}

impl<B: Backend> DisplaySink for TerminalDisplay<B> {
    fn show(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let panel = Panel {
            frame,
            scale: self.scale,
        };
        self.terminal.draw(|f| f.render_widget(panel, f.area()))?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Panel<'a> {
    frame: &'a FrameBuffer,
    scale: Scale,
}

impl Panel<'_> {
    fn color_at(&self, column: u16, row: u16) -> Color {
        let step = self.scale.step();
        self.frame
            .pixel(u32::from(column) * step, u32::from(row) * step)
            .map_or(Color::Reset, to_color)
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area, self.scale.size());
        for (y, row) in (display.top()..display.bottom()).zip(0u16..) {
            for (x, column) in (display.left()..display.right()).zip(0u16..) {
                let upper = self.color_at(column, row.saturating_mul(2));
                let lower = self.color_at(column, row.saturating_mul(2).saturating_add(1));
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char('▀');
                    cell.set_fg(upper);
                    cell.set_bg(lower);
                }
            }
        }
    }
}

fn to_color(c: Rgb888) -> Color {
    Color::Rgb(c.r(), c.g(), c.b())
}

/// Return the region of `buffer_area` of size `size` centered within it
fn get_display_area(buffer_area: Rect, size: Size) -> Rect {
    let [display] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(display);
    display
}


#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::{DrawTarget, Point},
        Pixel,
    };
    use ratatui::backend::TestBackend;
    use rstest::rstest;

    const RED: Rgb888 = Rgb888::new(255, 0, 0);
    const BLUE: Rgb888 = Rgb888::new(0, 0, 255);

    fn test_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        let Ok(()) = frame.draw_iter([
            Pixel(Point::new(0, 0), RED),
            Pixel(Point::new(0, 1), BLUE),
            Pixel(Point::new(0, 2), BLUE),
            Pixel(Point::new(127, 127), RED),
        ]);
        frame
    }

    fn display(width: u16, height: u16, scale: Scale) -> TerminalDisplay<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        TerminalDisplay::new(terminal, scale)
    }

    #[rstest]
    #[case(Scale::Full, Size::new(128, 64))]
    #[case(Scale::Half, Size::new(64, 32))]
    fn scale_size(#[case] scale: Scale, #[case] size: Size) {
        assert_eq!(scale.size(), size);
    }

    #[test]
    fn full_scale() {
        let mut disp = display(130, 66, Scale::Full);
        disp.show(&test_frame()).unwrap();
        let buf = disp.terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), " ");
        let corner = &buf[(1, 1)];
        assert_eq!(corner.symbol(), "▀");
        assert_eq!(corner.fg, Color::Rgb(255, 0, 0));
        assert_eq!(corner.bg, Color::Rgb(0, 0, 255));
        let below = &buf[(1, 2)];
        assert_eq!(below.fg, Color::Rgb(0, 0, 255));
        assert_eq!(below.bg, Color::Rgb(0, 0, 0));
        let far = &buf[(128, 64)];
        assert_eq!(far.fg, Color::Rgb(0, 0, 0));
        assert_eq!(far.bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(129, 65)].symbol(), " ");
    }

    #[test]
    fn half_scale_samples_every_other_pixel() {
        let mut disp = display(64, 32, Scale::Half);
        disp.show(&test_frame()).unwrap();
        let buf = disp.terminal.backend().buffer();
        let corner = &buf[(0, 0)];
        assert_eq!(corner.symbol(), "▀");
        assert_eq!(corner.fg, Color::Rgb(255, 0, 0));
        assert_eq!(corner.bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(63, 31)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn small_terminal_is_clipped() {
        let mut disp = display(20, 10, Scale::Full);
        disp.show(&test_frame()).unwrap();
        let buf = disp.terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert_eq!(buf[(19, 9)].symbol(), "▀");
    }

    #[test]
    fn clear_blanks_screen() {
        let mut disp = display(64, 32, Scale::Half);
        disp.show(&test_frame()).unwrap();
        disp.clear().unwrap();
        let buf = disp.terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].fg, Color::Reset);
    }
}
