//! Drawing the game onto the LCD's pixels
use crate::consts;
use crate::game::{Ending, GameState, View};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Baseline, Text},
};
use ratatui::layout::Position;
use std::convert::Infallible;

/// An image the size of the LCD panel
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FrameBuffer {
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    pub(crate) const WIDTH: u32 = consts::SCREEN_WIDTH;
    pub(crate) const HEIGHT: u32 = consts::SCREEN_HEIGHT;

    pub(crate) fn new() -> FrameBuffer {
        let len = usize::try_from(Self::WIDTH * Self::HEIGHT).unwrap_or(0);
        FrameBuffer {
            pixels: vec![consts::BACKGROUND_COLOR; len],
        }
    }

    /// Return the color of the pixel at (`x`, `y`), or `None` if that's
    /// outside the image
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.pixels.get(Self::index(x, y)?).copied()
    }

    fn index(x: u32, y: u32) -> Option<usize> {
        if x < Self::WIDTH && y < Self::HEIGHT {
            usize::try_from(y * Self::WIDTH + x).ok()
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> FrameBuffer {
        FrameBuffer::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(Self::WIDTH, Self::HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<Rgb888>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if let Some(px) = Self::index(x, y).and_then(|i| self.pixels.get_mut(i)) {
                *px = color;
            }
        }
        Ok(())
    }
}

/// Draw a complete frame for the given view of the game
pub(crate) fn render(view: &View<'_>) -> FrameBuffer {
    let mut frame = FrameBuffer::new();
    let Ok(()) = draw(view, &mut frame);
    frame
}

/// Draw a complete frame for the given view of the game onto any RGB target
pub(crate) fn draw<D>(view: &View<'_>, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(consts::BACKGROUND_COLOR)?;
    match view.state {
        GameState::Exiting => {
            draw_centered(target, "GOODBYE!", -10, consts::FAREWELL_COLOR)?;
            draw_centered(target, "Exiting...", 10, consts::FAREWELL_DETAIL_COLOR)?;
        }
        GameState::Menu => {
            Rectangle::with_corners(Point::new(10, 10), Point::new(118, 118))
                .into_styled(PrimitiveStyle::with_stroke(consts::MENU_BORDER_COLOR, 1))
                .draw(target)?;
            draw_centered(target, "SNAKE", -20, consts::TITLE_COLOR)?;
            draw_centered(target, "GAME", -8, consts::SUBTITLE_COLOR)?;
            draw_centered(target, "Press Key 2", 15, consts::TEXT_COLOR)?;
            draw_centered(target, "to Start", 27, consts::TEXT_COLOR)?;
        }
        GameState::Playing => {
            draw_field(view, target)?;
            draw_hud(view, target)?;
        }
        GameState::Paused => {
            draw_field(view, target)?;
            draw_centered(target, "PAUSED", 0, consts::TEXT_COLOR)?;
        }
        GameState::GameOver(ending) => {
            draw_field(view, target)?;
            draw_game_over(view, ending, target)?;
        }
    }
    Ok(())
}

fn draw_field<D>(view: &View<'_>, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if let Some(food) = view.grid.food() {
        Circle::new(cell_origin(food), u32::from(consts::CELL_SIZE))
            .into_styled(PrimitiveStyle::with_fill(consts::FOOD_COLOR))
            .draw(target)?;
    }
    for (i, pos) in view.grid.snake().cells().enumerate() {
        let color = if i == 0 {
            consts::SNAKE_HEAD_COLOR
        } else {
            body_color(i)
        };
        Rectangle::new(cell_origin(pos), Size::new_equal(u32::from(consts::CELL_SIZE)))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)?;
    }
    Ok(())
}

fn draw_hud<D>(view: &View<'_>, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let score = format!("S:{}", view.grid.score());
    Text::with_baseline(&score, Point::new(1, 0), text_style(consts::TEXT_COLOR), Baseline::Top)
        .draw(target)?;
    let high = format!("HI:{}", view.high_score);
    let right_edge = target.bounding_box().size.width.saturating_sub(1);
    let x = right_edge.saturating_sub(text_size(&high).width);
    Text::with_baseline(
        &high,
        Point::new(to_i32(x), 0),
        text_style(consts::HIGH_SCORE_COLOR),
        Baseline::Top,
    )
    .draw(target)?;
    Ok(())
}

fn draw_game_over<D>(view: &View<'_>, ending: Ending, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Rectangle::with_corners(Point::new(10, 30), Point::new(118, 100))
        .into_styled(
            PrimitiveStyleBuilder::new()
                .fill_color(consts::BACKGROUND_COLOR)
                .stroke_color(consts::PANEL_OUTLINE_COLOR)
                .stroke_width(1)
                .build(),
        )
        .draw(target)?;
    let (headline, color) = match ending {
        Ending::Collision => ("GAME OVER", consts::FOOD_COLOR),
        Ending::BoardFull => ("YOU WIN!", consts::TITLE_COLOR),
    };
    draw_centered(target, headline, -15, color)?;
    draw_centered(
        target,
        &format!("SCORE: {}", view.grid.score()),
        0,
        consts::TEXT_COLOR,
    )?;
    draw_centered(
        target,
        &format!("HIGH: {}", view.high_score),
        10,
        consts::HIGH_SCORE_COLOR,
    )?;
    draw_centered(target, "[Key 2 to Retry]", 25, consts::HINT_COLOR)?;
    Ok(())
}

/// Draw `text` centered horizontally on `target`, `y_offset` pixels below
/// (or, if negative, above) the vertical center
pub(crate) fn draw_centered<D>(
    target: &mut D,
    text: &str,
    y_offset: i32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let origin = centered_origin(text, y_offset, target.bounding_box().size);
    Text::with_baseline(text, origin, text_style(color), Baseline::Top).draw(target)?;
    Ok(())
}

/// Return the top-left corner at which `text` must be drawn to appear
/// centered in an area of size `area`, shifted down by `y_offset`
pub(crate) fn centered_origin(text: &str, y_offset: i32, area: Size) -> Point {
    let slack = area.saturating_sub(text_size(text)) / 2;
    Point::new(to_i32(slack.width), to_i32(slack.height).saturating_add(y_offset))
}

/// Measure the bounding box of `text` as it will be drawn
fn text_size(text: &str) -> Size {
    Text::with_baseline(
        text,
        Point::zero(),
        text_style(consts::TEXT_COLOR),
        Baseline::Top,
    )
    .bounding_box()
    .size
}

fn text_style(color: Rgb888) -> MonoTextStyle<'static, Rgb888> {
    MonoTextStyle::new(&FONT_6X10, color)
}

/// The shade of the body segment `index` cells behind the head.  Segments
/// fade from bright green towards a dim floor the further back they are.
pub(crate) fn body_color(index: usize) -> Rgb888 {
    let green = u8::try_from(index)
        .ok()
        .and_then(|i| i.checked_mul(consts::SNAKE_BODY_FADE_STEP))
        .map_or(consts::SNAKE_BODY_DIMMEST, |fade| {
            consts::SNAKE_BODY_BRIGHTEST
                .saturating_sub(fade)
                .max(consts::SNAKE_BODY_DIMMEST)
        });
    Rgb888::new(0, green, 0)
}

/// The pixel position of the top-left corner of a grid cell
fn cell_origin(pos: Position) -> Point {
    Point::new(i32::from(pos.x), i32::from(pos.y)) * i32::from(consts::CELL_SIZE)
}

fn to_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
