//! Assorted constants & hard-coded configuration
use embedded_graphics::pixelcolor::Rgb888;
use ratatui::layout::Size;
use std::time::Duration;

/// Width of the LCD panel in pixels
pub(crate) const SCREEN_WIDTH: u32 = 128;

/// Height of the LCD panel in pixels
pub(crate) const SCREEN_HEIGHT: u32 = 128;

/// Side length of one grid cell in pixels
pub(crate) const CELL_SIZE: u16 = 8;

/// Dimensions of the playing field in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 16,
    height: 16,
};

/// Length of the snake at the start of every game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default number of ticks per second at score zero
pub(crate) const BASE_TICK_RATE: u32 = 5;

/// Default ceiling on ticks per second
pub(crate) const MAX_TICK_RATE: u32 = 25;

/// Random draws tried when placing food before falling back to enumerating
/// the free cells
pub(crate) const FOOD_SAMPLING_ATTEMPTS: usize = 64;

/// Time between frames when no game is running
pub(crate) const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Time the control loop sleeps at the end of every iteration
pub(crate) const LOOP_SLICE: Duration = Duration::from_millis(10);

/// How long the farewell screen stays up before shutdown
pub(crate) const FAREWELL_HOLD: Duration = Duration::from_secs(2);

/// Minimum time between two accepted Pause/Restart presses
pub(crate) const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(200);

/// How often the input worker thread samples the input lines
pub(crate) const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Capacity of the channel between the input worker and the control loop
pub(crate) const COMMAND_QUEUE_CAPACITY: usize = 8;

/// Name of the high score file placed next to the executable
pub(crate) const HIGH_SCORE_FILE_NAME: &str = "highscore.txt";

pub(crate) const BACKGROUND_COLOR: Rgb888 = Rgb888::new(0, 0, 0);

pub(crate) const FOOD_COLOR: Rgb888 = Rgb888::new(255, 50, 50);

pub(crate) const TEXT_COLOR: Rgb888 = Rgb888::new(255, 255, 255);

/// Color of the high score in the HUD and on the game-over panel
pub(crate) const HIGH_SCORE_COLOR: Rgb888 = Rgb888::new(255, 215, 0);

pub(crate) const SNAKE_HEAD_COLOR: Rgb888 = Rgb888::new(0, 100, 0);

/// Green level of the body segment right behind the head
pub(crate) const SNAKE_BODY_BRIGHTEST: u8 = 255;

/// Green level that body segments fade towards
pub(crate) const SNAKE_BODY_DIMMEST: u8 = 50;

/// How much darker each successive body segment is
pub(crate) const SNAKE_BODY_FADE_STEP: u8 = 8;

pub(crate) const MENU_BORDER_COLOR: Rgb888 = Rgb888::new(0, 200, 0);

pub(crate) const TITLE_COLOR: Rgb888 = Rgb888::new(0, 255, 0);

pub(crate) const SUBTITLE_COLOR: Rgb888 = Rgb888::new(0, 200, 0);

pub(crate) const FAREWELL_COLOR: Rgb888 = Rgb888::new(0, 255, 0);

pub(crate) const FAREWELL_DETAIL_COLOR: Rgb888 = Rgb888::new(150, 150, 150);

/// Color of the retry hint on the game-over panel
pub(crate) const HINT_COLOR: Rgb888 = Rgb888::new(100, 100, 100);

pub(crate) const PANEL_OUTLINE_COLOR: Rgb888 = Rgb888::new(255, 255, 255);
