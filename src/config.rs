use crate::consts;
use crate::display::Scale;
use crate::game::Speed;
use crate::highscore::HighScoreFile;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// How fast the game runs
    #[serde(default)]
    pub(crate) game: Speed,

    /// Settings about reading the buttons
    #[serde(default)]
    pub(crate) input: InputConfig,

    /// Settings about the simulated screen
    #[serde(default)]
    pub(crate) display: DisplayConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("lcdsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawInputConfig")]
pub(crate) struct InputConfig {
    /// Minimum time between two accepted Pause/Restart presses
    pub(crate) debounce: Duration,

    /// Whether to read input on a separate thread
    pub(crate) threaded: bool,

    /// How often the input thread reads the input
    pub(crate) poll_interval: Duration,
}

impl Default for InputConfig {
    fn default() -> InputConfig {
        InputConfig::from(RawInputConfig::default())
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawInputConfig {
    debounce_ms: u64,
    threaded: bool,
    poll_interval_ms: u64,
}

impl Default for RawInputConfig {
    fn default() -> RawInputConfig {
        RawInputConfig {
            debounce_ms: duration_ms(consts::DEBOUNCE_INTERVAL),
            threaded: false,
            poll_interval_ms: duration_ms(consts::INPUT_POLL_INTERVAL),
        }
    }
}

impl From<RawInputConfig> for InputConfig {
    fn from(value: RawInputConfig) -> InputConfig {
        InputConfig {
            debounce: Duration::from_millis(value.debounce_ms),
            threaded: value.threaded,
            poll_interval: Duration::from_millis(value.poll_interval_ms),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct DisplayConfig {
    pub(crate) scale: Scale,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score is stored
    high_score_file: Option<PathBuf>,

    /// Path to which log messages are appended
    log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Return the filepath at which the high score should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// high score file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    pub(crate) fn high_score_file(&self) -> Option<Cow<'_, Path>> {
        self.high_score_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScoreFile::default_path().map(Cow::from))
    }

    /// Return the filepath to write logs to, falling back to a file in the
    /// local data directory
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.log_file.as_deref().map(Cow::from).or_else(|| {
            dirs::data_local_dir().map(|p| Cow::from(p.join("lcdsnake").join("lcdsnake.log")))
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
