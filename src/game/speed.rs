use crate::consts;
use serde::Deserialize;
use thiserror::Error;

/// How fast the game runs as a function of the score.
///
/// The tick rate starts at `base_rate` ticks per second, rises by one for
/// every two points scored, and never exceeds `max_rate`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawSpeed")]
pub(crate) struct Speed {
    base_rate: u32,
    max_rate: u32,
}

impl Speed {
    pub(crate) fn new(base_rate: u32, max_rate: u32) -> Result<Speed, SpeedError> {
        if base_rate == 0 {
            Err(SpeedError::ZeroBase)
        } else if max_rate < base_rate {
            Err(SpeedError::MaxBelowBase {
                base_rate,
                max_rate,
            })
        } else {
            Ok(Speed {
                base_rate,
                max_rate,
            })
        }
    }

    /// Ticks per second at the given score
    pub(crate) fn rate(self, score: u32) -> u32 {
        self.base_rate
            .saturating_add(score / 2)
            .min(self.max_rate)
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed {
            base_rate: consts::BASE_TICK_RATE,
            max_rate: consts::MAX_TICK_RATE,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawSpeed {
    base_rate: u32,
    max_rate: u32,
}

impl Default for RawSpeed {
    fn default() -> RawSpeed {
        RawSpeed {
            base_rate: consts::BASE_TICK_RATE,
            max_rate: consts::MAX_TICK_RATE,
        }
    }
}

impl TryFrom<RawSpeed> for Speed {
    type Error = SpeedError;

    fn try_from(value: RawSpeed) -> Result<Speed, SpeedError> {
        Speed::new(value.base_rate, value.max_rate)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SpeedError {
    #[error("base-rate must be at least 1")]
    ZeroBase,
    #[error("max-rate ({max_rate}) must not be less than base-rate ({base_rate})")]
    MaxBelowBase { base_rate: u32, max_rate: u32 },
}
