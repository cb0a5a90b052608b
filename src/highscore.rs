use crate::consts;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Somewhere to keep the high score between runs
pub(crate) trait ScoreStore {
    /// Return the stored high score, or 0 if there is none or it can't be
    /// read
    fn load(&self) -> u32;

    /// Replace the stored high score
    fn save(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score stored as a decimal integer in a text file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path }
    }

    /// Return the default high score file path: a file in the same directory
    /// as the running executable
    pub(crate) fn default_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join(consts::HIGH_SCORE_FILE_NAME))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the high score file.  A missing file counts as a high score of
    /// 0.
    pub(crate) fn try_load(&self) -> Result<u32, LoadError> {
        let src = match fs_err::read_to_string(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::Read(e)),
        };
        src.trim().parse::<u32>().map_err(LoadError::Parse)
    }
}

impl ScoreStore for HighScoreFile {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                tracing::debug!(path = %self.path.display(), score, "Loaded high score");
                score
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unusable high score file");
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        fs_err::write(&self.path, format!("{score}\n")).map_err(SaveError::write)?;
        tracing::info!(path = %self.path.display(), score, "Saved new high score");
        Ok(())
    }
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("high score file does not contain a non-negative integer")]
    Parse(#[source] std::num::ParseIntError),
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    pub(crate) fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}
