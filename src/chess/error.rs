use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Collects non-fatal header conversion problems for one game.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator(Option<String>);

impl ErrorAccumulator {
    pub fn push(&mut self, msg: &str) {
        match &mut self.0 {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(msg);
            }
            None => {
                self.0 = Some(msg.to_string());
            }
        }
    }

    pub fn take(&mut self) -> Option<String> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Failure while replaying a single game. Always fatal for the run.
#[derive(Debug)]
pub enum GameError {
    UnexpectedResult(String),
    InvalidStartPosition(String),
    IllegalMove {
        ply: u32,
        san: String,
        reason: String,
    },
    Write(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedResult(result) => {
                write!(f, "unexpected Result header '{result}'")
            }
            Self::InvalidStartPosition(reason) => {
                write!(f, "invalid FEN start position: {reason}")
            }
            Self::IllegalMove { ply, san, reason } => {
                write!(f, "illegal move '{san}' at ply {ply}: {reason}")
            }
            Self::Write(e) => write!(f, "failed to write record: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Write(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConvertError {
    OutputExists(PathBuf),
    CreateOutput {
        path: PathBuf,
        source: io::Error,
    },
    InvalidPattern {
        pattern: String,
        message: String,
    },
    NoInputFiles(String),
    OpenInput {
        path: PathBuf,
        source: io::Error,
    },
    /// Parser-stage failure reported by the PGN reader.
    Read {
        path: PathBuf,
        game_index: usize,
        source: io::Error,
    },
    Game {
        path: PathBuf,
        game_index: usize,
        source: GameError,
    },
    Write(io::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputExists(path) => write!(
                f,
                "Output file '{}' already exists; refusing to overwrite",
                path.display()
            ),
            Self::CreateOutput { path, source } => write!(
                f,
                "Failed to create output file '{}': {}",
                path.display(),
                source
            ),
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid input pattern '{pattern}': {message}")
            }
            Self::NoInputFiles(pattern) => {
                write!(f, "No input files match '{pattern}'")
            }
            Self::OpenInput { path, source } => {
                write!(f, "Failed to open file '{}': {}", path.display(), source)
            }
            Self::Read {
                path,
                game_index,
                source,
            } => write!(
                f,
                "Parser-stage error: stage=read_game; file='{}'; game_index={}; error={}",
                path.display(),
                game_index,
                source
            ),
            Self::Game {
                path,
                game_index,
                source,
            } => write!(
                f,
                "Replay error: file='{}'; game_index={}; error={}",
                path.display(),
                game_index,
                source
            ),
            Self::Write(e) => write!(f, "Failed to write output: {e}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateOutput { source, .. }
            | Self::OpenInput { source, .. }
            | Self::Read { source, .. } => Some(source),
            Self::Game { source, .. } => Some(source),
            Self::Write(e) => Some(e),
            _ => None,
        }
    }
}
