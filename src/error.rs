use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    Asset { path: PathBuf, source: io::Error },
    InvalidSprite { name: String, reason: String },
    UnknownEnemyKind(String),
    WaveOutOfOrder { expected: usize, requested: usize },
    NoSuchWave(usize),
    InvalidTransition { from: &'static str, action: &'static str },
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { path, source } => write!(f, "failed to load asset {}: {}", path.display(), source),
            Self::InvalidSprite { name, reason } => write!(f, "invalid sprite '{}': {}", name, reason),
            Self::UnknownEnemyKind(kind) => write!(f, "unknown enemy type '{}'", kind),
            Self::WaveOutOfOrder { expected, requested } => {
                write!(f, "wave {} requested but wave {} is next", requested, expected)
            }
            Self::NoSuchWave(index) => write!(f, "wave {} does not exist", index),
            Self::InvalidTransition { from, action } => write!(f, "cannot {} while {}", action, from),
            Self::Io(err) => write!(f, "terminal i/o failed: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Asset { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}
