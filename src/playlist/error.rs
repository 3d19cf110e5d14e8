//! Playlist errors

use std::{error::Error, fmt, path::PathBuf};

#[derive(Debug, Clone)]
pub enum PlaylistError {
    /// Lookup by path found nothing. A common condition after removal,
    /// callers are expected to handle it.
    NotFound { filepath: PathBuf },
    /// A subsong index referenced no existing child.
    InvalidIndex,
}

impl Error for PlaylistError {}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { filepath } => write!(f, "Not in the playlist: {filepath:?}"),
            Self::InvalidIndex => write!(f, "Subsong index out of range"),
        }
    }
}
