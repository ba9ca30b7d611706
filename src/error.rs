use std::path::PathBuf;

/// Errors that can occur while building merged_nodups output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("fragment map error: {0}")]
    FragmentMap(String),

    #[error("contig '{contig}' is missing from the fragment map or reference header")]
    MissingContig { contig: String },

    #[error("read position goes out of the contig: {contig}:{position} is past the last cut ({last_cut})")]
    PositionOutOfContig {
        contig: String,
        position: u64,
        last_cut: u64,
    },

    #[error("alignment record error: {0}")]
    Record(String),

    #[error("'{command}' exited with status {code:?}")]
    Downstream { command: String, code: Option<i32> },

    #[error("statistics serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an `io::Error` with the path it concerns.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: PathBuf::from("<unknown>"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
