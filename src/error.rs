/// Error types shared across the application
///
/// Errors are soft: UI call sites log them and return early instead of
/// tearing down the application.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The catalog database rejected a query
    #[error("catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be parsed
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither a data directory nor a home directory could be resolved
    #[error("could not determine the {0} directory")]
    MissingDirectory(&'static str),

    /// The system browser could not be launched
    #[error("could not open {url}: {source}")]
    OpenLink {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Image decoding or encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A background task was cancelled before it produced a result
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GalleryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
