use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal client errors; every variant ends the session
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to decode image {path:?}: {source}")]
    Decode {
        path: Option<PathBuf>,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read image {path:?}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("Unexpected server reply: {0}")]
    ProtocolParse(String),

    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
