use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing JPEG SOI signature")]
    BadSignature,

    #[error("malformed JPEG: {0}")]
    BadFormat(String),

    // Reserved; no current code path produces it.
    #[error("unsupported JPEG feature: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
