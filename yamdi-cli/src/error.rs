use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FLV error: {0}")]
    Flv(#[from] flv::FlvError),

    #[error("metadata error: {0}")]
    Meta(#[from] flv_meta::MetaError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("initialization failed: {0}")]
    Initialization(String),
}
