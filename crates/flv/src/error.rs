use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlvError {
    #[error("the input is not an FLV file")]
    NotFlv,
    #[error("truncated input: {0}")]
    Truncated(#[from] bytes_util::ReadError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
