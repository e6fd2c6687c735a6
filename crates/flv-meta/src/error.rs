use std::io;

use amf0::Amf0WriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("script data encoding error: {0}")]
    Amf0(#[from] Amf0WriteError),
}
