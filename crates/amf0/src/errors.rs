use std::io;

/// Errors that can occur when encoding AMF0 data.
#[derive(Debug, thiserror::Error)]
pub enum Amf0WriteError {
    /// An IO error occurred.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use byteorder::ReadBytesExt;
    use io::Cursor;

    use super::*;

    #[test]
    fn test_write_error_display() {
        let err = Amf0WriteError::Io(Cursor::new(Vec::<u8>::new()).read_u8().unwrap_err());
        assert_eq!(err.to_string(), "io error: failed to fill whole buffer");
    }
}
