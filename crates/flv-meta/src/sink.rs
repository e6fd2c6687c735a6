use std::io::{self, Write};

/// An `io::Write` that discards its input and remembers only how many bytes
/// went through.
///
/// The emitter's first serialization pass writes into this to learn the
/// metadata payload size before any real output exists.
#[derive(Debug, Default)]
pub struct CountingSink {
    written: u64,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Wraps a real writer and counts the bytes passed through to it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sink() {
        let mut sink = CountingSink::new();
        sink.write_all(&[0u8; 7]).unwrap();
        sink.write_all(&[0u8; 13]).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.bytes_written(), 20);
    }

    #[test]
    fn test_counting_writer_matches_inner() {
        let mut out = Vec::new();
        let mut writer = CountingWriter::new(&mut out);
        writer.write_all(b"abc").unwrap();
        writer.write_all(b"defg").unwrap();
        assert_eq!(writer.bytes_written(), 7);
        assert_eq!(out, b"abcdefg");
    }

    #[test]
    fn test_sink_and_writer_agree() {
        // The same emission through both sinks must report the same count.
        let payload = [1u8, 2, 3, 4, 5];

        let mut sink = CountingSink::new();
        sink.write_all(&payload).unwrap();

        let mut out = Vec::new();
        let mut writer = CountingWriter::new(&mut out);
        writer.write_all(&payload).unwrap();

        assert_eq!(sink.bytes_written(), writer.bytes_written());
    }
}
