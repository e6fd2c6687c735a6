use bytes_util::ByteReader;

use crate::tag::{TAG_HEADER_SIZE, TagHeader};

/// One tag visited by the walker: its absolute offset in the buffer, its
/// parsed header and a borrowed view of its payload.
#[derive(Debug, Clone, Copy)]
pub struct TagEntry<'a> {
    pub offset: usize,
    pub header: TagHeader,
    pub payload: &'a [u8],
}

impl TagEntry<'_> {
    /// Bytes the tag occupies in the stream, trailing size field included.
    pub fn footprint(&self) -> usize {
        self.header.footprint()
    }
}

/// A forward-only iterator over the tags of an FLV body.
///
/// Starting from `start` (normally the file header length plus the initial
/// previous-tag-size), each step checks that the 11-byte tag header and the
/// full footprint (header + payload + trailing size field) lie inside the
/// buffer. Any bounds violation ends the walk cleanly; a truncated tail is
/// not an error, the well-formed prefix has simply been exhausted.
#[derive(Debug, Clone)]
pub struct TagWalker<'a> {
    reader: ByteReader<'a>,
    pos: usize,
}

impl<'a> TagWalker<'a> {
    pub fn new(buf: &'a [u8], start: usize) -> Self {
        Self {
            reader: ByteReader::new(buf),
            pos: start,
        }
    }
}

impl<'a> Iterator for TagWalker<'a> {
    type Item = TagEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = TagHeader::parse(&self.reader, self.pos).ok()?;

        // The whole footprint has to fit, not just the header.
        let payload = self
            .reader
            .bytes(self.pos + TAG_HEADER_SIZE, header.data_size as usize)
            .ok()?;
        self.reader
            .bytes(self.pos + TAG_HEADER_SIZE + header.data_size as usize, 4)
            .ok()?;

        let entry = TagEntry {
            offset: self.pos,
            header,
            payload,
        };
        self.pos += header.footprint();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_tag(buf: &mut Vec<u8>, tag_type: u8, timestamp_ms: u32, payload: &[u8]) {
        buf.push(tag_type);
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..]);
        buf.extend_from_slice(&timestamp_ms.to_be_bytes()[1..]);
        buf.push((timestamp_ms >> 24) as u8);
        buf.extend_from_slice(&[0, 0, 0]);
        buf.extend_from_slice(payload);
        buf.extend_from_slice(&(11 + payload.len() as u32).to_be_bytes());
    }

    #[test]
    fn test_walk_tags() {
        let mut buf = Vec::new();
        push_tag(&mut buf, 8, 0, &[0x2A, 1, 2]);
        push_tag(&mut buf, 9, 33, &[0x12]);
        push_tag(&mut buf, 18, 66, &[0x02]);

        let entries: Vec<_> = TagWalker::new(&buf, 0).collect();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[0].header.tag_type, 8);
        assert_eq!(entries[0].payload, &[0x2A, 1, 2]);

        assert_eq!(entries[1].offset, 11 + 3 + 4);
        assert_eq!(entries[1].header.timestamp_ms, 33);

        assert_eq!(entries[2].header.tag_type, 18);
        assert_eq!(entries[2].offset + entries[2].footprint(), buf.len());
    }

    #[test]
    fn test_truncated_tail_stops_cleanly() {
        let mut buf = Vec::new();
        push_tag(&mut buf, 8, 0, &[0x2A]);
        push_tag(&mut buf, 9, 33, &[0x12, 0, 0, 0]);

        // Cut into the last tag's payload: only the first tag is yielded.
        let cut = buf.len() - 7;
        let entries: Vec<_> = TagWalker::new(&buf[..cut], 0).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].header.tag_type, 8);
    }

    #[test]
    fn test_missing_trailing_size_field() {
        let mut buf = Vec::new();
        push_tag(&mut buf, 9, 0, &[0x12]);

        // Header and payload fit but the previous-tag-size does not.
        let cut = buf.len() - 2;
        assert_eq!(TagWalker::new(&buf[..cut], 0).count(), 0);
    }

    #[test]
    fn test_empty_and_out_of_range_start() {
        assert_eq!(TagWalker::new(&[], 0).count(), 0);

        let mut buf = Vec::new();
        push_tag(&mut buf, 8, 0, &[0x2A]);
        assert_eq!(TagWalker::new(&buf, buf.len()).count(), 0);
        assert_eq!(TagWalker::new(&buf, buf.len() + 100).count(), 0);
    }
}
