use flv::TagWalker;
use flv::video::VideoFlags;

/// The keyframe index carried inside the "keyframes" metadata object: two
/// parallel arrays mapping each keyframe, in stream order, to its byte
/// offset in the output file and its timestamp in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeIndex {
    pub file_positions: Vec<f64>,
    pub times: Vec<f64>,
}

impl KeyframeIndex {
    /// Allocates both arrays zero-filled, sized to the keyframe count pass
    /// one recorded.
    pub fn zeroed(keyframes: usize) -> Self {
        Self {
            file_positions: vec![0.0; keyframes],
            times: vec![0.0; keyframes],
        }
    }

    pub fn len(&self) -> usize {
        self.file_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_positions.is_empty()
    }

    /// Adds a constant bias to every file position. Pass two records
    /// positions relative to the copied data region; the emitter shifts them
    /// behind the file header and the metadata tag once its size is known.
    pub fn shift(&mut self, bias: f64) {
        for position in &mut self.file_positions {
            *position += bias;
        }
    }
}

/// Pass two: walks the tags exactly like pass one but tracks the byte offset
/// each tag will have inside the contiguous audio/video region of the
/// output, and records that offset (pre-advance) for every keyframe.
///
/// Script and unknown tags are not copied to the output, so they advance
/// nothing.
pub fn index_keyframes(buf: &[u8], start: usize, index: &mut KeyframeIndex) {
    let mut out_data_pos: u64 = 0;
    let mut next = 0usize;

    for entry in TagWalker::new(buf, start) {
        let header = entry.header;

        if header.is_video()
            && entry
                .payload
                .first()
                .copied()
                .map(VideoFlags)
                .is_some_and(VideoFlags::is_key_frame)
        {
            if next >= index.len() {
                break;
            }
            index.file_positions[next] = out_data_pos as f64;
            index.times[next] = header.timestamp_seconds();
            next += 1;
        }

        if header.is_media() {
            out_data_pos += entry.footprint() as u64;
        }
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
    fn test_positions_relative_to_copied_data() {
        let mut buf = Vec::new();
        push_tag(&mut buf, 8, 0, &[0x2A, 0, 0]); // 18 bytes
        push_tag(&mut buf, 9, 0, &[0x12]); // keyframe at data offset 18
        push_tag(&mut buf, 9, 33, &[0x22]); // inter frame
        push_tag(&mut buf, 9, 66, &[0x12]); // keyframe

        let mut index = KeyframeIndex::zeroed(2);
        index_keyframes(&buf, 0, &mut index);

        assert_eq!(index.file_positions, vec![18.0, 18.0 + 16.0 + 16.0]);
        assert_eq!(index.times, vec![0.0, 0.066]);
    }

    #[test]
    fn test_script_tags_do_not_advance() {
        let mut buf = Vec::new();
        push_tag(&mut buf, 18, 0, &[0x02, 0, 0, 0, 0, 0, 0, 0]);
        push_tag(&mut buf, 9, 100, &[0x12]);

        let mut index = KeyframeIndex::zeroed(1);
        index_keyframes(&buf, 0, &mut index);

        // The dropped script tag occupies no space in the output.
        assert_eq!(index.file_positions, vec![0.0]);
        assert_eq!(index.times, vec![0.1]);
    }

    #[test]
    fn test_shift() {
        let mut index = KeyframeIndex {
            file_positions: vec![0.0, 100.0],
            times: vec![0.0, 1.0],
        };
        index.shift(50.0);
        assert_eq!(index.file_positions, vec![50.0, 150.0]);
        assert_eq!(index.times, vec![0.0, 1.0]);
    }

    #[test]
    fn test_zeroed_allocation() {
        let index = KeyframeIndex::zeroed(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.file_positions, vec![0.0; 3]);
        assert_eq!(index.times, vec![0.0; 3]);

        assert!(KeyframeIndex::zeroed(0).is_empty());
    }
}
