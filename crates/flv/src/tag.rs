use bytes_util::{ByteReader, ReadError};

/// Size of an FLV tag header in bytes.
pub const TAG_HEADER_SIZE: usize = 11;

/// Size of the trailing previous-tag-size field in bytes.
pub const PREV_TAG_SIZE: usize = 4;

/// FLV tag types
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlvTagType {
    Audio = 8,
    Video = 9,
    Script = 18,
}

impl From<FlvTagType> for u8 {
    fn from(value: FlvTagType) -> Self {
        value as u8
    }
}

/// The fixed 11-byte header preceding every tag payload.
///
/// The tag type is kept raw: unknown types still walk cleanly, they are
/// simply not copied to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub tag_type: u8,
    pub data_size: u32,
    pub timestamp_ms: i32,
}

impl TagHeader {
    /// Parses a tag header at `offset`.
    ///
    /// The timestamp is composed from the 3-byte low part and the 1-byte
    /// extended-high part into a signed 32-bit millisecond value; streams
    /// longer than 2^31 ms wrap negative, which is the documented behavior
    /// of the format.
    pub fn parse(reader: &ByteReader<'_>, offset: usize) -> Result<Self, ReadError> {
        let tag_type = reader.u8(offset)?;
        let data_size = reader.u24_be(offset + 1)?;
        let timestamp_low = reader.u24_be(offset + 4)?;
        let timestamp_ext = reader.u8(offset + 7)?;
        // stream id (offset + 8, 3 bytes) is reserved and never inspected
        reader.bytes(offset + 8, 3)?;

        let timestamp_ms = ((u32::from(timestamp_ext) << 24) | timestamp_low) as i32;

        Ok(TagHeader {
            tag_type,
            data_size,
            timestamp_ms,
        })
    }

    /// The timestamp in seconds, as carried in script-data metadata.
    pub fn timestamp_seconds(&self) -> f64 {
        f64::from(self.timestamp_ms) / 1000.0
    }

    /// Total bytes the tag occupies in the stream: header, payload and the
    /// trailing previous-tag-size field.
    pub fn footprint(&self) -> usize {
        TAG_HEADER_SIZE + self.data_size as usize + PREV_TAG_SIZE
    }

    pub fn is_audio(&self) -> bool {
        self.tag_type == FlvTagType::Audio as u8
    }

    pub fn is_video(&self) -> bool {
        self.tag_type == FlvTagType::Video as u8
    }

    pub fn is_script(&self) -> bool {
        self.tag_type == FlvTagType::Script as u8
    }

    /// Whether the tag belongs to one of the two media streams.
    pub fn is_media(&self) -> bool {
        self.is_audio() || self.is_video()
    }
}
