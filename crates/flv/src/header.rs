use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use bytes_util::ByteReader;

use crate::error::FlvError;

/// Size of the FLV file header in bytes.
pub const FLV_HEADER_SIZE: usize = 9;

/// The FLV file header, 9 bytes in total: 3-byte "FLV" signature, 1-byte
/// version, 1-byte flags (bit 2 = audio, bit 0 = video), 4-byte header
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlvHeader {
    pub version: u8,
    pub has_audio: bool,
    pub has_video: bool,
}

impl FlvHeader {
    /// Creates a new `FlvHeader` with the specified audio and video flags.
    /// The version is set to 0x01.
    pub fn new(has_audio: bool, has_video: bool) -> Self {
        FlvHeader {
            version: 0x01,
            has_audio,
            has_video,
        }
    }

    /// Parses the FLV header at the start of `reader`.
    ///
    /// Returns the header together with the declared header length (the
    /// stream of tags begins at that offset plus the initial 4-byte
    /// previous-tag-size). Fails with [`FlvError::NotFlv`] when the signature
    /// does not read "FLV".
    pub fn parse(reader: &ByteReader<'_>) -> Result<(Self, usize), FlvError> {
        let signature = reader.bytes(0, 3).map_err(|_| FlvError::NotFlv)?;
        if signature != b"FLV" {
            return Err(FlvError::NotFlv);
        }

        let version = reader.u8(3)?;
        let flags = reader.u8(4)?;
        let has_audio = flags & 0b0000_0100 != 0;
        let has_video = flags & 0b0000_0001 != 0;

        // The header length is stored as a 32-bit value; a well-formed file
        // carries 9 here, but the parser trusts the field like the rest of
        // the toolchain does.
        let data_offset = reader.u32_be(5)? as u32 as usize;

        Ok((
            FlvHeader {
                version,
                has_audio,
                has_video,
            },
            data_offset,
        ))
    }

    /// Serializes the 9-byte header followed by the initial zero
    /// previous-tag-size.
    pub fn write_to(&self, writer: &mut impl io::Write) -> io::Result<()> {
        // Write FLV signature ("FLV")
        writer.write_all(&[0x46, 0x4C, 0x56])?;

        writer.write_u8(self.version)?;

        // Write flags (bit 2 for audio, bit 0 for video)
        let mut flags = 0_u8;
        if self.has_audio {
            flags |= 0x04;
        }
        if self.has_video {
            flags |= 0x01;
        }
        writer.write_u8(flags)?;

        // Write data offset (always 9 for the standard FLV header)
        writer.write_u32::<BigEndian>(FLV_HEADER_SIZE as u32)?;

        // Write initial previous tag size (0 before first tag)
        writer.write_u32::<BigEndian>(0)?;
        Ok(())
    }
}
