//! onMetaData serialization and output assembly.
//!
//! The metadata tag is size-self-referential: the keyframe file positions
//! and the `filesize` field depend on the serialized size of the very
//! payload that carries them. Every variable-length integer embedded in the
//! payload is fixed-width (array counts, string lengths, the associative
//! count hint), so the size reaches its fixed point after a single counting
//! pass: the first emission runs against a [`CountingSink`] with zeroed
//! positions, the second writes the corrected values to the real output.

use std::io::{self, Write};

use amf0::{Amf0Encoder, write_amf_property_key};
use byteorder::{BigEndian, WriteBytesExt};
use flv::header::FLV_HEADER_SIZE;
use flv::tag::{FlvTagType, PREV_TAG_SIZE, TAG_HEADER_SIZE};
use flv::{FlvHeader, TagWalker};
use tracing::debug;

use crate::constants::*;
use crate::error::MetaError;
use crate::index::{KeyframeIndex, index_keyframes};
use crate::sink::{CountingSink, CountingWriter};
use crate::summary::{MetaSummary, summarize};

/// Builds and writes the synthesized onMetaData tag together with the
/// surrounding output file.
pub struct MetadataEmitter {
    summary: MetaSummary,
    index: KeyframeIndex,
    creator: Option<String>,
    assoc_count: u32,
}

impl MetadataEmitter {
    /// Creates an emitter over the facts pass one derived. The keyframe
    /// index buffers are allocated here, zero-filled, when the summary
    /// recorded any keyframes.
    pub fn new(summary: MetaSummary, creator: Option<&str>) -> Self {
        let index = KeyframeIndex::zeroed(summary.keyframes);
        Self {
            summary,
            index,
            creator: creator.filter(|c| !c.is_empty()).map(str::to_owned),
            assoc_count: 0,
        }
    }

    /// Runs the two emission passes and writes the complete output: file
    /// header, initial previous-tag-size, the metadata tag, then every
    /// audio/video tag copied verbatim from `buf` in walk order.
    ///
    /// Returns the finalized summary (with `file_size` and
    /// `last_keyframe_location` filled in).
    pub fn write_to<W: Write>(
        mut self,
        buf: &[u8],
        start: usize,
        out: &mut W,
    ) -> Result<MetaSummary, MetaError> {
        // Counting pass: associative count 0, keyframe positions and file
        // size still zero. Only the byte count and the name tally matter.
        let mut probe = CountingSink::new();
        let names = self.write_payload(&mut probe)?;
        let payload_size = probe.bytes_written();
        self.assoc_count = names;

        let metadata_total = (TAG_HEADER_SIZE + PREV_TAG_SIZE) as u64 + payload_size;

        if self.summary.has_keyframes {
            index_keyframes(buf, start, &mut self.index);
            // Recorded positions are relative to the copied data region;
            // everything before it is header + previous-tag-size + metadata.
            let bias = (FLV_HEADER_SIZE + PREV_TAG_SIZE) as u64 + metadata_total;
            self.index.shift(bias as f64);
            if let Some(&last) = self.index.file_positions.last() {
                self.summary.last_keyframe_location = last;
            }
        }

        self.summary.file_size =
            (FLV_HEADER_SIZE + PREV_TAG_SIZE) as u64 + metadata_total + self.summary.data_size;

        debug!(
            payload_size,
            assoc_count = self.assoc_count,
            file_size = self.summary.file_size,
            "metadata size fixed point resolved"
        );

        // Write pass: same serialization with the corrected values.
        FlvHeader::new(self.summary.has_audio, self.summary.has_video).write_to(out)?;
        self.write_tag_header(out, payload_size as u32)?;

        let mut counted = CountingWriter::new(&mut *out);
        self.write_payload(&mut counted)?;
        debug_assert_eq!(counted.bytes_written(), payload_size);

        out.write_u32::<BigEndian>(TAG_HEADER_SIZE as u32 + payload_size as u32)?;

        for entry in TagWalker::new(buf, start) {
            if entry.header.is_media() {
                out.write_all(&buf[entry.offset..entry.offset + entry.footprint()])?;
            }
        }

        Ok(self.summary)
    }

    fn write_tag_header<W: Write>(&self, out: &mut W, data_size: u32) -> io::Result<()> {
        out.write_u8(FlvTagType::Script as u8)?;
        out.write_u24::<BigEndian>(data_size)?;
        // timestamp (3 bytes + 1 byte extended) and stream id stay zero
        out.write_u24::<BigEndian>(0)?;
        out.write_u8(0)?;
        out.write_u24::<BigEndian>(0)?;
        Ok(())
    }

    /// Serializes the tag payload, returning how many named values entered
    /// the top-level ECMA array (its associative count).
    fn write_payload<W: Write>(&self, w: &mut W) -> Result<u32, MetaError> {
        let s = &self.summary;
        let mut names = 0u32;

        // ScriptDataObject marker + "onMetaData" + ECMA array header. No
        // terminator is ever written for this array: the tag's size field
        // closes it, and consumers of this layout expect exactly that.
        Amf0Encoder::encode_string(w, AMF0_ON_METADATA)?;
        Amf0Encoder::ecma_array_header(w, self.assoc_count)?;

        if let Some(creator) = &self.creator {
            write_amf_property_key!(w, METADATA_CREATOR);
            Amf0Encoder::encode_string(w, creator)?;
            names += 1;
        }

        write_amf_property_key!(w, METADATA_METADATACREATOR);
        Amf0Encoder::encode_string(w, METADATACREATOR_VALUE)?;
        names += 1;

        write_amf_property_key!(w, METADATA_HAS_KEYFRAMES);
        Amf0Encoder::encode_bool(w, s.has_keyframes)?;
        names += 1;

        write_amf_property_key!(w, METADATA_HAS_VIDEO);
        Amf0Encoder::encode_bool(w, s.has_video)?;
        names += 1;

        write_amf_property_key!(w, METADATA_HAS_AUDIO);
        Amf0Encoder::encode_bool(w, s.has_audio)?;
        names += 1;

        write_amf_property_key!(w, METADATA_HAS_METADATA);
        Amf0Encoder::encode_bool(w, true)?;
        names += 1;

        write_amf_property_key!(w, METADATA_CAN_SEEK_TO_END);
        Amf0Encoder::encode_bool(w, s.can_seek_to_end)?;
        names += 1;

        write_amf_property_key!(w, METADATA_DURATION);
        Amf0Encoder::encode_number(w, s.duration)?;
        names += 1;

        write_amf_property_key!(w, METADATA_DATASIZE);
        Amf0Encoder::encode_number(w, s.data_size as f64)?;
        names += 1;

        if s.has_video {
            write_amf_property_key!(w, METADATA_VIDEOSIZE);
            Amf0Encoder::encode_number(w, s.video_size as f64)?;
            names += 1;

            write_amf_property_key!(w, METADATA_VIDEOCODECID);
            Amf0Encoder::encode_number(w, f64::from(s.video_codec_id))?;
            names += 1;

            if s.width != 0 {
                write_amf_property_key!(w, METADATA_WIDTH);
                Amf0Encoder::encode_number(w, f64::from(s.width))?;
                names += 1;
            }

            if s.height != 0 {
                write_amf_property_key!(w, METADATA_HEIGHT);
                Amf0Encoder::encode_number(w, f64::from(s.height))?;
                names += 1;
            }

            write_amf_property_key!(w, METADATA_FRAMERATE);
            Amf0Encoder::encode_number(w, s.framerate)?;
            names += 1;

            write_amf_property_key!(w, METADATA_VIDEODATARATE);
            Amf0Encoder::encode_number(w, s.video_data_rate)?;
            names += 1;
        }

        if s.has_audio {
            write_amf_property_key!(w, METADATA_AUDIOSIZE);
            Amf0Encoder::encode_number(w, s.audio_size as f64)?;
            names += 1;

            write_amf_property_key!(w, METADATA_AUDIOCODECID);
            Amf0Encoder::encode_number(w, f64::from(s.audio_codec_id))?;
            names += 1;

            write_amf_property_key!(w, METADATA_AUDIOSAMPLERATE);
            Amf0Encoder::encode_number(w, f64::from(s.audio_sample_rate))?;
            names += 1;

            write_amf_property_key!(w, METADATA_AUDIOSAMPLESIZE);
            Amf0Encoder::encode_number(w, f64::from(s.audio_sample_size))?;
            names += 1;

            write_amf_property_key!(w, METADATA_STEREO);
            Amf0Encoder::encode_bool(w, s.stereo)?;
            names += 1;

            write_amf_property_key!(w, METADATA_AUDIODATARATE);
            Amf0Encoder::encode_number(w, s.audio_data_rate)?;
            names += 1;
        }

        write_amf_property_key!(w, METADATA_FILESIZE);
        Amf0Encoder::encode_number(w, s.file_size as f64)?;
        names += 1;

        write_amf_property_key!(w, METADATA_LASTTIMESTAMP);
        Amf0Encoder::encode_number(w, s.last_timestamp)?;
        names += 1;

        if s.has_keyframes {
            write_amf_property_key!(w, METADATA_LASTKEYFRAMETIMESTAMP);
            Amf0Encoder::encode_number(w, s.last_keyframe_timestamp)?;
            names += 1;

            write_amf_property_key!(w, METADATA_LASTKEYFRAMELOCATION);
            Amf0Encoder::encode_number(w, s.last_keyframe_location)?;
            names += 1;

            write_amf_property_key!(w, METADATA_KEYFRAMES);
            Amf0Encoder::object_header(w)?;
            names += 1;

            write_amf_property_key!(w, KEYFRAMES_FILEPOSITIONS);
            Amf0Encoder::strict_array_header(w, self.index.len() as u32)?;
            for &position in &self.index.file_positions {
                Amf0Encoder::encode_number(w, position)?;
            }

            write_amf_property_key!(w, KEYFRAMES_TIMES);
            Amf0Encoder::strict_array_header(w, self.index.len() as u32)?;
            for &time in &self.index.times {
                Amf0Encoder::encode_number(w, time)?;
            }

            Amf0Encoder::object_eof(w)?;
        }

        Ok(names)
    }
}

/// Injects a synthesized onMetaData tag: runs pass one over `buf` from
/// `start`, then the two-pass emitter, writing the complete output file to
/// `out`. Returns the finalized summary.
pub fn inject<W: Write>(
    buf: &[u8],
    start: usize,
    creator: Option<&str>,
    out: &mut W,
) -> Result<MetaSummary, MetaError> {
    let summary = summarize(buf, start);
    MetadataEmitter::new(summary, creator).write_to(buf, start, out)
}
