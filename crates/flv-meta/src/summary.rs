use std::fmt;

use flv::TagWalker;
use flv::audio::AudioProperties;
use flv::resolution::probe_resolution;
use flv::tag::TAG_HEADER_SIZE;
use flv::video::{VideoCodecId, VideoFlags};
use tracing::debug;

/// Stream-level facts derived from a single walk over the input tags.
///
/// Produced by [`summarize`] and read-only afterwards, except for
/// `file_size` and `last_keyframe_location`, which the emitter fills in once
/// the serialized metadata size is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaSummary {
    pub has_audio: bool,
    pub has_video: bool,
    pub has_keyframes: bool,
    /// Whether the last video tag of the stream is a keyframe.
    pub can_seek_to_end: bool,

    pub audio_codec_id: u8,
    pub audio_sample_rate: u32,
    pub audio_sample_size: u32,
    pub stereo: bool,

    pub video_codec_id: u8,
    pub width: u32,
    pub height: u32,
    /// Video tags per second of stream duration.
    pub framerate: f64,

    /// Audio payload kilobits per second (1024 divisor, see DESIGN.md).
    pub audio_data_rate: f64,
    /// Video payload kilobits per second (1024 divisor, see DESIGN.md).
    pub video_data_rate: f64,

    /// Total bytes of audio and video tags including their trailing
    /// previous-tag-size fields.
    pub data_size: u64,
    /// Audio tag bytes (header + payload, trailing size field excluded).
    pub audio_size: u64,
    /// Video tag bytes (header + payload, trailing size field excluded).
    pub video_size: u64,
    /// Final output file size; filled in by the emitter.
    pub file_size: u64,

    /// Stream duration in seconds (the last observed timestamp).
    pub duration: f64,
    pub last_timestamp: f64,
    pub last_keyframe_timestamp: f64,
    /// Output byte offset of the last keyframe; filled in by the emitter.
    pub last_keyframe_location: f64,

    pub keyframes: usize,
}

impl fmt::Display for MetaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stream summary:")?;
        writeln!(f, "  Duration: {:.3}s", self.duration)?;
        writeln!(f, "  Has video: {}", self.has_video)?;
        if self.has_video {
            writeln!(f, "    Video codec id: {}", self.video_codec_id)?;
            if self.width != 0 || self.height != 0 {
                writeln!(f, "    Resolution: {}x{}", self.width, self.height)?;
            }
            writeln!(f, "    Frame rate: {:.2} fps", self.framerate)?;
            writeln!(f, "    Video data rate: {:.2} kbps", self.video_data_rate)?;
        }
        writeln!(f, "  Has audio: {}", self.has_audio)?;
        if self.has_audio {
            writeln!(f, "    Audio codec id: {}", self.audio_codec_id)?;
            writeln!(f, "    Sample rate: {} Hz", self.audio_sample_rate)?;
            writeln!(f, "    Sample size: {} bits", self.audio_sample_size)?;
            writeln!(f, "    Stereo: {}", self.stereo)?;
            writeln!(f, "    Audio data rate: {:.2} kbps", self.audio_data_rate)?;
        }
        writeln!(f, "  Keyframes: {}", self.keyframes)?;
        write!(f, "  Can seek to end: {}", self.can_seek_to_end)
    }
}

/// Pass one: walks the tags starting at `start` and derives the
/// [`MetaSummary`].
///
/// A truncated or malformed tail simply ends the walk; the summary then
/// covers the well-formed prefix. Stream properties are captured from the
/// first tag of each kind, keyframe and size accounting from every tag.
pub fn summarize(buf: &[u8], start: usize) -> MetaSummary {
    let mut summary = MetaSummary::default();

    let mut audio_tags: u64 = 0;
    let mut video_tags: u64 = 0;
    let mut audio_payload_bytes: u64 = 0;
    let mut video_payload_bytes: u64 = 0;

    for entry in TagWalker::new(buf, start) {
        let header = entry.header;

        if header.is_audio() {
            summary.data_size += entry.footprint() as u64;
            summary.audio_size += (TAG_HEADER_SIZE as u64) + u64::from(header.data_size);
            audio_payload_bytes += u64::from(header.data_size);
            audio_tags += 1;

            if !summary.has_audio {
                if let Some(&flags) = entry.payload.first() {
                    let props = AudioProperties::from_flags(flags);
                    summary.audio_codec_id = props.codec_id;
                    summary.audio_sample_rate = props.sample_rate;
                    summary.audio_sample_size = props.sample_size;
                    summary.stereo = props.stereo;
                }
                summary.has_audio = true;
            }
        } else if header.is_video() {
            summary.data_size += entry.footprint() as u64;
            summary.video_size += (TAG_HEADER_SIZE as u64) + u64::from(header.data_size);
            video_payload_bytes += u64::from(header.data_size);
            video_tags += 1;

            let flags = entry.payload.first().copied().map(VideoFlags);

            if !summary.has_video {
                if let Some(flags) = flags {
                    summary.video_codec_id = flags.codec_id();
                    if let Ok(codec) = VideoCodecId::try_from(flags.codec_id())
                        && let Some(res) = probe_resolution(codec, &entry.payload[1..])
                    {
                        summary.width = res.width;
                        summary.height = res.height;
                    }
                }
                summary.has_video = true;
            }

            if let Some(flags) = flags {
                if flags.is_key_frame() {
                    summary.can_seek_to_end = true;
                    summary.keyframes += 1;
                    summary.last_keyframe_timestamp = header.timestamp_seconds();
                } else {
                    summary.can_seek_to_end = false;
                }
            }
        }

        summary.last_timestamp = header.timestamp_seconds();
    }

    summary.duration = summary.last_timestamp;
    summary.has_keyframes = summary.keyframes > 0;

    if video_tags > 0 && summary.duration > 0.0 {
        summary.framerate = video_tags as f64 / summary.duration;
    }

    // Kilobits per second over the raw payload bytes. The 1024 divisor is
    // load-bearing: consumers of this metadata expect the legacy value.
    if video_payload_bytes > 0 && summary.duration > 0.0 {
        summary.video_data_rate = (video_payload_bytes * 8) as f64 / 1024.0 / summary.duration;
    }
    if audio_payload_bytes > 0 && summary.duration > 0.0 {
        summary.audio_data_rate = (audio_payload_bytes * 8) as f64 / 1024.0 / summary.duration;
    }

    debug!(
        audio_tags,
        video_tags,
        keyframes = summary.keyframes,
        duration = summary.duration,
        "first pass complete"
    );

    summary
}
