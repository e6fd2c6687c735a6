/// The flags byte leading every video tag payload.
///
/// Bits 7..4 carry the frame type (1 = keyframe), bits 3..0 the codec id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFlags(pub u8);

impl VideoFlags {
    pub fn frame_type(self) -> u8 {
        self.0 >> 4
    }

    /// A keyframe is a video frame whose frame-type nibble equals 1; it is
    /// independently decodable and therefore a valid seek target.
    pub fn is_key_frame(self) -> bool {
        self.frame_type() == 1
    }

    pub fn codec_id(self) -> u8 {
        self.0 & 0x0f
    }
}

/// Legacy video codec ids carrying their dimensions in the packet header.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodecId {
    /// Sorenson H.263
    SorensonH263 = 2,

    /// Screen video
    ScreenVideo = 3,

    /// On2 VP6
    On2VP6 = 4,

    /// On2 VP6 with alpha channel
    On2VP6Alpha = 5,

    /// Screen video version 2
    ScreenVideoV2 = 6,
}

impl TryFrom<u8> for VideoCodecId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::SorensonH263),
            3 => Ok(Self::ScreenVideo),
            4 => Ok(Self::On2VP6),
            5 => Ok(Self::On2VP6Alpha),
            6 => Ok(Self::ScreenVideoV2),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_flags() {
        let flags = VideoFlags(0x12);
        assert_eq!(flags.frame_type(), 1);
        assert!(flags.is_key_frame());
        assert_eq!(flags.codec_id(), 2);

        let flags = VideoFlags(0x27);
        assert_eq!(flags.frame_type(), 2);
        assert!(!flags.is_key_frame());
        assert_eq!(flags.codec_id(), 7);

        // Disposable inter frame (type 3) is not a keyframe.
        assert!(!VideoFlags(0x32).is_key_frame());
    }

    #[test]
    fn test_video_codec_id() {
        let cases = [
            (VideoCodecId::SorensonH263, 2),
            (VideoCodecId::ScreenVideo, 3),
            (VideoCodecId::On2VP6, 4),
            (VideoCodecId::On2VP6Alpha, 5),
            (VideoCodecId::ScreenVideoV2, 6),
        ];

        for (expected, value) in cases {
            assert_eq!(VideoCodecId::try_from(value).unwrap(), expected);
            assert_eq!(expected as u8, value);
        }

        // AVC carries its dimensions in the sequence header, not here.
        assert!(VideoCodecId::try_from(7).is_err());
        assert!(VideoCodecId::try_from(0).is_err());
    }
}
