use num_derive::FromPrimitive;

/// AMF0 marker types.
/// Defined in amf0_spec_121207.pdf section 2.1
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(u8)]
pub enum Amf0Marker {
    /// number-marker
    Number = 0x00,
    /// boolean-marker
    Boolean = 0x01,
    /// string-marker
    String = 0x02,
    /// object-marker
    Object = 0x03,
    /// movieclip-marker
    ///
    /// reserved, not supported
    MovieClipMarker = 0x04,
    /// null-marker
    Null = 0x05,
    /// undefined-marker
    Undefined = 0x06,
    /// reference-marker
    Reference = 0x07,
    /// ecma-array-marker
    EcmaArray = 0x08,
    /// object-end-marker
    ObjectEnd = 0x09,
    /// strict-array-marker
    StrictArray = 0x0a,
    /// date-marker
    Date = 0x0b,
    /// long-string-marker
    LongString = 0x0c,
    /// unsupported-marker
    Unsupported = 0x0d,
    /// recordset-marker
    ///
    /// reserved, not supported
    Recordset = 0x0e,
    /// xml-document-marker
    XmlDocument = 0x0f,
    /// typed-object-marker
    TypedObject = 0x10,
    /// avmplus-object-marker
    ///
    /// AMF3 marker
    AVMPlusObject = 0x11,
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use num_traits::FromPrimitive;

    use super::*;

    #[test]
    fn test_marker_primitive() {
        let cases = [
            (Amf0Marker::Number, 0x00),
            (Amf0Marker::Boolean, 0x01),
            (Amf0Marker::String, 0x02),
            (Amf0Marker::Object, 0x03),
            (Amf0Marker::MovieClipMarker, 0x04),
            (Amf0Marker::Null, 0x05),
            (Amf0Marker::Undefined, 0x06),
            (Amf0Marker::Reference, 0x07),
            (Amf0Marker::EcmaArray, 0x08),
            (Amf0Marker::ObjectEnd, 0x09),
            (Amf0Marker::StrictArray, 0x0a),
            (Amf0Marker::Date, 0x0b),
            (Amf0Marker::LongString, 0x0c),
            (Amf0Marker::Unsupported, 0x0d),
            (Amf0Marker::Recordset, 0x0e),
            (Amf0Marker::XmlDocument, 0x0f),
            (Amf0Marker::TypedObject, 0x10),
            (Amf0Marker::AVMPlusObject, 0x11),
        ];

        for (marker, value) in cases {
            assert_eq!(marker as u8, value);
            assert_eq!(Amf0Marker::from_u8(value), Some(marker));
        }

        assert!(Amf0Marker::from_u8(0x12).is_none());
    }
}
