use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use super::Amf0WriteError;
use super::define::Amf0Marker;

/// A macro to encode an AMF property key into a buffer
///
/// Property keys are bare length-prefixed strings: no type marker precedes
/// them.
#[macro_export]
macro_rules! write_amf_property_key {
    ($buffer:expr, $key:expr) => {
        // write key length (u16 in big endian)
        $buffer.write_u16::<BigEndian>($key.len() as u16)?;
        // write key string bytes
        $buffer.write_all($key.as_bytes())?;
    };
}

/// AMF0 encoder.
///
/// Allows for encoding AMF0 values to some writer.
pub struct Amf0Encoder;

impl Amf0Encoder {
    /// Write object end marker to signify the end of an AMF0 object
    pub fn object_eof(writer: &mut impl io::Write) -> Result<(), Amf0WriteError> {
        writer.write_u24::<BigEndian>(Amf0Marker::ObjectEnd as u32)?;
        Ok(())
    }

    /// Encode an AMF0 number
    ///
    /// The 8 payload bytes are the big-endian IEEE-754 representation of the
    /// value, independent of host endianness.
    pub fn encode_number(writer: &mut impl io::Write, value: f64) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Number as u8)?;
        writer.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    /// Encode an AMF0 boolean
    pub fn encode_bool(writer: &mut impl io::Write, value: bool) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Boolean as u8)?;
        writer.write_u8(value as u8)?;
        Ok(())
    }

    /// Encode an AMF0 string
    ///
    /// Values up to 65535 bytes use the short string encoding (u16 length);
    /// anything longer switches to the long-string marker with a u32 length.
    pub fn encode_string(writer: &mut impl io::Write, value: &str) -> Result<(), Amf0WriteError> {
        if value.len() > (u16::MAX as usize) {
            writer.write_u8(Amf0Marker::LongString as u8)?;
            writer.write_u32::<BigEndian>(value.len() as u32)?;
            writer.write_all(value.as_bytes())?;
        } else {
            writer.write_u8(Amf0Marker::String as u8)?;
            write_amf_property_key!(writer, value);
        }
        Ok(())
    }

    /// Begin an AMF0 object: a sequence of named values closed by
    /// [`Amf0Encoder::object_eof`]
    pub fn object_header(writer: &mut impl io::Write) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Object as u8)?;
        Ok(())
    }

    /// Begin an AMF0 ECMA array with the given associative-count hint
    ///
    /// Only the header is written; the caller emits the named values. No
    /// terminator is written here either, since a top-level ECMA array may be
    /// closed by its enclosing container instead of an explicit end marker.
    pub fn ecma_array_header(
        writer: &mut impl io::Write,
        count_hint: u32,
    ) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::EcmaArray as u8)?;
        writer.write_u32::<BigEndian>(count_hint)?;
        Ok(())
    }

    /// Begin an AMF0 strict array of `len` anonymous values
    pub fn strict_array_header(
        writer: &mut impl io::Write,
        len: u32,
    ) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::StrictArray as u8)?;
        writer.write_u32::<BigEndian>(len)?;
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_write_number() {
        let mut amf0_number = vec![0x00];
        amf0_number.extend_from_slice(&772.161_f64.to_be_bytes());

        let mut vec = Vec::<u8>::new();

        Amf0Encoder::encode_number(&mut vec, 772.161).unwrap();

        assert_eq!(vec, amf0_number);
    }

    #[test]
    fn test_write_boolean() {
        let amf0_boolean = vec![0x01, 0x01];

        let mut vec = Vec::<u8>::new();

        Amf0Encoder::encode_bool(&mut vec, true).unwrap();

        assert_eq!(vec, amf0_boolean);
    }

    #[test]
    fn test_write_string() {
        let mut amf0_string = vec![0x02, 0x00, 0x0b];
        amf0_string.extend_from_slice(b"Hello World");

        let mut vec = Vec::<u8>::new();

        Amf0Encoder::encode_string(&mut vec, "Hello World").unwrap();

        assert_eq!(vec, amf0_string);
    }

    #[test]
    fn test_write_long_string() {
        let long_string = "a".repeat(u16::MAX as usize + 1);

        let mut vec = Vec::<u8>::new();
        Amf0Encoder::encode_string(&mut vec, &long_string).unwrap();

        assert_eq!(vec[0], Amf0Marker::LongString as u8);
        assert_eq!(&vec[1..5], &(long_string.len() as u32).to_be_bytes());
        assert_eq!(vec.len(), 5 + long_string.len());
    }

    #[test]
    fn test_write_property_key() {
        fn encode(key: &str) -> Result<Vec<u8>, Amf0WriteError> {
            use std::io::Write;
            let mut vec = Vec::<u8>::new();
            write_amf_property_key!(&mut vec, key);
            Ok(vec)
        }

        let mut expected = vec![0x00, 0x08];
        expected.extend_from_slice(b"duration");
        assert_eq!(encode("duration").unwrap(), expected);
    }

    #[test]
    fn test_write_object_header_and_eof() {
        let mut vec = Vec::<u8>::new();

        Amf0Encoder::object_header(&mut vec).unwrap();
        Amf0Encoder::object_eof(&mut vec).unwrap();

        assert_eq!(vec, vec![0x03, 0x00, 0x00, 0x09]);
    }

    #[test]
    fn test_write_ecma_array_header() {
        let mut vec = Vec::<u8>::new();

        Amf0Encoder::ecma_array_header(&mut vec, 12).unwrap();

        assert_eq!(vec, vec![0x08, 0x00, 0x00, 0x00, 0x0c]);
    }

    #[test]
    fn test_write_strict_array_header() {
        let mut vec = Vec::<u8>::new();

        Amf0Encoder::strict_array_header(&mut vec, 3).unwrap();

        assert_eq!(vec, vec![0x0a, 0x00, 0x00, 0x00, 0x03]);
    }
}
