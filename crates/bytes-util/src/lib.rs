//! Bounds-checked big-endian reads over an in-memory byte buffer.
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod byte_reader;

pub use byte_reader::{ByteReader, ReadError};
