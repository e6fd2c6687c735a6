//! A pure-rust AMF0 (script-data) encoder.
//!
//! This crate provides the write side of the AMF0 wire format: typed scalar
//! values, property keys, and the container headers (object, ECMA array,
//! strict array) used by FLV script-data payloads.
//!
//! # Examples
//!
//! ```rust
//! # fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use amf0::Amf0Encoder;
//!
//! let mut writer = Vec::new();
//! Amf0Encoder::encode_string(&mut writer, "onMetaData")?;
//! Amf0Encoder::encode_number(&mut writer, 1.0)?;
//! # Ok(())
//! # }
//! # test().expect("test failed");
//! ```
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod define;
mod encode;
mod errors;

pub use crate::define::Amf0Marker;
pub use crate::encode::Amf0Encoder;
pub use crate::errors::Amf0WriteError;
