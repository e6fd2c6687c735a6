//! FLV stream summarization and onMetaData injection.
//!
//! This crate derives stream-level facts from the tags of an FLV file (pass
//! one), indexes its keyframes against the layout of the rewritten file
//! (pass two), and emits an output consisting of a fresh file header, a
//! single synthesized `onMetaData` script-data tag and every audio/video tag
//! of the input copied byte-identically.
//!
//! ## Component Overview
//!
//! - `summary`: pass-one walk producing the [`MetaSummary`]
//! - `index`: pass-two keyframe position/timestamp collection
//! - `sink`: byte sinks used to resolve the metadata size fixed point
//! - `emitter`: onMetaData serialization and output assembly
//! - `constants`: metadata property keys

mod constants;
mod emitter;
mod error;
mod index;
mod sink;
mod summary;

pub use constants::*;
pub use emitter::{MetadataEmitter, inject};
pub use error::MetaError;
pub use index::{KeyframeIndex, index_keyframes};
pub use sink::{CountingSink, CountingWriter};
pub use summary::{MetaSummary, summarize};
