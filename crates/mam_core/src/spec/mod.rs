//! Technical-spec resolution from probe reports to registry values.
//!
//! One resolver pass takes a parsed probe report and resolves the fixed
//! catalog of technical specs (codec, bit depth, color pipeline, duration
//! timecode, resolution, drop-frame...) into values the registry's dropdown
//! and custom fields accept.

mod format;
mod resolver;
mod tables;
pub mod timecode;

pub use format::format_bitrate;
pub use resolver::{Derived, SpecDef, SpecError, SpecInfo, SpecResolver, Strategy};
pub use tables::{Translation, SPEC_CATALOG};
