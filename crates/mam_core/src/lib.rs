//! MAM bridge core - registry integration logic with no transport
//! dependencies.
//!
//! This crate translates between the registry's nested, quirky JSON field
//! layout and a clean domain model: declarative field maps, technical-spec
//! resolution from media-probe reports, audio channel-layout inference, and
//! the entity glue on top. HTTP, report rendering, and CLI entry points all
//! live outside.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod fieldmap;
pub mod logging;
pub mod probe;
pub mod registry;
pub mod spec;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
