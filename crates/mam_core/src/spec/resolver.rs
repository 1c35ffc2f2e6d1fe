//! The per-probe spec resolver.
//!
//! A resolver is scoped to one probe pass: construct it with the asset's
//! path, feed it one probe report, then pull patch operations or a creation
//! fragment. Reuse across probes is not supported; the found/not-found
//! partition represents a single resolution's results.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::ASSET_FIELD_MAPS;
use crate::fieldmap::FieldMapError;
use crate::probe::{ProbeReport, TrackKind};
use crate::registry::PatchOp;

use super::format::format_bitrate;
use super::tables::{translate, Translation, SPEC_CATALOG};
use super::timecode;

/// Errors from spec resolution.
#[derive(Error, Debug)]
pub enum SpecError {
    /// Output was requested before a probe pass completed.
    #[error("spec resolver: {operation} requires a completed probe pass")]
    NotProbed { operation: &'static str },

    #[error(transparent)]
    FieldMap(#[from] FieldMapError),
}

/// Custom derivation logic, one variant per derived spec. The exhaustive
/// match replaces the registry's old "not implemented" runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derived {
    Container,
    Length,
    Resolution,
    DropFrame,
}

/// How one spec is resolved from a probe report.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// First track of the given kind, named field, used as-is.
    Simple {
        track: TrackKind,
        field: &'static str,
    },
    /// Simple lookup plus best-effort translation to registry wording.
    Translated {
        track: TrackKind,
        field: &'static str,
        table: Translation,
    },
    /// Spec-specific derivation.
    Derived(Derived),
}

/// One catalog entry: a spec name and its resolution strategy.
#[derive(Debug, Clone, Copy)]
pub struct SpecDef {
    pub name: &'static str,
    pub strategy: Strategy,
}

impl SpecDef {
    pub const fn simple(name: &'static str, track: TrackKind, field: &'static str) -> Self {
        Self {
            name,
            strategy: Strategy::Simple { track, field },
        }
    }

    pub const fn translated(
        name: &'static str,
        track: TrackKind,
        field: &'static str,
        table: Translation,
    ) -> Self {
        Self {
            name,
            strategy: Strategy::Translated { track, field, table },
        }
    }

    pub const fn derived(name: &'static str, derived: Derived) -> Self {
        Self {
            name,
            strategy: Strategy::Derived(derived),
        }
    }
}

/// One spec's resolution result for a single probe pass.
#[derive(Debug, Clone)]
pub struct SpecInfo {
    def: SpecDef,
    /// Diagnostic value straight from the probe.
    raw_value: Value,
    /// Registry-facing value.
    resolved_value: Value,
    found: bool,
}

impl SpecInfo {
    fn new(def: SpecDef) -> Self {
        Self {
            def,
            raw_value: Value::Null,
            resolved_value: Value::Null,
            found: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn strategy(&self) -> &Strategy {
        &self.def.strategy
    }

    pub fn raw_value(&self) -> &Value {
        &self.raw_value
    }

    pub fn resolved_value(&self) -> &Value {
        &self.resolved_value
    }

    pub fn found(&self) -> bool {
        self.found
    }

    /// The value handed to the field map on write. Bit-rate specs pass
    /// through the human-readable rate formatter; everything else is the
    /// resolved value as-is.
    pub fn registry_value(&self) -> Value {
        if matches!(self.def.name, "video_bitrate" | "audio_bitrate") {
            if let Some(bits) = self
                .resolved_value
                .as_str()
                .and_then(|s| s.trim().parse::<u64>().ok())
            {
                return Value::String(format_bitrate(bits));
            }
        }
        self.resolved_value.clone()
    }

    pub fn patch_op(&self) -> Result<PatchOp, SpecError> {
        let map = ASSET_FIELD_MAPS.get(self.def.name)?;
        Ok(map.patch_op(&self.registry_value())?)
    }

    pub fn make_fragment(&self) -> Result<Value, SpecError> {
        let map = ASSET_FIELD_MAPS.get(self.def.name)?;
        Ok(map.make_fragment(&self.registry_value())?)
    }
}

/// Resolves the spec catalog against one probe report.
#[derive(Debug)]
pub struct SpecResolver {
    path: PathBuf,
    specs: Vec<SpecInfo>,
    probed: bool,
}

impl SpecResolver {
    /// A fresh resolver for the asset at `path`. Stray quote characters from
    /// watch-folder metadata are stripped.
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path.replace('"', "")),
            specs: SPEC_CATALOG.iter().map(|def| SpecInfo::new(*def)).collect(),
            probed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_probed(&self) -> bool {
        self.probed
    }

    /// Resolve every cataloged spec against the report. Each spec lands in
    /// exactly one of the found/not-found partitions.
    pub fn resolve(&mut self, probe: &ProbeReport) {
        for spec in &mut self.specs {
            match spec.def.strategy {
                Strategy::Simple { track, field } => {
                    simple_lookup(spec, probe, track, field);
                }
                Strategy::Translated { track, field, table } => {
                    simple_lookup(spec, probe, track, field);
                    let translated = spec
                        .resolved_value
                        .as_str()
                        .and_then(|raw| translate(table, raw));
                    if let Some(translated) = translated {
                        spec.resolved_value = Value::String(translated.to_string());
                    }
                }
                Strategy::Derived(derived) => {
                    resolve_derived(spec, probe, derived, &self.path);
                }
            }
            tracing::debug!(
                spec = spec.def.name,
                found = spec.found,
                "resolved {} -> {}",
                spec.def.name,
                spec.resolved_value
            );
        }
        self.probed = true;
    }

    /// The resolution result for one spec, by name.
    pub fn get(&self, name: &str) -> Result<Option<&SpecInfo>, SpecError> {
        if !self.probed {
            return Err(SpecError::NotProbed { operation: "get" });
        }
        Ok(self
            .specs
            .iter()
            .find(|s| s.def.name.eq_ignore_ascii_case(name)))
    }

    /// Specs that resolved to a value.
    pub fn found(&self) -> impl Iterator<Item = &SpecInfo> {
        self.specs.iter().filter(|s| s.found)
    }

    /// Specs the probe had no answer for.
    pub fn not_found(&self) -> impl Iterator<Item = &SpecInfo> {
        self.specs.iter().filter(|s| !s.found)
    }

    /// One registry patch operation per found spec.
    pub fn patch_ops(&self) -> Result<Vec<PatchOp>, SpecError> {
        if !self.probed {
            return Err(SpecError::NotProbed {
                operation: "patch_ops",
            });
        }
        self.found().map(|s| s.patch_op()).collect()
    }

    /// The union of all found specs' creation fragments, merged into one
    /// document.
    pub fn make_fragment_all(&self) -> Result<Value, SpecError> {
        if !self.probed {
            return Err(SpecError::NotProbed {
                operation: "make_fragment_all",
            });
        }
        let mut merged = Map::new();
        for spec in self.found() {
            if let Value::Object(fragment) = spec.make_fragment()? {
                merged.extend(fragment);
            }
        }
        Ok(Value::Object(merged))
    }
}

fn simple_lookup(spec: &mut SpecInfo, probe: &ProbeReport, track: TrackKind, field: &'static str) {
    match probe.field(track, field) {
        Some(value) => {
            spec.raw_value = Value::String(value.clone());
            spec.resolved_value = Value::String(value);
            spec.found = true;
        }
        None => spec.found = false,
    }
}

fn resolve_derived(spec: &mut SpecInfo, probe: &ProbeReport, derived: Derived, path: &Path) {
    match derived {
        Derived::Container => container_spec(spec, probe, path),
        Derived::Length => length_spec(spec, probe),
        Derived::Resolution => resolution_spec(spec, probe),
        Derived::DropFrame => dropframe_spec(spec, probe),
    }
}

/// Registry container value is the file extension; the probe's own format
/// label is kept as the diagnostic raw value.
fn container_spec(spec: &mut SpecInfo, probe: &ProbeReport, path: &Path) {
    if path.as_os_str().is_empty() {
        spec.found = false;
        return;
    }
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    spec.resolved_value = Value::String(extension);
    spec.raw_value = Value::String(probe.field(TrackKind::General, "Format").unwrap_or_default());
    spec.found = true;
}

/// Duration as a frame-accurate timecode when a frame rate is known, else
/// the raw seconds value. The `frames - 1` offset is the industry duration
/// display convention (last frame of the final second).
fn length_spec(spec: &mut SpecInfo, probe: &ProbeReport) {
    let Some(duration) = probe.duration() else {
        spec.found = false;
        return;
    };
    let Ok(seconds) = duration.parse::<f64>() else {
        tracing::warn!("probe duration is not a decimal string: {duration}");
        spec.found = false;
        return;
    };
    spec.raw_value = Value::String(duration.clone());

    let fps = probe.fps().and_then(|f| f.parse::<f64>().ok());
    let Some(fps) = fps else {
        spec.resolved_value = Value::String(duration);
        spec.found = true;
        return;
    };

    let frames = timecode::seconds_to_frames(seconds, fps.round() as u32);
    let tc = timecode::frames_to_timecode(frames.saturating_sub(1), fps, is_drop_frame(probe));
    spec.resolved_value = Value::String(tc);
    spec.found = true;
}

/// `"{width} x {height}"` for the registry dropdown; `"{width},{height}"`
/// as the diagnostic raw value. Spacing is significant for dropdown
/// matching.
fn resolution_spec(spec: &mut SpecInfo, probe: &ProbeReport) {
    let Some((width, height)) = probe.resolution() else {
        spec.found = false;
        return;
    };
    spec.raw_value = Value::String(format!("{},{}", width, height));
    spec.resolved_value = Value::String(format!("{} x {}", width, height));
    spec.found = true;
}

/// A valid `false` is still found; this spec always resolves.
fn dropframe_spec(spec: &mut SpecInfo, probe: &ProbeReport) {
    let df = is_drop_frame(probe);
    spec.raw_value = Value::Bool(df);
    spec.resolved_value = Value::Bool(df);
    spec.found = true;
}

/// Production convention: a semicolon in the start timecode marks a
/// drop-frame sequence.
fn is_drop_frame(probe: &ProbeReport) -> bool {
    probe
        .start_timecode()
        .map(|tc| tc.contains(';'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn probe(tracks: Value) -> ProbeReport {
        ProbeReport::from_json("/mnt/media/show_ep101.mov", &json!({ "tracks": tracks })).unwrap()
    }

    fn resolved(tracks: Value) -> SpecResolver {
        let report = probe(tracks);
        let mut resolver = SpecResolver::new("/mnt/media/show_ep101.mov");
        resolver.resolve(&report);
        resolver
    }

    #[test]
    fn output_before_probe_is_a_usage_error() {
        let resolver = SpecResolver::new("/mnt/media/show_ep101.mov");
        assert!(matches!(
            resolver.patch_ops(),
            Err(SpecError::NotProbed { .. })
        ));
        assert!(matches!(
            resolver.make_fragment_all(),
            Err(SpecError::NotProbed { .. })
        ));
        assert!(matches!(resolver.get("length"), Err(SpecError::NotProbed { .. })));
    }

    #[test]
    fn every_spec_lands_in_exactly_one_partition() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "10.0"},
            {"@type": "Video", "FrameRate": "24", "Width": "1920", "Height": "1080"},
        ]));
        let found = resolver.found().count();
        let not_found = resolver.not_found().count();
        assert_eq!(found + not_found, SPEC_CATALOG.len());
    }

    #[test]
    fn resolution_is_idempotent_across_passes() {
        let tracks = json!([
            {"@type": "General", "Duration": "10.0", "Format": "MPEG-4"},
            {"@type": "Video", "FrameRate": "24", "Width": "1920", "Height": "1080",
             "BitDepth": "10", "Format": "ProRes"},
            {"@type": "Audio", "Channels": "2", "SamplingRate": "48000"},
        ]);
        let a = resolved(tracks.clone());
        let b = resolved(tracks);
        for (left, right) in a.found().zip(b.found()) {
            assert_eq!(left.name(), right.name());
            assert_eq!(left.resolved_value(), right.resolved_value());
        }
        assert_eq!(a.not_found().count(), b.not_found().count());
    }

    #[test]
    fn translated_bitdepth() {
        let resolver = resolved(json!([
            {"@type": "Video", "FrameRate": "23.976", "BitDepth": "10"},
        ]));
        let spec = resolver.get("video_bitdepth").unwrap().unwrap();
        assert_eq!(spec.resolved_value(), &json!("10 bit"));
        assert_eq!(spec.raw_value(), &json!("10"));
    }

    #[test]
    fn untranslated_values_pass_through() {
        let resolver = resolved(json!([
            {"@type": "Video", "BitDepth": "42"},
        ]));
        let spec = resolver.get("video_bitdepth").unwrap().unwrap();
        assert_eq!(spec.resolved_value(), &json!("42"));
        assert!(spec.found());
    }

    #[test]
    fn length_becomes_duration_timecode() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "10.0"},
            {"@type": "Video", "FrameRate": "24"},
            {"@type": "Other", "TimeCode_FirstFrame": "01:00:00:00"},
        ]));
        let spec = resolver.get("length").unwrap().unwrap();
        // 10.0s x 24fps - 1 = frame 239.
        assert_eq!(spec.resolved_value(), &json!("00:00:09:23"));
    }

    #[test]
    fn length_without_frame_rate_stays_in_seconds() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "10.0"},
        ]));
        let spec = resolver.get("length").unwrap().unwrap();
        assert_eq!(spec.resolved_value(), &json!("10.0"));
    }

    #[test]
    fn length_drop_frame_follows_start_timecode() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "60.0"},
            {"@type": "Video", "FrameRate": "29.97"},
            {"@type": "Other", "TimeCode_FirstFrame": "01:00:00;00"},
        ]));
        let spec = resolver.get("length").unwrap().unwrap();
        let tc = spec.resolved_value().as_str().unwrap();
        assert!(tc.contains(';'), "expected drop-frame timecode, got {tc}");
    }

    #[test]
    fn resolution_formats_for_dropdown() {
        let resolver = resolved(json!([
            {"@type": "Video", "Width": "1920", "Height": "1080"},
        ]));
        let spec = resolver.get("resolution").unwrap().unwrap();
        assert_eq!(spec.resolved_value(), &json!("1920 x 1080"));
        assert_eq!(spec.raw_value(), &json!("1920,1080"));
    }

    #[test]
    fn container_comes_from_the_path() {
        let resolver = resolved(json!([
            {"@type": "General", "Format": "MPEG-4"},
        ]));
        let spec = resolver.get("container").unwrap().unwrap();
        assert_eq!(spec.resolved_value(), &json!("MOV"));
        assert_eq!(spec.raw_value(), &json!("MPEG-4"));
    }

    #[test]
    fn dropframe_false_is_still_found() {
        let resolver = resolved(json!([
            {"@type": "Other", "TimeCode_FirstFrame": "01:00:00:00"},
        ]));
        let spec = resolver.get("dropframe").unwrap().unwrap();
        assert!(spec.found());
        assert_eq!(spec.resolved_value(), &json!(false));
    }

    #[test]
    fn missing_probe_data_is_not_an_error() {
        let resolver = resolved(json!([{"@type": "General"}]));
        let length = resolver.get("length").unwrap().unwrap();
        assert!(!length.found());
        let resolution = resolver.get("resolution").unwrap().unwrap();
        assert!(!resolution.found());
    }

    #[test]
    fn patch_ops_cover_found_specs_only() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "10.0"},
            {"@type": "Video", "FrameRate": "24", "Width": "1920", "Height": "1080"},
        ]));
        let ops = resolver.patch_ops().unwrap();
        assert_eq!(ops.len(), resolver.found().count());
        // frame_rate goes out as its registry enum code.
        let frame_rate = ops.iter().find(|op| op.path == "frame_rate_no").unwrap();
        assert_eq!(frame_rate.value, json!(11));
    }

    #[test]
    fn bitrate_patches_are_humanized() {
        let resolver = resolved(json!([
            {"@type": "Video", "BitRate": "5000000"},
        ]));
        let ops = resolver.patch_ops().unwrap();
        let bitrate = ops.iter().find(|op| op.path == "REI_field_15").unwrap();
        assert_eq!(bitrate.value, json!("5 Mbps"));
    }

    #[test]
    fn fragment_merges_found_specs() {
        let resolver = resolved(json!([
            {"@type": "General", "Duration": "10.0"},
            {"@type": "Video", "FrameRate": "24", "Width": "1920", "Height": "1080"},
        ]));
        let fragment = resolver.make_fragment_all().unwrap();
        assert_eq!(fragment["REI_field_21"], json!("00:00:09:23"));
        assert_eq!(fragment["format_size_no"], json!(4));
        assert_eq!(fragment["frame_rate_no"], json!(11));
        assert_eq!(fragment["REI_field_23"], json!("N"));
    }
}
