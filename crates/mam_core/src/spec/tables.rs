//! The spec catalog and its value-translation tables.
//!
//! Translation tables are best-effort normalization from probe wording to
//! registry dropdown wording. A raw value without an entry passes through
//! untranslated; the registry itself is the validator of last resort.

use crate::probe::TrackKind;

use super::resolver::{Derived, SpecDef};

pub type Translation = &'static [(&'static str, &'static str)];

pub const BITDEPTH: Translation = &[
    ("8", "8 bit"),
    ("10", "10 bit"),
    ("12", "12 bit"),
    ("16", "16 bit"),
    ("24", "24 bit"),
    ("32", "32 bit"),
];

pub const SAMPLERATE: Translation = &[
    ("16000", "16000 Hz"),
    ("32000", "32000 Hz"),
    ("44100", "44100 Hz"),
    ("48000", "48000 Hz"),
    ("96000", "96000 Hz"),
    ("192000", "192000 Hz"),
];

pub const COLOR_SPACE: Translation = &[
    ("BT.709", "Rec709"),
    ("Display P3", "P3-D65"),
    ("BT.2020", "Rec2020"),
    ("DCI P3", "DCI-P3"),
];

// Grading tools omit the transfer metadata entirely for plain 2.4 gamma, so
// that case never reaches a translation.
pub const EOTF: Translation = &[
    ("BT.470 System M", "2.2 Gamma"),
    ("SMPTE 428M", "2.6 Gamma"),
    ("BT.709", "Rec709"),
    ("PQ", "PQ"),
];

pub const MATRIX: Translation = &[
    ("BT.709", "Rec709"),
    ("BT.2020 non-constant", "Rec2020"),
];

pub fn translate(table: Translation, raw: &str) -> Option<&'static str> {
    table.iter().find(|(from, _)| *from == raw).map(|(_, to)| *to)
}

/// The fixed catalog of technical specs resolved per probe pass. Every name
/// here has a matching entry in the asset field catalog.
pub const SPEC_CATALOG: &[SpecDef] = &[
    SpecDef::simple("chroma_sub", TrackKind::Video, "ChromaSubsampling"),
    SpecDef::simple("frame_rate", TrackKind::Video, "FrameRate"),
    SpecDef::simple("scan_type", TrackKind::Video, "ScanType"),
    SpecDef::simple("video_codec", TrackKind::Video, "Format"),
    SpecDef::simple("video_profile", TrackKind::Video, "Format_Profile"),
    SpecDef::simple("video_bitrate", TrackKind::Video, "BitRate"),
    SpecDef::simple("video_bitrate_mode", TrackKind::Video, "BitRate_Mode"),
    SpecDef::simple("audio_codec", TrackKind::Audio, "Format"),
    SpecDef::simple("audio_profile", TrackKind::Audio, "Format_Profile"),
    SpecDef::simple("audio_bitrate", TrackKind::Audio, "BitRate"),
    SpecDef::simple("audio_bitrate_mode", TrackKind::Audio, "BitRate_Mode"),
    SpecDef::translated("color_space", TrackKind::Video, "colour_primaries", COLOR_SPACE),
    SpecDef::translated("eotf", TrackKind::Video, "transfer_characteristics", EOTF),
    SpecDef::translated("matrix", TrackKind::Video, "matrix_coefficients", MATRIX),
    SpecDef::translated("video_bitdepth", TrackKind::Video, "BitDepth", BITDEPTH),
    SpecDef::translated("audio_bitdepth", TrackKind::Audio, "BitDepth", BITDEPTH),
    SpecDef::translated("audio_samplerate", TrackKind::Audio, "SamplingRate", SAMPLERATE),
    SpecDef::derived("container", Derived::Container),
    SpecDef::derived("length", Derived::Length),
    SpecDef::derived("resolution", Derived::Resolution),
    SpecDef::derived("dropframe", Derived::DropFrame),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ASSET_FIELD_MAPS;

    #[test]
    fn translation_hits_and_passthrough() {
        assert_eq!(translate(BITDEPTH, "10"), Some("10 bit"));
        assert_eq!(translate(COLOR_SPACE, "BT.2020"), Some("Rec2020"));
        assert_eq!(translate(MATRIX, "BT.601"), None);
    }

    #[test]
    fn every_spec_has_an_asset_field_map() {
        for def in SPEC_CATALOG {
            assert!(
                ASSET_FIELD_MAPS.get(def.name).is_ok(),
                "no asset field map for spec '{}'",
                def.name
            );
        }
    }
}
