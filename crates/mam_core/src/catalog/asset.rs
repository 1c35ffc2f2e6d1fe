//! Asset (LibMaster) field catalog.
//!
//! The technical-spec fields live in the registry's custom `REI_field_*`
//! slots; frame rate and resolution are registry enums whose codes come
//! from the Frame Rates and Format Sizes setup tables.

use std::sync::LazyLock;

use crate::fieldmap::{EnumTable, FieldMap, FieldMapTable};

/// Frame-rate value -> registry code, from the registry's setup table.
pub const FRAMERATE_TABLE: EnumTable = EnumTable::new(&[
    ("23.976", 10),
    ("24", 11),
    ("25", 12),
    ("29.97", 13),
    ("30", 14),
    ("48", 15),
    ("50", 16),
    ("59.94", 17),
    ("60", 18),
]);

/// Resolution dropdown value -> registry code. The value strings must match
/// the resolver's `"{width} x {height}"` formatting exactly.
pub const RESOLUTION_TABLE: EnumTable = EnumTable::new(&[
    ("4096 x 2160", 1),
    ("3840 x 2160", 2),
    ("2048 x 1080", 3),
    ("1920 x 1080", 4),
    ("1280 x 720", 5),
    ("720 x 486", 6),
    ("720 x 576", 7),
    ("4096 x 3112", 8),
    ("4096 x 3120", 9),
]);

pub static ASSET_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "asset",
        vec![
            FieldMap::dict_path("asset_no", &["master_no", "master_no"]),
            FieldMap::string("filename", "file_name"),
            FieldMap::string("storage_path", "file_path"),
            FieldMap::string("container", "REI_field_28"),
            FieldMap::string("length", "REI_field_21"),
            FieldMap::enumerated("resolution", "format_size_no", "format_size_desc", RESOLUTION_TABLE),
            FieldMap::checkmark("dropframe", "REI_field_23"),
            FieldMap::string("color_space", "REI_field_11"),
            FieldMap::string("eotf", "REI_field_20"),
            FieldMap::string("matrix", "REI_field_18"),
            FieldMap::string("chroma_sub", "REI_field_17"),
            FieldMap::enumerated("frame_rate", "frame_rate_no", "frame_rate_desc", FRAMERATE_TABLE),
            FieldMap::string("scan_type", "REI_field_12"),
            FieldMap::string("video_codec", "REI_field_24"),
            FieldMap::string("video_profile", "REI_field_10"),
            FieldMap::string("video_bitrate", "REI_field_15"),
            FieldMap::string("video_bitdepth", "REI_field_19"),
            FieldMap::string("video_bitrate_mode", "REI_field_26"),
            FieldMap::string("audio_codec", "REI_field_27"),
            FieldMap::string("audio_profile", "REI_field_13"),
            FieldMap::string("audio_bitrate", "REI_field_16"),
            FieldMap::string("audio_bitdepth", "REI_field_14"),
            FieldMap::string("audio_bitrate_mode", "REI_field_25"),
            FieldMap::string("audio_samplerate", "REI_field_22"),
        ],
    )
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_rate_round_trips() {
        for value in FRAMERATE_TABLE.values() {
            let code = FRAMERATE_TABLE.code(value).unwrap();
            assert_eq!(FRAMERATE_TABLE.value(code), Some(value));
        }
    }

    #[test]
    fn resolution_round_trips() {
        for value in RESOLUTION_TABLE.values() {
            let code = RESOLUTION_TABLE.code(value).unwrap();
            assert_eq!(RESOLUTION_TABLE.value(code), Some(value));
        }
    }

    #[test]
    fn resolution_patch_writes_registry_code() {
        let map = ASSET_FIELD_MAPS.get("resolution").unwrap();
        let op = map.patch_op(&json!("1920 x 1080")).unwrap();
        assert_eq!(op.path, "format_size_no");
        assert_eq!(op.value, json!(4));
    }

    #[test]
    fn catalog_has_no_duplicate_names() {
        let names: Vec<_> = ASSET_FIELD_MAPS.iter().map(|m| m.name()).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}
