//! Work-order (JmWorkOrder) and work-order-source field catalogs.

use std::sync::LazyLock;

use crate::fieldmap::{FieldMap, FieldMapTable};

pub static WO_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "work_order",
        vec![
            FieldMap::dict_path("wo_no", &["wo_no_seq", "wo_no_seq"]),
            FieldMap::string("wo_po", "po"),
        ],
    )
});

/// Sources nested under a work order's `mo_source` array. The custom
/// `WOS_field_*` slots carry the watch-folder drop metadata.
pub static WO_SOURCE_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "work_order_source",
        vec![
            FieldMap::dict_path("wo_no", &["wo_no_seq", "wo_no_seq"]),
            FieldMap::string("seq_no", "dsp_seq"),
            FieldMap::dict_path("source_no", &["source_no", "source_no"]),
            FieldMap::dict_path("asset_no", &["master_no", "master_no"]),
            FieldMap::string("fullpath", "WOS_field_1"),
            FieldMap::string("filename", "WOS_field_2"),
            FieldMap::checkmark("created", "WOS_field_3"),
        ],
    )
});
