//! QC session field catalogs (asset-session relation and its issue rows).

use std::sync::LazyLock;

use crate::fieldmap::{FieldMap, FieldMapTable};

pub static SESSION_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "session",
        vec![
            FieldMap::list("issues", "im_session_issue"),
            FieldMap::string("po", "REIQC_field_44"),
        ],
    )
});

pub static SESSION_ISSUE_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "session_issue",
        vec![
            FieldMap::string("event_type", "REIQCISS_field_2"),
            FieldMap::string("tc_in", "time_code_in"),
            FieldMap::string("tc_out", "time_code_out"),
        ],
    )
});
