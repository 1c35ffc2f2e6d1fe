//! Roster time-off (SchRosterTimeOff) field catalog.

use std::sync::LazyLock;

use crate::fieldmap::{FieldMap, FieldMapTable};

/// Registry code for the Maintenance time-off type.
pub const TIME_OFF_MAINTENANCE_CODE: i64 = 6;

pub static ROSTER_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "roster",
        vec![
            FieldMap::string("resource", "resource_desc"),
            FieldMap::dict_path("code", &["resource_code", "resource_code"]),
            FieldMap::string("group", "group_desc"),
            FieldMap::dict_path("group_code", &["group_code", "group_code"]),
            FieldMap::string("start", "trx_begin_dt"),
            FieldMap::string("end", "trx_end_dt"),
            FieldMap::dict_path("trx_no", &["trx_no", "trx_no"]),
            FieldMap::dict_path("time_off_type", &["time_off_type_no", "time_off_type_desc"]),
            FieldMap::dict_path("time_off_type_no", &["time_off_type_no", "time_off_type_no"]),
        ],
    )
});
