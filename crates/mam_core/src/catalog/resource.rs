//! Resource (SchResource) field catalog for linguists.

use std::sync::LazyLock;

use crate::fieldmap::{FieldMap, FieldMapTable};

/// Scheduling group linguist resources are created under.
pub const LINGUIST_GROUP_CODE: &str = "LINGS";
pub const LINGUIST_GROUP_DESC: &str = "Linguists";

pub static LINGUIST_FIELD_MAPS: LazyLock<FieldMapTable> = LazyLock::new(|| {
    FieldMapTable::new(
        "linguist",
        vec![
            FieldMap::string("name", "resource_desc"),
            FieldMap::string("email", "email_address"),
            FieldMap::string("transrate", "A_field_1"),
            FieldMap::string("qcrate", "A_field_2"),
            FieldMap::string("note", "note_no_text"),
            FieldMap::string("feedback", "A_field_82_text"),
        ],
    )
});
