//! Static field catalogs, one per registry entity kind.
//!
//! These are the canonical schema-as-data tables: every semantic field the
//! bridge knows about, with its registry encoding discipline. Built once and
//! shared read-only.

mod asset;
mod resource;
mod roster;
mod session;
mod work_order;

pub use asset::{ASSET_FIELD_MAPS, FRAMERATE_TABLE, RESOLUTION_TABLE};
pub use resource::{LINGUIST_FIELD_MAPS, LINGUIST_GROUP_CODE, LINGUIST_GROUP_DESC};
pub use roster::{ROSTER_FIELD_MAPS, TIME_OFF_MAINTENANCE_CODE};
pub use session::{SESSION_FIELD_MAPS, SESSION_ISSUE_FIELD_MAPS};
pub use work_order::{WO_FIELD_MAPS, WO_SOURCE_FIELD_MAPS};
