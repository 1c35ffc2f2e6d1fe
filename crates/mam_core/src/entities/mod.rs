//! Domain entities composed from the field catalogs and resolvers.
//!
//! Entities hold the registry's JSON documents and translate through the
//! static catalogs; none of them issue HTTP calls. The transport layer
//! feeds them documents and ships their patch lists and fragments.

mod asset;
mod resource;
mod roster;
mod work_order;

pub use asset::{Asset, AssetError};
pub use resource::{Linguist, ResourceError};
pub use roster::{time_off_query, RosterTimeOff};
pub use work_order::{WoSource, WorkOrder};
