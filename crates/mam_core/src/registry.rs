//! Registry wire shapes and endpoint catalog.
//!
//! The registry is patched with JSON-Patch-style "replace" operations and
//! created with nested JSON documents. This module owns those shapes; the
//! HTTP transport itself lives outside this crate.

use serde::Serialize;
use serde_json::Value;

/// A single registry patch operation.
///
/// The registry only accepts `replace` against an existing record, so the
/// `op` member is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOp {
    pub op: &'static str,
    pub path: String,
    pub value: Value,
}

impl PatchOp {
    /// Build a `replace` operation for the given registry field path.
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "replace",
            path: path.into(),
            value,
        }
    }
}

/// Named registry endpoints.
///
/// Each variant maps to one table in the registry's REST surface. URL
/// construction from these names belongs to the transport layer; see
/// [`crate::config::RegistryConfig::endpoint_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryEndpoint {
    WorkOrder,
    WorkOrderQuery,
    Asset,
    AssetQuery,
    AssetSession,
    AssetSessionQuery,
    Resource,
    ResourceQuery,
    Roster,
    RosterQuery,
    Qualification,
    SchedulingGroup,
    Transaction,
}

impl RegistryEndpoint {
    /// The registry's table name for this endpoint, as it appears in the
    /// REST path.
    pub fn table(self) -> &'static str {
        match self {
            RegistryEndpoint::WorkOrder => "JmWorkOrder",
            RegistryEndpoint::WorkOrderQuery => "JmWorkOrderList",
            RegistryEndpoint::Asset => "LibMaster",
            RegistryEndpoint::AssetQuery => "LibMasterList",
            RegistryEndpoint::AssetSession => "LibMaster_ImSession_Related",
            RegistryEndpoint::AssetSessionQuery => "ImSessionLibMasterList",
            RegistryEndpoint::Resource => "SchResource",
            RegistryEndpoint::ResourceQuery => "SchResourceList",
            RegistryEndpoint::Roster => "SchRosterTimeOff",
            RegistryEndpoint::RosterQuery => "SchRosterTimeOffList",
            RegistryEndpoint::Qualification => "SchQualification",
            RegistryEndpoint::SchedulingGroup => "SchGroup",
            RegistryEndpoint::Transaction => "JmTrxList",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_op_serializes_as_replace() {
        let op = PatchOp::replace("REI_field_21", json!("00:00:09:23"));
        let encoded = serde_json::to_value(&op).unwrap();
        assert_eq!(
            encoded,
            json!({"op": "replace", "path": "REI_field_21", "value": "00:00:09:23"})
        );
    }

    #[test]
    fn endpoint_tables() {
        assert_eq!(RegistryEndpoint::Asset.table(), "LibMaster");
        assert_eq!(RegistryEndpoint::RosterQuery.table(), "SchRosterTimeOffList");
    }
}
