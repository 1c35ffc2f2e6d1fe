//! Work orders and their source rows.

use serde_json::Value;

use crate::catalog::{WO_FIELD_MAPS, WO_SOURCE_FIELD_MAPS};
use crate::fieldmap::FieldMapError;

use super::asset::Asset;

/// One registry work order.
#[derive(Debug, Clone)]
pub struct WorkOrder {
    jdict: Value,
}

impl WorkOrder {
    pub fn new(jdict: Value) -> Self {
        Self { jdict }
    }

    pub fn jdict(&self) -> &Value {
        &self.jdict
    }

    pub fn read(&self, name: &str) -> Result<Option<Value>, FieldMapError> {
        WO_FIELD_MAPS.read(name, &self.jdict)
    }

    pub fn wo_no(&self) -> Option<String> {
        self.read("wo_no").ok().flatten().and_then(as_text)
    }

    /// The work order's source rows, in display order.
    pub fn sources(&self) -> Vec<WoSource> {
        self.jdict
            .get("mo_source")
            .and_then(|s| s.as_array())
            .map(|rows| rows.iter().cloned().map(WoSource::new).collect())
            .unwrap_or_default()
    }

    /// Sources whose file has landed but have no asset yet.
    pub fn sources_ready(&self) -> Vec<WoSource> {
        self.sources()
            .into_iter()
            .filter(|s| s.is_ready())
            .collect()
    }
}

/// One source row under a work order's `mo_source` array.
#[derive(Debug, Clone)]
pub struct WoSource {
    jdict: Value,
}

impl WoSource {
    pub fn new(jdict: Value) -> Self {
        Self { jdict }
    }

    pub fn read(&self, name: &str) -> Result<Option<Value>, FieldMapError> {
        WO_SOURCE_FIELD_MAPS.read(name, &self.jdict)
    }

    pub fn seq_no(&self) -> Option<String> {
        self.read("seq_no").ok().flatten().and_then(as_text)
    }

    pub fn source_no(&self) -> Option<String> {
        self.read("source_no").ok().flatten().and_then(as_text)
    }

    pub fn asset_no(&self) -> Option<String> {
        self.read("asset_no").ok().flatten().and_then(as_text)
    }

    /// Dropped file path, stripped of watch-folder quoting.
    pub fn fullpath(&self) -> Option<String> {
        self.read("fullpath")
            .ok()
            .flatten()
            .and_then(|v| v.as_str().map(|s| s.replace('"', "")))
            .filter(|s| !s.is_empty())
    }

    pub fn created(&self) -> bool {
        matches!(
            self.read("created").ok().flatten(),
            Some(Value::Bool(true))
        )
    }

    /// A source is ready to become an asset once its file has been created
    /// in storage and no asset is attached yet.
    pub fn is_ready(&self) -> bool {
        self.created() && self.asset_no().is_none() && self.fullpath().is_some()
    }

    /// Start an asset for this source's file.
    pub fn new_asset(&self) -> Result<Asset, FieldMapError> {
        let path = self
            .fullpath()
            .ok_or_else(|| FieldMapError::MissingKey {
                field: "fullpath",
                key: "WOS_field_1".to_string(),
            })?;
        Ok(Asset::from_path(&path))
    }

    /// Fragment attaching a created asset back onto this source row.
    pub fn asset_fragment(&self, asset_no: &str) -> Result<Value, FieldMapError> {
        WO_SOURCE_FIELD_MAPS
            .get("asset_no")?
            .make_fragment(&Value::String(asset_no.to_string()))
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
