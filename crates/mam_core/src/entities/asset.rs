//! The asset entity: a registry LibMaster document plus its spec resolution.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::audio;
use crate::catalog::ASSET_FIELD_MAPS;
use crate::fieldmap::FieldMapError;
use crate::probe::ProbeReport;
use crate::registry::PatchOp;
use crate::spec::{SpecError, SpecResolver};

/// Errors from asset composition.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Neither the resolver nor the document knows where the file lives.
    #[error("asset: unable to determine filepath and storage_path")]
    PathNotFound,

    /// Audio rows need a registry asset number.
    #[error("asset: document has no asset number")]
    NoAssetNumber,

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    FieldMap(#[from] FieldMapError),
}

/// One registry asset. Wraps the registry document and a per-probe spec
/// resolver; construct fresh per probe cycle.
#[derive(Debug)]
pub struct Asset {
    jdict: Value,
    resolver: SpecResolver,
}

impl Asset {
    /// Wrap an existing registry document.
    pub fn new(jdict: Value) -> Self {
        Self {
            jdict,
            resolver: SpecResolver::new(""),
        }
    }

    /// Start a new asset for a file that is not in the registry yet. The
    /// filename and storage path are seeded into the document.
    pub fn from_path(path: &str) -> Self {
        let resolver = SpecResolver::new(path);
        let file = resolver.path();
        let mut jdict = Map::new();
        if let Some(name) = file.file_name() {
            jdict.insert(
                "file_name".to_string(),
                Value::String(name.to_string_lossy().into_owned()),
            );
        }
        if let Some(parent) = file.parent() {
            jdict.insert(
                "file_path".to_string(),
                Value::String(parent.to_string_lossy().into_owned()),
            );
        }
        Self {
            jdict: Value::Object(jdict),
            resolver,
        }
    }

    pub fn jdict(&self) -> &Value {
        &self.jdict
    }

    /// Read a semantic field out of the document.
    pub fn read(&self, name: &str) -> Result<Option<Value>, FieldMapError> {
        ASSET_FIELD_MAPS.read(name, &self.jdict)
    }

    /// Registry asset number, when the document has one.
    pub fn asset_no(&self) -> Option<String> {
        self.read("asset_no")
            .ok()
            .flatten()
            .and_then(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Where the file lives, from the resolver path or the document.
    pub fn file_location(&self) -> Option<PathBuf> {
        if !self.resolver.path().as_os_str().is_empty() {
            return Some(self.resolver.path().to_path_buf());
        }
        let filename = self.read("filename").ok().flatten()?;
        let storage_path = self.read("storage_path").ok().flatten()?;
        match (filename.as_str(), storage_path.as_str()) {
            (Some(name), Some(dir)) if !name.is_empty() && !dir.is_empty() => {
                Some(Path::new(dir).join(name))
            }
            _ => None,
        }
    }

    /// Run one spec-resolution pass against a probe report.
    pub fn resolve_specs(&mut self, probe: &ProbeReport) -> Result<(), AssetError> {
        let path = self.file_location().ok_or(AssetError::PathNotFound)?;
        let mut resolver = SpecResolver::new(&path.to_string_lossy());
        resolver.resolve(probe);
        self.resolver = resolver;
        Ok(())
    }

    /// The current spec resolution.
    pub fn specs(&self) -> &SpecResolver {
        &self.resolver
    }

    /// Patch operations for every resolved spec.
    pub fn spec_patch_ops(&self) -> Result<Vec<PatchOp>, AssetError> {
        Ok(self.resolver.patch_ops()?)
    }

    /// Creation document: filename, storage path, and every resolved spec
    /// merged into one object.
    pub fn create_fragment(&self) -> Result<Value, AssetError> {
        let mut merged = self.resolver.make_fragment_all()?;
        if let (Value::Object(target), Value::Object(seed)) = (&mut merged, &self.jdict) {
            for (key, value) in seed {
                target.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        Ok(merged)
    }

    /// Registry audio channel rows for this asset.
    pub fn audio_rows(&self, probe: &ProbeReport) -> Result<Vec<Value>, AssetError> {
        let asset_no = self.asset_no().ok_or(AssetError::NoAssetNumber)?;
        let channels = audio::infer_channels(probe);
        Ok(audio::registry_rows(&asset_no, &channels))
    }
}
