//! Declarative mappings between semantic field names and the registry's
//! JSON layout.
//!
//! The registry stores fields in several disciplines: flat strings, nested
//! single-key objects, `"Y"`/`"N"` checkmarks, and two-key enum pairs where
//! a numeric code travels with a description string. A [`FieldMap`] captures
//! one field's discipline as data, so entity code never branches on layout.
//!
//! Reads and writes are deliberately asymmetric: reads through nested paths
//! tolerate missing intermediates (the registry omits nested objects for
//! unset relations), while writes validate strictly and never silently drop
//! a field.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::registry::PatchOp;

/// Errors from field mapping operations.
#[derive(Error, Debug)]
pub enum FieldMapError {
    /// A flat read found no value under the mapped key.
    #[error("'{field}': key '{key}' not present in document")]
    MissingKey { field: &'static str, key: String },

    /// A write was asked to encode a value the enum table does not know.
    #[error("'{field}': enum value not in table: {value}")]
    ValueNotInEnum { field: &'static str, value: String },

    /// Checkmark fields only accept booleans on write.
    #[error("'{field}': checkmark fields require a boolean, got: {value}")]
    NotABoolean { field: &'static str, value: Value },

    /// Number fields require a numeric (or numeric-string) value on write.
    #[error("'{field}': cannot encode '{value}' as a number")]
    NotANumber { field: &'static str, value: String },

    /// Dict and list fields are composed into the parent document at
    /// creation time and cannot be patched on their own.
    #[error("'{field}': this field kind cannot be written as a patch operation")]
    NotPatchable { field: &'static str },

    /// Table lookup by an unknown semantic name.
    #[error("{entity} field table has no entry for '{key}'")]
    UnknownField { entity: &'static str, key: String },
}

/// Bidirectional value-string <-> registry-code table for enum fields.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable {
    pairs: &'static [(&'static str, i64)],
}

impl EnumTable {
    pub const fn new(pairs: &'static [(&'static str, i64)]) -> Self {
        Self { pairs }
    }

    /// Registry code for a value string.
    pub fn code(&self, value: &str) -> Option<i64> {
        self.pairs.iter().find(|(v, _)| *v == value).map(|(_, c)| *c)
    }

    /// Value string for a registry code.
    pub fn value(&self, code: i64) -> Option<&'static str> {
        self.pairs.iter().find(|(_, c)| *c == code).map(|(v, _)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All value strings in the table, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(v, _)| *v)
    }
}

/// Per-kind mapping data. Each variant carries exactly what its encoding
/// discipline needs, so invalid combinations are unrepresentable.
#[derive(Debug, Clone)]
enum FieldKind {
    /// Flat string field.
    String { key: &'static str },
    /// Flat numeric field; integral values are written without a fraction.
    Number { key: &'static str },
    /// Flat `"Y"`/`"N"` boolean field.
    Checkmark { key: &'static str },
    /// Nested object traversal through two or more keys.
    DictPath {
        keys: &'static [&'static str],
        nested_checkmark: bool,
    },
    /// Two-key enum pair: `[code_key, desc_key]`. Only the code is written.
    Enum {
        keys: [&'static str; 2],
        table: EnumTable,
    },
    /// Flat array field, read and embedded verbatim.
    List { key: &'static str },
}

/// Descriptor for one semantic field of a registry entity.
///
/// Constructed once as static catalog data and immutable afterwards; safe
/// to share across threads.
#[derive(Debug, Clone)]
pub struct FieldMap {
    name: &'static str,
    kind: FieldKind,
}

impl FieldMap {
    pub fn string(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String { key },
        }
    }

    pub fn number(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number { key },
        }
    }

    pub fn checkmark(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Checkmark { key },
        }
    }

    pub fn list(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::List { key },
        }
    }

    /// Nested dict field. Catalog bug to pass fewer than two keys.
    pub fn dict_path(name: &'static str, keys: &'static [&'static str]) -> Self {
        assert!(keys.len() >= 2, "dict field '{name}' needs at least 2 keys");
        Self {
            name,
            kind: FieldKind::DictPath {
                keys,
                nested_checkmark: false,
            },
        }
    }

    /// Nested dict field whose final value is itself `"Y"`/`"N"` encoded.
    pub fn nested_checkmark(name: &'static str, keys: &'static [&'static str]) -> Self {
        assert!(keys.len() >= 2, "dict field '{name}' needs at least 2 keys");
        Self {
            name,
            kind: FieldKind::DictPath {
                keys,
                nested_checkmark: true,
            },
        }
    }

    /// Registry enum field. Catalog bug to pass an empty table.
    pub fn enumerated(
        name: &'static str,
        code_key: &'static str,
        desc_key: &'static str,
        table: EnumTable,
    ) -> Self {
        assert!(!table.is_empty(), "enum field '{name}' needs a table");
        Self {
            name,
            kind: FieldKind::Enum {
                keys: [code_key, desc_key],
                table,
            },
        }
    }

    /// Semantic name of this field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Enum table, when this is an enum field.
    pub fn enum_table(&self) -> Option<&EnumTable> {
        match &self.kind {
            FieldKind::Enum { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Read this field out of a registry document.
    ///
    /// Flat kinds error when the key is absent. Dict and enum kinds return
    /// `Ok(None)` when any intermediate key is missing or the traversal hits
    /// a non-object value; the registry omits nested objects for unset
    /// relations, so that is not an error.
    pub fn read(&self, doc: &Value) -> Result<Option<Value>, FieldMapError> {
        match &self.kind {
            FieldKind::String { key } | FieldKind::Number { key } | FieldKind::List { key } => {
                self.read_flat(doc, key).map(Some)
            }
            FieldKind::Checkmark { key } => {
                let value = self.read_flat(doc, key)?;
                Ok(Some(Value::Bool(is_checked(&value))))
            }
            FieldKind::DictPath {
                keys,
                nested_checkmark,
            } => Ok(read_path(doc, keys, *nested_checkmark)),
            FieldKind::Enum { keys, .. } => Ok(read_path(doc, &keys[..], false)),
        }
    }

    /// Encode a value as a registry patch operation.
    ///
    /// Strict on the write side: enum values outside the table and
    /// non-boolean checkmark inputs fail rather than dropping the field.
    pub fn patch_op(&self, value: &Value) -> Result<PatchOp, FieldMapError> {
        match &self.kind {
            FieldKind::String { key } => Ok(PatchOp::replace(*key, Value::String(stringify(value)))),
            FieldKind::Number { key } => Ok(PatchOp::replace(*key, self.encode_number(value)?)),
            FieldKind::Checkmark { key } => {
                let checked = value.as_bool().ok_or_else(|| FieldMapError::NotABoolean {
                    field: self.name,
                    value: value.clone(),
                })?;
                Ok(PatchOp::replace(*key, yn(checked)))
            }
            FieldKind::Enum { keys, table } => {
                let code = self.encode_enum(table, value)?;
                Ok(PatchOp::replace(keys[0], Value::from(code)))
            }
            FieldKind::DictPath { .. } | FieldKind::List { .. } => {
                Err(FieldMapError::NotPatchable { field: self.name })
            }
        }
    }

    /// Encode a value as a creation-time JSON sub-document.
    ///
    /// Unlike a patch, creation nests the value inside a full object graph,
    /// so dict kinds fold their path into nested single-key objects. Enum
    /// kinds omit the code entirely for falsy input; the registry accepts
    /// absence.
    pub fn make_fragment(&self, value: &Value) -> Result<Value, FieldMapError> {
        match &self.kind {
            FieldKind::String { key } | FieldKind::Number { key } | FieldKind::List { key } => {
                Ok(single(key, value.clone()))
            }
            FieldKind::Checkmark { key } => {
                let checked = value.as_bool().ok_or_else(|| FieldMapError::NotABoolean {
                    field: self.name,
                    value: value.clone(),
                })?;
                Ok(single(key, yn(checked)))
            }
            FieldKind::DictPath { keys, .. } => {
                let mut nested = single(keys[keys.len() - 1], value.clone());
                for key in keys[..keys.len() - 1].iter().rev() {
                    nested = single(key, nested);
                }
                Ok(nested)
            }
            FieldKind::Enum { keys, table } => {
                if is_falsy(value) {
                    return Ok(Value::Object(Map::new()));
                }
                let code = self.encode_enum(table, value)?;
                Ok(single(keys[0], Value::from(code)))
            }
        }
    }

    fn read_flat(&self, doc: &Value, key: &'static str) -> Result<Value, FieldMapError> {
        doc.get(key)
            .cloned()
            .ok_or_else(|| FieldMapError::MissingKey {
                field: self.name,
                key: key.to_string(),
            })
    }

    fn encode_number(&self, value: &Value) -> Result<Value, FieldMapError> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| FieldMapError::NotANumber {
            field: self.name,
            value: stringify(value),
        })?;
        if parsed.fract() == 0.0 {
            Ok(Value::from(parsed as i64))
        } else {
            Ok(Value::from(parsed))
        }
    }

    fn encode_enum(&self, table: &EnumTable, value: &Value) -> Result<i64, FieldMapError> {
        value
            .as_str()
            .and_then(|s| table.code(s))
            .ok_or_else(|| FieldMapError::ValueNotInEnum {
                field: self.name,
                value: stringify(value),
            })
    }
}

/// Closed mapping from semantic name to [`FieldMap`], one per entity kind.
///
/// Static data, shared read-only by every entity instance of that kind.
#[derive(Debug)]
pub struct FieldMapTable {
    entity: &'static str,
    maps: Vec<FieldMap>,
}

impl FieldMapTable {
    pub fn new(entity: &'static str, maps: Vec<FieldMap>) -> Self {
        Self { entity, maps }
    }

    /// Look up a field by its semantic name.
    pub fn get(&self, name: &str) -> Result<&FieldMap, FieldMapError> {
        self.maps
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| FieldMapError::UnknownField {
                entity: self.entity,
                key: name.to_string(),
            })
    }

    /// Read a field from a document in one step.
    pub fn read(&self, name: &str, doc: &Value) -> Result<Option<Value>, FieldMapError> {
        self.get(name)?.read(doc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMap> {
        self.maps.iter()
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn yn(checked: bool) -> Value {
    Value::String(if checked { "Y" } else { "N" }.to_string())
}

fn is_checked(value: &Value) -> bool {
    value.as_str() == Some("Y")
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Registry falsiness: null, false, empty string, or zero.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn read_path(doc: &Value, keys: &[&str], nested_checkmark: bool) -> Option<Value> {
    let mut current = doc;
    for key in keys {
        current = current.get(key)?;
    }
    if nested_checkmark {
        Some(Value::Bool(is_checked(current)))
    } else {
        Some(current.clone())
    }
}
