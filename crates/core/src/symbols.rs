//! Symbol table read from a JSON dump, for hosts without a native loader.

use crate::error::Result;
use memberdoc_api::SymbolTable;
use memberdoc_api::models::{MemberDescriptor, TypeDescriptor};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SymbolDump {
    /// Location of the compiled unit the dump was taken from.
    pub owner: PathBuf,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

#[derive(Debug, Clone)]
pub struct JsonSymbolTable {
    dump: SymbolDump,
}

impl JsonSymbolTable {
    pub fn new(dump: SymbolDump) -> Self {
        Self { dump }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn dump(&self) -> &SymbolDump {
        &self.dump
    }

    /// JSON schema of the dump format.
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(SymbolDump)
    }
}

impl SymbolTable for JsonSymbolTable {
    fn owner(&self) -> &Path {
        &self.dump.owner
    }

    fn exported_types(&self) -> Vec<TypeDescriptor> {
        self.dump.types.iter().map(|t| t.descriptor.clone()).collect()
    }

    fn members_of(&self, ty: &TypeDescriptor) -> Vec<MemberDescriptor> {
        self.dump
            .types
            .iter()
            .find(|t| &t.descriptor == ty)
            .map(|t| t.members.clone())
            .unwrap_or_default()
    }
}
