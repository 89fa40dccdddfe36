use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete, canonical block graph assembled in the editor, ready for compilation.
/// This is the target structure for any inbound format conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A single visual block. The tree shape is enforced by ownership: a block owns its children.
///
/// Fields and slots are kept in ordered maps so that validation visits them in a
/// stable order; emission order is decided by the block kind, never by the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, Vec<Block>>,
}

impl Workspace {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Parses the canonical JSON form: `{"blocks": [{"type": "...", "fields": {}, "slots": {}}]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Block {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            id: None,
            fields: BTreeMap::new(),
            slots: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>, blocks: Vec<Block>) -> Self {
        self.slots.insert(name.into(), blocks);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn slot(&self, name: &str) -> Option<&[Block]> {
        self.slots.get(name).map(Vec::as_slice)
    }
}
