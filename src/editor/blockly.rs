use crate::error::CompileError;
use crate::workspace::{Block, IntoWorkspace, Workspace};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level Blockly workspace serialization (`Blockly.serialization.workspaces.save`).
///
/// Only the `blocks` section is read; variables, comments and other plugin state
/// are ignored. A document without a `blocks` section is an empty workspace.
#[derive(Debug, Deserialize)]
pub struct BlocklyDocument {
    #[serde(default)]
    pub blocks: Option<BlocklyBlockList>,
}

#[derive(Debug, Deserialize)]
pub struct BlocklyBlockList {
    #[serde(default, alias = "languageVersion")]
    pub language_version: u32,
    #[serde(default)]
    pub blocks: Vec<BlocklyBlock>,
}

/// One serialized block, with statement chains linked through `next`.
#[derive(Debug, Deserialize)]
pub struct BlocklyBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub inputs: BTreeMap<String, BlocklyConnection>,
    #[serde(default)]
    pub next: Option<BlocklyConnection>,
}

/// A connection to a child block. A real block takes precedence over its shadow.
#[derive(Debug, Deserialize)]
pub struct BlocklyConnection {
    #[serde(default)]
    pub block: Option<Box<BlocklyBlock>>,
    #[serde(default)]
    pub shadow: Option<Box<BlocklyBlock>>,
}

impl BlocklyConnection {
    fn into_block(self) -> Option<BlocklyBlock> {
        self.block.or(self.shadow).map(|b| *b)
    }
}

impl BlocklyDocument {
    /// Parses a saved document. Every `next` link nests the following block two
    /// levels deeper, so the nesting limit is lifted and the stack grows on demand.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut json_de = serde_json::Deserializer::from_str(json);
        json_de.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut json_de))?;
        json_de.end()?;
        Ok(document)
    }
}

impl IntoWorkspace for BlocklyDocument {
    fn into_workspace(self) -> Result<Workspace, CompileError> {
        let Some(list) = self.blocks else {
            return Ok(Workspace::default());
        };
        tracing::debug!(
            language_version = list.language_version,
            top_level_chains = list.blocks.len(),
            "converting Blockly document"
        );

        let mut blocks = Vec::new();
        for top in list.blocks {
            blocks.extend(flatten_chain(top)?);
        }
        Ok(Workspace::new(blocks))
    }
}

/// Walks a `next` chain iteratively, converting each block in order.
fn flatten_chain(first: BlocklyBlock) -> Result<Vec<Block>, CompileError> {
    let mut chain = Vec::new();
    let mut current = Some(first);
    while let Some(mut raw) = current {
        current = raw.next.take().and_then(BlocklyConnection::into_block);
        chain.push(convert_block(raw)?);
    }
    Ok(chain)
}

/// Field and input names are lower-cased so that `CONDITION` in the editor
/// matches the `condition` field of the block schema.
fn convert_block(raw: BlocklyBlock) -> Result<Block, CompileError> {
    let mut block = Block::new(raw.block_type);
    block.id = raw.id;

    for (name, value) in raw.fields {
        let key = name.to_lowercase();
        let text = scalar_to_string(&value).ok_or_else(|| {
            CompileError::MalformedInput(format!(
                "field '{}' of block '{}' holds a non-scalar value",
                name, block.block_type
            ))
        })?;
        if block.fields.insert(key, text).is_some() {
            return Err(duplicate_name("field", &name, &block));
        }
    }

    for (name, connection) in raw.inputs {
        let Some(child) = connection.into_block() else {
            continue;
        };
        let children = flatten_chain(child)?;
        if block.slots.insert(name.to_lowercase(), children).is_some() {
            return Err(duplicate_name("input", &name, &block));
        }
    }

    Ok(block)
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn duplicate_name(what: &str, name: &str, block: &Block) -> CompileError {
    CompileError::MalformedInput(format!(
        "{} '{}' of block '{}' collides with another {} when names are lower-cased",
        what, name, block.block_type, what
    ))
}
