//! Inbound serialization formats produced by visual block editors.

pub mod blockly;

pub use blockly::*;

use crate::error::CompileError;
use crate::workspace::{IntoWorkspace, Workspace};

/// The serialized block-graph formats the crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// `Blockly.serialization.workspaces.save` output.
    #[default]
    Blockly,
    /// The crate's own `Workspace` JSON.
    Canonical,
}

/// Parses `json` in the given format into a canonical workspace.
pub fn parse_workspace(format: InputFormat, json: &str) -> Result<Workspace, CompileError> {
    match format {
        InputFormat::Blockly => BlocklyDocument::from_json(json)?.into_workspace(),
        InputFormat::Canonical => Ok(Workspace::from_json(json)?),
    }
}
