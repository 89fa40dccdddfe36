use crate::ast::{Duration, Program};
use crate::editor::BlocklyDocument;
use crate::error::CompileError;
use crate::workspace::{IntoWorkspace, Workspace};
use ahash::AHashMap;
use serde::Deserialize;
use std::collections::BTreeMap;

mod builder;
pub mod emitter;
pub mod schema;

use builder::ProgramBuilder;
use emitter::Emitter;
pub use emitter::MAX_INDENT_WIDTH;
pub use schema::{BlockKind, BlockSchema, FieldSpec, SlotSpec};

/// Name and trigger of the action that wraps loose top-level statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAction {
    pub name: String,
    pub every: Duration,
}

impl Default for DefaultAction {
    fn default() -> Self {
        Self {
            name: "MyAction".to_string(),
            every: Duration::default(),
        }
    }
}

/// File-friendly compiler configuration. Every key is optional.
///
/// ```json
/// {
///   "default_action_name": "Thermostat",
///   "default_trigger": "30s",
///   "indent_width": 2,
///   "type_mappings": { "lot_if": "if", "lot_publish": "publish" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    pub default_action_name: String,
    pub default_trigger: Duration,
    pub indent_width: usize,
    pub type_mappings: BTreeMap<String, String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        let action = DefaultAction::default();
        Self {
            default_action_name: action.name,
            default_trigger: action.every,
            indent_width: 2,
            type_mappings: BTreeMap::new(),
        }
    }
}

impl CompilerOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compiles block workspaces into LOT Flux DSL text.
///
/// A `Compiler` holds only configuration; it is immutable once built and every
/// compilation is independent of the previous ones.
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: AHashMap<String, BlockKind>,
    default_action: DefaultAction,
    emitter: Emitter,
}

#[derive(Debug)]
pub struct CompilerBuilder {
    registry: AHashMap<String, BlockKind>,
    default_action: DefaultAction,
    indent_width: usize,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, BlockKind> = AHashMap::new();
        schema::register_default_kinds(&mut registry);
        Self {
            registry,
            default_action: DefaultAction::default(),
            indent_width: 2,
        }
    }

    /// Starts from a loaded options file. An indent width outside
    /// `1..=MAX_INDENT_WIDTH` is rejected rather than adjusted.
    pub fn from_options(options: CompilerOptions) -> Result<Self, CompileError> {
        if !(1..=MAX_INDENT_WIDTH).contains(&options.indent_width) {
            return Err(CompileError::InvalidConfiguration(format!(
                "indent_width must be between 1 and {}, got {}",
                MAX_INDENT_WIDTH, options.indent_width
            )));
        }
        let mut builder = Self::new()
            .with_default_action(options.default_action_name, options.default_trigger)
            .with_indent_width(options.indent_width);
        for (user_type, canonical_type) in &options.type_mappings {
            builder = builder.with_type_mapping(user_type, canonical_type);
        }
        Ok(builder)
    }

    /// Sets the action that wraps statements placed directly on the workspace.
    pub fn with_default_action(mut self, name: impl Into<String>, every: Duration) -> Self {
        self.default_action = DefaultAction {
            name: name.into(),
            every,
        };
        self
    }

    /// Lets an editor-specific block type (e.g. `lot_if`) stand for a built-in kind.
    /// Mappings onto unknown kinds are ignored.
    pub fn with_type_mapping(mut self, user_type_name: &str, canonical_type_name: &str) -> Self {
        match BlockKind::from_type_name(canonical_type_name) {
            Some(kind) => {
                self.registry.insert(user_type_name.to_string(), kind);
            }
            None => tracing::warn!(
                user_type = user_type_name,
                canonical_type = canonical_type_name,
                "ignoring type mapping onto an unknown block kind"
            ),
        }
        self
    }

    /// Spaces per nesting level, clamped to `1..=MAX_INDENT_WIDTH`.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width.clamp(1, MAX_INDENT_WIDTH);
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            registry: self.registry,
            default_action: self.default_action,
            emitter: Emitter::new(self.indent_width),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn indent_width(&self) -> usize {
        self.emitter.indent_width()
    }

    /// Validates the workspace and lowers it into a typed program without emitting text.
    pub fn lower(&self, workspace: &Workspace) -> Result<Program, CompileError> {
        tracing::debug!(
            top_level_blocks = workspace.blocks.len(),
            "lowering block workspace"
        );
        let builder = ProgramBuilder::new(&self.registry, &self.default_action);
        let program = builder.build_program(workspace)?;
        tracing::debug!(
            actions = program.actions.len(),
            statements = program.statement_count(),
            "lowering complete"
        );
        Ok(program)
    }

    /// Compiles a workspace into DSL source text.
    ///
    /// The whole program is lowered before any text is produced, so an error
    /// never leaves partial output behind.
    pub fn compile(&self, workspace: &Workspace) -> Result<String, CompileError> {
        let program = self.lower(workspace).inspect_err(|e| {
            tracing::debug!(error = %e, "compilation failed");
        })?;
        let code = self.emit(&program);
        tracing::info!(
            actions = program.actions.len(),
            bytes = code.len(),
            "compilation complete"
        );
        Ok(code)
    }

    /// Writes an already lowered program with this compiler's indentation.
    pub fn emit(&self, program: &Program) -> String {
        self.emitter.emit_program(program)
    }

    /// Converts any supported input format and compiles it.
    pub fn compile_from<W: IntoWorkspace>(&self, input: W) -> Result<String, CompileError> {
        let workspace = input.into_workspace()?;
        self.compile(&workspace)
    }

    /// Compiles the canonical JSON workspace format.
    pub fn compile_json(&self, json: &str) -> Result<String, CompileError> {
        let workspace = Workspace::from_json(json)?;
        self.compile(&workspace)
    }

    /// Compiles a Blockly workspace serialization.
    pub fn compile_blockly_json(&self, json: &str) -> Result<String, CompileError> {
        self.compile_from(BlocklyDocument::from_json(json)?)
    }
}
