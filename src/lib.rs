//! # LOT Flux - Block Workspace to DSL Compiler
//!
//! **lotflux** turns the block graph a user assembles in a visual editor into
//! source text for the LOT Flux automation language: timed actions made of
//! conditionals and `PUBLISH TOPIC` statements.
//!
//! ## Core Workflow
//!
//! The compiler works on a canonical, format-agnostic `Workspace` model:
//!
//! 1.  **Load the graph**: read the editor's save output. Blockly JSON is supported
//!     out of the box through `BlocklyDocument`; other formats implement `IntoWorkspace`.
//! 2.  **Configure**: use `Compiler::builder()` to set the default action, block type
//!     aliases and indentation.
//! 3.  **Compile**: `Compiler::compile` validates the whole graph, lowers it into a
//!     typed `Program` and emits the text. Either the whole graph compiles or an
//!     error is returned and nothing is emitted.
//! 4.  **Read back** (optional): `parse_program` reads DSL text into the same `Program`.
//!
//! ## Quick Start
//!
//! ```rust
//! use lotflux::prelude::*;
//!
//! let workspace = Workspace::new(vec![
//!     Block::new("if")
//!         .with_field("condition", "temperature>30")
//!         .with_slot("then", vec![
//!             Block::new("publish")
//!                 .with_field("topic", "Devices/Heater")
//!                 .with_field("payload", "ON"),
//!         ])
//!         .with_slot("else", vec![
//!             Block::new("publish")
//!                 .with_field("topic", "Devices/Heater")
//!                 .with_field("payload", "OFF"),
//!         ]),
//! ]);
//!
//! let compiler = Compiler::builder()
//!     .with_default_action("MyAction", "15s".parse().unwrap())
//!     .build();
//! let code = compiler.compile(&workspace).unwrap();
//!
//! assert_eq!(
//!     code,
//!     "DEFINE ACTION MyAction ON EVERY 15s DO\n\
//!      IF temperature>30 THEN\n\
//!      \x20 PUBLISH TOPIC \"Devices/Heater\" \"ON\"\n\
//!      ELSE\n\
//!      \x20 PUBLISH TOPIC \"Devices/Heater\" \"OFF\"\n"
//! );
//! ```

pub mod ast;
pub mod compiler;
pub mod editor;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod workspace;

use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::workspace::Workspace;

/// Compiles a workspace with the default configuration (`MyAction`, every `15s`).
pub fn compile_workspace(workspace: &Workspace) -> Result<String, CompileError> {
    Compiler::default().compile(workspace)
}
