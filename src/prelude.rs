//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the lotflux crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use lotflux::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let blocks_json = std::fs::read_to_string("path/to/workspace.json")?;
//!
//! let compiler = Compiler::builder().build();
//! let code = compiler.compile_blockly_json(&blocks_json)?;
//!
//! // The text parses back into the program that was emitted.
//! let program = parse_program(&code)?;
//! println!("{}", program.display_tree());
//! # Ok(())
//! # }
//! ```

// Core compilation
pub use crate::compiler::{BlockKind, Compiler, CompilerBuilder, CompilerOptions};

// DSL syntax tree
pub use crate::ast::{ActionDecl, Duration, Program, Statement, TimeUnit};

// Block graph model and inbound formats
pub use crate::editor::{BlocklyDocument, InputFormat, parse_workspace};
pub use crate::workspace::{Block, BlockPath, IntoWorkspace, Workspace};

// DSL reader
pub use crate::parser::{Parser, parse_program};

// Error types
pub use crate::error::{CompileError, CompileErrorKind, DurationError, ParseError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
