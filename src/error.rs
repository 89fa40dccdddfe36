use crate::workspace::BlockPath;
use thiserror::Error;

/// Errors that can occur while compiling a block workspace into DSL text.
///
/// Any of these aborts the whole compilation; no partial output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Malformed block graph: {0}")]
    MalformedInput(String),

    #[error("Invalid compiler configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Block at {path} has an unknown block type: '{type_name}'")]
    UnknownBlockType { path: BlockPath, type_name: String },

    #[error("Block '{block_type}' at {path} is missing required field '{field}'")]
    MissingRequiredField {
        path: BlockPath,
        block_type: String,
        field: String,
    },

    #[error("Block '{block_type}' at {path} is missing required slot '{slot}' (or it is empty)")]
    MissingRequiredSlot {
        path: BlockPath,
        block_type: String,
        slot: String,
    },

    #[error("Block '{block_type}' at {path} has a field '{field}' that its type does not declare")]
    UnknownField {
        path: BlockPath,
        block_type: String,
        field: String,
    },

    #[error("Block '{block_type}' at {path} has a slot '{slot}' that its type does not declare")]
    UnknownSlot {
        path: BlockPath,
        block_type: String,
        slot: String,
    },

    #[error("Field '{field}' of block at {path} is invalid: {message}")]
    InvalidFieldValue {
        path: BlockPath,
        field: String,
        message: String,
    },

    #[error("Block '{block_type}' at {path} is not allowed here: {message}")]
    MisplacedBlock {
        path: BlockPath,
        block_type: String,
        message: String,
    },
}

/// The category of a `CompileError`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileErrorKind {
    MalformedInput,
    InvalidConfiguration,
    UnknownBlockType,
    MissingRequiredField,
    MissingRequiredSlot,
    UnknownField,
    UnknownSlot,
    InvalidFieldValue,
    MisplacedBlock,
}

impl CompileError {
    pub fn kind(&self) -> CompileErrorKind {
        match self {
            CompileError::MalformedInput(_) => CompileErrorKind::MalformedInput,
            CompileError::InvalidConfiguration(_) => CompileErrorKind::InvalidConfiguration,
            CompileError::UnknownBlockType { .. } => CompileErrorKind::UnknownBlockType,
            CompileError::MissingRequiredField { .. } => CompileErrorKind::MissingRequiredField,
            CompileError::MissingRequiredSlot { .. } => CompileErrorKind::MissingRequiredSlot,
            CompileError::UnknownField { .. } => CompileErrorKind::UnknownField,
            CompileError::UnknownSlot { .. } => CompileErrorKind::UnknownSlot,
            CompileError::InvalidFieldValue { .. } => CompileErrorKind::InvalidFieldValue,
            CompileError::MisplacedBlock { .. } => CompileErrorKind::MisplacedBlock,
        }
    }

    /// The offending block, if the error is tied to one.
    pub fn path(&self) -> Option<&BlockPath> {
        match self {
            CompileError::MalformedInput(_) | CompileError::InvalidConfiguration(_) => None,
            CompileError::UnknownBlockType { path, .. }
            | CompileError::MissingRequiredField { path, .. }
            | CompileError::MissingRequiredSlot { path, .. }
            | CompileError::UnknownField { path, .. }
            | CompileError::UnknownSlot { path, .. }
            | CompileError::InvalidFieldValue { path, .. }
            | CompileError::MisplacedBlock { path, .. } => Some(path),
        }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::MalformedInput(err.to_string())
    }
}

/// Errors raised while reading LOT Flux DSL text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: {message}")]
    InvalidIndentation { line: usize, message: String },

    #[error("line {line}: invalid string literal: {message}")]
    InvalidStringLiteral { line: usize, message: String },

    #[error("line {line}: invalid duration '{text}'")]
    InvalidDuration { line: usize, text: String },

    #[error("line {line}: '{keyword}' must be followed by at least one statement")]
    EmptyBlock { line: usize, keyword: &'static str },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidIndentation { line, .. }
            | ParseError::InvalidStringLiteral { line, .. }
            | ParseError::InvalidDuration { line, .. }
            | ParseError::EmptyBlock { line, .. } => *line,
        }
    }

    pub(crate) fn unexpected(line: usize, expected: &str, found: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            line,
            expected: expected.to_string(),
            found: found.into(),
        }
    }
}

/// Errors raised when a trigger interval such as `15s` cannot be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("'{0}' does not start with a whole number")]
    MissingAmount(String),

    #[error("'{0}' is out of range")]
    Overflow(String),

    #[error("unknown time unit '{unit}' (expected ms, s, m or h)")]
    UnknownUnit { unit: String },

    #[error("a trigger interval must be greater than zero")]
    Zero,
}
