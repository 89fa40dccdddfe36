use super::definition::Workspace;
use crate::error::CompileError;

/// A trait for editor serialization formats that can be converted into a `Workspace`.
///
/// This is the extension point that keeps the compiler independent of any one
/// visual editor. Implement it on the structs your editor's save format parses
/// into, and the compiler can process that format.
///
/// # Example
///
/// ```rust,no_run
/// use lotflux::prelude::*;
///
/// // 1. Define structs for your editor's format.
/// struct MyNode { kind: String, topic: String, payload: String }
/// struct MyDocument { nodes: Vec<MyNode> }
///
/// // 2. Implement `IntoWorkspace` for the top-level struct.
/// impl IntoWorkspace for MyDocument {
///     fn into_workspace(self) -> std::result::Result<Workspace, CompileError> {
///         let blocks = self
///             .nodes
///             .into_iter()
///             .map(|node| {
///                 Block::new(node.kind)
///                     .with_field("topic", node.topic)
///                     .with_field("payload", node.payload)
///             })
///             .collect();
///         Ok(Workspace::new(blocks))
///     }
/// }
/// ```
pub trait IntoWorkspace {
    /// Consumes the object and converts it into a canonical block workspace.
    ///
    /// Structural problems should be reported as `CompileError::MalformedInput`.
    fn into_workspace(self) -> Result<Workspace, CompileError>;
}

impl IntoWorkspace for Workspace {
    fn into_workspace(self) -> Result<Workspace, CompileError> {
        Ok(self)
    }
}
