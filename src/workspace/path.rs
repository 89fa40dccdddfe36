use itertools::Itertools;
use std::fmt;

/// One step from a parent container into a child block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// `None` for the workspace's top-level sequence.
    pub slot: Option<String>,
    pub index: usize,
}

/// Location of a block inside a workspace, rendered as `workspace[0].then[1].else[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlockPath {
    segments: Vec<PathSegment>,
}

impl BlockPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th top-level block.
    pub fn top_level(index: usize) -> Self {
        Self {
            segments: vec![PathSegment { slot: None, index }],
        }
    }

    /// Path of the `index`-th block inside `slot` of the block at `self`.
    pub fn child(&self, slot: &str, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment {
            slot: Some(slot.to_string()),
            index,
        });
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .segments
            .iter()
            .map(|segment| match &segment.slot {
                Some(slot) => format!(".{}[{}]", slot, segment.index),
                None => format!("[{}]", segment.index),
            })
            .join("");
        write!(f, "workspace{}", rendered)
    }
}
