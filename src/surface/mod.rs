//! Drawing primitive boundary.
//!
//! Charts only need to select and remove elements under a container, append
//! elements with attributes and inline styles, and translate a group. The
//! `DrawingHost` trait captures exactly that, so a browser bridge, a native
//! scene graph, or the in-memory `Document` can sit behind a chart.

mod builder;
mod document;
mod markup;

pub use builder::NodeBuilder;
pub use document::{Document, Element};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Generational handle to one element owned by a `DrawingHost`.
///
/// Hosts may recycle storage of removed elements, but never the pair
/// `(index, generation)`: once an element is removed every copy of its
/// handle reports `ChartError::StaleNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Capability a host environment exposes to charts.
pub trait DrawingHost {
    /// Document-level attach point (the `body` of a browser document).
    fn root(&self) -> NodeId;

    fn contains(&self, node: NodeId) -> bool;

    /// First descendant of `scope` with the given tag, in document order.
    fn select_first(&self, scope: NodeId, tag: &str) -> ChartResult<Option<NodeId>>;

    /// All descendants of `scope` with the given tag, in document order.
    fn select_all(&self, scope: NodeId, tag: &str) -> ChartResult<Vec<NodeId>>;

    fn children(&self, node: NodeId) -> ChartResult<Vec<NodeId>>;

    fn append(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId>;

    /// Detaches `node` and drops its whole subtree.
    fn remove(&mut self, node: NodeId) -> ChartResult<()>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: String) -> ChartResult<()>;

    fn attr(&self, node: NodeId, name: &str) -> ChartResult<Option<String>>;

    fn set_style(&mut self, node: NodeId, name: &str, value: String) -> ChartResult<()>;

    fn style(&self, node: NodeId, name: &str) -> ChartResult<Option<String>>;

    fn set_text(&mut self, node: NodeId, text: String) -> ChartResult<()>;

    fn text(&self, node: NodeId) -> ChartResult<Option<String>>;

    /// Applies a 2-D translation transform.
    fn translate(&mut self, node: NodeId, dx: f64, dy: f64) -> ChartResult<()> {
        self.set_attr(node, "transform", format!("translate({dx}, {dy})"))
    }

    /// Removes the first `tag` element under `scope`, returning whether one existed.
    fn remove_first(&mut self, scope: NodeId, tag: &str) -> ChartResult<bool> {
        match self.select_first(scope, tag)? {
            Some(node) => {
                self.remove(node)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear_children(&mut self, node: NodeId) -> ChartResult<()> {
        for child in self.children(node)? {
            self.remove(child)?;
        }
        Ok(())
    }

    /// Appends a child and returns a fluent builder positioned on it.
    fn append_node(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeBuilder<'_, Self>>
    where
        Self: Sized,
    {
        let node = self.append(parent, tag)?;
        Ok(NodeBuilder::new(self, node))
    }

    /// Returns a fluent builder positioned on an existing element.
    fn edit(&mut self, node: NodeId) -> NodeBuilder<'_, Self>
    where
        Self: Sized,
    {
        NodeBuilder::new(self, node)
    }
}
