use std::fmt::Display;

use crate::error::ChartResult;

use super::{DrawingHost, NodeId};

/// Chainable attribute/style writer for one element.
///
/// Every step propagates host errors, so a chain reads
/// `host.append_node(parent, "g")?.class("chart-area")?.translate(60.0, 20.0)?`.
pub struct NodeBuilder<'a, H: DrawingHost> {
    host: &'a mut H,
    node: NodeId,
}

impl<'a, H: DrawingHost> NodeBuilder<'a, H> {
    pub fn new(host: &'a mut H, node: NodeId) -> Self {
        Self { host, node }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.node
    }

    pub fn attr(self, name: &str, value: impl Display) -> ChartResult<Self> {
        self.host.set_attr(self.node, name, value.to_string())?;
        Ok(self)
    }

    pub fn style(self, name: &str, value: impl Display) -> ChartResult<Self> {
        self.host.set_style(self.node, name, value.to_string())?;
        Ok(self)
    }

    pub fn class(self, name: &str) -> ChartResult<Self> {
        self.attr("class", name)
    }

    pub fn text(self, text: impl Display) -> ChartResult<Self> {
        self.host.set_text(self.node, text.to_string())?;
        Ok(self)
    }

    pub fn translate(self, dx: f64, dy: f64) -> ChartResult<Self> {
        self.host.translate(self.node, dx, dy)?;
        Ok(self)
    }

    /// Appends a child and moves the builder onto it.
    pub fn append(self, tag: &str) -> ChartResult<Self> {
        let child = self.host.append(self.node, tag)?;
        Ok(Self {
            host: self.host,
            node: child,
        })
    }
}
