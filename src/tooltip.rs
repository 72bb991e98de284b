//! Shared hover tooltip.
//!
//! One overlay element is reused and repositioned by every chart attached to
//! the same host. Instead of hidden static state, the element lives behind a
//! `TooltipRegistry` that hosts create once and hand to each chart.
//!
//! The registry is `Rc`-based and single-threaded: the `OnceCell` check and
//! the element creation cannot interleave with another caller. A host that
//! renders from several threads needs an `Arc<Mutex<_>>` host and a
//! `OnceLock` registry instead.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::error::ChartResult;
use crate::surface::{DrawingHost, NodeId};

/// Host handle shared between charts, the tooltip registry and the embedder.
pub type SharedHost<H> = Rc<RefCell<H>>;

pub const TOOLTIP_CLASS: &str = "chart-tooltip";

const TOOLTIP_STYLES: [(&str, &str); 8] = [
    ("position", "absolute"),
    ("visibility", "hidden"),
    ("background", "rgba(0, 0, 0, 0.8)"),
    ("color", "white"),
    ("padding", "8px"),
    ("border-radius", "4px"),
    ("font-size", "12px"),
    ("pointer-events", "none"),
];

/// Lazily creates and then hands out the single tooltip element of a host.
pub struct TooltipRegistry<H: DrawingHost> {
    host: SharedHost<H>,
    element: OnceCell<NodeId>,
}

impl<H: DrawingHost> TooltipRegistry<H> {
    #[must_use]
    pub fn new(host: SharedHost<H>) -> Self {
        Self {
            host,
            element: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &SharedHost<H> {
        &self.host
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.element.get().is_some()
    }

    /// Returns the shared tooltip, creating it under the host root on first use.
    pub fn tooltip(&self) -> ChartResult<Tooltip<H>> {
        if let Some(&node) = self.element.get() {
            return Ok(Tooltip::new(self.host.clone(), node));
        }

        let node = create_tooltip_element(&mut *self.host.borrow_mut())?;
        debug!(%node, "created shared tooltip");
        let node = *self.element.get_or_init(|| node);
        Ok(Tooltip::new(self.host.clone(), node))
    }
}

impl<H: DrawingHost> std::fmt::Debug for TooltipRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipRegistry")
            .field("element", &self.element.get())
            .finish_non_exhaustive()
    }
}

fn create_tooltip_element<H: DrawingHost>(host: &mut H) -> ChartResult<NodeId> {
    let root = host.root();
    let mut node = host.append_node(root, "div")?.class(TOOLTIP_CLASS)?;
    for (name, value) in TOOLTIP_STYLES {
        node = node.style(name, value)?;
    }
    Ok(node.id())
}

/// Handle to the shared tooltip element.
pub struct Tooltip<H: DrawingHost> {
    host: SharedHost<H>,
    node: NodeId,
}

impl<H: DrawingHost> Tooltip<H> {
    fn new(host: SharedHost<H>, node: NodeId) -> Self {
        Self { host, node }
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Sets the content and moves the tooltip to page coordinates `(x, y)`.
    pub fn show(&self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let mut host = self.host.borrow_mut();
        host.edit(self.node)
            .text(text)?
            .style("left", format!("{x}px"))?
            .style("top", format!("{y}px"))?
            .style("visibility", "visible")?;
        Ok(())
    }

    pub fn hide(&self) -> ChartResult<()> {
        self.host
            .borrow_mut()
            .set_style(self.node, "visibility", "hidden".to_owned())
    }

    pub fn is_visible(&self) -> ChartResult<bool> {
        let visibility = self.host.borrow().style(self.node, "visibility")?;
        Ok(visibility.as_deref() == Some("visible"))
    }

    pub fn text(&self) -> ChartResult<Option<String>> {
        self.host.borrow().text(self.node)
    }
}

impl<H: DrawingHost> Clone for Tooltip<H> {
    fn clone(&self) -> Self {
        Self::new(self.host.clone(), self.node)
    }
}

/// Two handles are equal when they point at the same element of the same host.
impl<H: DrawingHost> PartialEq for Tooltip<H> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.host, &other.host) && self.node == other.node
    }
}

impl<H: DrawingHost> std::fmt::Debug for Tooltip<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip").field("node", &self.node).finish()
    }
}
