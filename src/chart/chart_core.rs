use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{ChartConfig, ChartConfigPatch};
use crate::error::{ChartError, ChartResult};
use crate::events::{ChartEvent, ChartEventKind, EventChannel, ListenerId};
use crate::surface::{Document, DrawingHost, NodeId};
use crate::tooltip::{SharedHost, Tooltip, TooltipRegistry};

use super::ChartLifecycle;

pub const SURFACE_TAG: &str = "svg";
pub const CONTENT_GROUP_TAG: &str = "g";
pub const CONTENT_GROUP_CLASS: &str = "chart-area";

/// Handles produced by one surface rebuild.
///
/// Both become stale on the next `update_config`; re-read them from
/// `ChartCore` instead of keeping copies across a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceHandles {
    pub surface: NodeId,
    pub content_group: NodeId,
}

/// Lifecycle state shared by every chart variant.
///
/// Owns the effective configuration, the data sequence, the live surface
/// handles and the event channel. Concrete charts embed one and draw into
/// `content_group()`.
pub struct ChartCore<D, H: DrawingHost = Document> {
    tooltips: Rc<TooltipRegistry<H>>,
    container: NodeId,
    config: ChartConfig,
    data: Vec<D>,
    surface: Option<SurfaceHandles>,
    events: EventChannel,
    lifecycle: ChartLifecycle,
}

impl<D, H: DrawingHost> ChartCore<D, H> {
    /// Creates an unsurfaced chart bound to `container`.
    ///
    /// The container is not validated and no element is created until the
    /// first `update_config`.
    pub fn new(
        tooltips: Rc<TooltipRegistry<H>>,
        container: NodeId,
        config: ChartConfigPatch,
    ) -> Self {
        let config = ChartConfig::from_patch(config);
        debug!(
            container = %container,
            width = config.width,
            height = config.height,
            "construct chart"
        );
        Self {
            tooltips,
            container,
            config,
            data: Vec::new(),
            surface: None,
            events: EventChannel::new(),
            lifecycle: ChartLifecycle::Uninitialized,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &[D] {
        &self.data
    }

    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    #[must_use]
    pub fn host(&self) -> &SharedHost<H> {
        self.tooltips.host()
    }

    #[must_use]
    pub fn lifecycle(&self) -> ChartLifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn surface(&self) -> Option<SurfaceHandles> {
        self.surface
    }

    /// Plotting width, recomputed from the current config on every call.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.config.inner_width()
    }

    /// Plotting height, recomputed from the current config on every call.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.config.inner_height()
    }

    /// Replaces the data sequence verbatim. Never triggers a redraw.
    ///
    /// A destroyed chart still stores the data but notifies nobody.
    pub fn set_data(&mut self, data: Vec<D>) -> &mut Self {
        if self.lifecycle.is_destroyed() {
            warn!(len = data.len(), "set_data on a destroyed chart");
        }
        self.data = data;
        self.lifecycle = self.lifecycle.after_data_set();
        trace!(len = self.data.len(), "set chart data");
        self.events.emit(ChartEvent::DataUpdated {
            len: self.data.len(),
        });
        self
    }

    /// Shallow-merges `patch` over the current config and rebuilds the surface.
    ///
    /// Any previously rendered content is discarded. The merged config is only
    /// committed once the rebuild succeeds; on failure the chart keeps its
    /// previous config and reports whatever surface is still attached.
    pub fn update_config(&mut self, patch: ChartConfigPatch) -> ChartResult<&mut Self> {
        if self.lifecycle.is_destroyed() {
            return Err(ChartError::Destroyed);
        }

        let config = self.config.clone().merged(patch);
        debug!(
            width = config.width,
            height = config.height,
            inner_width = config.inner_width(),
            inner_height = config.inner_height(),
            "merged chart config"
        );
        if !config.has_plot_area() {
            warn!(
                inner_width = config.inner_width(),
                inner_height = config.inner_height(),
                "margins leave no plotting area"
            );
        }

        let handles = match self.build_surface(&config) {
            Ok(handles) => handles,
            Err(err) => {
                self.recover_from_failed_rebuild();
                warn!(error = %err, "surface rebuild failed; config left unchanged");
                return Err(err);
            }
        };

        self.config = config;
        self.surface = Some(handles);
        self.lifecycle = ChartLifecycle::Surfaced;
        debug!(
            surface = %handles.surface,
            content_group = %handles.content_group,
            "rebuilt drawing surface"
        );
        self.events.emit(ChartEvent::ConfigUpdated);
        self.events.emit(ChartEvent::SurfaceRebuilt {
            width: self.config.width,
            height: self.config.height,
        });
        Ok(self)
    }

    /// Drops whatever surface the container holds and creates a fresh one
    /// with its margin-offset content group.
    fn build_surface(&self, config: &ChartConfig) -> ChartResult<SurfaceHandles> {
        let mut host = self.tooltips.host().borrow_mut();
        host.remove_first(self.container, SURFACE_TAG)?;

        let surface = host
            .append_node(self.container, SURFACE_TAG)?
            .attr("width", config.width)?
            .attr("height", config.height)?;
        let surface_id = surface.id();
        let content_group = surface
            .append(CONTENT_GROUP_TAG)?
            .class(CONTENT_GROUP_CLASS)?
            .translate(config.margin.left, config.margin.top)?
            .id();
        Ok(SurfaceHandles {
            surface: surface_id,
            content_group,
        })
    }

    /// Keeps the previous handles only if their content group survived.
    fn recover_from_failed_rebuild(&mut self) {
        let host = self.tooltips.host().borrow();
        self.surface = self
            .surface
            .filter(|handles| host.contains(handles.content_group));
        if self.surface.is_none() {
            self.lifecycle = ChartLifecycle::Uninitialized;
        }
    }

    /// Live content group to draw into.
    ///
    /// Fails fast when the chart was destroyed, when no surface was built
    /// yet, or when the host dropped the group behind the chart's back.
    pub fn content_group(&self) -> ChartResult<NodeId> {
        if self.lifecycle.is_destroyed() {
            return Err(ChartError::Destroyed);
        }
        let handles = self
            .surface
            .filter(|_| self.lifecycle.has_surface())
            .ok_or(ChartError::SurfaceNotInitialized)?;
        if !self.tooltips.host().borrow().contains(handles.content_group) {
            return Err(ChartError::StaleNode {
                id: handles.content_group,
            });
        }
        Ok(handles.content_group)
    }

    /// Records a completed full draw and notifies listeners.
    pub fn mark_rendered(&mut self) {
        self.lifecycle = ChartLifecycle::Rendered;
        self.events.emit(ChartEvent::Rendered);
    }

    /// Records a completed incremental redraw and notifies listeners.
    pub fn mark_updated(&mut self) {
        self.lifecycle = ChartLifecycle::Rendered;
        self.events.emit(ChartEvent::Updated);
    }

    pub fn on<F>(&mut self, kind: ChartEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Publishes `event`. Does nothing once the chart is destroyed.
    pub fn emit(&mut self, event: ChartEvent) {
        self.events.emit(event);
    }

    #[must_use]
    pub fn listener_count(&self, kind: ChartEventKind) -> usize {
        self.events.listener_count(kind)
    }

    /// The tooltip shared by every chart of this host.
    pub fn setup_tooltip(&self) -> ChartResult<Tooltip<H>> {
        self.tooltips.tooltip()
    }

    /// Shows the shared tooltip for datum `index` and emits `PointHovered`.
    pub fn hover_point(&mut self, index: usize, text: &str, x: f64, y: f64) -> ChartResult<()> {
        if self.lifecycle.is_destroyed() {
            return Err(ChartError::Destroyed);
        }
        self.setup_tooltip()?.show(text, x, y)?;
        self.events.emit(ChartEvent::PointHovered { index });
        Ok(())
    }

    /// Hides the shared tooltip and emits `PointLeft`.
    pub fn leave_point(&mut self) -> ChartResult<()> {
        if self.lifecycle.is_destroyed() {
            return Err(ChartError::Destroyed);
        }
        self.setup_tooltip()?.hide()?;
        self.events.emit(ChartEvent::PointLeft);
        Ok(())
    }

    /// Removes the surface from the container and detaches every listener.
    ///
    /// Repeated calls are no-ops. The shared tooltip is left in place. Later
    /// subscriptions are dropped and nothing is emitted again.
    pub fn destroy(&mut self) {
        if self.lifecycle.is_destroyed() {
            warn!(container = %self.container, "destroy on an already destroyed chart");
            return;
        }

        let removed = self
            .tooltips
            .host()
            .borrow_mut()
            .remove_first(self.container, SURFACE_TAG);
        if let Err(err) = removed {
            warn!(error = %err, "skipping surface removal during destroy");
        }
        self.surface = None;
        self.events.close();
        self.lifecycle = ChartLifecycle::Destroyed;
        debug!(container = %self.container, "destroyed chart");
    }
}

impl<D, H: DrawingHost> std::fmt::Debug for ChartCore<D, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartCore")
            .field("container", &self.container)
            .field("config", &self.config)
            .field("data_len", &self.data.len())
            .field("surface", &self.surface)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
