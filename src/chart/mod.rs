mod chart_core;
mod lifecycle;

pub use chart_core::{
    CONTENT_GROUP_CLASS, CONTENT_GROUP_TAG, ChartCore, SURFACE_TAG, SurfaceHandles,
};
pub use lifecycle::ChartLifecycle;

use crate::config::{ChartConfig, ChartConfigPatch};
use crate::error::ChartResult;
use crate::events::{ChartEvent, ChartEventKind, ListenerId};
use crate::surface::DrawingHost;
use crate::tooltip::Tooltip;

/// Contract implemented by every chart variant.
///
/// Variants supply `render` and `update` and expose their embedded
/// `ChartCore`; configuration, data, events and teardown come for free and
/// chain fluently:
///
/// ```ignore
/// chart.set_data(rows).update_config(patch)?.render()?;
/// ```
pub trait Chart {
    type Datum;
    type Host: DrawingHost;

    fn core(&self) -> &ChartCore<Self::Datum, Self::Host>;

    fn core_mut(&mut self) -> &mut ChartCore<Self::Datum, Self::Host>;

    /// Full draw into a freshly built content group. Safe to repeat after a rebuild.
    fn render(&mut self) -> ChartResult<&mut Self>;

    /// Incremental redraw against the marks left by the previous draw.
    fn update(&mut self) -> ChartResult<&mut Self>;

    fn config(&self) -> &ChartConfig {
        self.core().config()
    }

    fn data(&self) -> &[Self::Datum] {
        self.core().data()
    }

    fn inner_width(&self) -> f64 {
        self.core().inner_width()
    }

    fn inner_height(&self) -> f64 {
        self.core().inner_height()
    }

    fn set_data(&mut self, data: Vec<Self::Datum>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().set_data(data);
        self
    }

    fn update_config(&mut self, patch: ChartConfigPatch) -> ChartResult<&mut Self>
    where
        Self: Sized,
    {
        self.core_mut().update_config(patch)?;
        Ok(self)
    }

    fn on<F>(&mut self, kind: ChartEventKind, callback: F) -> ListenerId
    where
        Self: Sized,
        F: FnMut(&ChartEvent) + 'static,
    {
        self.core_mut().on(kind, callback)
    }

    fn setup_tooltip(&self) -> ChartResult<Tooltip<Self::Host>> {
        self.core().setup_tooltip()
    }

    fn destroy(&mut self) {
        self.core_mut().destroy();
    }
}
