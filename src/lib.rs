//! chart-base: shared lifecycle core for interactive charts.
//!
//! Every chart variant embeds a `ChartCore` that owns configuration merging,
//! the drawing surface and its margin-offset content group, the plotting
//! size, a synchronous event channel and access to the tooltip shared by all
//! charts of a host. Variants implement `Chart::render` and `Chart::update`.

pub mod chart;
pub mod charts;
pub mod config;
pub mod error;
pub mod events;
pub mod surface;
pub mod telemetry;
pub mod tooltip;

pub use chart::{Chart, ChartCore, ChartLifecycle, SurfaceHandles};
pub use config::{AnimationConfig, ChartConfig, ChartConfigPatch, Easing, Margin, Theme};
pub use error::{ChartError, ChartResult};
pub use events::{ChartEvent, ChartEventKind, EventChannel, ListenerId};
pub use surface::{Document, DrawingHost, NodeId};
pub use tooltip::{SharedHost, Tooltip, TooltipRegistry};
