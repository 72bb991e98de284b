//! Thin chart variants layered on `ChartCore`.
//!
//! Each variant only turns its data into marks inside the content group; the
//! surface, configuration and event handling are owned by the core.

mod bar;
mod line;
mod scale;
mod scatter;

pub use bar::BarChart;
pub use line::LineChart;
pub use scale::LinearScale;
pub use scatter::ScatterChart;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;

/// One labelled value, drawn as a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

impl CategoryValue {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One sample in a continuous two-dimensional domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const DEFAULT_MARK_COLOR: &str = "steelblue";

/// String theme token, or `fallback` when the theme does not carry it.
fn theme_color<'a>(config: &'a ChartConfig, token: &str, fallback: &'a str) -> &'a str {
    config.theme.get_str(token).unwrap_or(fallback)
}

/// CSS transition applied to marks rewritten by `update`.
fn transition_style(config: &ChartConfig) -> Option<String> {
    config.animation.as_duration().map(|duration| {
        format!(
            "all {}ms {}",
            duration.as_millis(),
            config.animation.easing.as_str()
        )
    })
}
