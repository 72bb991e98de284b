use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_WIDTH: f64 = 400.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;
pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 300.0;
pub const DEFAULT_EASING: &str = "ease-out";

/// Pixel insets reserved around the plotting area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 20.0, 40.0, 60.0)
    }
}

/// Easing curve identifier.
///
/// Curves are referenced by name only; interpolation lives in the drawing layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Easing(String);

impl Easing {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::new(DEFAULT_EASING)
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Transition duration in milliseconds.
    pub duration: f64,
    pub easing: Easing,
}

impl AnimationConfig {
    #[must_use]
    pub fn new(duration: f64, easing: impl Into<Easing>) -> Self {
        Self {
            duration,
            easing: easing.into(),
        }
    }

    /// Returns the duration as a `Duration`, or `None` when the stored value
    /// is negative or non-finite. The stored value itself is left untouched.
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return None;
        }
        Some(Duration::from_micros((self.duration * 1_000.0).round() as u64))
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DURATION_MS, Easing::default())
    }
}

/// Open mapping of styling tokens, carried through opaquely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(IndexMap<String, serde_json::Value>);

impl Theme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Convenience lookup for string tokens such as colors.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Complete, defaulted chart configuration.
///
/// Numeric ranges are not validated. A width smaller than the horizontal
/// margins is kept as-is and surfaces as a negative inner width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub theme: Theme,
    pub animation: AnimationConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margin: Margin::default(),
            theme: Theme::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Builds a configuration from defaults overridden by `patch`.
    #[must_use]
    pub fn from_patch(patch: ChartConfigPatch) -> Self {
        Self::default().merged(patch)
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_width(width).with_height(height)
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Shallow top-level merge: every field present in `patch` replaces the
    /// current field wholesale. Nested objects such as `margin` are never
    /// merged side by side.
    #[must_use]
    pub fn merged(self, patch: ChartConfigPatch) -> Self {
        Self {
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            margin: patch.margin.unwrap_or(self.margin),
            theme: patch.theme.unwrap_or(self.theme),
            animation: patch.animation.unwrap_or(self.animation),
        }
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.horizontal()
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.vertical()
    }

    /// Whether the margins leave a positive plotting area.
    #[must_use]
    pub fn has_plot_area(&self) -> bool {
        self.inner_width() > 0.0 && self.inner_height() > 0.0
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))
    }
}

/// Partial configuration supplied by callers at construction and on
/// `update_config`. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationConfig>,
}

impl ChartConfigPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_width(width).with_height(height)
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = Some(animation);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse config patch json: {e}"))
        })
    }
}

impl From<ChartConfig> for ChartConfigPatch {
    fn from(config: ChartConfig) -> Self {
        Self {
            width: Some(config.width),
            height: Some(config.height),
            margin: Some(config.margin),
            theme: Some(config.theme),
            animation: Some(config.animation),
        }
    }
}
