use serde::{Deserialize, Serialize};

/// Observable chart lifecycle state.
///
/// Transitions are recorded by `ChartCore`. Drawing is allowed only while
/// `has_surface()` holds; `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartLifecycle {
    /// Constructed, no drawing surface yet.
    #[default]
    Uninitialized,
    /// Surface (re)built, prior content discarded, nothing drawn yet.
    Surfaced,
    /// Content group populated by `render` or `update`.
    Rendered,
    /// Data changed since the last draw.
    Stale,
    /// Terminal.
    Destroyed,
}

impl ChartLifecycle {
    #[must_use]
    pub fn has_surface(self) -> bool {
        matches!(self, Self::Surfaced | Self::Rendered | Self::Stale)
    }

    #[must_use]
    pub fn is_destroyed(self) -> bool {
        self == Self::Destroyed
    }

    /// State after new data is assigned.
    #[must_use]
    pub(crate) fn after_data_set(self) -> Self {
        match self {
            Self::Rendered => Self::Stale,
            other => other,
        }
    }
}
