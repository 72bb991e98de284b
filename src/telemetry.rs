//! Tracing setup for hosts embedding `chart-base`.
//!
//! Charts only emit through the `tracing` facade. Surface rebuilds, config
//! merges and teardown log at `debug`, element churn and event delivery at
//! `trace`. Installing a subscriber stays the host's call.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter,
/// e.g. `"chart_base=trace"` while debugging surface rebuilds.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::{init_default_tracing, init_tracing_with_fallback};

    #[test]
    fn disabled_feature_never_installs_a_subscriber() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_fallback("chart_base=trace"));
    }
}
