//! Logging facilities for Horizon Listkit.
//!
//! Horizon Listkit uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_listkit=debug")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a single subsystem
//! can be enabled in isolation (for example `horizon_listkit::navigation=trace`).

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_listkit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_listkit_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "horizon_listkit_core::timer";
    /// List facade lifecycle and option changes.
    pub const LIST: &str = "horizon_listkit::list";
    /// Index trait (focus/selection/anchor) updates.
    pub const TRAIT: &str = "horizon_listkit::trait";
    /// Splice reconciliation.
    pub const SPLICE: &str = "horizon_listkit::splice";
    /// Pointer-driven selection.
    pub const SELECTION: &str = "horizon_listkit::selection";
    /// Arrow, page and reveal navigation.
    pub const NAVIGATION: &str = "horizon_listkit::navigation";
    /// Type-ahead navigation.
    pub const TYPE_NAVIGATION: &str = "horizon_listkit::type_navigation";
}

/// Performance tracing span guard.
///
/// Creates an info-level span under `horizon_listkit::perf` that stays entered
/// until the guard is dropped.
///
/// ```
/// use horizon_listkit_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("splice");
///     // timed work...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_listkit::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::LIST,
            targets::TRAIT,
            targets::SPLICE,
            targets::SELECTION,
            targets::NAVIGATION,
            targets::TYPE_NAVIGATION,
        ] {
            assert!(target.starts_with("horizon_listkit::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
        assert!(targets::TIMER.starts_with(targets::CORE));
    }
}
