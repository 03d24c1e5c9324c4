//! Structural checks on stored topologies.
//!
//! A topology is only ever persisted when its aggregation list is
//! well formed: orders run `0..n` without gaps, every position lies in
//! `[0, 1]`, and zero-length markers never make up the whole of a
//! multi-aggregation topology. The store calls
//! [`DebugInvariants::validate_invariants`] before accepting new
//! aggregations and [`DebugInvariants::debug_assert_invariants`] after a
//! save.

use crate::topology_error::TopologyError;

/// Self-check of a value against the topology invariants.
pub trait DebugInvariants {
    /// Panic on the first violation. Compiled to nothing in release builds
    /// unless `strict-invariants` or `check-invariants` is enabled.
    fn debug_assert_invariants(&self);
    /// First violation as [`TopologyError::BrokenInvariant`].
    fn validate_invariants(&self) -> Result<(), TopologyError>;
}

/// Panic with `[invariants] <context>: <error>` when `$expr` is an `Err`,
/// in debug builds or with one of the invariant features on.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
