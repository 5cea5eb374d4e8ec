//! # First-satisfying lookups
//!
//! Lookups are started elsewhere and handed over as `PendingLookup`s. `FirstSatisfying` watches
//! all of them at once and resolves to the first value that satisfies its predicate, cancelling
//! whatever is still running.
//!
mod error;
mod first_satisfying;
mod pending;

pub use error::*;
pub use first_satisfying::*;
pub use pending::*;

/// What to report when no lookup produced a satisfying value.
///
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Resolve to nothing, even if every lookup failed.
    #[default]
    Quiet,

    /// Surface the last failure when every lookup failed and none of them answered at all.
    Strict,
}
