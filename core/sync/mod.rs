//! Sync primitives, swapped for shuttle's when building the concurrency checks with
//! `RUSTFLAGS="--cfg shuttle"`.
//!

#[cfg(all(shuttle, test))]
pub(crate) use shuttle::{sync::Arc, thread};

#[cfg(not(all(shuttle, test)))]
pub(crate) use std::sync::Arc;
