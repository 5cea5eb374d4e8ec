//! # Lookup Events
//!
//! Events are self-contained: they only carry owned primitives, so they can be handed to a
//! reporter on another thread or printed long after the lookup that produced them is gone.
//!
mod channel;
mod consumer;
pub mod event;

pub use channel::*;
pub use consumer::*;
