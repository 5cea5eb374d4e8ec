//! # blazelink core
//!
//! Glue between an editor and a Bazel workspace. The flow begins by creating a `Config` and using
//! it to build a `SourceToTargetMap`. Each registered `SourceToTargetProvider` is queried
//! concurrently and the first one able to answer decides which targets build a given source file.
//!
//! The `run` module builds on the same model to produce deploy-jar run configurations for Scala
//! main objects.
//!

pub(crate) mod config;
pub mod events;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod run;
pub(crate) mod sync;
pub mod workspace;

pub use config::*;
pub use model::{Label, Project, ProjectData, TargetInfo, WorkspacePath};
pub use provider::{SourceToTargetMap, SourceToTargetProvider};
pub use resolver::{FailurePolicy, FirstSatisfying, PendingLookup};

#[macro_use]
extern crate derive_builder;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
