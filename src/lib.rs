//! Gem Cascade (workspace facade crate).
//!
//! This package exposes `gem_cascade::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use gem_cascade_core as core;
pub use gem_cascade_types as types;
