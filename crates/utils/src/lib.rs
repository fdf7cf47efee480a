//! Shared utilities for scancache
//!
//! File persistence helpers used by both engines, XDG path resolution, and
//! tracing setup for binaries.

pub mod atomic_file;
pub mod json_store;
pub mod tracing;
pub mod xdg;

pub use atomic_file::*;
pub use json_store::{JsonStore, Loaded};
pub use xdg::*;
