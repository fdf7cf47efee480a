//! Retry queue operations, grouped by concern

mod failure;
mod maintenance;
mod query;
mod stats;
