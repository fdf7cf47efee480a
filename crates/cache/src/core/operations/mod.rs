//! Cache operations, one file per command

mod clear;
mod lookup;
mod remove;
mod snapshot;
mod stats;
mod store;
