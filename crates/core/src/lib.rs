//! Core domain types, errors, and constants for `scancache`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias shared by every
//!   crate in the workspace.
//! - **`types`**: the food record handed over by the provider, the cached
//!   snapshot, the retry record, and the stats views of both engines.
//! - **`clock`**: the time source engines consult for "now".
//! - **`constants`**: file names, default capacity, backoff schedule and
//!   environment variable names.

pub mod clock;
pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock},
    constants::*,
    errors::{Error, Result},
    types::*,
};
