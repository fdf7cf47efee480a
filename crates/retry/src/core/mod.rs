//! Retry queue engine
//!
//! Same actor shape as the UPC cache: one task owns the [`RetryState`] and
//! the backing file, [`RetryQueue`] handles send it commands, and every
//! mutation is written out before the caller is answered.
//!
//! [`RetryState`]: crate::state::RetryState

mod actor;
mod builder;
mod operations;
mod types;

pub use builder::RetryQueueBuilder;
pub use types::RetryQueue;

#[cfg(test)]
mod tests;
