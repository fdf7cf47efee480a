//! UPC cache engine
//!
//! The cache is an actor: a single tokio task owns the LRU index and the
//! backing file, and [`UpcCache`] handles send it commands over a channel.
//! Every mutation rewrites the whole document before the caller's reply is
//! sent, so an awaited `store` is on disk when it returns.

mod actor;
mod builder;
mod operations;
mod types;

pub use builder::UpcCacheBuilder;
pub use types::UpcCache;

#[cfg(test)]
mod tests;
