//! Command-line front end and composition root for scancache

pub mod commands;
pub mod scanner;

pub use commands::Commands;
pub use scanner::Scanner;
