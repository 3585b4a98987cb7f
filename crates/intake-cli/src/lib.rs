//! Command-line front end over the reference-data cache.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
