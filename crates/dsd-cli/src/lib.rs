//! CLI library components for the DSD footing validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
