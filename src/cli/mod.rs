//! Demo program layer: sample commands and terminal output helpers

pub mod commands;
pub mod output;

pub use commands::register_all;
