//! Command line interface

pub mod commands;
pub mod display;
pub mod revision;

pub use self::commands::CliArgs;
