//! Command implementations for the CLI.

/// The interactive extract-and-crop run.
pub mod run;
