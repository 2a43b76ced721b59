// kako-cli/src/lib.rs
//
// Library portion of the Kako CLI application.
// Contains argument definitions, the prompt reader and the session logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::run::{resolve_decoder, run_interactive};
pub use error::{CliError, CliResult};
pub use session::{RunSummary, Session};
