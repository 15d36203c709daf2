//! Command-line front end: argument parsing, bootstrap and the page flows
//! behind each subcommand.

pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use bootstrap::AppContext;
pub use cli::{Cli, Command, ProfileAction, ProfileEdits};
pub use commands::run;
