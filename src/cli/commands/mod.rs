//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod docs;
pub mod release;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::PolicyDocsError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli) -> Result<(), PolicyDocsError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Site(args) => docs::site(&args, quiet),
        Commands::Flat(args) => docs::flat(&args, quiet),
        Commands::Readme(args) => docs::readme(&args, quiet),
        Commands::Formula(args) => release::formula(&args),
        Commands::Release(args) => release::run(args, quiet).await,
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}
