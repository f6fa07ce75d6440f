//! Formula and release command handlers.

use std::fs;

use tracing::info;

use crate::cli::args::{FormulaArgs, FormulaInput, ReleaseArgs};
use crate::error::{PolicyDocsError, ReleaseError};
use crate::release::{
    self, Artifact, Credentials, ReleaseConfig, ReleaseRequest, parse_artifacts, render_formula,
    validate_version,
};

/// Loads the configuration and validates the version and artifacts.
fn prepare(input: &FormulaInput) -> Result<(ReleaseConfig, Vec<Artifact>), ReleaseError> {
    validate_version(&input.release_version)?;
    let artifacts = parse_artifacts(&input.artifacts)?;
    let config = ReleaseConfig::load(&input.config)?;
    Ok((config, artifacts))
}

/// Execute `formula`.
///
/// Prints the formula to stdout, or writes it to `--output`.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the output cannot be
/// written.
pub fn formula(args: &FormulaArgs) -> Result<(), PolicyDocsError> {
    let (config, artifacts) = prepare(&args.input)?;
    let text = render_formula(&config.formula, &args.input.release_version, &artifacts);

    match &args.output {
        Some(path) => {
            fs::write(path, &text)?;
            info!(path = %path.display(), "formula written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Execute `release`.
///
/// # Errors
///
/// Returns an error if credentials are missing, the inputs are invalid, or
/// any workflow step fails.
pub async fn run(args: ReleaseArgs, quiet: bool) -> Result<(), PolicyDocsError> {
    let credentials = Credentials {
        user: require(args.github_user, "TAP_GITHUB_USER")?,
        token: require(args.github_token, "TAP_GITHUB_TOKEN")?,
    };
    let (config, artifacts) = prepare(&args.input)?;

    let outcome = release::run_release(ReleaseRequest {
        config,
        version: args.input.release_version,
        artifacts,
        credentials,
        workdir: args.workdir,
        dry_run: args.dry_run,
    })
    .await?;

    if !quiet {
        match &outcome.pull_request_url {
            Some(url) => eprintln!("Pull request created: {url}"),
            None => eprintln!(
                "Dry run: committed {} on branch {}",
                outcome.formula_path.display(),
                outcome.branch
            ),
        }
    }
    Ok(())
}

fn require(value: Option<String>, env: &str) -> Result<String, ReleaseError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReleaseError::MissingCredential(format!("set {env} or pass the matching flag")))
}
