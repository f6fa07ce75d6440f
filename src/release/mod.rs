//! Release automation for the Homebrew tap.
//!
//! Workflow:
//! 1. Resolve the working directory (given, or a fresh temp dir)
//! 2. Clone the tap, adding credentials to HTTP(S) remotes
//! 3. Create the release branch
//! 4. Write the formula
//! 5. Commit with the configured identity
//! 6. Push the branch and open the pull request (skipped on dry run)

pub mod config;
pub mod formula;
pub mod git;
pub mod pull_request;

use std::path::PathBuf;

use tracing::info;

use crate::error::ReleaseError;

pub use config::ReleaseConfig;
pub use formula::{Artifact, branch_name, parse_artifacts, render_formula, validate_version};
pub use git::Credentials;

/// Commit message of the formula bump.
pub const COMMIT_MESSAGE: &str = "Bump brew formula";

/// Inputs of one release run.
#[derive(Debug)]
pub struct ReleaseRequest {
    /// Release configuration.
    pub config: ReleaseConfig,
    /// Version being released.
    pub version: String,
    /// Parsed artifacts.
    pub artifacts: Vec<Artifact>,
    /// Tap credentials.
    pub credentials: Credentials,
    /// Directory to clone into. A temp dir is used when `None`.
    pub workdir: Option<PathBuf>,
    /// Stop after the local commit.
    pub dry_run: bool,
}

/// What a release run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Release branch name.
    pub branch: String,
    /// Path of the written formula.
    pub formula_path: PathBuf,
    /// Pull request URL, absent on dry run.
    pub pull_request_url: Option<String>,
    /// Whether the working directory was kept on disk.
    pub workdir_kept: bool,
}

/// Runs the full release workflow.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidVersion` for an unusable version,
/// `ReleaseError::Git` if any git step fails, and `ReleaseError::Network`
/// or `ReleaseError::Status` if the pull request cannot be created.
pub async fn run_release(request: ReleaseRequest) -> Result<ReleaseOutcome, ReleaseError> {
    let ReleaseRequest {
        config,
        version,
        artifacts,
        credentials,
        workdir,
        dry_run,
    } = request;

    validate_version(&version)?;
    let formula_text = render_formula(&config.formula, &version, &artifacts);
    let branch = branch_name(&version);

    // A temp dir is removed on drop unless this is a dry run, where the
    // clone is kept for inspection.
    let (parent, temp) = match workdir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            (dir, None)
        }
        None => {
            let temp = tempfile::tempdir()?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    let remote = config.git_url();
    info!(
        repository = %config.tap.repository,
        remote = %remote,
        workdir = %parent.display(),
        "cloning tap"
    );
    let token = credentials.token.clone();
    let repo = git::GitRepo::clone_into(
        &parent,
        config.repository_name(),
        &remote,
        config.git.clone(),
        credentials,
    )
    .await?;

    repo.checkout_new_branch(&branch).await?;

    let formula_rel = config.formula_path();
    let formula_path = repo.dir().join(&formula_rel);
    if let Some(dir) = formula_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&formula_path, &formula_text)?;
    info!(path = %formula_path.display(), version = %version, "formula written");

    repo.commit_file(&formula_rel, COMMIT_MESSAGE).await?;

    let pull_request_url = if dry_run {
        info!(branch = %branch, "dry run: skipping push and pull request");
        None
    } else {
        repo.push(&branch).await?;
        info!(branch = %branch, "branch pushed");

        let client = reqwest::Client::new();
        let payload = pull_request::PullRequestPayload::formula_bump(
            &config.formula.name,
            &version,
            &branch,
            &config.tap.base_branch,
        );
        let created = pull_request::create_pull_request(
            &client,
            &config.tap.api_url,
            &config.tap.repository,
            &token,
            &payload,
        )
        .await?;
        Some(created.html_url)
    };

    let workdir_kept = match temp {
        Some(temp) if dry_run => {
            let kept = temp.keep();
            info!(workdir = %kept.display(), "dry run: clone kept");
            true
        }
        Some(_) => false,
        None => true,
    };

    Ok(ReleaseOutcome {
        branch,
        formula_path,
        pull_request_url,
        workdir_kept,
    })
}
