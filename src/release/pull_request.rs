//! Pull request creation over the GitHub REST API.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReleaseError;

/// Body sent to `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// Pull request title.
    pub title: String,
    /// Pull request description.
    pub body: String,
    /// Source branch.
    pub head: String,
    /// Target branch.
    pub base: String,
}

impl PullRequestPayload {
    /// Payload for a formula bump.
    #[must_use]
    pub fn formula_bump(formula_name: &str, version: &str, head: &str, base: &str) -> Self {
        Self {
            title: format!("{formula_name} {version}"),
            body: format!("Automated formula update for {formula_name} {version}"),
            head: head.to_string(),
            base: base.to_string(),
        }
    }
}

/// Subset of the API response worth logging.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestCreated {
    /// Pull request number.
    pub number: u64,
    /// Browser URL.
    pub html_url: String,
}

/// Pull request endpoint for a repository.
#[must_use]
pub fn pulls_url(api_url: &str, repository: &str) -> String {
    format!("{}/repos/{repository}/pulls", api_url.trim_end_matches('/'))
}

/// Creates a pull request. Only HTTP 201 counts as success.
///
/// # Errors
///
/// Returns `ReleaseError::Network` if the request cannot be sent or the
/// response cannot be read, and `ReleaseError::Status` for any status other
/// than 201.
pub async fn create_pull_request(
    client: &reqwest::Client,
    api_url: &str,
    repository: &str,
    token: &str,
    payload: &PullRequestPayload,
) -> Result<PullRequestCreated, ReleaseError> {
    let url = pulls_url(api_url, repository);
    debug!(url = %url, head = %payload.head, base = %payload.base, "creating pull request");

    let response = client
        .post(&url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28")
        .header(reqwest::header::USER_AGENT, concat!("policy-docs/", env!("CARGO_PKG_VERSION")))
        .json(payload)
        .send()
        .await
        .map_err(|e| ReleaseError::Network(e.without_url().to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ReleaseError::Network(e.without_url().to_string()))?;

    if status != reqwest::StatusCode::CREATED {
        return Err(ReleaseError::Status {
            code: status.as_u16(),
            body,
        });
    }

    let created: PullRequestCreated = serde_json::from_str(&body)
        .map_err(|e| ReleaseError::Network(format!("unexpected response body: {e}")))?;
    info!(number = created.number, url = %created.html_url, "pull request created");
    Ok(created)
}
