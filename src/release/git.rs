//! Git subprocess steps of the release workflow.
//!
//! Every command runs in an explicit working directory. The commit identity
//! is passed with `-c` options so the user's git configuration is never
//! modified. The authenticated URL is only passed on the command line; the
//! clone's `origin` is reset to the plain URL so the token never lands in
//! `.git/config`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::error::ReleaseError;
use crate::release::config::GitIdentity;

/// Credentials for the tap remote.
#[derive(Clone)]
pub struct Credentials {
    /// GitHub user name.
    pub user: String,
    /// Personal access token.
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

impl Credentials {
    /// Adds the user and token to an HTTP(S) remote, percent-encoded.
    /// Other schemes (`file`, `ssh`) are returned unchanged and
    /// authenticate through git itself.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidRemote` if `remote` is not a URL or
    /// cannot carry userinfo.
    pub fn authenticated_url(&self, remote: &str) -> Result<String, ReleaseError> {
        let invalid = |reason: String| ReleaseError::InvalidRemote {
            url: remote.to_string(),
            reason,
        };
        let mut url = reqwest::Url::parse(remote).map_err(|e| invalid(e.to_string()))?;
        if matches!(url.scheme(), "http" | "https") {
            url.set_username(&self.user)
                .map_err(|()| invalid("URL cannot carry a user name".to_string()))?;
            url.set_password(Some(&self.token))
                .map_err(|()| invalid("URL cannot carry a password".to_string()))?;
        }
        Ok(url.to_string())
    }

    /// Removes the token and any URL userinfo from `text`.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        let text = if self.token.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.token, "***")
        };
        redact_url_userinfo(&text)
    }
}

/// Replaces `user:password@` in every `scheme://` URL with `***@`.
#[must_use]
pub fn redact_url_userinfo(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("://") {
        let (head, tail) = rest.split_at(pos + 3);
        out.push_str(head);
        let authority_end = tail
            .find(|c: char| c == '/' || c.is_whitespace())
            .unwrap_or(tail.len());
        match tail[..authority_end].rfind('@') {
            Some(at) => {
                out.push_str("***");
                rest = &tail[at..];
            }
            None => rest = tail,
        }
    }
    out.push_str(rest);
    out
}

/// Runs git commands inside one repository directory.
#[derive(Debug)]
pub struct GitRepo {
    dir: PathBuf,
    remote: String,
    identity: GitIdentity,
    credentials: Credentials,
}

impl GitRepo {
    /// Clones `remote` into `parent/<clone_dir>`.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::InvalidRemote` for an unusable remote and
    /// `ReleaseError::Git` if the clone fails.
    pub async fn clone_into(
        parent: &Path,
        clone_dir: &str,
        remote: &str,
        identity: GitIdentity,
        credentials: Credentials,
    ) -> Result<Self, ReleaseError> {
        let url = credentials.authenticated_url(remote)?;
        run_git(parent, &credentials, "clone", &["clone", &url, clone_dir]).await?;
        let repo = Self {
            dir: parent.join(clone_dir),
            remote: remote.to_string(),
            identity,
            credentials,
        };
        repo.run("remote set-url", &["remote", "set-url", "origin", remote])
            .await?;
        Ok(repo)
    }

    /// The repository working tree.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates and switches to a new branch.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Git` if the branch already exists or checkout
    /// fails.
    pub async fn checkout_new_branch(&self, branch: &str) -> Result<(), ReleaseError> {
        self.run("checkout", &["checkout", "-b", branch]).await
    }

    /// Stages `path` and commits it with the configured identity.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Git` if staging or committing fails.
    pub async fn commit_file(&self, path: &str, message: &str) -> Result<(), ReleaseError> {
        self.run("add", &["add", path]).await?;
        let name = format!("user.name={}", self.identity.user_name);
        let email = format!("user.email={}", self.identity.user_email);
        self.run(
            "commit",
            &[
                "-c",
                &name,
                "-c",
                &email,
                "-c",
                "commit.gpgsign=false",
                "commit",
                "-m",
                message,
            ],
        )
        .await
    }

    /// Pushes `branch` to the tap with the authenticated URL.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Git` if the push fails.
    pub async fn push(&self, branch: &str) -> Result<(), ReleaseError> {
        let url = self.credentials.authenticated_url(&self.remote)?;
        self.run("push", &["push", &url, branch]).await
    }

    async fn run(&self, step: &str, args: &[&str]) -> Result<(), ReleaseError> {
        run_git(&self.dir, &self.credentials, step, args).await
    }
}

async fn run_git(
    dir: &Path,
    credentials: &Credentials,
    step: &str,
    args: &[&str],
) -> Result<(), ReleaseError> {
    debug!(step, dir = %dir.display(), "running git");

    let output = tokio::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ReleaseError::Git {
            step: step.to_string(),
            stderr: credentials.redact(&e.to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::Git {
            step: step.to_string(),
            stderr: credentials.redact(stderr.trim()),
        });
    }
    Ok(())
}
