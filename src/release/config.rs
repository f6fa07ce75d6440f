//! Release configuration file.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ReleaseError;

/// Top-level release configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Formula contents.
    pub formula: FormulaConfig,
    /// Target tap repository.
    pub tap: TapConfig,
    /// Commit identity.
    #[serde(default)]
    pub git: GitIdentity,
}

/// What the generated formula installs and where it downloads from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaConfig {
    /// Binary name installed by the formula.
    pub name: String,
    /// Ruby class name. Defaults to the capitalized binary name.
    #[serde(default)]
    pub class_name: Option<String>,
    /// One-line description (`desc`).
    pub description: String,
    /// Project homepage.
    pub homepage: String,
    /// Archive URL template with `{version}`, `{os}` and `{arch}`
    /// placeholders.
    pub download_url: String,
}

impl FormulaConfig {
    /// Ruby class name of the formula.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.class_name.clone().unwrap_or_else(|| {
            let mut chars = self.name.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
    }
}

/// Tap repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TapConfig {
    /// `owner/repo` of the tap.
    pub repository: String,
    /// Branch pull requests target.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// Formula path inside the tap. Defaults to `<name>.rb`.
    #[serde(default)]
    pub formula_path: Option<String>,
    /// GitHub REST API root.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Clone URL of the tap. Defaults to `https://github.com/<repository>`.
    #[serde(default)]
    pub git_url: Option<String>,
}

/// Author and committer identity for the release commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitIdentity {
    /// `user.name`
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// `user.email`
    #[serde(default = "default_user_email")]
    pub user_email: String,
}

impl Default for GitIdentity {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            user_email: default_user_email(),
        }
    }
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_name() -> String {
    "release-bot".to_string()
}

fn default_user_email() -> String {
    "release-bot@users.noreply.github.com".to_string()
}

impl ReleaseConfig {
    /// Loads and validates a release configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Config` if the file cannot be read, is not
    /// valid YAML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ReleaseError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReleaseError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_yaml(&content).map_err(|message| ReleaseError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(path = %path.display(), repository = %config.tap.repository, "release config loaded");
        Ok(config)
    }

    /// Parses and validates a release configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.formula.name.trim().is_empty() {
            return Err("formula.name must not be empty".to_string());
        }
        let mut parts = self.tap.repository.split('/');
        let valid_repo = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty()
        );
        if !valid_repo {
            return Err(format!(
                "tap.repository must be 'owner/repo', got '{}'",
                self.tap.repository
            ));
        }
        if let Some(git_url) = &self.tap.git_url {
            reqwest::Url::parse(git_url)
                .map_err(|e| format!("tap.git_url '{git_url}' is not a URL: {e}"))?;
        }
        for placeholder in ["{version}", "{os}", "{arch}"] {
            if !self.formula.download_url.contains(placeholder) {
                return Err(format!(
                    "formula.download_url must contain the {placeholder} placeholder"
                ));
            }
        }
        Ok(())
    }

    /// Formula path inside the tap.
    #[must_use]
    pub fn formula_path(&self) -> String {
        self.tap
            .formula_path
            .clone()
            .unwrap_or_else(|| format!("{}.rb", self.formula.name))
    }

    /// URL the tap is cloned from and pushed to, without credentials.
    #[must_use]
    pub fn git_url(&self) -> String {
        self.tap
            .git_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.tap.repository))
    }

    /// Repository name without the owner, used as the clone directory.
    #[must_use]
    pub fn repository_name(&self) -> &str {
        self.tap
            .repository
            .rsplit('/')
            .next()
            .unwrap_or(&self.tap.repository)
    }
}
