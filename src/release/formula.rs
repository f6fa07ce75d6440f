//! Homebrew formula templating.
//!
//! Artifacts are passed as `OS/ARCH=SHA256`. The formula gets one
//! `on_macos` / `on_linux` block per OS present and one CPU branch per
//! artifact inside it.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::ReleaseError;
use crate::release::config::FormulaConfig;

// ============================================================================
// Artifacts
// ============================================================================

/// Target operating system of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Os {
    /// macOS
    Darwin,
    /// Linux
    Linux,
}

impl Os {
    /// Identifier used in artifact arguments and download URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
        }
    }

    const fn formula_block(self) -> &'static str {
        match self {
            Self::Darwin => "on_macos",
            Self::Linux => "on_linux",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target CPU architecture of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arch {
    /// x86-64
    Amd64,
    /// 64-bit ARM
    Arm64,
}

impl Arch {
    /// Identifier used in artifact arguments and download URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    const fn cpu_check(self) -> &'static str {
        match self {
            Self::Amd64 => "Hardware::CPU.intel?",
            Self::Arm64 => "Hardware::CPU.arm?",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One released archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Target OS.
    pub os: Os,
    /// Target architecture.
    pub arch: Arch,
    /// Lower-case hex SHA-256 of the archive.
    pub sha256: String,
}

impl FromStr for Artifact {
    type Err = ReleaseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReleaseError::InvalidArtifact {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (target, sha256) = input
            .split_once('=')
            .ok_or_else(|| invalid("expected OS/ARCH=SHA256"))?;
        let (os, arch) = target
            .split_once('/')
            .ok_or_else(|| invalid("expected OS/ARCH before '='"))?;

        let os = match os {
            "darwin" => Os::Darwin,
            "linux" => Os::Linux,
            _ => return Err(invalid("OS must be 'darwin' or 'linux'")),
        };
        let arch = match arch {
            "amd64" => Arch::Amd64,
            "arm64" => Arch::Arm64,
            _ => return Err(invalid("ARCH must be 'amd64' or 'arm64'")),
        };
        if sha256.len() != 64 || !sha256.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("SHA256 must be 64 hex digits"));
        }

        Ok(Self {
            os,
            arch,
            sha256: sha256.to_ascii_lowercase(),
        })
    }
}

/// Parses artifact arguments, sorted by OS then architecture.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidArtifact` if an argument is malformed, if
/// none are given, or if an OS/ARCH pair appears twice.
pub fn parse_artifacts<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Artifact>, ReleaseError> {
    let mut artifacts = inputs
        .iter()
        .map(|s| s.as_ref().parse::<Artifact>())
        .collect::<Result<Vec<_>, _>>()?;
    if artifacts.is_empty() {
        return Err(ReleaseError::InvalidArtifact {
            input: String::new(),
            reason: "at least one artifact is required".to_string(),
        });
    }

    artifacts.sort_by_key(|a| (a.os, a.arch));
    if let Some(pair) = artifacts
        .windows(2)
        .find(|pair| (pair[0].os, pair[0].arch) == (pair[1].os, pair[1].arch))
    {
        return Err(ReleaseError::InvalidArtifact {
            input: format!("{}/{}", pair[1].os, pair[1].arch),
            reason: "duplicate OS/ARCH pair".to_string(),
        });
    }
    Ok(artifacts)
}

// ============================================================================
// Versions and branches
// ============================================================================

/// Checks that a version is usable in a URL and a branch name.
///
/// # Errors
///
/// Returns `ReleaseError::InvalidVersion` for an empty version or one with
/// characters outside `[A-Za-z0-9._+-]`.
pub fn validate_version(version: &str) -> Result<(), ReleaseError> {
    let valid = !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'));
    if valid {
        Ok(())
    } else {
        Err(ReleaseError::InvalidVersion(version.to_string()))
    }
}

/// Release branch for a version: `feat/update_<version>` with dots
/// replaced by underscores.
#[must_use]
pub fn branch_name(version: &str) -> String {
    format!("feat/update_{}", version.replace('.', "_"))
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the Ruby formula.
///
/// `artifacts` must come from [`parse_artifacts`] so blocks are grouped
/// and ordered.
#[must_use]
pub fn render_formula(config: &FormulaConfig, version: &str, artifacts: &[Artifact]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "class {} < Formula", config.class_name());
    let _ = writeln!(out, "  desc {}", ruby_string(&config.description));
    let _ = writeln!(out, "  homepage {}", ruby_string(&config.homepage));
    let _ = writeln!(out, "  version {}", ruby_string(version));

    let mut current_os = None;
    for artifact in artifacts {
        if current_os != Some(artifact.os) {
            if current_os.is_some() {
                out.push_str("  end\n");
            }
            out.push('\n');
            let _ = writeln!(out, "  {} do", artifact.os.formula_block());
            current_os = Some(artifact.os);
        }
        let _ = writeln!(out, "    if {}", artifact.arch.cpu_check());
        let _ = writeln!(
            out,
            "      url {}",
            ruby_string(&download_url(&config.download_url, version, artifact))
        );
        let _ = writeln!(out, "      sha256 {}", ruby_string(&artifact.sha256));
        out.push_str("    end\n");
    }
    if current_os.is_some() {
        out.push_str("  end\n");
    }

    out.push('\n');
    out.push_str("  def install\n");
    let _ = writeln!(out, "    bin.install {}", ruby_string(&config.name));
    out.push_str("  end\n");
    out.push_str("end\n");
    out
}

fn download_url(template: &str, version: &str, artifact: &Artifact) -> String {
    template
        .replace("{version}", version)
        .replace("{os}", artifact.os.as_str())
        .replace("{arch}", artifact.arch.as_str())
}

fn ruby_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
