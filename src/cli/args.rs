//! CLI argument definitions
//!
//! All Clap derive structs for `policy-docs` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Policy catalog documentation generator and Homebrew release helper.
#[derive(Parser, Debug)]
#[command(name = "policy-docs", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "POLICY_DOCS_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the paginated site, or a single mono-document with --mono.
    Site(SiteArgs),

    /// Render the legacy flat docs tree for one platform.
    Flat(FlatArgs),

    /// Render platform READMEs and the root recommendations page.
    Readme(ReadmeArgs),

    /// Print a Homebrew formula for a release.
    Formula(FormulaArgs),

    /// Push a formula bump to the tap and open a pull request.
    Release(ReleaseArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Documentation Commands
// ============================================================================

/// Input catalog and output root shared by every render command.
#[derive(Args, Debug)]
pub struct RenderPaths {
    /// Path to the YAML policy catalog.
    pub docs_file: PathBuf,

    /// Output directory (created if missing).
    pub output_dir: PathBuf,
}

/// Arguments for `site`.
#[derive(Args, Debug)]
pub struct SiteArgs {
    /// Catalog and output paths.
    #[command(flatten)]
    pub paths: RenderPaths,

    /// Write a single `monomarkdown.md` instead of a page tree.
    #[arg(long)]
    pub mono: bool,
}

/// Arguments for `flat`.
#[derive(Args, Debug)]
pub struct FlatArgs {
    /// Catalog and output paths.
    #[command(flatten)]
    pub paths: RenderPaths,

    /// Platform to render. Optional when the catalog has one platform.
    #[arg(long)]
    pub platform: Option<String>,
}

/// Arguments for `readme`.
#[derive(Args, Debug)]
pub struct ReadmeArgs {
    /// Catalog and output paths.
    #[command(flatten)]
    pub paths: RenderPaths,
}

// ============================================================================
// Release Commands
// ============================================================================

/// Release version, artifacts and configuration shared by `formula` and
/// `release`.
#[derive(Args, Debug)]
pub struct FormulaInput {
    /// Version being released (e.g. 1.2.3).
    #[arg(long = "release-version", value_name = "VERSION")]
    pub release_version: String,

    /// Released archive as OS/ARCH=SHA256 (repeatable).
    #[arg(long = "artifact", value_name = "OS/ARCH=SHA256", required = true)]
    pub artifacts: Vec<String>,

    /// Release configuration file.
    #[arg(
        long,
        default_value = "release.yaml",
        env = "POLICY_DOCS_RELEASE_CONFIG"
    )]
    pub config: PathBuf,
}

/// Arguments for `formula`.
#[derive(Args, Debug)]
pub struct FormulaArgs {
    /// Version, artifacts and configuration.
    #[command(flatten)]
    pub input: FormulaInput,

    /// Write the formula to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `release`.
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Version, artifacts and configuration.
    #[command(flatten)]
    pub input: FormulaInput,

    /// Directory to clone the tap into (default: a fresh temp dir).
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Commit locally but skip the push and the pull request.
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub user for the tap remote.
    #[arg(long, env = "TAP_GITHUB_USER", hide_env_values = true)]
    pub github_user: Option<String>,

    /// GitHub token for the tap remote and the pull request API.
    #[arg(long, env = "TAP_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for informational commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_site_parses() {
        let cli = Cli::try_parse_from(["policy-docs", "site", "docs.yaml", "out"]).unwrap();
        match cli.command {
            Commands::Site(args) => {
                assert_eq!(args.paths.docs_file, PathBuf::from("docs.yaml"));
                assert_eq!(args.paths.output_dir, PathBuf::from("out"));
                assert!(!args.mono);
            }
            other => panic!("expected site, got {other:?}"),
        }
    }

    #[test]
    fn test_site_mono_flag() {
        let cli =
            Cli::try_parse_from(["policy-docs", "site", "docs.yaml", "out", "--mono"]).unwrap();
        assert!(matches!(cli.command, Commands::Site(SiteArgs { mono: true, .. })));
    }

    #[test]
    fn test_site_requires_both_paths() {
        assert!(Cli::try_parse_from(["policy-docs", "site", "docs.yaml"]).is_err());
    }

    #[test]
    fn test_flat_platform_optional() {
        let cli = Cli::try_parse_from(["policy-docs", "flat", "d.yaml", "o"]).unwrap();
        assert!(matches!(cli.command, Commands::Flat(FlatArgs { platform: None, .. })));

        let cli =
            Cli::try_parse_from(["policy-docs", "flat", "d.yaml", "o", "--platform", "gitlab"])
                .unwrap();
        match cli.command {
            Commands::Flat(args) => assert_eq!(args.platform.as_deref(), Some("gitlab")),
            other => panic!("expected flat, got {other:?}"),
        }
    }

    #[test]
    fn test_formula_collects_artifacts() {
        let darwin = format!("darwin/arm64={SHA}");
        let linux = format!("linux/amd64={SHA}");
        let cli = Cli::try_parse_from([
            "policy-docs",
            "formula",
            "--release-version",
            "1.2.3",
            "--artifact",
            &darwin,
            "--artifact",
            &linux,
            "--config",
            "r.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Formula(args) => {
                assert_eq!(args.input.release_version, "1.2.3");
                assert_eq!(args.input.artifacts.len(), 2);
                assert_eq!(args.input.config, PathBuf::from("r.yaml"));
                assert!(args.output.is_none());
            }
            other => panic!("expected formula, got {other:?}"),
        }
    }

    #[test]
    fn test_formula_requires_artifact() {
        let result =
            Cli::try_parse_from(["policy-docs", "formula", "--release-version", "1.0.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_release_dry_run() {
        let artifact = format!("darwin/amd64={SHA}");
        let cli = Cli::try_parse_from([
            "policy-docs",
            "release",
            "--release-version",
            "1.0.0",
            "--artifact",
            &artifact,
            "--dry-run",
            "--workdir",
            "/tmp/tap",
        ])
        .unwrap();
        match cli.command {
            Commands::Release(args) => {
                assert!(args.dry_run);
                assert_eq!(args.workdir, Some(PathBuf::from("/tmp/tap")));
            }
            other => panic!("expected release, got {other:?}"),
        }
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["policy-docs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["policy-docs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["policy-docs", "--color", variant, "version"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_log_format_parse() {
        let cli = Cli::try_parse_from(["policy-docs", "--log-format", "json", "version"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["policy-docs", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["policy-docs", "-vvv", "version"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["policy-docs", "readme", "d.yaml", "o", "-q", "-v"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
