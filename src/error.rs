//! Error types for `policy-docs`
//!
//! One error enum per domain (catalog loading, rendering, release automation)
//! aggregated by [`PolicyDocsError`], which also maps every failure to a
//! process exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `policy-docs` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Catalog error (invalid YAML, missing field, unknown lookup key)
    pub const CATALOG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Output path collision (directory or file already exists)
    pub const OUTPUT_EXISTS: i32 = 4;

    /// Release workflow error (git step, pull request, formula input)
    pub const RELEASE_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `policy-docs` operations.
#[derive(Debug, Error)]
pub enum PolicyDocsError {
    /// Catalog loading or validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Documentation rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Release automation error
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PolicyDocsError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(CatalogError::Read { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Catalog(_) | Self::Json(_) => ExitCode::CATALOG_ERROR,
            Self::Render(err) => err.exit_code(),
            Self::Release(_) => ExitCode::RELEASE_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Catalog Errors
// ============================================================================

/// Policy catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// YAML parsing failed or the document is not shaped as a catalog
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the catalog file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// A policy record is missing one of its required fields
    #[error("missing required field '{field}' at {location}")]
    MissingRequired {
        /// Name of the missing field
        field: String,
        /// Location in the catalog (e.g., "github.organization[2]")
        location: String,
    },

    /// A policy field has the wrong YAML type
    #[error("invalid value for '{field}' at {location}: expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// Location in the catalog
        location: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Documentation rendering and emission errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Namespace has no entry in the category table
    #[error("unknown namespace '{namespace}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownNamespace {
        /// The namespace identifier that failed lookup
        namespace: String,
        /// Closest known namespace, if any
        suggestion: Option<String>,
    },

    /// Platform has no entry in the platform table
    #[error("unknown platform '{platform}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownPlatform {
        /// The platform identifier that failed lookup
        platform: String,
        /// Closest known platform, if any
        suggestion: Option<String>,
    },

    /// Output directory already exists
    #[error("output directory already exists: {path}")]
    DirectoryExists {
        /// Directory that was about to be created
        path: PathBuf,
    },

    /// Output file already exists
    #[error("output file already exists: {path}")]
    OutputExists {
        /// File that was about to be created
        path: PathBuf,
    },

    /// I/O error while writing output
    #[error("failed to write {path}: {source}")]
    Write {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl RenderError {
    /// Returns the exit code for this render error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownNamespace { .. } | Self::UnknownPlatform { .. } => {
                ExitCode::CATALOG_ERROR
            }
            Self::DirectoryExists { .. } | Self::OutputExists { .. } => ExitCode::OUTPUT_EXISTS,
            Self::Write { .. } => ExitCode::IO_ERROR,
        }
    }
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
}

// ============================================================================
// Release Errors
// ============================================================================

/// Release automation errors (formula input, git, pull request).
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Release configuration could not be loaded
    #[error("release config {path}: {message}")]
    Config {
        /// Path to the configuration file
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// An `OS/ARCH=SHA256` artifact argument is malformed
    #[error("invalid artifact '{input}': {reason}")]
    InvalidArtifact {
        /// The raw argument
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The release version cannot be used in a branch name or URL
    #[error("invalid release version '{0}'")]
    InvalidVersion(String),

    /// A required credential is not available
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// The tap remote cannot be combined with credentials
    #[error("invalid tap remote '{url}': {reason}")]
    InvalidRemote {
        /// Remote URL without credentials
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A git subprocess failed
    #[error("git {step} failed: {stderr}")]
    Git {
        /// The git step that failed (e.g. "clone")
        step: String,
        /// Captured stderr, credentials redacted
        stderr: String,
    },

    /// The pull request could not be sent
    #[error("pull request request failed: {0}")]
    Network(String),

    /// The pull request API returned an unexpected status
    #[error("pull request creation returned HTTP {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body
        body: String,
    },

    /// I/O error during the workflow
    #[error("release I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `policy-docs` operations.
pub type Result<T> = std::result::Result<T, PolicyDocsError>;

// ============================================================================
// Tests
// ============================================================================
