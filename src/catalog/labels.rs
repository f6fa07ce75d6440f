//! Fixed display tables for platforms and namespaces.
//!
//! Both tables are closed: a key without an entry is an error, never a
//! guessed label.

use crate::error::RenderError;

// ============================================================================
// Namespaces
// ============================================================================

/// Namespace identifier → category label.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("organization", "Organizational Management"),
    ("group", "Server"),
    ("enterprise", "Server"),
    ("actions", "Continuous Integration / Continuous Deployment"),
    ("runner_group", "Continuous Integration / Continuous Deployment"),
    ("repository", "Repository configuration"),
    ("project", "Repository configuration"),
    ("member", "Members, Access Control and Permissions"),
];

/// Returns the human-facing category label for a namespace.
///
/// # Errors
///
/// Returns `RenderError::UnknownNamespace` if the namespace has no entry.
pub fn category_label(namespace: &str) -> Result<&'static str, RenderError> {
    CATEGORY_LABELS
        .iter()
        .find(|(ns, _)| *ns == namespace)
        .map(|(_, label)| *label)
        .ok_or_else(|| RenderError::UnknownNamespace {
            namespace: namespace.to_string(),
            suggestion: suggest(namespace, CATEGORY_LABELS.iter().map(|(ns, _)| *ns)),
        })
}

/// Title-cases a namespace identifier for page titles.
///
/// The first letter of every alphabetic run is upper-cased and the rest
/// lower-cased, so `runner_group` becomes `Runner_Group`.
#[must_use]
pub fn namespace_title(namespace: &str) -> String {
    let mut out = String::with_capacity(namespace.len());
    let mut prev_is_letter = false;
    for c in namespace.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

// ============================================================================
// Platforms
// ============================================================================

/// Display data for a supported source-control platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Identifier used in the catalog and output paths.
    pub id: &'static str,
    /// Display name.
    pub pretty_name: &'static str,
    /// Inline icon tag used by the aggregated recommendations page.
    pub icon: &'static str,
}

const PLATFORMS: &[PlatformInfo] = &[
    PlatformInfo {
        id: "github",
        pretty_name: "GitHub",
        icon: r#"<img src="https://user-images.githubusercontent.com/287526/230375178-2f1f8844-5609-4ef3-b9ac-141c20c43406.svg" alt="GitHub" height="20" width="20">"#,
    },
    PlatformInfo {
        id: "gitlab",
        pretty_name: "GitLab",
        icon: r#"<img src="https://user-images.githubusercontent.com/287526/230376963-ae9b8a47-4a74-4746-bc83-5b34cc520d40.svg" alt="GitLab" height="20" width="20">"#,
    },
];

/// Looks up display data for a platform.
///
/// # Errors
///
/// Returns `RenderError::UnknownPlatform` if the platform has no entry.
pub fn platform_info(platform: &str) -> Result<&'static PlatformInfo, RenderError> {
    PLATFORMS
        .iter()
        .find(|p| p.id == platform)
        .ok_or_else(|| RenderError::UnknownPlatform {
            platform: platform.to_string(),
            suggestion: suggest(platform, PLATFORMS.iter().map(|p| p.id)),
        })
}

/// Returns the display name of a platform.
///
/// # Errors
///
/// Returns `RenderError::UnknownPlatform` if the platform has no entry.
pub fn pretty_platform_name(platform: &str) -> Result<&'static str, RenderError> {
    platform_info(platform).map(|p| p.pretty_name)
}

// ============================================================================
// Suggestions
// ============================================================================

/// Returns the closest known key if its Damerau-Levenshtein distance is ≤ 3.
pub(crate) fn suggest<'a>(input: &str, known: impl Iterator<Item = &'a str>) -> Option<String> {
    known
        .map(|k| (k, strsim::damerau_levenshtein(input, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}
