//! Platform READMEs and the root recommendations page.
//!
//! ```text
//! <out>/README.md                          aggregated recommendations
//! <out>/<platform>/README.md               per-namespace table of contents
//! <out>/<platform>/<namespace>/<policy_name>.md
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use crate::catalog::{Catalog, PlatformCatalog, PlatformInfo, category_label, platform_info};
use crate::docgen::markdown::{HeaderSize, format_header};
use crate::docgen::output::OutputWriter;
use crate::docgen::policy::policy_markdown;
use crate::error::RenderError;

// ============================================================================
// Aggregation
// ============================================================================

/// One platform's occurrence of a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLink {
    /// Platform the policy occurs on.
    pub platform: &'static PlatformInfo,
    /// Relative link to the policy page, `/`-separated.
    pub link: String,
}

/// A policy title and every platform it occurs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Policy title, the de-duplication key.
    pub title: String,
    /// One link per occurrence, in catalog order.
    pub links: Vec<PlatformLink>,
}

/// Recommendations sharing a category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Category label from the namespace table.
    pub label: &'static str,
    /// Recommendations in order of first appearance.
    pub recommendations: Vec<Recommendation>,
}

/// Groups every policy in the catalog by category label, de-duplicated by
/// title. Categories and titles keep the order they first appear in.
///
/// # Errors
///
/// Returns `RenderError::UnknownNamespace` or `RenderError::UnknownPlatform`
/// if a lookup table has no entry.
pub fn aggregate(catalog: &Catalog) -> Result<Vec<CategoryGroup>, RenderError> {
    let mut groups: IndexMap<&'static str, IndexMap<&str, Vec<PlatformLink>>> = IndexMap::new();

    for (platform, platform_catalog) in catalog.platforms() {
        let info = platform_info(platform)?;
        for (namespace, policies) in platform_catalog.namespaces() {
            let titles = groups.entry(category_label(namespace)?).or_default();
            for policy in policies {
                titles
                    .entry(policy.title.as_str())
                    .or_default()
                    .push(PlatformLink {
                        platform: info,
                        link: format!("{platform}/{namespace}/{}.md", policy.policy_name),
                    });
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(label, titles)| CategoryGroup {
            label,
            recommendations: titles
                .into_iter()
                .map(|(title, links)| Recommendation {
                    title: title.to_string(),
                    links,
                })
                .collect(),
        })
        .collect())
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the root recommendations page.
///
/// # Errors
///
/// Same as [`aggregate`].
pub fn render_root_readme(catalog: &Catalog) -> Result<String, RenderError> {
    let platforms = catalog
        .platform_names()
        .into_iter()
        .map(platform_info)
        .collect::<Result<Vec<_>, _>>()?;
    let groups = aggregate(catalog)?;

    let names: Vec<&str> = platforms.iter().map(|p| p.pretty_name).collect();
    let icons: Vec<&str> = platforms.iter().map(|p| p.icon).collect();

    let mut out = String::new();
    out.push('\n');
    let _ = writeln!(out, "{}", format_header(HeaderSize::H2, "Recommendations"));
    out.push('\n');
    let _ = writeln!(
        out,
        "Each specific recommendation below is noted to be applicable to {} by use of \
         an appropriate icon, which is linked to the detailed best practice definition: {}",
        platform_choice(&names),
        icons.join(" ")
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "For recommendations only applicable to {} visit one of the following pages:",
        names.join(" or ")
    );
    out.push('\n');
    for platform in &platforms {
        let _ = writeln!(
            out,
            "- [{} Recommendations]({}/README.md)",
            platform.pretty_name, platform.id
        );
    }
    out.push('\n');

    for group in &groups {
        let _ = writeln!(out, "{}", format_header(HeaderSize::H3, group.label));
        for recommendation in &group.recommendations {
            out.push_str("- ");
            out.push_str(&recommendation.title);
            for link in &recommendation.links {
                let _ = write!(out, " [{}]({})", link.platform.icon, link.link);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    Ok(out)
}

/// `GitHub` alone, or `either GitHub or GitLab` for several platforms.
fn platform_choice(names: &[&str]) -> String {
    match names {
        [only] => (*only).to_string(),
        _ => format!("either {}", names.join(" or ")),
    }
}

/// Renders a platform README: per namespace, the category label heading
/// and a numbered list of policy links.
///
/// # Errors
///
/// Returns `RenderError::UnknownNamespace` if a namespace has no category.
pub fn render_platform_readme(platform: &PlatformCatalog) -> Result<String, RenderError> {
    let mut out = String::new();
    for (namespace, policies) in platform.namespaces() {
        let _ = writeln!(
            out,
            "{}",
            format_header(HeaderSize::H3, category_label(namespace)?)
        );
        for (index, policy) in policies.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. [{}]({namespace}/{}.md)",
                index + 1,
                policy.title,
                policy.policy_name
            );
        }
    }
    Ok(out)
}

// ============================================================================
// Emission
// ============================================================================

/// Writes platform READMEs, raw policy files, and the root README.
///
/// All lookups are resolved before the first directory is created, so an
/// unknown namespace or platform leaves the output root untouched.
///
/// # Errors
///
/// Returns lookup errors from the rendering functions,
/// `RenderError::DirectoryExists` if a platform or namespace directory
/// already exists, and `RenderError::Write` on I/O failure.
pub fn emit_readme(catalog: &Catalog, out: &mut OutputWriter) -> Result<(), RenderError> {
    let root_readme = render_root_readme(catalog)?;

    for (platform, platform_catalog) in catalog.platforms() {
        let platform_dir = PathBuf::from(platform);
        let readme = render_platform_readme(platform_catalog)?;
        out.create_dir(&platform_dir)?;
        out.write_file(&platform_dir.join("README.md"), &readme)?;

        for (namespace, policies) in platform_catalog.namespaces() {
            let ns_dir = platform_dir.join(namespace);
            out.create_dir(&ns_dir)?;
            for policy in policies {
                out.write_file(
                    &ns_dir.join(format!("{}.md", policy.policy_name)),
                    &policy_markdown(policy),
                )?;
            }
        }
        info!(
            platform,
            policies = platform_catalog.policy_count(),
            "platform README written"
        );
    }

    out.write_file(Path::new("README.md"), &root_readme)
}
