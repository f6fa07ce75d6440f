//! Paginated site layout.
//!
//! ```text
//! <out>/<platform>/index.md
//! <out>/<platform>/<namespace>/index.md
//! <out>/<platform>/<namespace>/<policy_name>.md
//! ```
//!
//! Every page carries front matter so the static-site generator can build
//! the platform → namespace → policy navigation tree.

use std::path::PathBuf;

use tracing::info;

use crate::catalog::{Catalog, namespace_title, pretty_platform_name};
use crate::docgen::frontmatter::{FrontMatter, policy_page};
use crate::docgen::output::OutputWriter;
use crate::docgen::policy::policy_markdown;
use crate::error::RenderError;

/// Writes the paginated site for every platform in the catalog.
///
/// # Errors
///
/// Returns `RenderError::UnknownPlatform` for a platform without a display
/// name, `RenderError::DirectoryExists` if any platform or namespace
/// directory already exists, and `RenderError::Write` on I/O failure.
pub fn emit_site(catalog: &Catalog, out: &mut OutputWriter) -> Result<(), RenderError> {
    for (platform, platform_catalog) in catalog.platforms() {
        let pretty = pretty_platform_name(platform)?;
        let platform_dir = PathBuf::from(platform);
        out.create_dir(&platform_dir)?;
        out.write_file(
            &platform_dir.join("index.md"),
            &FrontMatter::new(pretty).with_children().render(),
        )?;

        for (namespace, policies) in platform_catalog.namespaces() {
            let ns_title = format!("{} Policies", namespace_title(namespace));
            let ns_dir = platform_dir.join(namespace);
            out.create_dir(&ns_dir)?;
            out.write_file(
                &ns_dir.join("index.md"),
                &FrontMatter::new(ns_title.as_str())
                    .parent(pretty)
                    .with_children()
                    .render(),
            )?;

            for policy in policies {
                let front_matter = FrontMatter::new(policy.title.as_str())
                    .parent(ns_title.as_str())
                    .grand_parent(pretty);
                out.write_file(
                    &ns_dir.join(format!("{}.md", policy.policy_name)),
                    &policy_page(&front_matter, &policy_markdown(policy)),
                )?;
            }
        }

        info!(
            platform,
            policies = platform_catalog.policy_count(),
            "platform pages written"
        );
    }
    Ok(())
}
