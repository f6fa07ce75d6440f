//! Flat docs tree for a single platform.
//!
//! ```text
//! <out>/<namespace>/index.md
//! <out>/<namespace>/<policy_name>.md
//! ```
//!
//! Namespace pages hang off a fixed `Policies` root page that the site
//! provides itself.

use std::path::PathBuf;

use tracing::info;

use crate::catalog::{PlatformCatalog, namespace_title};
use crate::docgen::frontmatter::{FrontMatter, policy_page};
use crate::docgen::output::OutputWriter;
use crate::docgen::policy::policy_markdown;
use crate::error::RenderError;

/// Title of the navigation root every namespace page hangs off.
pub const POLICIES_ROOT: &str = "Policies";

/// Writes the flat docs tree for one platform.
///
/// # Errors
///
/// Returns `RenderError::DirectoryExists` if a namespace directory already
/// exists and `RenderError::Write` on I/O failure.
pub fn emit_flat(platform: &PlatformCatalog, out: &mut OutputWriter) -> Result<(), RenderError> {
    for (namespace, policies) in platform.namespaces() {
        let ns_title = format!("{} Policies", namespace_title(namespace));
        let ns_dir = PathBuf::from(namespace);
        out.create_dir(&ns_dir)?;
        out.write_file(
            &ns_dir.join("index.md"),
            &FrontMatter::new(ns_title.as_str())
                .parent(POLICIES_ROOT)
                .with_children()
                .render(),
        )?;

        for policy in policies {
            let front_matter = FrontMatter::new(policy.title.as_str())
                .parent(ns_title.as_str())
                .grand_parent(POLICIES_ROOT);
            out.write_file(
                &ns_dir.join(format!("{}.md", policy.policy_name)),
                &policy_page(&front_matter, &policy_markdown(policy)),
            )?;
        }
        info!(namespace, policies = policies.len(), "namespace pages written");
    }
    Ok(())
}
