//! Single concatenated document.
//!
//! `<out>/monomarkdown.md` holds a nested table of contents followed by
//! every policy block, grouped under platform (H1) and namespace (H2)
//! headings in catalog order.

use std::path::Path;

use crate::catalog::{Catalog, namespace_title, pretty_platform_name};
use crate::docgen::markdown::{HeaderSize, format_header, heading_anchor};
use crate::docgen::output::OutputWriter;
use crate::docgen::policy::policy_markdown;
use crate::error::RenderError;

/// File name of the mono-document.
pub const MONO_FILE: &str = "monomarkdown.md";

/// Renders the whole mono-document.
///
/// # Errors
///
/// Returns `RenderError::UnknownPlatform` for a platform without a display
/// name.
pub fn render_mono(catalog: &Catalog) -> Result<String, RenderError> {
    let mut toc = Vec::new();
    let mut body = Vec::new();

    toc.push(format_header(HeaderSize::H1, "Table of Contents"));
    toc.push(String::new());

    for (platform, platform_catalog) in catalog.platforms() {
        let pretty = pretty_platform_name(platform)?;
        toc.push(format!("- {pretty}"));
        body.push(format_header(HeaderSize::H1, pretty));

        for (namespace, policies) in platform_catalog.namespaces() {
            let ns_heading = namespace_title(namespace);
            toc.push(format!("  - {ns_heading}"));
            body.push(String::new());
            body.push(format_header(HeaderSize::H2, &ns_heading));

            for policy in policies {
                toc.push(format!(
                    "    - [{}](#{})",
                    policy.title,
                    heading_anchor(&policy.title)
                ));
                body.push(policy_markdown(policy));
            }
        }
        body.push(String::new());
    }

    let mut document = toc.join("\n");
    document.push_str("\n\n");
    document.push_str(&body.join("\n"));
    document.push('\n');
    Ok(document)
}

/// Writes the mono-document. The file must not exist yet.
///
/// # Errors
///
/// Returns the errors of [`render_mono`], `RenderError::OutputExists` if
/// the file already exists, and `RenderError::Write` on I/O failure.
pub fn emit_mono(catalog: &Catalog, out: &mut OutputWriter) -> Result<(), RenderError> {
    let document = render_mono(catalog)?;
    out.create_file(Path::new(MONO_FILE), &document)
}
