//! Documentation generation from a policy catalog.
//!
//! Every layout renders policies through [`policy::policy_markdown`] and
//! writes through an [`output::OutputWriter`], so directory strictness and
//! the emit summary behave the same in all modes.

pub mod flat;
pub mod frontmatter;
pub mod markdown;
pub mod mono;
pub mod output;
pub mod policy;
pub mod readme;
pub mod site;

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::catalog::{Catalog, labels};
use crate::error::RenderError;

pub use markdown::{HeaderSize, format_header, heading_anchor};
pub use output::{EmitSummary, OutputWriter};
pub use policy::policy_markdown;

/// Output layout selected for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// `<platform>/<namespace>/<policy>.md` with navigation front matter.
    Site,
    /// Single `monomarkdown.md` with a table of contents.
    Mono,
    /// `<namespace>/<policy>.md` for one platform.
    Flat {
        /// Platform to render.
        platform: String,
    },
    /// Platform READMEs plus the root recommendations page.
    Readme,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => f.write_str("site"),
            Self::Mono => f.write_str("mono"),
            Self::Flat { platform } => write!(f, "flat ({platform})"),
            Self::Readme => f.write_str("readme"),
        }
    }
}

/// Renders `catalog` into `output` using `layout`.
///
/// The output root is created if missing; everything below it is created
/// fresh.
///
/// # Errors
///
/// Returns `RenderError` on lookup failure, output collision, or I/O
/// failure. Files written before the failure stay on disk.
pub fn emit(catalog: &Catalog, output: &Path, layout: &Layout) -> Result<EmitSummary, RenderError> {
    let mut out = OutputWriter::open(output)?;
    match layout {
        Layout::Site => site::emit_site(catalog, &mut out)?,
        Layout::Mono => mono::emit_mono(catalog, &mut out)?,
        Layout::Flat { platform } => {
            let platform_catalog =
                catalog
                    .platform(platform)
                    .ok_or_else(|| RenderError::UnknownPlatform {
                        platform: platform.clone(),
                        suggestion: labels::suggest(platform, catalog.platform_names().into_iter()),
                    })?;
            flat::emit_flat(platform_catalog, &mut out)?;
        }
        Layout::Readme => readme::emit_readme(catalog, &mut out)?,
    }

    let summary = out.finish();
    info!(
        layout = %layout,
        output = %output.display(),
        directories = summary.directories,
        files = summary.files,
        "documentation generated"
    );
    Ok(summary)
}
