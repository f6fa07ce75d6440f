//! Documentation render command handlers.

use crate::catalog::{Catalog, load_catalog};
use crate::cli::args::{FlatArgs, ReadmeArgs, RenderPaths, SiteArgs};
use crate::docgen::{self, EmitSummary, Layout};
use crate::error::PolicyDocsError;

/// Execute `site`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or rendering fails.
pub fn site(args: &SiteArgs, quiet: bool) -> Result<(), PolicyDocsError> {
    let layout = if args.mono { Layout::Mono } else { Layout::Site };
    let catalog = load_catalog(&args.paths.docs_file)?;
    render(&catalog, &args.paths, &layout, quiet)
}

/// Execute `flat`.
///
/// # Errors
///
/// Returns a usage error if no platform is given and the catalog does not
/// have exactly one, or any load or render error.
pub fn flat(args: &FlatArgs, quiet: bool) -> Result<(), PolicyDocsError> {
    let catalog = load_catalog(&args.paths.docs_file)?;
    let platform = resolve_platform(&catalog, args.platform.as_deref())?;
    render(&catalog, &args.paths, &Layout::Flat { platform }, quiet)
}

/// Execute `readme`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or rendering fails.
pub fn readme(args: &ReadmeArgs, quiet: bool) -> Result<(), PolicyDocsError> {
    let catalog = load_catalog(&args.paths.docs_file)?;
    render(&catalog, &args.paths, &Layout::Readme, quiet)
}

fn render(
    catalog: &Catalog,
    paths: &RenderPaths,
    layout: &Layout,
    quiet: bool,
) -> Result<(), PolicyDocsError> {
    let summary = docgen::emit(catalog, &paths.output_dir, layout)?;
    if !quiet {
        eprintln!("{}", summary_line(layout, &summary, paths));
    }
    Ok(())
}

fn summary_line(layout: &Layout, summary: &EmitSummary, paths: &RenderPaths) -> String {
    format!(
        "Generated {layout} docs: {} files, {} directories in {}",
        summary.files,
        summary.directories,
        paths.output_dir.display()
    )
}

/// Picks the platform for flat mode.
///
/// An explicit choice is passed through and checked during emission.
/// Without one, a single-platform catalog selects itself.
fn resolve_platform(catalog: &Catalog, requested: Option<&str>) -> Result<String, PolicyDocsError> {
    if let Some(platform) = requested {
        return Ok(platform.to_string());
    }
    match catalog.platform_names().as_slice() {
        [only] => Ok((*only).to_string()),
        [] => Err(PolicyDocsError::Usage(
            "catalog has no platforms to render".to_string(),
        )),
        many => Err(PolicyDocsError::Usage(format!(
            "catalog has several platforms ({}); choose one with --platform",
            many.join(", ")
        ))),
    }
}
