//! Markdown primitives shared by every page generator.

use std::fmt;

/// Markdown heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeaderSize {
    /// `#`
    H1,
    /// `##`
    H2,
    /// `###`
    H3,
    /// `####`
    H4,
    /// `#####`
    H5,
    /// `######`
    H6,
}

impl HeaderSize {
    /// Number of `#` characters for this level.
    #[must_use]
    pub const fn level(self) -> usize {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }
}

impl fmt::Display for HeaderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.level())
    }
}

/// Formats a markdown heading (`## text`).
#[must_use]
pub fn format_header(size: HeaderSize, text: &str) -> String {
    format!("{} {text}", "#".repeat(size.level()))
}

/// Builds the in-page anchor for a heading title.
///
/// Lower-cases the title and replaces spaces with hyphens. Punctuation is
/// kept as-is, so `Don't Do X` becomes `don't-do-x`.
#[must_use]
pub fn heading_anchor(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}
