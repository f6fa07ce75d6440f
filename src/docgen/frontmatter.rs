//! YAML front matter for static-site pages.

use std::fmt::Write as _;

/// Front matter of one generated page.
///
/// Renders as `layout`, `title`, then the optional `parent`,
/// `grand_parent` and `has_children` keys, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Page title.
    pub title: String,
    /// Title of the parent page.
    pub parent: Option<String>,
    /// Title of the parent's parent page.
    pub grand_parent: Option<String>,
    /// Whether the page is a navigation node with children.
    pub has_children: bool,
}

impl FrontMatter {
    /// Front matter for a page with the given title and no parents.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent: None,
            grand_parent: None,
            has_children: false,
        }
    }

    /// Sets the parent title.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the grand-parent title.
    #[must_use]
    pub fn grand_parent(mut self, grand_parent: impl Into<String>) -> Self {
        self.grand_parent = Some(grand_parent.into());
        self
    }

    /// Marks the page as having children.
    #[must_use]
    pub const fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    /// Renders the `---` delimited block, ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("---".to_string());
        lines.push("layout: default".to_string());
        lines.push(format!("title: {}", quote_yaml_string(&self.title)));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent: {}", quote_yaml_string(parent)));
        }
        if let Some(grand_parent) = &self.grand_parent {
            lines.push(format!("grand_parent: {}", quote_yaml_string(grand_parent)));
        }
        if self.has_children {
            lines.push("has_children: true".to_string());
        }
        lines.push("---".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Writes `s` as a plain scalar when YAML reads it back unchanged, and
/// double-quoted otherwise (indicators, comments, `key: value`, `true`,
/// numbers, surrounding spaces).
fn quote_yaml_string(s: &str) -> String {
    let plain_round_trips = matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    );
    if plain_round_trips && !s.contains('\n') {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", u32::from(c));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Builds a policy page: front matter, a blank line, the policy block and a
/// trailing newline.
#[must_use]
pub fn policy_page(front_matter: &FrontMatter, policy_md: &str) -> String {
    format!("{}\n{policy_md}\n", front_matter.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_index_front_matter() {
        let fm = FrontMatter::new("GitHub").with_children();
        assert_eq!(
            fm.render(),
            "---\nlayout: default\ntitle: GitHub\nhas_children: true\n---\n"
        );
    }

    #[test]
    fn test_namespace_index_front_matter() {
        let fm = FrontMatter::new("Organization Policies")
            .parent("GitHub")
            .with_children();
        assert_eq!(
            fm.render(),
            "---\nlayout: default\ntitle: Organization Policies\nparent: GitHub\nhas_children: true\n---\n"
        );
    }

    #[test]
    fn test_policy_front_matter_chain() {
        let fm = FrontMatter::new("Repository Is Public")
            .parent("Repository Policies")
            .grand_parent("GitHub");
        let rendered = fm.render();
        assert!(rendered.contains("parent: Repository Policies\n"));
        assert!(rendered.contains("grand_parent: GitHub\n"));
        assert!(!rendered.contains("has_children"));
    }

    #[test]
    fn test_title_with_colon_is_quoted() {
        let fm = FrontMatter::new("Branch Protection: Force Push");
        assert!(fm.render().contains("title: \"Branch Protection: Force Push\"\n"));
    }

    #[test]
    fn test_quote_yaml_string() {
        assert_eq!(quote_yaml_string("simple"), "simple");
        assert_eq!(quote_yaml_string("Don't Do X"), "Don't Do X");
        assert_eq!(quote_yaml_string("say \"hi\""), "say \"hi\"");
        assert_eq!(quote_yaml_string("has: colon"), "\"has: colon\"");
        assert_eq!(quote_yaml_string("has # hash"), "\"has # hash\"");
        assert_eq!(quote_yaml_string(" leading"), "\" leading\"");
        assert_eq!(quote_yaml_string("[Beta] X"), "\"[Beta] X\"");
        assert_eq!(quote_yaml_string("true"), "\"true\"");
        assert_eq!(quote_yaml_string("2048"), "\"2048\"");
        assert_eq!(quote_yaml_string(""), "\"\"");
        assert_eq!(quote_yaml_string("a\\b: c"), "\"a\\\\b: c\"");
    }

    /// Keys every generated page carries, as the site generator reads them.
    #[derive(Debug, serde::Deserialize)]
    struct ParsedFrontMatter {
        layout: String,
        title: String,
        parent: Option<String>,
        grand_parent: Option<String>,
        has_children: Option<bool>,
    }

    fn parse_back(rendered: &str) -> ParsedFrontMatter {
        let body = rendered
            .strip_prefix("---\n")
            .and_then(|rest| rest.strip_suffix("---\n"))
            .expect("front matter is delimited by ---");
        serde_yaml::from_str(body).unwrap_or_else(|e| panic!("{rendered:?} is not YAML: {e}"))
    }

    #[test]
    fn test_titles_with_yaml_indicators_parse_back() {
        let titles = [
            "[Beta] Require MFA",
            "{Draft} Policy",
            "'Legacy' Tokens Allowed",
            "\"Quoted\" Start",
            "@mentions Enabled",
            "* Wildcard Branch Rules",
            "& Anchored",
            "!important Rule",
            "| Pipe",
            "> Folded",
            "% Percent",
            "`code` Title",
            "- Dash Start",
            "? Question",
            "Branch Protection: Force Push",
            "Webhooks # Without SSL",
            "Trailing space ",
            "null",
            "1.0",
            "Back\\slash",
            "Line\nBreak",
        ];
        for title in titles {
            let rendered = FrontMatter::new(title)
                .parent(title)
                .grand_parent("GitHub")
                .with_children()
                .render();
            let parsed = parse_back(&rendered);
            assert_eq!(parsed.layout, "default");
            assert_eq!(parsed.title, title, "rendered as {rendered:?}");
            assert_eq!(parsed.parent.as_deref(), Some(title));
            assert_eq!(parsed.grand_parent.as_deref(), Some("GitHub"));
            assert_eq!(parsed.has_children, Some(true));
        }
    }

    #[test]
    fn test_policy_page_layout() {
        let fm = FrontMatter::new("T").parent("P").grand_parent("G");
        let page = policy_page(&fm, "\n## T\n");
        assert_eq!(
            page,
            "---\nlayout: default\ntitle: T\nparent: P\ngrand_parent: G\n---\n\n\n## T\n\n"
        );
    }
}
