//! Per-policy markdown block.
//!
//! The block layout is fixed: an H2 title, the policy name and severity
//! lines, an H3 description, an optional H3 threat list, and an H3 numbered
//! remediation list. Input text is written verbatim without escaping.

use std::fmt::Write as _;

use crate::catalog::Policy;
use crate::docgen::markdown::{HeaderSize, format_header};

/// Renders one policy as a markdown block.
#[must_use]
pub fn policy_markdown(policy: &Policy) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "{}", format_header(HeaderSize::H2, &policy.title));
    let _ = writeln!(body, "policy name: {}", policy.policy_name);
    body.push('\n');
    let _ = writeln!(body, "severity: {}", policy.severity);
    body.push('\n');
    let _ = writeln!(body, "{}", format_header(HeaderSize::H3, "Description"));
    let _ = writeln!(body, "{}", policy.description);

    if !policy.threat.is_empty() {
        body.push('\n');
        let _ = writeln!(body, "{}", format_header(HeaderSize::H3, "Threat Example(s)"));
        for line in &policy.threat {
            let _ = writeln!(body, "{line}");
        }
        body.push('\n');
    }

    let mut out = String::with_capacity(body.len() + 64);
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    out.push('\n');
    let _ = writeln!(out, "{}", format_header(HeaderSize::H3, "Remediation"));
    out.push_str(&remediation_list(&policy.remediation));
    out.push('\n');
    out.push('\n');
    out
}

/// Numbers remediation steps from 1, one per line.
fn remediation_list(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .fold(String::new(), |mut acc, (index, step)| {
            let _ = writeln!(acc, "{}. {step}", index + 1);
            acc
        })
}
