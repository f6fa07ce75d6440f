mod common;

use std::fs;

use common::{PolicyDocs, arg, assert_success};

// ============================================================================
// site
// ============================================================================

#[test]
fn site_writes_paginated_tree() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(out.path())]);
    assert_success(&output, "site");

    let root = out.path();
    assert!(root.join("github/index.md").is_file());
    assert!(root.join("github/organization/index.md").is_file());
    assert!(root.join("gitlab/project/code_review_not_required.md").is_file());

    let page = fs::read_to_string(
        root.join("github/actions/all_github_actions_are_allowed.md"),
    )
    .unwrap();
    assert!(page.contains("title: \"GitHub Actions Policy: All Actions Allowed\"\n"));
    assert!(page.contains("parent: Actions Policies\n"));
    assert!(page.contains("grand_parent: GitHub\n"));
    assert!(page.contains("policy name: all_github_actions_are_allowed\n"));
}

#[test]
fn site_rerun_fails_with_output_exists_code() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    assert_success(
        &PolicyDocs::run(&["site", arg(&catalog), arg(out.path())]),
        "first site run",
    );

    let output = PolicyDocs::run(&["site", arg(&catalog), arg(out.path())]);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "{stderr}");
}

#[test]
fn site_creates_missing_output_root() {
    let out = tempfile::tempdir().unwrap();
    let nested = out.path().join("build/docs");
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(&nested)]);
    assert_success(&output, "site into nested root");
    assert!(nested.join("gitlab/index.md").is_file());
}

#[test]
fn site_mono_writes_single_document() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(out.path()), "--mono"]);
    assert_success(&output, "site --mono");

    let entries: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let doc = fs::read_to_string(out.path().join("monomarkdown.md")).unwrap();
    assert!(doc.starts_with("# Table of Contents\n"));
    assert!(doc.contains(
        "[Default Branch Doesn't Require Code Review](#default-branch-doesn't-require-code-review)"
    ));
    assert!(doc.contains("\n# GitHub\n"));
    assert!(doc.contains("\n# GitLab\n"));

    let rerun = PolicyDocs::run(&["site", arg(&catalog), arg(out.path()), "--mono"]);
    assert_eq!(rerun.status.code(), Some(4));
}

// ============================================================================
// flat
// ============================================================================

#[test]
fn flat_selects_the_only_platform() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("single_platform.yaml");
    let output = PolicyDocs::run(&["flat", arg(&catalog), arg(out.path())]);
    assert_success(&output, "flat");

    let index = fs::read_to_string(out.path().join("runner_group/index.md")).unwrap();
    assert!(index.contains("title: Runner_Group Policies\nparent: Policies\n"));
    let page = fs::read_to_string(out.path().join("runner_group/shared_runners_enabled.md")).unwrap();
    assert!(page.contains("grand_parent: Policies\n"));
    assert!(page.contains("### Threat Example(s)\n"));
}

#[test]
fn flat_with_many_platforms_needs_platform_flag() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["flat", arg(&catalog), arg(out.path())]);
    assert_eq!(output.status.code(), Some(64));

    let output = PolicyDocs::run(&[
        "flat",
        arg(&catalog),
        arg(out.path()),
        "--platform",
        "gitlab",
    ]);
    assert_success(&output, "flat --platform gitlab");
    assert!(out.path().join("project/code_review_not_required.md").is_file());
    assert!(!out.path().join("actions").exists());
}

#[test]
fn flat_unknown_platform_suggests() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&[
        "flat",
        arg(&catalog),
        arg(out.path()),
        "--platform",
        "gitlub",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did you mean 'gitlab'?"), "{stderr}");
}

// ============================================================================
// readme
// ============================================================================

#[test]
fn readme_aggregates_shared_titles() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["readme", arg(&catalog), arg(out.path())]);
    assert_success(&output, "readme");

    let root = fs::read_to_string(out.path().join("README.md")).unwrap();
    let mfa_lines: Vec<&str> = root
        .lines()
        .filter(|l| l.starts_with("- Require MFA"))
        .collect();
    assert_eq!(mfa_lines.len(), 1);
    assert_eq!(mfa_lines[0].matches("<img").count(), 2);
    assert!(mfa_lines[0].contains("(github/organization/two_factor_authentication_not_required_for_org.md)"));
    assert!(mfa_lines[0].contains("(gitlab/organization/two_factor_authentication_not_required_for_group.md)"));

    let org_heading = root.find("### Organizational Management\n").unwrap();
    let mfa = root.find("- Require MFA").unwrap();
    assert!(org_heading < mfa);

    let webhook = root
        .lines()
        .find(|l| l.starts_with("- Webhook Configured Without Secret"))
        .unwrap();
    assert_eq!(webhook.matches("<img").count(), 1);
}

#[test]
fn readme_platform_toc() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    assert_success(
        &PolicyDocs::run(&["readme", arg(&catalog), arg(out.path())]),
        "readme",
    );

    let github = fs::read_to_string(out.path().join("github/README.md")).unwrap();
    assert!(github.starts_with("### Organizational Management\n1. [Require MFA]"));
    assert!(github.contains(
        "### Continuous Integration / Continuous Deployment\n1. [GitHub Actions Policy: All Actions Allowed](actions/all_github_actions_are_allowed.md)\n"
    ));
    assert!(!out.path().join("github/organization/index.md").exists());
}

#[test]
fn readme_unknown_namespace_fails_before_writing() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("unknown_namespace.yaml");
    let output = PolicyDocs::run(&["readme", arg(&catalog), arg(out.path())]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown namespace 'organisation'"), "{stderr}");
    assert!(stderr.contains("did you mean 'organization'?"), "{stderr}");
    assert!(!out.path().join("github").exists());
}

// ============================================================================
// catalog errors
// ============================================================================

#[test]
fn missing_field_reports_location() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("missing_field.yaml");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(out.path())]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("missing required field 'severity' at github.organization[0]"),
        "{stderr}"
    );
}

#[test]
fn malformed_yaml_is_catalog_error() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("malformed.yaml");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(out.path())]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_catalog_is_io_error() {
    let out = tempfile::tempdir().unwrap();
    let output = PolicyDocs::run(&["site", "/nonexistent/policy-docs.yaml", arg(out.path())]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn non_utf8_catalog_is_catalog_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.yaml");
    fs::write(&catalog, b"github:\n  organization: [\xc3\x28]\n").unwrap();
    let out = dir.path().join("out");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(&out)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("UTF-8"));
}

#[test]
fn policy_name_with_path_separator_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.yaml");
    fs::write(
        &catalog,
        "github:\n  organization:\n    - {policy_name: ../../escape, title: A, description: d, severity: LOW, remediation: [], threat: []}\n",
    )
    .unwrap();
    let out = dir.path().join("out");
    let output = PolicyDocs::run(&["site", arg(&catalog), arg(&out)]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("github.organization[0]"), "{stderr}");
    assert!(!dir.path().join("escape.md").exists());
}

#[test]
fn quiet_suppresses_summary() {
    let out = tempfile::tempdir().unwrap();
    let catalog = PolicyDocs::fixture_path("catalog.yaml");
    let output = PolicyDocs::run(&["-q", "readme", arg(&catalog), arg(out.path())]);
    assert_success(&output, "readme -q");
    assert!(output.stderr.is_empty());
}
