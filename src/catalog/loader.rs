//! Catalog loader
//!
//! Loading pipeline:
//! 1. Read the file
//! 2. YAML parsing into an untyped tree
//! 3. Shape check (platform → namespace → sequence of records)
//! 4. Eager field validation per policy record
//! 5. Conversion to the typed [`Catalog`]
//!
//! Every policy is checked for all six fields at load time, so a bad record
//! fails before any output is written.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::catalog::schema::{Catalog, POLICY_FIELDS, PlatformCatalog, Policy};
use crate::error::CatalogError;

/// Loads a policy catalog from a YAML file.
///
/// # Errors
///
/// Returns `CatalogError::Read` if the file cannot be read,
/// `CatalogError::ParseError` if it is not UTF-8 or not a well-formed
/// catalog, and
/// `CatalogError::MissingRequired` / `CatalogError::InvalidValue` if a
/// policy record is incomplete.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // Undecodable bytes are a malformed document, not an I/O failure.
    let content = String::from_utf8(bytes).map_err(|e| CatalogError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("catalog is not valid UTF-8: {}", e.utf8_error()),
    })?;
    let catalog = load_from_str_at(&content, path)?;
    debug!(
        path = %path.display(),
        platforms = catalog.platform_names().len(),
        policies = catalog.policy_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Loads a policy catalog from YAML text.
///
/// # Errors
///
/// Same failure modes as [`load_catalog`], minus the read step.
pub fn load_from_str(content: &str) -> Result<Catalog, CatalogError> {
    load_from_str_at(content, Path::new("<string>"))
}

fn load_from_str_at(content: &str, path: &Path) -> Result<Catalog, CatalogError> {
    let root: Value = serde_yaml::from_str(content).map_err(|e| CatalogError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|loc| loc.line()),
        message: e.to_string(),
    })?;

    let platforms = match root {
        Value::Mapping(map) => map,
        Value::Null => return Err(shape_error(path, "document is empty")),
        other => {
            return Err(shape_error(
                path,
                &format!(
                    "expected a mapping of platforms, found {}",
                    kind_name(&other)
                ),
            ));
        }
    };

    let mut catalog = Catalog::default();
    for (platform_key, platform_value) in &platforms {
        let platform = key_string(platform_key, path, "platform")?;
        check_path_segment(&platform, "platform", &platform)?;
        let namespaces = platform_value.as_mapping().ok_or_else(|| {
            shape_error(
                path,
                &format!(
                    "platform '{platform}' must map namespaces to policy lists, found {}",
                    kind_name(platform_value)
                ),
            )
        })?;
        let parsed = parse_platform(&platform, namespaces, path)?;
        *catalog.platform_mut(platform) = parsed;
    }

    Ok(catalog)
}

fn parse_platform(
    platform: &str,
    namespaces: &Mapping,
    path: &Path,
) -> Result<PlatformCatalog, CatalogError> {
    let mut parsed = PlatformCatalog::default();
    for (ns_key, ns_value) in namespaces {
        let namespace = key_string(ns_key, path, "namespace")?;
        check_path_segment(&namespace, "namespace", &format!("{platform}.{namespace}"))?;
        let records = ns_value.as_sequence().ok_or_else(|| {
            shape_error(
                path,
                &format!(
                    "namespace '{platform}.{namespace}' must be a list of policies, found {}",
                    kind_name(ns_value)
                ),
            )
        })?;

        let mut policies = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let location = format!("{platform}.{namespace}[{index}]");
            policies.push(parse_policy(record, &location)?);
        }
        parsed.insert(namespace, policies);
    }
    Ok(parsed)
}

/// Validates and converts one policy record.
fn parse_policy(record: &Value, location: &str) -> Result<Policy, CatalogError> {
    let fields = record
        .as_mapping()
        .ok_or_else(|| CatalogError::InvalidValue {
            field: "policy".to_string(),
            location: location.to_string(),
            expected: "a mapping".to_string(),
        })?;

    for field in POLICY_FIELDS {
        if !fields.contains_key(field) {
            return Err(CatalogError::MissingRequired {
                field: field.to_string(),
                location: location.to_string(),
            });
        }
    }

    let policy_name = text_field(fields, "policy_name", location)?;
    check_path_segment(&policy_name, "policy_name", location)?;

    Ok(Policy {
        policy_name,
        title: text_field(fields, "title", location)?,
        description: text_field(fields, "description", location)?,
        severity: text_field(fields, "severity", location)?,
        remediation: list_field(fields, "remediation", location)?,
        threat: list_field(fields, "threat", location)?,
    })
}

/// Reads a scalar field as text. Numbers and booleans are accepted and
/// rendered the way YAML wrote them.
fn text_field(fields: &Mapping, field: &str, location: &str) -> Result<String, CatalogError> {
    fields
        .get(field)
        .and_then(scalar_text)
        .ok_or_else(|| CatalogError::InvalidValue {
            field: field.to_string(),
            location: location.to_string(),
            expected: "a string".to_string(),
        })
}

fn list_field(fields: &Mapping, field: &str, location: &str) -> Result<Vec<String>, CatalogError> {
    let invalid = || CatalogError::InvalidValue {
        field: field.to_string(),
        location: location.to_string(),
        expected: "a list of strings".to_string(),
    };

    let items = fields
        .get(field)
        .and_then(Value::as_sequence)
        .ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| scalar_text(item).ok_or_else(invalid))
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Identifiers become directory and file names, so they must be a single
/// path component.
fn check_path_segment(value: &str, field: &str, location: &str) -> Result<(), CatalogError> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(CatalogError::InvalidValue {
            field: field.to_string(),
            location: location.to_string(),
            expected: "a name without path separators".to_string(),
        });
    }
    Ok(())
}

fn key_string(key: &Value, path: &Path, what: &str) -> Result<String, CatalogError> {
    key.as_str().map(str::to_string).ok_or_else(|| {
        shape_error(
            path,
            &format!("{what} identifiers must be strings, found {}", kind_name(key)),
        )
    })
}

fn shape_error(path: &Path, message: &str) -> CatalogError {
    CatalogError::ParseError {
        path: PathBuf::from(path),
        line: None,
        message: message.to_string(),
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
