//! Policy catalog types.
//!
//! A catalog maps platform → namespace → ordered policy list. All three
//! levels keep the order they had in the source document, which drives
//! table-of-contents numbering.

use indexmap::IndexMap;

/// Field names every policy record must carry.
pub const POLICY_FIELDS: [&str; 6] = [
    "policy_name",
    "title",
    "description",
    "severity",
    "remediation",
    "threat",
];

/// One documented policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Unique slug within a namespace; used as file name and anchor.
    pub policy_name: String,

    /// Human-readable policy name.
    pub title: String,

    /// Free-text description.
    pub description: String,

    /// Severity label, echoed verbatim.
    pub severity: String,

    /// Ordered remediation steps.
    pub remediation: Vec<String>,

    /// Ordered threat examples (possibly empty).
    pub threat: Vec<String>,
}

/// Policies of one platform, grouped by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformCatalog {
    namespaces: IndexMap<String, Vec<Policy>>,
}

impl PlatformCatalog {
    /// Iterates namespaces and their policies in document order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &[Policy])> {
        self.namespaces
            .iter()
            .map(|(ns, policies)| (ns.as_str(), policies.as_slice()))
    }

    /// Policies of a single namespace.
    #[must_use]
    pub fn policies(&self, namespace: &str) -> Option<&[Policy]> {
        self.namespaces.get(namespace).map(Vec::as_slice)
    }

    /// Number of policies across all namespaces.
    #[must_use]
    pub fn policy_count(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    /// Sets the full policy list of a namespace.
    pub fn insert(&mut self, namespace: impl Into<String>, policies: Vec<Policy>) {
        self.namespaces.insert(namespace.into(), policies);
    }

    /// Appends a policy to a namespace, creating the namespace if needed.
    pub fn push(&mut self, namespace: impl Into<String>, policy: Policy) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .push(policy);
    }
}

/// The full parsed policy catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    platforms: IndexMap<String, PlatformCatalog>,
}

impl Catalog {
    /// Iterates platforms in document order.
    pub fn platforms(&self) -> impl Iterator<Item = (&str, &PlatformCatalog)> {
        self.platforms.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Looks up a single platform.
    #[must_use]
    pub fn platform(&self, name: &str) -> Option<&PlatformCatalog> {
        self.platforms.get(name)
    }

    /// Platform identifiers in document order.
    #[must_use]
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    /// Number of policies across all platforms.
    #[must_use]
    pub fn policy_count(&self) -> usize {
        self.platforms.values().map(PlatformCatalog::policy_count).sum()
    }

    /// Returns `true` if the catalog has no platforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Mutable access to a platform, creating it if needed.
    pub fn platform_mut(&mut self, name: impl Into<String>) -> &mut PlatformCatalog {
        self.platforms.entry(name.into()).or_default()
    }
}
