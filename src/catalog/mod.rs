//! Policy catalog module
//!
//! Loads the YAML policy catalog (platform → namespace → policies) and
//! holds the fixed display tables used by the renderers.

pub mod labels;
pub mod loader;
pub mod schema;

pub use labels::{
    PlatformInfo, category_label, namespace_title, platform_info, pretty_platform_name,
};
pub use loader::{load_catalog, load_from_str};
pub use schema::{Catalog, POLICY_FIELDS, PlatformCatalog, Policy};
