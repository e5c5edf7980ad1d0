//! Deserializable representation of `data/options.json` and
//! `data/categories.json`.
//!
//! The types mirror the catalog schemas under `schema/`. Use `CatalogIndex`
//! for validation and lookups; these structs are the raw on-disk shape.

use crate::catalog::identity::{CategoryCode, CategoryKey, OptionName};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Flat option list as stored on disk.
pub struct OptionCatalog {
    pub options: Vec<OptionDescriptor>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One configuration option and the metadata rendered in its reference table.
pub struct OptionDescriptor {
    pub name: OptionName,
    pub category_code: CategoryCode,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub related: Vec<OptionName>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Named grouping of compiler options.
pub struct Category {
    pub key: CategoryKey,
    pub code: CategoryCode,
    #[serde(default)]
    pub message: Option<String>,
}

/// Category records keyed by the map key used in `categories.json`.
pub type CategoryMap = BTreeMap<String, Category>;

/// Read and parse the option list from disk without additional validation.
pub fn load_options_from_path(path: &Path) -> Result<OptionCatalog> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: OptionCatalog =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}

/// Read and parse the category map from disk without additional validation.
pub fn load_categories_from_path(path: &Path) -> Result<CategoryMap> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let categories: CategoryMap =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(categories)
}
