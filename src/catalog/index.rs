//! Indexed, validated view of the option catalog and category map.
//!
//! Loading is strict: schema violations, duplicate names, dangling `related`
//! references and any drift between the catalog's categories and the
//! hard-coded category order abort the run before a single locale is
//! processed.

use crate::catalog::model::{
    Category, CategoryMap, OptionDescriptor, load_categories_from_path, load_options_from_path,
};
use crate::catalog::{CategoryKey, OptionName};
use crate::schema_loader::{CATEGORY_MAP_SCHEMA, OPTION_CATALOG_SCHEMA, validate_data_file};
use anyhow::{Context, Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
/// Option catalog plus derived lookups by option name and category key.
pub struct CatalogIndex {
    options: Vec<OptionDescriptor>,
    by_name: BTreeMap<OptionName, usize>,
    categories: BTreeMap<CategoryKey, Category>,
}

impl CatalogIndex {
    /// Load both catalog files, validate them and build the index.
    ///
    /// `expected_categories` is the ordered category list the document is
    /// laid out with; the catalog must define exactly that set.
    pub fn load(
        options_path: &Path,
        categories_path: &Path,
        schema_dir: &Path,
        expected_categories: &[CategoryKey],
    ) -> Result<Self> {
        validate_data_file(schema_dir, OPTION_CATALOG_SCHEMA, options_path)?;
        validate_data_file(schema_dir, CATEGORY_MAP_SCHEMA, categories_path)?;

        let catalog = load_options_from_path(options_path)?;
        let categories = load_categories_from_path(categories_path)?;
        let index = Self::from_parts(catalog.options, categories, expected_categories)
            .with_context(|| {
                format!(
                    "validating catalog {} against {}",
                    options_path.display(),
                    categories_path.display()
                )
            })?;
        debug!(
            options = index.options.len(),
            categories = index.categories.len(),
            "loaded option catalog"
        );
        Ok(index)
    }

    /// Build an index from already-deserialized parts.
    pub fn from_parts(
        options: Vec<OptionDescriptor>,
        categories: CategoryMap,
        expected_categories: &[CategoryKey],
    ) -> Result<Self> {
        let categories = index_categories(categories)?;
        validate_category_set(&categories, expected_categories)?;
        let by_name = index_options(&options)?;
        Ok(Self {
            options,
            by_name,
            categories,
        })
    }

    /// Options in catalog order.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Resolve an option by name.
    pub fn option(&self, name: &OptionName) -> Option<&OptionDescriptor> {
        self.by_name.get(name).map(|idx| &self.options[*idx])
    }

    pub fn category(&self, key: &CategoryKey) -> Option<&Category> {
        self.categories.get(key)
    }
}

fn index_categories(categories: CategoryMap) -> Result<BTreeMap<CategoryKey, Category>> {
    let mut by_key = BTreeMap::new();
    for (entry, category) in categories {
        if category.key.as_str().trim().is_empty() {
            bail!("category entry '{entry}' has an empty key");
        }
        match category.key.code_suffix() {
            Some(suffix) if suffix == category.code.as_str() => {}
            _ => bail!(
                "category key {} does not end with its code _{}",
                category.key,
                category.code
            ),
        }
        if by_key.contains_key(&category.key) {
            bail!("duplicate category key {}", category.key);
        }
        by_key.insert(category.key.clone(), category);
    }
    Ok(by_key)
}

/// Set equality between the catalog's category keys and the layout's list.
fn validate_category_set(
    categories: &BTreeMap<CategoryKey, Category>,
    expected: &[CategoryKey],
) -> Result<()> {
    let loaded: BTreeSet<&CategoryKey> = categories.keys().collect();
    let wanted: BTreeSet<&CategoryKey> = expected.iter().collect();
    if wanted.len() != expected.len() {
        bail!("category order lists the same category more than once");
    }
    if loaded == wanted {
        return Ok(());
    }

    let missing = wanted
        .difference(&loaded)
        .map(|key| key.as_str())
        .collect::<Vec<_>>();
    let unexpected = loaded
        .difference(&wanted)
        .map(|key| key.as_str())
        .collect::<Vec<_>>();
    bail!(
        "catalog categories do not match the category order; missing from catalog: [{}], not in category order: [{}]",
        missing.join(", "),
        unexpected.join(", ")
    )
}

fn index_options(options: &[OptionDescriptor]) -> Result<BTreeMap<OptionName, usize>> {
    if options.is_empty() {
        bail!("catalog contains no options");
    }

    let mut map = BTreeMap::new();
    for (idx, option) in options.iter().enumerate() {
        if option.name.as_str().trim().is_empty() {
            bail!("encountered option with no name at position {idx}");
        }
        if map.insert(option.name.clone(), idx).is_some() {
            bail!("duplicate option name {}", option.name);
        }
    }

    for option in options {
        for related in &option.related {
            if !map.contains_key(related) {
                bail!(
                    "option {} references unknown related option '{}'",
                    option.name,
                    related
                );
            }
        }
    }
    Ok(map)
}
