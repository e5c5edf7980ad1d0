//! Static section layout and option classification.
//!
//! The document is split into four fixed sections. Three of them list their
//! options explicitly; `compilerOptions` instead lists categories and claims
//! every catalog option that no explicit list (nor the build list) names,
//! split by `categoryCode`.

use crate::catalog::{CatalogIndex, Category, CategoryKey, OptionDescriptor, OptionName};
use anyhow::{Result, anyhow, bail};
use std::collections::{BTreeMap, BTreeSet};

/// Category order of the `compilerOptions` section. The catalog's category
/// set must match this list exactly.
pub const ORDERED_CATEGORIES: &[&str] = &[
    "Projects_6255",
    "Language_and_Environment_6254",
    "Modules_6244",
    "JavaScript_Support_6247",
    "Emit_6246",
    "Interop_Constraints_6252",
    "Type_Checking_6248",
    "Completeness_6257",
    "Backwards_Compatibility_6253",
    "Compiler_Diagnostics_6251",
    "Editor_Support_6249",
    "Output_Formatting_6256",
    "Watch_and_Build_Modes_6250",
];

pub const TOP_LEVEL_OPTIONS: &[&str] = &["files", "extends", "include", "exclude", "references"];

pub const WATCH_OPTIONS: &[&str] = &[
    "watchFile",
    "watchDirectory",
    "fallbackPolling",
    "synchronousWatchDirectory",
    "excludeDirectories",
    "excludeFiles",
];

pub const TYPE_ACQUISITION_OPTIONS: &[&str] = &["enable", "disableFilenameBasedTypeAcquisition"];

/// Command-line-only build flags; catalogued but not documented here.
pub const BUILD_OPTIONS: &[&str] = &["build", "verbose", "dry", "force", "clean"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One top-level grouping of the generated document.
pub enum Section {
    /// Membership is an explicit, ordered option list.
    Options {
        name: String,
        options: Vec<OptionName>,
        anchor_prefix: Option<String>,
    },
    /// Membership is delegated to categories, each filtering the
    /// compiler-option pool by `categoryCode`.
    Categories {
        name: String,
        categories: Vec<CategoryKey>,
    },
}

impl Section {
    pub fn name(&self) -> &str {
        match self {
            Section::Options { name, .. } | Section::Categories { name, .. } => name,
        }
    }

    /// Category ids walked for this section: the declared categories, or the
    /// section name as a single pseudo-category.
    pub fn category_ids(&self) -> Vec<CategoryKey> {
        match self {
            Section::Options { name, .. } => vec![CategoryKey(name.clone())],
            Section::Categories { categories, .. } => categories.clone(),
        }
    }

    /// In-page anchor for an option rendered inside this section.
    pub fn option_anchor(&self, option: &OptionName) -> String {
        match self {
            Section::Options {
                anchor_prefix: Some(prefix),
                ..
            } => format!("{prefix}-{option}"),
            _ => option.0.clone(),
        }
    }
}

#[derive(Clone, Debug)]
/// Ordered sections plus the build-only list excluded from every section.
pub struct SectionPlan {
    pub sections: Vec<Section>,
    pub build_options: Vec<OptionName>,
}

impl SectionPlan {
    /// The fixed four-section layout.
    pub fn standard() -> Self {
        Self {
            sections: vec![
                Section::Options {
                    name: "Top Level".to_string(),
                    options: names(TOP_LEVEL_OPTIONS),
                    anchor_prefix: None,
                },
                Section::Categories {
                    name: "compilerOptions".to_string(),
                    categories: ORDERED_CATEGORIES.iter().map(|key| CategoryKey::from(*key)).collect(),
                },
                Section::Options {
                    name: "watchOptions".to_string(),
                    options: names(WATCH_OPTIONS),
                    anchor_prefix: Some("watch".to_string()),
                },
                Section::Options {
                    name: "typeAcquisition".to_string(),
                    options: names(TYPE_ACQUISITION_OPTIONS),
                    anchor_prefix: Some("type".to_string()),
                },
            ],
            build_options: names(BUILD_OPTIONS),
        }
    }

    /// Every category declared by a category-list section, in order. This is
    /// the reference list the catalog is validated against.
    pub fn category_order(&self) -> Vec<CategoryKey> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Categories { categories, .. } => Some(categories.iter().cloned()),
                Section::Options { .. } => None,
            })
            .flatten()
            .collect()
    }

    /// Names claimed by an explicit list: option-list sections plus builds.
    fn listed_names(&self) -> BTreeSet<&OptionName> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Options { options, .. } => Some(options.iter()),
                Section::Categories { .. } => None,
            })
            .flatten()
            .chain(self.build_options.iter())
            .collect()
    }
}

fn names(list: &[&str]) -> Vec<OptionName> {
    list.iter().map(|name| OptionName::from(*name)).collect()
}

/// Catalog options eligible for compiler-option categorization: everything
/// no explicit list names, in catalog order.
pub fn compiler_option_pool<'a>(
    plan: &SectionPlan,
    catalog: &'a CatalogIndex,
) -> Vec<&'a OptionDescriptor> {
    let listed = plan.listed_names();
    catalog
        .options()
        .iter()
        .filter(|option| !listed.contains(&option.name))
        .collect()
}

/// Members of one category of `section`, in membership order.
///
/// Explicit lists resolve each name against the catalog; category-list
/// sections filter `pool` by the category's code.
pub fn category_members<'a>(
    section: &Section,
    category: Option<&Category>,
    catalog: &'a CatalogIndex,
    pool: &[&'a OptionDescriptor],
) -> Result<Vec<&'a OptionDescriptor>> {
    match section {
        Section::Options { name, options, .. } => options
            .iter()
            .map(|option| {
                catalog
                    .option(option)
                    .ok_or_else(|| anyhow!("section {name} lists unknown option '{option}'"))
            })
            .collect(),
        Section::Categories { name, .. } => {
            let category = category
                .ok_or_else(|| anyhow!("section {name} references a category with no catalog record"))?;
            Ok(pool
                .iter()
                .copied()
                .filter(|option| option.category_code == category.code)
                .collect())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where an option ends up in the document.
pub enum Bucket {
    /// Named by the explicit list of an option-list section.
    Listed { section: String },
    /// Claimed by a category of a category-list section.
    Category { section: String, key: CategoryKey },
    /// Named by the build list only; not documented.
    BuildOnly,
}

/// Assign every catalog option to exactly one bucket.
///
/// All problems are gathered before failing so a catalog update surfaces
/// every unclassified or double-classified option in one run.
pub fn classify(plan: &SectionPlan, catalog: &CatalogIndex) -> Result<BTreeMap<OptionName, Bucket>> {
    let mut buckets: BTreeMap<OptionName, Bucket> = BTreeMap::new();
    let mut errors = Vec::new();
    let mut assign = |name: &OptionName, bucket: Bucket, errors: &mut Vec<String>| {
        if let Some(previous) = buckets.get(name) {
            errors.push(format!(
                "option {name} is classified twice: {} and {}",
                describe(previous),
                describe(&bucket)
            ));
        } else {
            buckets.insert(name.clone(), bucket);
        }
    };

    for section in &plan.sections {
        if let Section::Options { name, options, .. } = section {
            for option in options {
                if catalog.option(option).is_none() {
                    errors.push(format!("section {name} lists unknown option '{option}'"));
                    continue;
                }
                assign(
                    option,
                    Bucket::Listed {
                        section: name.clone(),
                    },
                    &mut errors,
                );
            }
        }
    }
    for option in &plan.build_options {
        if catalog.option(option).is_none() {
            errors.push(format!("build list names unknown option '{option}'"));
            continue;
        }
        assign(option, Bucket::BuildOnly, &mut errors);
    }

    let pool = compiler_option_pool(plan, catalog);
    for option in &pool {
        let owner = plan.sections.iter().find_map(|section| match section {
            Section::Categories { name, categories } => categories
                .iter()
                .filter_map(|key| catalog.category(key))
                .find(|category| category.code == option.category_code)
                .map(|category| Bucket::Category {
                    section: name.clone(),
                    key: category.key.clone(),
                }),
            Section::Options { .. } => None,
        });
        match owner {
            Some(bucket) => assign(&option.name, bucket, &mut errors),
            None => errors.push(format!(
                "option {} has category code {} which matches no documented category",
                option.name, option.category_code
            )),
        }
    }

    if !errors.is_empty() {
        bail!(
            "{} classification problem(s):\n{}",
            errors.len(),
            errors.join("\n")
        );
    }
    Ok(buckets)
}

fn describe(bucket: &Bucket) -> String {
    match bucket {
        Bucket::Listed { section } => format!("section {section}"),
        Bucket::Category { section, key } => format!("{section}/{key}"),
        Bucket::BuildOnly => "build list".to_string(),
    }
}
