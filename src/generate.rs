//! End-to-end generation run.
//!
//! Loads and classifies the catalog once, then assembles and writes each
//! language in sorted order. The first failure aborts the whole run; earlier
//! languages may already have been written, and rerunning is always safe.

use crate::assemble::Assembler;
use crate::catalog::CatalogIndex;
use crate::emit::{LocaleOutputs, write_language_index, write_locale_outputs};
use crate::layout::Layout;
use crate::locale::{LocaleResolver, discover_languages};
use crate::sections::{SectionPlan, classify};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
/// What a successful run produced.
pub struct GenerationReport {
    pub languages: Vec<String>,
    pub outputs: Vec<LocaleOutputs>,
    pub language_index: PathBuf,
}

/// Load the catalog for `layout`, validated against `plan`.
pub fn load_catalog(layout: &Layout, plan: &SectionPlan) -> Result<CatalogIndex> {
    let catalog = CatalogIndex::load(
        &layout.options_path(),
        &layout.categories_path(),
        &layout.schema_dir,
        &plan.category_order(),
    )?;
    classify(plan, &catalog).context("classifying catalog options into sections")?;
    Ok(catalog)
}

/// Generate every language found under the layout's content dir.
pub fn generate(layout: &Layout, plan: &SectionPlan) -> Result<GenerationReport> {
    let catalog = load_catalog(layout, plan)?;
    let languages = discover_languages(&layout.content_dir, &layout.fallback_language)?;
    let assembler = Assembler::new(plan, &catalog);

    let mut outputs = Vec::with_capacity(languages.len());
    for language in &languages {
        info!(language = %language, "generating reference");
        let resolver = LocaleResolver::new(&layout.content_dir, language, &layout.fallback_language);
        let document = assembler
            .assemble(&resolver)
            .with_context(|| format!("building the {language} reference"))?;
        outputs.push(write_locale_outputs(&layout.output_dir, &document)?);
    }

    let language_index = write_language_index(&layout.output_dir, &languages)?;
    Ok(GenerationReport {
        languages,
        outputs,
        language_index,
    })
}
