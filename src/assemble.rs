//! Builds one locale's reference document.
//!
//! The traversal is sections → categories → options in plan order. Each
//! section yields its own `SectionOutput`; `assemble` concatenates them and
//! checks that anchors stay unique across the whole document.

use crate::catalog::{CatalogIndex, OptionDescriptor};
use crate::content::ContentFile;
use crate::locale::LocaleResolver;
use crate::markup::{self, InlineRenderer, ParagraphRenderer};
use crate::sections::{Section, SectionPlan, category_members, compiler_option_pool};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Per-option record consumed by the interactive editor.
pub struct OptionSummary {
    pub id: String,
    pub display: String,
    pub oneliner: String,
    #[serde(rename = "categoryID")]
    pub category_id: String,
    #[serde(rename = "categoryDisplay")]
    pub category_display: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOptionEntry {
    pub name: String,
    pub anchor: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Navigation record for one category and the options it lists.
pub struct CategorySummaryEntry {
    pub display: String,
    pub anchor: String,
    pub options: Vec<CategoryOptionEntry>,
}

#[derive(Clone, Debug, Default)]
/// Everything one section contributes to a locale document.
pub struct SectionOutput {
    pub fragments: Vec<String>,
    pub options: Vec<OptionSummary>,
    pub categories: Vec<CategorySummaryEntry>,
    pub anchors: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AssembledDocument {
    pub language: String,
    pub fragments: Vec<String>,
    pub options: Vec<OptionSummary>,
    pub categories: Vec<CategorySummaryEntry>,
}

/// Walks a `SectionPlan` against a catalog. Reusable across locales.
pub struct Assembler<'a> {
    plan: &'a SectionPlan,
    catalog: &'a CatalogIndex,
    pool: Vec<&'a OptionDescriptor>,
    renderer: Box<dyn InlineRenderer + 'a>,
}

impl<'a> Assembler<'a> {
    pub fn new(plan: &'a SectionPlan, catalog: &'a CatalogIndex) -> Self {
        Self {
            plan,
            catalog,
            pool: compiler_option_pool(plan, catalog),
            renderer: Box::new(ParagraphRenderer),
        }
    }

    /// Swap the renderer used for prose default values.
    pub fn with_renderer(mut self, renderer: impl InlineRenderer + 'a) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Assemble the full document for the resolver's language.
    pub fn assemble(&self, resolver: &LocaleResolver) -> Result<AssembledDocument> {
        let language = resolver.language().to_string();
        let mut document = AssembledDocument {
            language: language.clone(),
            fragments: Vec::new(),
            options: Vec::new(),
            categories: Vec::new(),
        };
        let mut anchors = BTreeSet::new();

        for section in &self.plan.sections {
            let output = self
                .assemble_section(section, resolver)
                .with_context(|| format!("assembling section {} for {language}", section.name()))?;
            for anchor in &output.anchors {
                if !anchors.insert(anchor.clone()) {
                    bail!("duplicate anchor '{anchor}' in the {language} document");
                }
            }
            document.fragments.extend(output.fragments);
            document.options.extend(output.options);
            document.categories.extend(output.categories);
        }

        debug!(
            language = %language,
            options = document.options.len(),
            categories = document.categories.len(),
            "assembled document"
        );
        Ok(document)
    }

    /// Assemble a single section in isolation.
    pub fn assemble_section(
        &self,
        section: &Section,
        resolver: &LocaleResolver,
    ) -> Result<SectionOutput> {
        let mut output = SectionOutput::default();
        output.fragments.push(markup::section_open());

        let intro = read_required(resolver, &Path::new("sections").join(format!("{}.md", section.name())))?;
        output.fragments.push(intro.body().to_string());

        let category_ids = section.category_ids();
        let mut headings = Vec::with_capacity(category_ids.len());
        for id in &category_ids {
            let heading = match self.catalog.category(id) {
                Some(_) => {
                    let file = read_required(resolver, &category_path(id.as_str()))?;
                    let display = file.require_field("display", &format!("category {id}"))?;
                    Some((display, file))
                }
                None => None,
            };
            headings.push(heading);
        }

        if category_ids.len() > 1 {
            let entries: Vec<(String, String)> = category_ids
                .iter()
                .zip(&headings)
                .map(|(id, heading)| {
                    let display = heading
                        .as_ref()
                        .map_or_else(|| id.0.clone(), |(display, _)| display.clone());
                    (id.0.clone(), display)
                })
                .collect();
            output.fragments.push(markup::category_nav(&entries));
        }

        output.fragments.push("<div>".to_string());
        for (id, heading) in category_ids.iter().zip(headings) {
            let record = self.catalog.category(id);
            let display = match heading {
                Some((display, file)) => {
                    output
                        .fragments
                        .push(markup::category_block(id.as_str(), &display, file.body()));
                    output.anchors.push(id.0.clone());
                    display
                }
                None => id.0.clone(),
            };

            let members = category_members(section, record, self.catalog, &self.pool)?;
            let mut entry = CategorySummaryEntry {
                display: display.clone(),
                anchor: id.0.clone(),
                options: Vec::with_capacity(members.len()),
            };
            for option in members {
                let anchor = section.option_anchor(&option.name);
                let (fragment, summary) =
                    self.option_fragment(section, option, &anchor, id.as_str(), &display, resolver)?;
                output.fragments.push(fragment);
                output.anchors.push(anchor.clone());
                output.options.push(summary);
                entry.options.push(CategoryOptionEntry {
                    name: option.name.0.clone(),
                    anchor,
                });
            }
            output.categories.push(entry);
        }
        output.fragments.push("</div>".to_string());

        output.fragments.push(markup::section_close());
        Ok(output)
    }

    /// Content lookup for one option: the section-scoped file wins over the
    /// shared one. Both lookups are optional, but `display` and `oneline`
    /// must be present on whatever was found.
    fn option_fragment(
        &self,
        section: &Section,
        option: &OptionDescriptor,
        anchor: &str,
        category_id: &str,
        category_display: &str,
        resolver: &LocaleResolver,
    ) -> Result<(String, OptionSummary)> {
        let file_name = format!("{}.md", option.name);
        let shared = resolver.resolve(&Path::new("options").join(&file_name), true)?;
        let scoped = resolver.resolve(
            &Path::new("options").join(section.name()).join(&file_name),
            true,
        )?;

        let has_override = scoped.is_some();
        let chosen: Option<PathBuf> = scoped.or(shared);
        let file = ContentFile::read_optional(chosen.as_deref())?;

        let subject = format!("option {}", option.name);
        let display = file.require_field("display", &subject)?;
        let oneliner = file.require_field("oneline", &subject)?;

        let table = if has_override {
            None
        } else {
            let rows = markup::metadata_rows(option, self.renderer.as_ref());
            Some(markup::render_metadata_table(&rows))
        };
        let fragment = markup::option_block(
            anchor,
            option.name.as_str(),
            &display,
            file.body(),
            table.as_deref(),
        );

        Ok((
            fragment,
            OptionSummary {
                id: option.name.0.clone(),
                display,
                oneliner,
                category_id: category_id.to_string(),
                category_display: category_display.to_string(),
            },
        ))
    }
}

fn category_path(id: &str) -> PathBuf {
    Path::new("categories").join(format!("{id}.md"))
}

fn read_required(resolver: &LocaleResolver, relative: &Path) -> Result<ContentFile> {
    let path = resolver.require(relative)?;
    ContentFile::read(&path)
}
