//! Output writers. Every write replaces the whole file; reruns over the same
//! inputs produce byte-identical files.

use crate::assemble::{AssembledDocument, CategorySummaryEntry, OptionSummary};
use crate::content::trim_blank_edges;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LANGUAGE_INDEX_FILE: &str = "languages.json";

#[derive(Serialize)]
struct CategoriesFile<'a> {
    categories: &'a [CategorySummaryEntry],
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    options: &'a [OptionSummary],
}

#[derive(Serialize)]
struct LanguageIndex<'a> {
    languages: &'a [String],
}

#[derive(Clone, Debug)]
/// Paths written for one locale.
pub struct LocaleOutputs {
    pub markdown: PathBuf,
    pub categories: PathBuf,
    pub summary: PathBuf,
}

/// Join fragments with one blank line between them.
///
/// Only fragment edges are normalized: leading blank lines and trailing
/// whitespace are dropped and empty fragments are skipped. Lines inside a
/// fragment are kept byte for byte. The result ends with exactly one newline.
pub fn format_document(fragments: &[String]) -> String {
    let mut formatted = String::new();
    for fragment in fragments.iter().map(|fragment| trim_blank_edges(fragment)) {
        if fragment.is_empty() {
            continue;
        }
        if !formatted.is_empty() {
            formatted.push_str("\n\n");
        }
        formatted.push_str(fragment);
    }
    formatted.push('\n');
    formatted
}

/// Write `<lang>.md`, `<lang>-categories.json` and `<lang>-summary.json`.
pub fn write_locale_outputs(output_dir: &Path, document: &AssembledDocument) -> Result<LocaleOutputs> {
    ensure_dir(output_dir)?;
    let language = &document.language;
    let outputs = LocaleOutputs {
        markdown: output_dir.join(format!("{language}.md")),
        categories: output_dir.join(format!("{language}-categories.json")),
        summary: output_dir.join(format!("{language}-summary.json")),
    };

    write_text(&outputs.markdown, &format_document(&document.fragments))?;
    write_json(
        &outputs.categories,
        &CategoriesFile {
            categories: &document.categories,
        },
    )?;
    write_json(
        &outputs.summary,
        &SummaryFile {
            options: &document.options,
        },
    )?;
    info!(
        language = %language,
        options = document.options.len(),
        "wrote {}",
        outputs.markdown.display()
    );
    Ok(outputs)
}

/// Write the global `languages.json` index.
pub fn write_language_index(output_dir: &Path, languages: &[String]) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(LANGUAGE_INDEX_FILE);
    write_json(&path, &LanguageIndex { languages })?;
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating output dir {}", dir.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    text.push('\n');
    write_text(path, &text)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
