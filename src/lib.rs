//! Shared library for the configuration reference generator.
//!
//! The crate loads the option catalog, classifies options into the fixed
//! document sections, resolves localized content with an English fallback and
//! writes one page plus JSON summaries per language. The `generate-reference`
//! binary is a thin wrapper over [`generate`] and [`find_repo_root`].

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod assemble;
pub mod catalog;
pub mod content;
pub mod emit;
pub mod generate;
pub mod layout;
pub mod locale;
pub mod markup;
pub mod sections;

mod schema_loader;

pub use assemble::{
    AssembledDocument, Assembler, CategoryOptionEntry, CategorySummaryEntry, OptionSummary,
    SectionOutput,
};
pub use catalog::{
    CatalogIndex, Category, CategoryCode, CategoryKey, CategoryMap, OptionDescriptor, OptionName,
};
pub use content::ContentFile;
pub use emit::{LocaleOutputs, format_document, write_language_index, write_locale_outputs};
pub use generate::{GenerationReport, generate, load_catalog};
pub use layout::Layout;
pub use locale::{DEFAULT_LANGUAGE, LocaleResolver, discover_languages};
pub use sections::{Bucket, Section, SectionPlan, classify};

pub const ROOT_ENV: &str = "CONFIGREF_ROOT";

const CATALOG_SENTINEL: &str = "data/options.json";
const CONTENT_SENTINEL: &str = "content";

/// Returns true when `candidate` looks like a reference tree root.
///
/// Both the option catalog and the fallback-language content dir must exist,
/// so an unrelated `data/` dir higher up is never mistaken for the root.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_SENTINEL).is_file()
        && candidate
            .join(CONTENT_SENTINEL)
            .join(DEFAULT_LANGUAGE)
            .is_dir()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the reference tree root.
///
/// Search order: `CONFIGREF_ROOT` if it points at a valid tree, then upwards
/// from the working directory, then upwards from the executable, then the
/// build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("CONFIGREF_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the reference tree (expected {CATALOG_SENTINEL} and {CONTENT_SENTINEL}/{DEFAULT_LANGUAGE}). Set {ROOT_ENV} or pass --root."
    );
}

/// Validate an explicit `--root` argument.
pub fn checked_root(path: &Path) -> Result<PathBuf> {
    if !is_repo_root(path) {
        bail!(
            "{} is not a reference tree: expected {CATALOG_SENTINEL} and {CONTENT_SENTINEL}/{DEFAULT_LANGUAGE}",
            path.display()
        );
    }
    Ok(fs::canonicalize(path)?)
}
