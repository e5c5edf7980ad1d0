//! Two-tier content lookup: the requested locale first, then the fallback
//! locale. Whole files are substituted; nothing is merged across locales.

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fallback language every locale inherits missing content from.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Debug)]
/// Resolves relative content paths for one language.
pub struct LocaleResolver {
    language: String,
    fallback_language: String,
    locale_root: PathBuf,
    fallback_root: PathBuf,
}

impl LocaleResolver {
    pub fn new(content_root: &Path, language: &str, fallback_language: &str) -> Self {
        Self {
            language: language.to_string(),
            fallback_language: fallback_language.to_string(),
            locale_root: content_root.join(language),
            fallback_root: content_root.join(fallback_language),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve `relative` under the locale, then the fallback locale.
    ///
    /// A miss is an error unless `optional` is set, in which case `None` is
    /// returned and the caller decides what an absent file means.
    pub fn resolve(&self, relative: &Path, optional: bool) -> Result<Option<PathBuf>> {
        let localized = self.locale_root.join(relative);
        if localized.is_file() {
            return Ok(Some(localized));
        }

        let fallback = self.fallback_root.join(relative);
        if fallback.is_file() {
            if self.language != self.fallback_language {
                debug!(
                    language = %self.language,
                    path = %relative.display(),
                    "falling back to {}",
                    self.fallback_language
                );
            }
            return Ok(Some(fallback));
        }

        if optional {
            return Ok(None);
        }

        bail!(
            "could not find {} in {}",
            relative.display(),
            self.searched_description()
        )
    }

    /// Resolve a path that must exist in the fallback chain.
    pub fn require(&self, relative: &Path) -> Result<PathBuf> {
        self.resolve(relative, false)?
            .with_context(|| format!("could not find {}", relative.display()))
    }

    fn searched_description(&self) -> String {
        if self.language == self.fallback_language {
            self.language.clone()
        } else {
            format!("either {} or {}", self.language, self.fallback_language)
        }
    }
}

/// List the language directories under `content_root`, sorted.
///
/// Hidden entries and plain files are skipped. The fallback language must be
/// present because every other locale resolves through it.
pub fn discover_languages(content_root: &Path, fallback_language: &str) -> Result<Vec<String>> {
    let mut languages = BTreeSet::new();
    let entries = fs::read_dir(content_root)
        .with_context(|| format!("listing languages under {}", content_root.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        languages.insert(name);
    }

    if !languages.contains(fallback_language) {
        bail!(
            "fallback language '{fallback_language}' has no directory under {}",
            content_root.display()
        );
    }
    Ok(languages.into_iter().collect())
}
