//! Filesystem layout of a reference tree.
//!
//! ```text
//! <root>/data/options.json        option catalog
//! <root>/data/categories.json     category map
//! <root>/content/<lang>/...       localized markdown
//! <root>/schema/*.schema.json     catalog schemas (optional override)
//! <root>/output/                  generated files
//! ```

use crate::locale::DEFAULT_LANGUAGE;
use std::env;
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR_ENV: &str = "CONFIGREF_OUTPUT_DIR";

#[derive(Clone, Debug)]
pub struct Layout {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    pub schema_dir: PathBuf,
    pub output_dir: PathBuf,
    pub fallback_language: String,
}

impl Layout {
    /// Conventional layout under `root`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            data_dir: root.join("data"),
            content_dir: root.join("content"),
            schema_dir: root.join("schema"),
            output_dir: root.join("output"),
            fallback_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Apply an explicit output dir, else `CONFIGREF_OUTPUT_DIR` when set.
    pub fn with_output_override(mut self, explicit: Option<PathBuf>) -> Self {
        let from_env = env::var_os(OUTPUT_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        if let Some(dir) = explicit.or(from_env) {
            self.output_dir = if dir.is_absolute() {
                dir
            } else {
                self.root.join(dir)
            };
        }
        self
    }

    pub fn options_path(&self) -> PathBuf {
        self.data_dir.join("options.json")
    }

    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join("categories.json")
    }
}
