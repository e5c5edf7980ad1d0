//! JSON Schema validation for the catalog data files.
//!
//! Both catalog inputs ship with a schema under `schema/`. The loader resolves
//! the schema next to the data tree first, then falls back to the copy that
//! ships with the crate, compiles it, and reports every violation at once.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub(crate) const OPTION_CATALOG_SCHEMA: &str = "option_catalog.schema.json";
pub(crate) const CATEGORY_MAP_SCHEMA: &str = "category_map.schema.json";

/// Compiled schema plus the path it was read from, for error messages.
pub(crate) struct LoadedSchema {
    pub path: PathBuf,
    pub compiled: JSONSchema,
}

impl LoadedSchema {
    /// Validate an already-parsed document, collecting every error.
    pub fn validate(&self, value: &Value, label: &Path) -> Result<()> {
        if let Err(errors) = self.compiled.validate(value) {
            let details = errors
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("\n");
            bail!(
                "{} failed schema validation against {}:\n{}",
                label.display(),
                self.path.display(),
                details
            );
        }
        Ok(())
    }
}

pub(crate) fn load_json_schema(path: &Path) -> Result<LoadedSchema> {
    let raw = read_json(path).with_context(|| format!("loading schema {}", path.display()))?;
    let compiled = JSONSchema::compile(&raw)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;
    Ok(LoadedSchema {
        path: path.to_path_buf(),
        compiled,
    })
}

/// Parse `data_path` and validate it against the named schema.
pub(crate) fn validate_data_file(schema_dir: &Path, schema_name: &str, data_path: &Path) -> Result<()> {
    let schema_path = resolve_schema_path(schema_dir, schema_name);
    let schema = load_json_schema(&schema_path)?;
    let value = read_json(data_path)?;
    schema.validate(&value, data_path)
}

/// Prefer the repository's `schema/` dir; use the crate copy when absent.
pub(crate) fn resolve_schema_path(schema_dir: &Path, schema_name: &str) -> PathBuf {
    let candidate = schema_dir.join(schema_name);
    if candidate.is_file() {
        return candidate;
    }
    bundled_schema_dir().join(schema_name)
}

pub(crate) fn bundled_schema_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema")
}

fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}
