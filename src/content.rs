//! Markdown content files: a YAML front-matter block followed by body text.
//!
//! Bodies are passed through untouched; only the front matter is parsed.

use anyhow::{Context, Result, bail};
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const FRONT_MATTER_DELIM: &str = "---";

#[derive(Clone, Debug, Default)]
/// Parsed content file.
///
/// `path` is `None` for the empty stand-in used when an optional lookup
/// found nothing.
pub struct ContentFile {
    pub path: Option<PathBuf>,
    front_matter: BTreeMap<String, YamlValue>,
    body: String,
}

impl ContentFile {
    /// Read and parse a content file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let mut file = Self::parse(&source)
            .with_context(|| format!("parsing front matter of {}", path.display()))?;
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Read `path` when present, otherwise produce an empty file.
    pub fn read_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::default()),
        }
    }

    /// Split `source` into front matter and body.
    ///
    /// Files without a leading `---` line have no front matter and the whole
    /// text is the body.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut lines = source.lines();
        match lines.next() {
            Some(first) if first.trim_end() == FRONT_MATTER_DELIM => {}
            _ => {
                return Ok(Self {
                    path: None,
                    front_matter: BTreeMap::new(),
                    body: trim_blank_edges(source).to_string(),
                });
            }
        }

        let mut raw = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == FRONT_MATTER_DELIM {
                closed = true;
                break;
            }
            raw.push(line);
        }
        if !closed {
            bail!("front matter is missing its closing '{FRONT_MATTER_DELIM}' line");
        }

        let body = lines.collect::<Vec<_>>().join("\n");
        let body = trim_blank_edges(&body).to_string();
        Ok(Self {
            path: None,
            front_matter: parse_front_matter(&raw.join("\n"))?,
            body,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Scalar front-matter value as text; blank values count as absent.
    pub fn field(&self, key: &str) -> Option<String> {
        let text = match self.front_matter.get(key)? {
            YamlValue::String(value) => value.clone(),
            YamlValue::Number(value) => value.to_string(),
            YamlValue::Bool(value) => value.to_string(),
            _ => return None,
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Like `field`, but a missing value is an error naming `subject`.
    pub fn require_field(&self, key: &str, subject: &str) -> Result<String> {
        match self.field(key) {
            Some(value) => Ok(value),
            None => {
                let source = self
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "no content file".to_string());
                bail!("no '{key}' front matter for {subject} ({source})")
            }
        }
    }
}

/// Drop blank lines before the first content line and trailing whitespace.
/// Indentation of the first content line and everything in between is kept.
pub(crate) fn trim_blank_edges(text: &str) -> &str {
    let trimmed = text.trim_end();
    let mut start = 0;
    for line in trimmed.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &trimmed[start..]
}

fn parse_front_matter(raw: &str) -> Result<BTreeMap<String, YamlValue>> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let value: YamlValue = serde_yaml::from_str(raw).context("invalid YAML front matter")?;
    let mapping = match value {
        YamlValue::Null => return Ok(BTreeMap::new()),
        YamlValue::Mapping(mapping) => mapping,
        _ => bail!("front matter must be a key-value mapping"),
    };

    let mut fields = BTreeMap::new();
    for (key, value) in mapping {
        let YamlValue::String(key) = key else {
            bail!("front matter keys must be strings");
        };
        fields.insert(key, value);
    }
    Ok(fields)
}
