use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique name of a configuration option (e.g., `strict`).
///
/// Doubles as the lookup id for `options/<name>.md` content files and as the
/// default in-page anchor.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionName(pub String);

/// File-lookup id and anchor of a category (e.g., `Type_Checking_6248`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(pub String);

/// Identifier linking an option to its category.
///
/// Catalog generators emit codes as JSON numbers while hand-edited files tend
/// to use strings; both normalize to the same decimal string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CategoryCode(pub String);

impl OptionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CategoryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing `_<code>` segment of the key, if any.
    pub fn code_suffix(&self) -> Option<&str> {
        self.0.rsplit_once('_').map(|(_, suffix)| suffix)
    }
}

impl CategoryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for CategoryCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CategoryCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Number(u64),
            Text(String),
        }

        match RawCode::deserialize(deserializer)? {
            RawCode::Number(value) => Ok(Self(value.to_string())),
            RawCode::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(serde::de::Error::custom("category code must not be empty"));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    }
}
