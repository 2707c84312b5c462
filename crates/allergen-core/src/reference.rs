//! Allergen reference data: allergen name → substitute ingredients.
//!
//! Loaded once at startup and read-only afterwards. Every lookup and
//! detection borrows the same [`ReferenceData`] value.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read allergen reference data {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed allergen reference data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("allergen reference data contains no allergens")]
    Empty,

    #[error("allergen name must not be empty")]
    EmptyName,

    #[error("duplicate allergen \"{0}\" in reference data")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceData {
    entries: BTreeMap<String, Vec<String>>,
}

impl ReferenceData {
    /// Read and validate reference data from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReferenceDataError> {
        let content = fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            allergens = data.len(),
            "loaded allergen reference data"
        );
        Ok(data)
    }

    /// Parse reference data from a JSON object of `{ "<allergen>": ["<substitute>", ...] }`.
    pub fn from_json(json: &str) -> Result<Self, ReferenceDataError> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.non_empty()
    }

    /// Build reference data from in-memory entries.
    pub fn from_entries<I, K, V, S>(entries: I) -> Result<Self, ReferenceDataError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, substitutes) in entries {
            insert_entry(
                &mut map,
                name.as_ref(),
                substitutes.into_iter().map(Into::into).collect(),
            )?;
        }
        ReferenceData { entries: map }.non_empty()
    }

    fn non_empty(self) -> Result<Self, ReferenceDataError> {
        if self.entries.is_empty() {
            Err(ReferenceDataError::Empty)
        } else {
            Ok(self)
        }
    }

    /// Allergen names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn substitutes(&self, allergen: &str) -> Option<&[String]> {
        self.entries.get(allergen).map(Vec::as_slice)
    }

    pub fn contains(&self, allergen: &str) -> bool {
        self.entries.contains_key(allergen)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Allergen names are compared against lowercased text, so keys are stored lowercased.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn insert_entry(
    map: &mut BTreeMap<String, Vec<String>>,
    name: &str,
    substitutes: Vec<String>,
) -> Result<(), ReferenceDataError> {
    let key = normalize_name(name);
    if key.is_empty() {
        return Err(ReferenceDataError::EmptyName);
    }
    if map.contains_key(&key) {
        return Err(ReferenceDataError::Duplicate(key));
    }
    map.insert(key, substitutes);
    Ok(())
}

// Hand-written so duplicate keys are rejected instead of silently overwritten.
impl<'de> Deserialize<'de> for ReferenceData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = BTreeMap<String, Vec<String>>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of allergen names to lists of substitutes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = BTreeMap::new();
                while let Some((name, substitutes)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    insert_entry(&mut map, &name, substitutes).map_err(de::Error::custom)?;
                }
                Ok(map)
            }
        }

        deserializer
            .deserialize_map(EntriesVisitor)
            .map(|entries| ReferenceData { entries })
    }
}
