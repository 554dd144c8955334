//! Validation patterns for path parameters.
//!
//! A [`PatternTable`] holds two maps: parameter name → pattern and declared
//! type name → pattern. Name entries take precedence over type entries; a
//! parameter matching neither is left unconstrained.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::ParamSpec;

/// Declared type name of integer parameters.
pub const INT_TYPE: &str = "int";

/// Declared type name of floating point parameters.
pub const FLOAT_TYPE: &str = "float";

/// One or more digits.
pub const INT_PATTERN: &str = "[0-9]+";

/// Optional sign, optional integer part, mandatory fractional digits.
pub const FLOAT_PATTERN: &str = "[+-]?([0-9]*[.])?[0-9]+";

/// Parameter-name and type-name pattern maps for one controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    /// Patterns keyed by declared type name.
    #[serde(default = "default_type_patterns")]
    pub by_type: BTreeMap<String, String>,

    /// Patterns keyed by parameter name.
    #[serde(default = "default_name_patterns")]
    pub by_name: BTreeMap<String, String>,
}

fn default_type_patterns() -> BTreeMap<String, String> {
    BTreeMap::from([
        (INT_TYPE.to_string(), INT_PATTERN.to_string()),
        (FLOAT_TYPE.to_string(), FLOAT_PATTERN.to_string()),
    ])
}

fn default_name_patterns() -> BTreeMap<String, String> {
    BTreeMap::from([("id".to_string(), INT_PATTERN.to_string())])
}

impl Default for PatternTable {
    fn default() -> Self {
        Self {
            by_type: default_type_patterns(),
            by_name: default_name_patterns(),
        }
    }
}

impl PatternTable {
    /// A table with no patterns at all.
    pub fn empty() -> Self {
        Self {
            by_type: BTreeMap::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Replaces the whole type-name mapping.
    pub fn with_type_patterns<I, K, V>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.by_type = patterns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replaces the whole parameter-name mapping.
    pub fn with_name_patterns<I, K, V>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.by_name = patterns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Adds or replaces a single type pattern.
    pub fn type_pattern(mut self, type_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.by_type.insert(type_name.into(), pattern.into());
        self
    }

    /// Adds or replaces a single name pattern.
    pub fn name_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.by_name.insert(name.into(), pattern.into());
        self
    }

    /// Resolves the pattern for a parameter, if any.
    pub fn resolve(&self, param: &ParamSpec) -> Option<&str> {
        if let Some(pattern) = self.by_name.get(&param.name) {
            return Some(pattern);
        }
        param
            .type_name()
            .and_then(|ty| self.by_type.get(ty))
            .map(String::as_str)
    }
}
