// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

pub const DEFAULT_DICTIONARY_ROOT: &str = "Dictionary";
pub const DEFAULT_RECORD_EXTENSION: &str = "md";
pub const DEFAULT_DEFINITION_MARKER: &str = "!!!";
pub const DEFAULT_LOOKUP_LIMIT: usize = 4;
pub const DEFAULT_DEFINITION_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    /// Configuration populated with the compiled-in defaults
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        crate::user_config::configure(&mut config);
        config
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

/// Resolved, typed view of a [`Config`]
///
/// Missing or mistyped keys fall back to the defaults, so a partially
/// filled config is always usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root folder of the term store
    pub dictionary_root: String,
    /// Extension of term records, without the dot
    pub record_extension: String,
    /// Marker that opens and closes an inline definition
    pub definition_marker: String,
    pub lookup_limit: usize,
    pub definition_limit: usize,
    /// Match lookup queries literally instead of as regular expressions
    pub literal_queries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary_root: DEFAULT_DICTIONARY_ROOT.to_string(),
            record_extension: DEFAULT_RECORD_EXTENSION.to_string(),
            definition_marker: DEFAULT_DEFINITION_MARKER.to_string(),
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
            definition_limit: DEFAULT_DEFINITION_LIMIT,
            literal_queries: true,
        }
    }
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str, trim: &[char]| {
            config
                .get_string(key)
                .map(|s| s.trim_matches(trim))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let limit = |key: &str| {
            config
                .get_int(key)
                .and_then(|i| usize::try_from(i).ok())
                .filter(|&n| n > 0)
        };

        Self {
            dictionary_root: non_empty("dictionary_root", &['/'])
                .unwrap_or(defaults.dictionary_root),
            record_extension: non_empty("record_extension", &['.'])
                .unwrap_or(defaults.record_extension),
            definition_marker: config
                .get_string("definition_marker")
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.definition_marker),
            lookup_limit: limit("lookup_limit").unwrap_or(defaults.lookup_limit),
            definition_limit: limit("definition_limit").unwrap_or(defaults.definition_limit),
            literal_queries: config
                .get_bool("literal_queries")
                .unwrap_or(defaults.literal_queries),
        }
    }
}
