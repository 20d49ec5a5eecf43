use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::errors::ConfigError;
use crate::domain::models::{ConfigNode, ConfigValue};

/// Read-only configuration tree loaded from a YAML document.
///
/// Keys are addressed with dotted paths (`server.http.port`). Lookups never
/// fail: a missing segment, or a segment that is not a mapping, resolves to
/// nothing and the typed getters return their zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    root: ConfigNode,
}

impl ConfigStore {
    /// Load the document at `path`.
    ///
    /// Only an unreadable file is an error. A document that does not decode
    /// to a mapping is logged and loads as an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::parse(&content, &path.display().to_string());
        debug!(path = %path.display(), keys = store.root.len(), "loaded configuration");
        Ok(store)
    }

    /// Parse an in-memory YAML document, with the same fallback as
    /// [`ConfigStore::load`].
    pub fn from_yaml_str(content: &str) -> Self {
        Self::parse(content, "<inline>")
    }

    /// Wrap an already built tree.
    pub const fn from_node(root: ConfigNode) -> Self {
        Self { root }
    }

    fn parse(content: &str, origin: &str) -> Self {
        let raw: serde_yaml::Value = match serde_yaml::from_str(content) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    origin,
                    error = %err,
                    "config document is not valid YAML, using empty configuration"
                );
                return Self::default();
            }
        };

        match ConfigValue::try_from(raw) {
            Ok(ConfigValue::Mapping(root)) => Self { root },
            // An empty document is an empty configuration.
            Ok(ConfigValue::Null) => Self::default(),
            Ok(other) => {
                warn!(
                    origin,
                    found = other.kind(),
                    "config document root is not a mapping, using empty configuration"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    origin,
                    error = %err,
                    "config document has unsupported keys, using empty configuration"
                );
                Self::default()
            }
        }
    }

    /// Top-level mapping.
    pub const fn root(&self) -> &ConfigNode {
        &self.root
    }

    /// Resolve a dotted path.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Whether `key` resolves to a value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key)
            .map(ConfigValue::to_plain_string)
            .unwrap_or_default()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(ConfigValue::to_i64)
            .unwrap_or_default()
    }

    pub fn get_int64(&self, key: &str) -> i64 {
        self.get_int(key)
    }

    // Narrowing conversions wrap, matching a plain integer cast.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_int32(&self, key: &str) -> i32 {
        self.get_int(key) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn get_int16(&self, key: &str) -> i16 {
        self.get_int(key) as i16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn get_int8(&self, key: &str) -> i8 {
        self.get_int(key) as i8
    }

    pub fn get_float(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(ConfigValue::to_f64)
            .unwrap_or_default()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(ConfigValue::to_bool)
    }

    pub fn get_strings(&self, key: &str) -> Vec<String> {
        self.decode(key).unwrap_or_default()
    }

    pub fn get_ints(&self, key: &str) -> Vec<i64> {
        self.decode(key).unwrap_or_default()
    }

    pub fn get_bools(&self, key: &str) -> Vec<bool> {
        self.decode(key).unwrap_or_default()
    }

    pub fn get_map(&self, key: &str) -> HashMap<String, String> {
        self.decode(key).unwrap_or_default()
    }

    /// Bind the subtree at `key` to `T`, discarding binding errors.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).unwrap_or(&ConfigValue::Null).decode()
    }

    /// Bind the subtree at `key` to `T`.
    ///
    /// Unlike the other getters this reports binding failures. An absent key
    /// binds as YAML `null`, so `Option<T>` yields `None` for it.
    pub fn get_struct<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.get(key)
            .unwrap_or(&ConfigValue::Null)
            .bind()
            .map_err(|source| ConfigError::Bind {
                key: key.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r"
app:
  name: demo
  debug: 1
  port: '8080'
  ratio: 0.5
server:
  hosts: [a, b]
  limits:
    burst: 20
flags: [true, false]
";

    fn store() -> ConfigStore {
        ConfigStore::from_yaml_str(DOC)
    }

    #[test]
    fn test_get_nested() {
        let store = store();
        assert_eq!(store.get("app.name"), Some(&ConfigValue::from("demo")));
        assert_eq!(
            store.get("server.limits.burst"),
            Some(&ConfigValue::Int(20))
        );
        assert!(store.get("server.limits").unwrap().as_mapping().is_some());
    }

    #[test]
    fn test_get_stops_at_scalars_and_gaps() {
        let store = store();
        assert_eq!(store.get("app.name.first"), None);
        assert_eq!(store.get("missing.name"), None);
        assert_eq!(store.get("server.hosts.0"), None);
        assert_eq!(store.get(""), None);
        assert!(!store.contains("app.missing"));
    }

    #[test]
    fn test_typed_getters() {
        let store = store();
        assert_eq!(store.get_int("app.port"), 8080);
        assert_eq!(store.get_int("app.name"), 0);
        assert_eq!(store.get_int32("server.limits.burst"), 20);
        assert!(store.get_bool("app.debug"));
        assert!(!store.get_bool("app.name"));
        assert!((store.get_float("app.ratio") - 0.5).abs() < f64::EPSILON);
        assert_eq!(store.get_string("app.port"), "8080");
        assert_eq!(store.get_string("server.limits.burst"), "20");
        assert_eq!(store.get_string("server"), "");
        assert_eq!(store.get_strings("server.hosts"), vec!["a", "b"]);
        assert_eq!(store.get_bools("flags"), vec![true, false]);
        assert!(store.get_ints("server.hosts").is_empty());
    }

    #[test]
    fn test_narrowing_wraps() {
        let store = ConfigStore::from_yaml_str("big: 300");
        assert_eq!(store.get_int8("big"), 44);
        assert_eq!(store.get_int16("big"), 300);
    }

    #[test]
    fn test_get_struct_reports_errors() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Limits {
            burst: u32,
        }

        let store = store();
        assert_eq!(
            store.get_struct::<Limits>("server.limits").unwrap(),
            Limits { burst: 20 }
        );
        assert!(matches!(
            store.get_struct::<Limits>("server.hosts"),
            Err(ConfigError::Bind { .. })
        ));
        assert_eq!(store.get_struct::<Option<Limits>>("nowhere").unwrap(), None);
    }

    #[test]
    fn test_empty_document_is_empty_store() {
        let store = ConfigStore::from_yaml_str("");
        assert!(store.root().is_empty());
        assert_eq!(store.get_int("a"), 0);
    }

    #[test]
    fn test_undecodable_documents_load_empty() {
        for doc in ["- a\n- b\n", "just a scalar", "a: [unclosed", "? [x, y]\n: 1\n"] {
            let store = ConfigStore::from_yaml_str(doc);
            assert!(store.root().is_empty(), "{doc:?} should load empty");
            assert_eq!(store.get("a"), None);
        }
    }

    #[test]
    fn test_load_malformed_file_is_not_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "- a\n- b").unwrap();
        file.flush().unwrap();

        let store = ConfigStore::load(file.path()).unwrap();
        assert!(store.root().is_empty());
        assert_eq!(store.get_string("a"), "");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "db:\n  pool: 4").unwrap();
        file.flush().unwrap();

        let store = ConfigStore::load(file.path()).unwrap();
        assert_eq!(store.get_int("db.pool"), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigStore::load("/nonexistent/confkit.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.is_fatal());
    }
}
