//! Substitution tables: tag name to replacement text.
//!
//! A [`SubstitutionTable`] answers every lookup. Keys that were never set
//! resolve to the empty string, so a template never fails because a value is
//! missing.
//!
//! ## Vars file format
//!
//! Tables can be loaded from a flat JSON object:
//!
//! ```text
//! {
//!   "title": "Home",
//!   "year": 2024,
//!   "draft": false,
//!   "subtitle": null
//! }
//! ```
//!
//! Strings are used verbatim, numbers and booleans use their JSON text, and
//! `null` becomes the empty string. Nested arrays or objects are rejected.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{JeaCmsError, Result};

/// Mapping from tag name to replacement string, with empty-string default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: HashMap<String, String>,
}

/// A scalar value accepted in a vars file.
#[derive(Deserialize)]
#[serde(untagged)]
enum VarValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl VarValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, returning `""` when it has no entry.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map_or("", String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a table from a JSON vars file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| JeaCmsError::VarsNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let vars: HashMap<String, Option<VarValue>> =
            serde_json::from_str(&contents).map_err(|e| JeaCmsError::VarsParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(vars
            .into_iter()
            .map(|(k, v)| (k, v.map(VarValue::into_text).unwrap_or_default()))
            .collect())
    }

    /// Apply `KEY=VALUE` assignments in order, later ones overriding earlier.
    pub fn apply_assignments<I, S>(&mut self, assignments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for assignment in assignments {
            let (key, value) = parse_assignment(assignment.as_ref())?;
            self.insert(key, value);
        }
        Ok(())
    }
}

/// Split `KEY=VALUE` at the first `=`. The value may be empty or contain `=`.
pub fn parse_assignment(s: &str) -> Result<(&str, &str)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(JeaCmsError::InvalidAssignment(s.to_string())),
    }
}

impl<K, V> FromIterator<(K, V)> for SubstitutionTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> Extend<(K, V)> for SubstitutionTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl From<HashMap<String, String>> for SubstitutionTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_vars(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn test_missing_key_is_empty() {
        let table = SubstitutionTable::from_iter([("key", "value")]);
        assert_eq!(table.get("key"), "value");
        assert_eq!(table.get("other"), "");
        assert!(!table.contains_key("other"));
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = SubstitutionTable::new();
        assert!(table.insert("key", "one").is_none());
        assert_eq!(table.insert("key", "two").as_deref(), Some("one"));
        assert_eq!(table.get("key"), "two");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_scalars() {
        let file = write_vars(
            r#"{"title": "Home", "year": 2024, "ratio": 1.5, "draft": false, "subtitle": null}"#,
        );
        let table = SubstitutionTable::load(file.path()).unwrap();
        assert_eq!(table.get("title"), "Home");
        assert_eq!(table.get("year"), "2024");
        assert_eq!(table.get("ratio"), "1.5");
        assert_eq!(table.get("draft"), "false");
        assert_eq!(table.get("subtitle"), "");
        assert!(table.contains_key("subtitle"));
    }

    #[test]
    fn test_load_rejects_nested_values() {
        let file = write_vars(r#"{"list": [1, 2]}"#);
        let result = SubstitutionTable::load(file.path());
        assert!(matches!(result, Err(JeaCmsError::VarsParse { .. })));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let file = write_vars(r#"["a", "b"]"#);
        let result = SubstitutionTable::load(file.path());
        assert!(matches!(result, Err(JeaCmsError::VarsParse { .. })));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = SubstitutionTable::load(Path::new("/tmp/nonexistent_jeacms_vars.json"));
        assert!(matches!(result, Err(JeaCmsError::VarsNotFound { .. })));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("key=value").unwrap(), ("key", "value"));
        assert_eq!(parse_assignment("key=").unwrap(), ("key", ""));
        assert_eq!(parse_assignment("url=a=b").unwrap(), ("url", "a=b"));
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(matches!(
            parse_assignment("novalue"),
            Err(JeaCmsError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("=value"),
            Err(JeaCmsError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn test_apply_assignments_override_in_order() {
        let mut table = SubstitutionTable::from_iter([("key", "file")]);
        table.apply_assignments(["key=first", "key=second", "other=x"]).unwrap();
        assert_eq!(table.get("key"), "second");
        assert_eq!(table.get("other"), "x");
    }
}
