//! Per-language name lists attached to a [`crate::LocationRecord`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The language key under which the default (non-localised) name list is
/// stored.
pub const STD_LANGUAGE: &str = "std";

/// Maps an ISO language tag (e.g. `"en"`, `"fr-CA"`) to an ordered list of
/// names, first entry preferred. The special key [`STD_LANGUAGE`] holds the
/// default list used when no language-specific match applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameMatrix {
    entries: BTreeMap<String, Vec<String>>,
}

impl NameMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a non-empty name list for a language. A list that is empty
    /// is simply not inserted, preserving the invariant that every present
    /// entry is non-empty.
    pub fn insert(&mut self, language: impl Into<String>, names: Vec<String>) {
        if names.is_empty() {
            return;
        }
        self.entries.insert(language.into(), names);
    }

    pub fn get(&self, language: &str) -> Option<&[String]> {
        self.entries.get(language).map(|v| v.as_slice())
    }

    /// The default name list (the `"std"` entry), if present.
    pub fn default_names(&self) -> Option<&[String]> {
        self.get(STD_LANGUAGE)
    }

    /// The preferred (first) name for a language, if any names are
    /// registered for it.
    pub fn preferred(&self, language: &str) -> Option<&str> {
        self.get(language).and_then(|names| names.first()).map(String::as_str)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
