//! In-memory INI document.
//!
//! A [`Document`] is an ordered list of [`Section`]s. The first section is always the
//! nameless global section (named [`GLOBAL_SECTION`]); the others may repeat, and the
//! order of same-named sections is kept because it is the order of list elements.
//!
//! Each section is an ordered multimap: a key holds a list of values, possibly empty.
//! A key with no values and a missing key are different things, as are an empty section
//! and a missing one.
//!
//! ```rust
//! use serde_inibean::Document;
//!
//! let mut doc = Document::new();
//! doc.global_mut().put("name", "demo");
//! doc.add_section("dog").put("name", "rex");
//! doc.add_section("dog").put("name", "fido");
//!
//! assert_eq!(doc.get_all("dog").len(), 2);
//! assert_eq!(doc.to_string(), "name = demo\n\n[dog]\nname = rex\n\n[dog]\nname = fido\n");
//! ```

use crate::options::Dialect;
use crate::{reader, writer, Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Name of the global section. Not a legal section header or property name.
pub const GLOBAL_SECTION: &str = "?";

/// Values and comment of one key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    values: Vec<String>,
    comment: Option<String>,
}

impl Entry {
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// One section: a name, an optional comment and an ordered multimap of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    comment: Option<String>,
    entries: IndexMap<String, Entry>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            comment: None,
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_SECTION
    }

    /// True if the section has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Appends one value to `key`, creating the key if needed.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .values
            .push(value.into());
    }

    /// Appends all `values` to `key`. The key is created even when `values` is empty.
    pub fn put_all<I>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.entries
            .entry(key.into())
            .or_default()
            .values
            .extend(values.into_iter().map(Into::into));
    }

    /// Sets the comment of an existing key. Returns false if the key does not exist.
    pub fn put_comment(&mut self, key: &str, comment: impl Into<String>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.comment = Some(comment.into());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Entry::values)
    }

    /// First value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn key_comment(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Entry::comment)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }
}

/// An INI document: the global section followed by named, possibly repeated, sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document {
            sections: vec![Section::new(GLOBAL_SECTION)],
        }
    }

    /// Parses INI text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] with the line and column of the first malformed line.
    pub fn parse(text: &str) -> Result<Self> {
        reader::parse(text)
    }

    /// Renders the document as INI text.
    #[must_use]
    pub fn to_ini_string(&self, dialect: &Dialect) -> String {
        writer::write_document(self, dialect)
    }

    #[must_use]
    pub fn global(&self) -> &Section {
        &self.sections[0]
    }

    pub fn global_mut(&mut self) -> &mut Section {
        &mut self.sections[0]
    }

    /// Appends a new section, even if one with the same name exists.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        let name = name.into();
        debug_assert_ne!(name, GLOBAL_SECTION, "the global section name is reserved");
        self.sections.push(Section::new(name));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// The most recently added section, or the global section if there is none.
    pub(crate) fn last_section_mut(&mut self) -> &mut Section {
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Named sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections[1..]
    }

    /// All sections called `name`, in document order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&Section> {
        self.sections()
            .iter()
            .filter(|section| section.name == name)
            .collect()
    }

    /// Distinct named section names, in order of first appearance.
    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for section in self.sections() {
            if !names.contains(&section.name()) {
                names.push(section.name());
            }
        }
        names
    }

    /// True if there are no keys in the global section and no named sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global().is_empty() && self.sections().is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ini_string(&Dialect::default()))
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}
