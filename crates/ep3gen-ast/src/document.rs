//! Book-level data
//!
//! This module defines the attribute dictionary collected from the document
//! header and the [`Book`] produced by a completed conversion pass.

use std::collections::HashMap;

use serde::Serialize;

use crate::image::ImageRef;
use crate::section::Section;

/// Attribute dictionary declared in the document header
///
/// Keys are unique; setting an existing key replaces its value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get an attribute
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Get an attribute or the empty string
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Document title, empty if not declared
    pub fn title(&self) -> &str {
        self.get_or_empty("title")
    }

    /// Document language, defaulting to `en`
    pub fn language(&self) -> &str {
        self.get("language").filter(|l| !l.is_empty()).unwrap_or("en")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// The validated structure of a converted book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Header attributes, including the computed timestamps
    pub attributes: Attributes,
    /// Cover image
    pub cover_image: ImageRef,
    /// Auxiliary images, in declaration order
    pub images: Vec<ImageRef>,
    /// All sections in reading order
    pub sections: Vec<Section>,
    /// Entry points: cover, title page, first body and first back section
    pub guides: Vec<Section>,
    /// Number of source lines in the document
    pub line_count: usize,
}

impl Book {
    pub fn title(&self) -> &str {
        self.attributes.title()
    }

    /// Find a section by its rendered identifier
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id.to_string() == id)
    }
}
