//! Per-element style storage.
//!
//! Styles live outside the element tree, keyed by element id, in two
//! variants: desktop and mobile. The two variants are always captured and
//! removed together, so a style never outlives its element or loses half of
//! its responsive definition.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which style variant an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleViewport {
    Desktop,
    Mobile,
}

/// Property map captured per element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub properties: HashMap<String, String>,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, String)> for StyleRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

/// Desktop and mobile style records for every styled element in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    desktop: HashMap<String, StyleRecord>,
    mobile: HashMap<String, StyleRecord>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self, viewport: StyleViewport) -> &HashMap<String, StyleRecord> {
        match viewport {
            StyleViewport::Desktop => &self.desktop,
            StyleViewport::Mobile => &self.mobile,
        }
    }

    fn records_mut(&mut self, viewport: StyleViewport) -> &mut HashMap<String, StyleRecord> {
        match viewport {
            StyleViewport::Desktop => &mut self.desktop,
            StyleViewport::Mobile => &mut self.mobile,
        }
    }

    pub fn get(&self, element_id: &str, viewport: StyleViewport) -> Option<&StyleRecord> {
        self.records(viewport).get(element_id)
    }

    /// Owned copy of the element's record; empty if nothing was ever set.
    pub fn capture(&self, element_id: &str, viewport: StyleViewport) -> StyleRecord {
        self.get(element_id, viewport).cloned().unwrap_or_default()
    }

    pub fn set_style(&mut self, element_id: &str, record: StyleRecord, viewport: StyleViewport) {
        self.records_mut(viewport)
            .insert(element_id.to_string(), record);
    }

    /// Drop both variants for the element.
    pub fn remove(&mut self, element_id: &str) {
        self.desktop.remove(element_id);
        self.mobile.remove(element_id);
    }
}
