//! The on-disk document tree.
//!
//! A model file is a single JSON document mirroring the markup layout of
//! the original site descriptions: every element has a tag and string
//! attributes, nodes carry an input list, buildings a shape slot and a
//! substructure list, and input edges hold the node they drive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substructures: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Box<Element>>,
    /// The node driven by an input edge element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Box<Element>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, attribute: &str, value: impl ToString) {
        self.attrs.insert(attribute.to_string(), value.to_string());
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attrs.get(attribute).map(String::as_str)
    }
}
