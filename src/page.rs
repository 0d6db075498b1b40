use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

/// Names of the page elements the chart pipeline reads from and draws into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Element carrying the serialized stock record
    pub holder_id: String,
    /// Attribute on the holder that contains the JSON payload
    pub payload_attr: String,
    pub price_surface: String,
    pub volume_surface: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            holder_id: "stock-data".to_string(),
            payload_attr: "data-stock".to_string(),
            price_surface: "priceChart".to_string(),
            volume_surface: "volumeChart".to_string(),
        }
    }
}

/// A single identified element with string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Document-like lookup of elements by id.
pub trait Page {
    fn element(&self, id: &str) -> Option<&Element>;
}

/// In-memory page, usually loaded from a JSON snapshot of the rendered template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPage {
    #[serde(default)]
    elements: Vec<Element>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element, replacing any earlier one with the same id.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.retain(|e| e.id != element.id);
        self.elements.push(element);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("page snapshot is not valid JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read page snapshot {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write page snapshot {}", path.display()))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl Page for StaticPage {
    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}
