//! Chart configuration handed to a [`ChartEngine`](crate::engine::ChartEngine).
//!
//! Serializes to the JSON shape web charting engines accept:
//! `{type, data: {labels, datasets}, options: {responsive, plugins.title, scales}}`.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// A CSS `rgba(...)` color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// The first (and for our charts, only) dataset.
    pub fn series(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    pub fn begins_at_zero(&self) -> bool {
        self.options
            .scales
            .as_ref()
            .map(|s| s.y.begin_at_zero)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: DatasetStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    pub border_color: Rgba,
    pub background_color: Rgba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    /// Line smoothing, 0 draws straight segments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: AxisScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    pub begin_at_zero: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rgba_prints_as_css() {
        assert_eq!(Rgba::new(54, 162, 235, 1.0).to_string(), "rgba(54, 162, 235, 1)");
        assert_eq!(Rgba::new(54, 162, 235, 0.1).to_string(), "rgba(54, 162, 235, 0.1)");
    }

    #[test]
    fn serializes_in_engine_shape() {
        let config = ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: vec!["d1".into()],
                datasets: vec![Dataset {
                    label: "vol".into(),
                    data: vec![5.0],
                    style: DatasetStyle {
                        border_color: Rgba::new(1, 2, 3, 1.0),
                        background_color: Rgba::new(1, 2, 3, 0.5),
                        fill: None,
                        tension: None,
                        border_width: Some(1),
                    },
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Plugins {
                    title: Title { display: true, text: "t".into() },
                },
                scales: None,
            },
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "bar",
                "data": {
                    "labels": ["d1"],
                    "datasets": [{
                        "label": "vol",
                        "data": [5.0],
                        "borderColor": "rgba(1, 2, 3, 1)",
                        "backgroundColor": "rgba(1, 2, 3, 0.5)",
                        "borderWidth": 1
                    }]
                },
                "options": {
                    "responsive": true,
                    "plugins": { "title": { "display": true, "text": "t" } }
                }
            })
        );
        assert!(config.begins_at_zero());
    }
}
