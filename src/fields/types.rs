//! Output data model
//!
//! These types serialize to the `<input>_fields.json` document layout and
//! parse back from it unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic type of a form field
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FieldType {
    Text,
    Button,
    Choice,
    Signature,
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Button => "Button",
            FieldType::Choice => "Choice",
            FieldType::Signature => "Signature",
            FieldType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widget rectangle in PDF points, bottom-left origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// One fillable annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldRecord {
    /// Full dotted identifier
    pub key: String,
    /// `key` without its last segment, or `"root"`
    pub parent: String,
    /// Last segment of `key`
    pub child: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub coordinates: Coordinates,
    #[serde(rename = "field_label")]
    pub label: String,
    #[serde(rename = "field_value")]
    pub value: String,
    /// Raw `/Ff` bitmask
    #[serde(rename = "field_flags")]
    pub flags: i64,
    pub is_required: bool,
    pub is_readonly: bool,
    /// Options of a `Choice` field, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Caption of a `Button` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_caption: Option<String>,
}

/// Page width and height in points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

/// Fields found on one page; never empty in a finished document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub page_number: u32,
    pub page_dimensions: PageDimensions,
    pub fields: Vec<FieldRecord>,
}

/// Lightweight pointer from a hierarchy node to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldRef {
    pub page: u32,
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// One vertex of the dotted-name tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HierarchyNode {
    /// Immediate child segments, sorted and unique
    pub children: Vec<String>,
    /// Fields whose parent is this node, in document order
    pub fields: Vec<FieldRef>,
}

/// The extraction result for one PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    pub pdf_name: String,
    pub total_pages: u32,
    pub pages: Vec<PageRecord>,
    /// Nodes keyed by dotted path, plus the `"root"` node
    pub hierarchy: BTreeMap<String, HierarchyNode>,
}

impl Document {
    /// Iterate over every field of every page, in document order
    pub fn fields(&self) -> impl Iterator<Item = (u32, &FieldRecord)> {
        self.pages
            .iter()
            .flat_map(|page| page.fields.iter().map(move |f| (page.page_number, f)))
    }

    /// Total number of field records across all pages
    pub fn field_count(&self) -> usize {
        self.pages.iter().map(|page| page.fields.len()).sum()
    }
}
