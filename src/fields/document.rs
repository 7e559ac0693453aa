//! Document assembly and JSON persistence

use crate::error::Result;
use crate::fields::types::{Document, HierarchyNode, PageRecord};
use std::collections::BTreeMap;
use std::path::Path;

/// Combines the page list and hierarchy into the final [`Document`]
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn assemble(
        pdf_name: impl Into<String>,
        total_pages: u32,
        pages: Vec<PageRecord>,
        hierarchy: BTreeMap<String, HierarchyNode>,
    ) -> Document {
        Document {
            pdf_name: pdf_name.into(),
            total_pages,
            pages,
            hierarchy,
        }
    }
}

impl Document {
    /// Serialize to JSON, pretty-printed with 2-space indentation if `pretty`
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse a document previously written by [`Document::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document as JSON to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        let mut json = self.to_json(pretty)?;
        json.push('\n');
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Read a document from a JSON file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// JSON Schema describing the serialized document
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Document);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
