//! Extraction statistics

use crate::config::ROOT_KEY;
use crate::fields::types::{Document, FieldType};
use std::collections::BTreeMap;
use std::fmt;

/// Counts describing an extracted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub pdf_name: String,
    pub total_pages: u32,
    pub pages_with_fields: usize,
    pub total_fields: usize,
    /// Field count per semantic type
    pub field_types: BTreeMap<FieldType, usize>,
    /// `(page_number, field_count)` for every page with fields
    pub fields_per_page: Vec<(u32, usize)>,
    /// Immediate children of the root node
    pub root_sections: usize,
    /// Field count for every non-root hierarchy node that holds fields
    pub section_fields: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_document(doc: &Document) -> Self {
        let mut field_types = BTreeMap::new();
        for (_, field) in doc.fields() {
            *field_types.entry(field.field_type).or_insert(0) += 1;
        }

        let section_fields = doc
            .hierarchy
            .iter()
            .filter(|(path, node)| path.as_str() != ROOT_KEY && !node.fields.is_empty())
            .map(|(path, node)| (path.clone(), node.fields.len()))
            .collect();

        Self {
            pdf_name: doc.pdf_name.clone(),
            total_pages: doc.total_pages,
            pages_with_fields: doc.pages.len(),
            total_fields: doc.field_count(),
            field_types,
            fields_per_page: doc
                .pages
                .iter()
                .map(|p| (p.page_number, p.fields.len()))
                .collect(),
            root_sections: doc
                .hierarchy
                .get(ROOT_KEY)
                .map(|root| root.children.len())
                .unwrap_or(0),
            section_fields,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PDF Name: {}", self.pdf_name)?;
        writeln!(f, "Total Pages: {}", self.total_pages)?;
        writeln!(f, "Pages with Fields: {}", self.pages_with_fields)?;
        writeln!(f, "Total Fields: {}", self.total_fields)?;

        writeln!(f, "Field Types:")?;
        for (field_type, count) in &self.field_types {
            writeln!(f, "  - {}: {}", field_type, count)?;
        }

        writeln!(f, "Fields per Page:")?;
        for (page, count) in &self.fields_per_page {
            writeln!(f, "  Page {}: {} fields", page, count)?;
        }

        writeln!(f, "Hierarchy:")?;
        writeln!(f, "  Root level has {} sections", self.root_sections)?;
        for (path, count) in &self.section_fields {
            writeln!(f, "  - {}: {} fields", path, count)?;
        }
        Ok(())
    }
}
