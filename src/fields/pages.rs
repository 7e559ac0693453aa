//! Grouping of field records by page

use crate::fields::types::{FieldRecord, PageDimensions, PageRecord};

/// Collects per-page field lists, dropping pages without fields
#[derive(Debug, Clone, Default)]
pub struct PageAggregator {
    pages: Vec<PageRecord>,
    pages_seen: u32,
}

impl PageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one page. Pages are expected in ascending order; a page with
    /// no fields is counted but not kept.
    pub fn push_page(
        &mut self,
        page_number: u32,
        dimensions: PageDimensions,
        fields: Vec<FieldRecord>,
    ) {
        self.pages_seen += 1;

        if fields.is_empty() {
            tracing::debug!(page = page_number, "Page has no fillable fields");
            return;
        }

        self.pages.push(PageRecord {
            page_number,
            page_dimensions: dimensions,
            fields,
        });
    }

    /// Pages recorded so far, including those without fields
    pub fn pages_seen(&self) -> u32 {
        self.pages_seen
    }

    pub fn finish(self) -> Vec<PageRecord> {
        self.pages
    }
}
