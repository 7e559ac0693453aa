//! Single-pass extraction pipeline

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::fields::document::DocumentAssembler;
use crate::fields::hierarchy::HierarchyBuilder;
use crate::fields::normalizer::FieldNormalizer;
use crate::fields::pages::PageAggregator;
use crate::fields::types::{Document, FieldRecord, PageDimensions};
use crate::pdf::{PdfFormReader, RawFieldSource};
use crate::source::resolve_path;
use std::path::Path;

/// Run one extraction pass over `source`.
///
/// Pages are read in order; each widget is normalized and folded into both
/// the page grouping and the hierarchy before the next page is read.
pub fn extract_fields<S: RawFieldSource + ?Sized>(
    source: &S,
    pdf_name: &str,
    config: &ExtractConfig,
) -> Result<Document> {
    let total_pages = source.page_count();
    let mut normalizer = FieldNormalizer::new().with_precision(config.coordinate_precision);
    let mut hierarchy = HierarchyBuilder::new();
    let mut pages = PageAggregator::new();

    for number in 1..=total_pages {
        let raw_page = source.read_page(number)?;

        let fields: Vec<FieldRecord> = raw_page
            .fields
            .into_iter()
            .map(|raw| normalizer.normalize(raw))
            .collect();

        for field in &fields {
            hierarchy.add_field(number, field);
        }

        pages.push_page(
            number,
            PageDimensions {
                width: raw_page.width,
                height: raw_page.height,
            },
            fields,
        );
    }

    let pages_read = pages.pages_seen();
    let pages = pages.finish();
    let field_count: usize = pages.iter().map(|p| p.fields.len()).sum();

    tracing::info!(
        pdf = pdf_name,
        total_pages = pages_read,
        pages_with_fields = pages.len(),
        fields = field_count,
        anonymous = normalizer.anonymous_count(),
        nodes = hierarchy.node_count(),
        "Extracted form fields"
    );

    Ok(DocumentAssembler::assemble(
        pdf_name,
        pages_read,
        pages,
        hierarchy.build(),
    ))
}

/// Open the PDF at `path` and extract its form fields.
///
/// The document is named after the file name of `path`.
pub fn extract_file<P: AsRef<Path>>(path: P, config: &ExtractConfig) -> Result<Document> {
    let resolved = resolve_path(path)?;
    let reader = PdfFormReader::open_bytes(&resolved.data)?;
    extract_fields(&reader, &resolved.source_name, config)
}
