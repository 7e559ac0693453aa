//! Form field normalization and hierarchy construction
//!
//! Raw widgets flow through [`FieldNormalizer`], then fan out into the
//! [`PageAggregator`] and the [`HierarchyBuilder`]; [`DocumentAssembler`]
//! joins both into the final [`Document`].

mod document;
mod extract;
mod hierarchy;
mod normalizer;
mod pages;
mod summary;
mod types;

pub use document::DocumentAssembler;
pub use extract::{extract_fields, extract_file};
pub use hierarchy::{build_hierarchy, HierarchyBuilder};
pub use normalizer::{split_key, FieldNormalizer, FLAG_READ_ONLY, FLAG_REQUIRED};
pub use pages::PageAggregator;
pub use summary::Summary;
pub use types::{
    Coordinates, Document, FieldRecord, FieldRef, FieldType, HierarchyNode, PageDimensions,
    PageRecord,
};
