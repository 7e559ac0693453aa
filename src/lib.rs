//! PDF Form Fields Library
//!
//! This crate turns the fillable widgets of a PDF into a normalized record:
//! - `pdf`: enumerate raw widget annotations per page (lopdf backend)
//! - `fields`: normalize widgets, group them by page and build the
//!   dotted-name hierarchy
//! - `source`: resolve input paths and discover PDFs for batch runs

pub mod config;
pub mod error;
pub mod fields;
pub mod pdf;
pub mod source;

pub use config::{ExtractConfig, ANONYMOUS_PREFIX, ROOT_KEY};
pub use error::{Error, Result};
pub use fields::{
    extract_fields, extract_file, Document, FieldRecord, FieldType, HierarchyNode, PageRecord,
    Summary,
};
