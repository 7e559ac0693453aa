//! PDF processing layer
//!
//! This module enumerates widget annotations using lopdf and exposes them
//! through the [`RawFieldSource`] seam.

mod raw;
mod reader;

pub use raw::{
    RawField, RawFieldSource, RawPage, TYPE_CODE_BUTTON, TYPE_CODE_CHOICE, TYPE_CODE_SIGNATURE,
    TYPE_CODE_TEXT,
};
pub use reader::PdfFormReader;
