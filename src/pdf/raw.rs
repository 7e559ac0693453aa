//! Raw widget annotations as reported by a PDF backend

use crate::error::Result;

/// Raw field-type code for push buttons, checkboxes and radio buttons (`/FT /Btn`)
pub const TYPE_CODE_BUTTON: i64 = 1;
/// Raw field-type code for text fields (`/FT /Tx`)
pub const TYPE_CODE_TEXT: i64 = 2;
/// Raw field-type code for combo and list boxes (`/FT /Ch`)
pub const TYPE_CODE_CHOICE: i64 = 3;
/// Raw field-type code for signature fields (`/FT /Sig`)
pub const TYPE_CODE_SIGNATURE: i64 = 4;

/// One widget annotation exactly as the backend found it.
///
/// Every attribute is optional: a backend reports what it could read and
/// leaves normalization to [`crate::fields::FieldNormalizer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawField {
    /// Fully qualified field name (partial names joined by `.`)
    pub name: Option<String>,
    /// Field-type code (see the `TYPE_CODE_*` constants)
    pub type_code: Option<i64>,
    /// Widget rectangle `[x0, y0, x1, y1]`, bottom-left origin
    pub rect: Option<[f64; 4]>,
    /// Alternate, human-readable field name (`/TU`)
    pub label: Option<String>,
    /// Current field value (`/V`)
    pub value: Option<String>,
    /// Field flags bitmask (`/Ff`)
    pub flags: Option<i64>,
    /// Choice options in document order (`/Opt`)
    pub choices: Vec<String>,
    /// Button caption (`/MK /CA`)
    pub caption: Option<String>,
}

/// All widget annotations of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Widgets in annotation order
    pub fields: Vec<RawField>,
}

/// A document that can enumerate its form widgets page by page.
pub trait RawFieldSource {
    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Read a single page (1-indexed)
    fn read_page(&self, number: u32) -> Result<RawPage>;
}
