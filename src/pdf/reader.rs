//! PDF form reader built on lopdf

use crate::error::{Error, Result};
use crate::pdf::raw::{
    RawField, RawFieldSource, RawPage, TYPE_CODE_BUTTON, TYPE_CODE_CHOICE, TYPE_CODE_SIGNATURE,
    TYPE_CODE_TEXT,
};
use crate::source::resolve_path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::Path;

/// Upper bound on `/Parent` hops when walking field or page trees
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when a page carries no usable box
const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// PDF form reader using lopdf
pub struct PdfFormReader {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl std::fmt::Debug for PdfFormReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfFormReader")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl PdfFormReader {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let resolved = resolve_path(path)?;
        Self::open_bytes(&resolved.data)
    }

    /// Open a PDF from bytes
    pub fn open_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::SourceParse {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        let document = Document::load_mem(data)?;

        // get_pages is keyed by 1-based page number, so values() is in page order
        let page_ids: Vec<ObjectId> = document.get_pages().values().copied().collect();

        tracing::debug!(pages = page_ids.len(), "Opened PDF document");

        Ok(Self { document, page_ids })
    }

    fn page_dictionary(&self, number: u32) -> Result<(ObjectId, &Dictionary)> {
        let id = number
            .checked_sub(1)
            .and_then(|index| self.page_ids.get(index as usize))
            .copied()
            .ok_or_else(|| Error::SourceParse {
                reason: format!("page {} out of range (1-{})", number, self.page_ids.len()),
            })?;

        let dict = self
            .document
            .get_object(id)
            .and_then(|o| o.as_dict())
            .map_err(|e| Error::SourceParse {
                reason: format!("Failed to get page {}: {}", number, e),
            })?;

        Ok((id, dict))
    }

    /// Page width and height in points, honoring /CropBox, /MediaBox and /Rotate
    fn page_dimensions(&self, page_id: ObjectId) -> (f64, f64) {
        let doc = &self.document;
        let bbox = page_attribute(doc, page_id, b"CropBox")
            .or_else(|| page_attribute(doc, page_id, b"MediaBox"))
            .and_then(|obj| rect_from_object(doc, obj));

        let (width, height) = match bbox {
            Some([x0, y0, x1, y1]) => ((x1 - x0).abs(), (y1 - y0).abs()),
            None => DEFAULT_PAGE_SIZE,
        };

        let rotation = page_attribute(doc, page_id, b"Rotate")
            .and_then(number_from_object)
            .map(|r| (r as i64).rem_euclid(360))
            .unwrap_or(0);

        if rotation == 90 || rotation == 270 {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Collect the widget annotations of a page, in /Annots order
    fn widgets<'a>(&'a self, page: &'a Dictionary) -> Vec<(Option<ObjectId>, &'a Dictionary)> {
        let doc = &self.document;
        let annots = match dict_get(doc, page, b"Annots").and_then(|o| o.as_array().ok()) {
            Some(arr) => arr,
            None => return Vec::new(),
        };

        let mut widgets = Vec::new();
        for entry in annots {
            let id = entry.as_reference().ok();
            let dict = match resolve(doc, entry).and_then(|o| o.as_dict().ok()) {
                Some(d) => d,
                None => {
                    tracing::debug!(?id, "Skipping unreadable annotation");
                    continue;
                }
            };

            let is_widget = dict_get(doc, dict, b"Subtype")
                .and_then(|o| o.as_name().ok())
                .map(|name| name == b"Widget")
                .unwrap_or(false);

            if is_widget {
                widgets.push((id, dict));
            }
        }
        widgets
    }

    /// Read one widget into a raw field. Missing attributes stay `None`.
    fn read_widget(&self, widget_id: Option<ObjectId>, widget: &Dictionary) -> RawField {
        let doc = &self.document;
        let chain = field_chain(doc, widget_id, widget);

        RawField {
            name: qualified_name(doc, &chain),
            type_code: inherited(doc, &chain, b"FT")
                .and_then(|o| o.as_name().ok())
                .and_then(type_code_from_name),
            rect: dict_get(doc, widget, b"Rect").and_then(|o| rect_from_object(doc, o)),
            label: inherited(doc, &chain, b"TU")
                .and_then(|o| text_from_object(doc, o))
                .filter(|s| !s.is_empty()),
            value: inherited(doc, &chain, b"V").and_then(|o| value_from_object(doc, o)),
            flags: inherited(doc, &chain, b"Ff").and_then(|o| o.as_i64().ok()),
            choices: inherited(doc, &chain, b"Opt")
                .map(|o| choices_from_object(doc, o))
                .unwrap_or_default(),
            caption: dict_get(doc, widget, b"MK")
                .and_then(|o| o.as_dict().ok())
                .and_then(|mk| dict_get(doc, mk, b"CA"))
                .and_then(|o| text_from_object(doc, o)),
        }
    }
}

impl RawFieldSource for PdfFormReader {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn read_page(&self, number: u32) -> Result<RawPage> {
        let (page_id, page) = self.page_dictionary(number)?;
        let (width, height) = self.page_dimensions(page_id);

        let fields: Vec<RawField> = self
            .widgets(page)
            .into_iter()
            .map(|(id, widget)| self.read_widget(id, widget))
            .collect();

        tracing::debug!(page = number, widgets = fields.len(), "Read page widgets");

        Ok(RawPage {
            number,
            width,
            height,
            fields,
        })
    }
}

/// Follow a reference to its object; direct objects are returned unchanged
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    let mut current = obj;
    for _ in 0..MAX_TREE_DEPTH {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

fn dict_get<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|o| resolve(doc, o))
}

/// Look up a key on a page, walking up the page tree via /Parent
fn page_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Some(value) = dict_get(doc, current, key) {
            return Some(value);
        }
        current = dict_get(doc, current, b"Parent")?.as_dict().ok()?;
    }
    None
}

/// The widget followed by its field ancestors, nearest first
fn field_chain<'a>(
    doc: &'a Document,
    widget_id: Option<ObjectId>,
    widget: &'a Dictionary,
) -> Vec<&'a Dictionary> {
    let mut chain = vec![widget];
    let mut visited: HashSet<ObjectId> = widget_id.into_iter().collect();
    let mut current = widget;

    while chain.len() < MAX_TREE_DEPTH {
        let parent_id = match current.get(b"Parent").and_then(|o| o.as_reference()) {
            Ok(id) => id,
            Err(_) => break,
        };
        if !visited.insert(parent_id) {
            tracing::debug!(?parent_id, "Field /Parent cycle detected");
            break;
        }
        match doc.get_object(parent_id).and_then(|o| o.as_dict()) {
            Ok(parent) => {
                chain.push(parent);
                current = parent;
            }
            Err(_) => break,
        }
    }
    chain
}

fn inherited<'a>(doc: &'a Document, chain: &[&'a Dictionary], key: &[u8]) -> Option<&'a Object> {
    chain.iter().find_map(|&dict| dict_get(doc, dict, key))
}

/// Join the partial names (/T) of the field chain, outermost first
fn qualified_name(doc: &Document, chain: &[&Dictionary]) -> Option<String> {
    let parts: Vec<String> = chain
        .iter()
        .rev()
        .filter_map(|dict| dict_get(doc, dict, b"T"))
        .filter_map(|o| text_from_object(doc, o))
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join(".")).filter(|name| !name.is_empty())
}

fn type_code_from_name(name: &[u8]) -> Option<i64> {
    match name {
        b"Btn" => Some(TYPE_CODE_BUTTON),
        b"Tx" => Some(TYPE_CODE_TEXT),
        b"Ch" => Some(TYPE_CODE_CHOICE),
        b"Sig" => Some(TYPE_CODE_SIGNATURE),
        _ => None,
    }
}

fn number_from_object(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

/// Read a `[x0 y0 x1 y1]` array, reordered so x0 <= x1 and y0 <= y1
fn rect_from_object(doc: &Document, obj: &Object) -> Option<[f64; 4]> {
    let arr = obj.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let mut values = [0.0; 4];
    for (slot, item) in values.iter_mut().zip(arr) {
        *slot = resolve(doc, item).and_then(number_from_object)?;
    }
    let [a, b, c, d] = values;
    Some([a.min(c), b.min(d), a.max(c), b.max(d)])
}

/// Decode a PDF text string: UTF-16BE with BOM, then UTF-8, then Latin-1
fn decode_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn text_from_object(doc: &Document, obj: &Object) -> Option<String> {
    match resolve(doc, obj)? {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn value_from_object(doc: &Document, obj: &Object) -> Option<String> {
    match resolve(doc, obj)? {
        Object::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| text_from_object(doc, item))
                .collect();
            Some(parts.join(", "))
        }
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(f) => Some(f.to_string()),
        other => text_from_object(doc, other),
    }
}

/// Option entries are either text strings or `[export display]` pairs
fn choices_from_object(doc: &Document, obj: &Object) -> Vec<String> {
    let items = match obj.as_array() {
        Ok(items) => items,
        Err(_) => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match resolve(doc, item)? {
            Object::Array(pair) => pair
                .last()
                .and_then(|display| text_from_object(doc, display)),
            other => text_from_object(doc, other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    fn literal(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
    }

    #[test]
    fn test_invalid_pdf_detection() {
        let result = PdfFormReader::open_bytes(b"not a pdf");
        assert!(matches!(result, Err(Error::SourceParse { .. })));
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let result = PdfFormReader::open("/definitely/not/here/form.pdf");
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_decode_text_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, 0x4E, 0x00, 0x61, 0x00, 0x6D, 0x00, 0xE9];
        assert_eq!(decode_text(&bytes), "Namé");
    }

    #[test]
    fn test_decode_text_latin1_fallback() {
        assert_eq!(decode_text(b"Stra\xDFe"), "Straße");
        assert_eq!(decode_text(b"plain"), "plain");
    }

    #[test]
    fn test_type_code_from_name() {
        assert_eq!(type_code_from_name(b"Btn"), Some(TYPE_CODE_BUTTON));
        assert_eq!(type_code_from_name(b"Tx"), Some(TYPE_CODE_TEXT));
        assert_eq!(type_code_from_name(b"Ch"), Some(TYPE_CODE_CHOICE));
        assert_eq!(type_code_from_name(b"Sig"), Some(TYPE_CODE_SIGNATURE));
        assert_eq!(type_code_from_name(b"Foo"), None);
    }

    #[test]
    fn test_rect_is_reordered() {
        let doc = Document::with_version("1.5");
        let rect = Object::Array(vec![
            Object::Integer(200),
            Object::Real(50.5),
            Object::Integer(100),
            Object::Integer(20),
        ]);
        assert_eq!(
            rect_from_object(&doc, &rect),
            Some([100.0, 20.0, 200.0, 50.5])
        );

        let short = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(rect_from_object(&doc, &short), None);
    }

    #[test]
    fn test_choices_from_pairs_and_strings() {
        let doc = Document::with_version("1.5");
        let opt = Object::Array(vec![
            literal("Red"),
            Object::Array(vec![literal("g"), literal("Green")]),
        ]);
        assert_eq!(choices_from_object(&doc, &opt), vec!["Red", "Green"]);
    }

    #[test]
    fn test_value_from_name_and_array() {
        let doc = Document::with_version("1.5");
        assert_eq!(
            value_from_object(&doc, &Object::Name(b"Yes".to_vec())),
            Some("Yes".to_string())
        );
        let multi = Object::Array(vec![literal("A"), literal("B")]);
        assert_eq!(value_from_object(&doc, &multi), Some("A, B".to_string()));
    }

    #[test]
    fn test_qualified_name_joins_ancestors() {
        let doc = Document::with_version("1.5");
        let mut widget = Dictionary::new();
        widget.set("T", literal("Street"));
        let mut parent = Dictionary::new();
        parent.set("T", literal("Address"));
        let mut grandparent = Dictionary::new();
        grandparent.set("T", literal("PersonalInfo"));

        let chain = vec![&widget, &parent, &grandparent];
        assert_eq!(
            qualified_name(&doc, &chain),
            Some("PersonalInfo.Address.Street".to_string())
        );

        let anonymous = Dictionary::new();
        assert_eq!(qualified_name(&doc, &[&anonymous]), None);
    }
}
