//! Raw annotation to [`FieldRecord`] normalization

use crate::config::{ANONYMOUS_PREFIX, MAX_COORDINATE_PRECISION, ROOT_KEY};
use crate::fields::types::{Coordinates, FieldRecord, FieldType};
use crate::pdf::{
    RawField, TYPE_CODE_BUTTON, TYPE_CODE_CHOICE, TYPE_CODE_SIGNATURE, TYPE_CODE_TEXT,
};

/// `/Ff` bit 1
pub const FLAG_READ_ONLY: i64 = 1 << 0;
/// `/Ff` bit 2
pub const FLAG_REQUIRED: i64 = 1 << 1;

const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

impl FieldType {
    /// Map a raw field-type code. Total: anything unrecognized is `Unknown`.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(TYPE_CODE_BUTTON) => FieldType::Button,
            Some(TYPE_CODE_TEXT) => FieldType::Text,
            Some(TYPE_CODE_CHOICE) => FieldType::Choice,
            Some(TYPE_CODE_SIGNATURE) => FieldType::Signature,
            _ => FieldType::Unknown,
        }
    }
}

/// Split a dotted key into `(parent, child)`.
///
/// Keys without a dot hang off the root. Empty segments are kept as-is,
/// so `"A..B"` yields `("A.", "B")`.
pub fn split_key(key: &str) -> (String, String) {
    match key.rsplit_once('.') {
        Some((parent, child)) => (parent.to_string(), child.to_string()),
        None => (ROOT_KEY.to_string(), key.to_string()),
    }
}

/// Converts raw annotations into field records for one extraction run.
///
/// Owns the anonymous-name counter, which is shared by every page of the
/// document.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    next_anonymous: u64,
    coordinate_precision: Option<u32>,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNormalizer {
    pub fn new() -> Self {
        Self {
            next_anonymous: 1,
            coordinate_precision: None,
        }
    }

    /// Round coordinates to `digits` decimal places, capped at
    /// [`MAX_COORDINATE_PRECISION`]
    pub fn with_precision(mut self, digits: Option<u32>) -> Self {
        self.coordinate_precision = digits.map(|d| d.min(MAX_COORDINATE_PRECISION));
        self
    }

    /// Number of synthesized names handed out so far
    pub fn anonymous_count(&self) -> u64 {
        self.next_anonymous - 1
    }

    fn next_anonymous_name(&mut self) -> String {
        let name = format!("{}{}", ANONYMOUS_PREFIX, self.next_anonymous);
        self.next_anonymous += 1;
        name
    }

    pub fn normalize(&mut self, raw: RawField) -> FieldRecord {
        let key = match raw.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                let name = self.next_anonymous_name();
                tracing::debug!(key = %name, "Assigned name to anonymous field");
                name
            }
        };
        let (parent, child) = split_key(&key);

        let field_type = FieldType::from_code(raw.type_code);
        if field_type == FieldType::Unknown {
            tracing::debug!(key = %key, code = ?raw.type_code, "Unrecognized field type");
        }

        let flags = raw.flags.unwrap_or(0);

        let coordinates = match raw.rect {
            Some([x0, y0, x1, y1]) => Coordinates {
                x0: self.round(x0),
                y0: self.round(y0),
                x1: self.round(x1),
                y1: self.round(y1),
            },
            None => Coordinates::default(),
        };

        let label = raw
            .label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| key.clone());

        let choices = if field_type == FieldType::Choice {
            raw.choices
        } else {
            Vec::new()
        };

        let button_caption = if field_type == FieldType::Button {
            Some(raw.caption.unwrap_or_default())
        } else {
            None
        };

        FieldRecord {
            key,
            parent,
            child,
            field_type,
            coordinates,
            label,
            value: raw.value.unwrap_or_default(),
            flags,
            is_required: flags & FLAG_REQUIRED != 0,
            is_readonly: flags & FLAG_READ_ONLY != 0,
            choices,
            button_caption,
        }
    }

    fn round(&self, value: f64) -> f64 {
        match self.coordinate_precision {
            Some(digits) => {
                let factor = 10f64.powi(digits.min(MAX_COORDINATE_PRECISION) as i32);
                let scaled = value * factor;
                // past 2^52 an f64 has no fractional digits left to round
                if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
                    return value;
                }
                let rounded = scaled.round() / factor;
                if rounded.is_finite() {
                    rounded
                } else {
                    value
                }
            }
            None => value,
        }
    }
}
