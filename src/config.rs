//! Extraction configuration

/// Sentinel path of the hierarchy root node
pub const ROOT_KEY: &str = "root";

/// Prefix for synthesized names of annotations without a name
pub const ANONYMOUS_PREFIX: &str = "unnamed_field_";

/// Largest number of decimal places coordinates can be rounded to
pub const MAX_COORDINATE_PRECISION: u32 = 15;

/// Configuration for a single extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Round coordinates to this many decimal places (default: no rounding)
    pub coordinate_precision: Option<u32>,
    /// Pretty-print JSON output with 2-space indentation (default: true)
    pub pretty: bool,
    /// Suffix appended to the input stem for default output paths
    pub output_suffix: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            coordinate_precision: None,
            pretty: true,
            output_suffix: "_fields.json".to_string(),
        }
    }
}
