//! Input resolution and batch discovery

pub mod resolver;

pub use resolver::{
    collect_pdfs, default_output_path, resolve_path, sibling_output_path, ResolvedPdf,
};
