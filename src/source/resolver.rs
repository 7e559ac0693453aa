//! Input resolution and output naming

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Suffixes of files produced by form filling, skipped in batch mode
const GENERATED_SUFFIXES: &[&str] = &["_Filled.pdf"];
const GENERATED_MARKERS: &[&str] = &["Filled_Form"];

/// Resolved PDF data
pub struct ResolvedPdf {
    pub data: Vec<u8>,
    pub source_name: String,
}

/// Resolve a file path to PDF data
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ResolvedPdf> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let data = std::fs::read(path).map_err(|_| Error::InputNotFound {
        path: path.display().to_string(),
    })?;

    // Validate PDF header
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::SourceParse {
            reason: format!("{} is not a valid PDF file", path.display()),
        });
    }

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ResolvedPdf { data, source_name })
}

fn output_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}{}", stem, suffix)
}

/// `<input-stem><suffix>` in the current directory
pub fn default_output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
    PathBuf::from(output_name(input.as_ref(), suffix))
}

/// `<input-stem><suffix>` next to the input file
pub fn sibling_output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
    let input = input.as_ref();
    input.with_file_name(output_name(input, suffix))
}

fn is_generated(name: &str) -> bool {
    GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s))
        || GENERATED_MARKERS.iter().any(|m| name.contains(m))
}

/// List PDF files under `dir`, sorted by path.
///
/// Files produced by form filling are skipped; `pattern` filters on the
/// file name.
pub fn collect_pdfs<P: AsRef<Path>>(
    dir: P,
    recursive: bool,
    pattern: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(Error::InputNotFound {
            path: dir.display().to_string(),
        });
    }

    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    let pattern = pattern
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| Error::InvalidPattern {
                pattern: p.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let mut files = Vec::new();
    walk_pdfs(dir, recursive, pattern.as_ref(), &mut files)?;

    // Sort by path for consistent ordering
    files.sort();
    Ok(files)
}

fn walk_pdfs(
    dir: &Path,
    recursive: bool,
    pattern: Option<&glob::Pattern>,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir)?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };

        let path = entry.path();

        if path.is_dir() {
            if recursive {
                if let Err(e) = walk_pdfs(&path, recursive, pattern, files) {
                    tracing::warn!(dir = %path.display(), error = %e, "Skipping directory");
                }
            }
            continue;
        }

        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !path.is_file() || !is_pdf {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if is_generated(&name) {
            tracing::debug!(file = %name, "Skipping generated PDF");
            continue;
        }

        if let Some(pat) = pattern {
            if !pat.matches(&name) {
                continue;
            }
        }

        files.push(path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    #[test]
    fn test_resolve_path_not_found() {
        let result = resolve_path("/nonexistent/path/to/file.pdf");
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_resolve_path_rejects_non_pdf() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = touch(temp_dir.path(), "notes.pdf", b"hello");
        let result = resolve_path(&path);
        assert!(matches!(result, Err(Error::SourceParse { .. })));
    }

    #[test]
    fn test_resolve_path_reads_pdf() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = touch(temp_dir.path(), "form.pdf", b"%PDF-1.4\n");
        let resolved = resolve_path(&path).expect("Failed to resolve");
        assert_eq!(resolved.source_name, "form.pdf");
        assert_eq!(resolved.data, b"%PDF-1.4\n");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("/some/dir/W-9.pdf", "_fields.json"),
            PathBuf::from("W-9_fields.json")
        );
        assert_eq!(
            default_output_path("form.v2.pdf", "_fields.json"),
            PathBuf::from("form.v2_fields.json")
        );
    }

    #[test]
    fn test_sibling_output_path() {
        assert_eq!(
            sibling_output_path("/some/dir/W-9.pdf", "_fields.json"),
            PathBuf::from("/some/dir/W-9_fields.json")
        );
    }

    #[test]
    fn test_collect_pdfs() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path();
        touch(root, "b.pdf", b"%PDF");
        touch(root, "a.PDF", b"%PDF");
        touch(root, "a_Filled.pdf", b"%PDF");
        touch(root, "Old_Filled_Form.pdf", b"%PDF");
        touch(root, "notes.txt", b"text");
        std::fs::create_dir(root.join("nested")).unwrap();
        touch(&root.join("nested"), "c.pdf", b"%PDF");

        let flat = collect_pdfs(root, false, None).unwrap();
        assert_eq!(flat, vec![root.join("a.PDF"), root.join("b.pdf")]);

        let deep = collect_pdfs(root, true, None).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&root.join("nested").join("c.pdf")));

        let filtered = collect_pdfs(root, true, Some("b*")).unwrap();
        assert_eq!(filtered, vec![root.join("b.pdf")]);
    }

    #[test]
    fn test_collect_pdfs_errors() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let file = touch(temp_dir.path(), "x.pdf", b"%PDF");

        assert!(matches!(
            collect_pdfs(temp_dir.path().join("missing"), false, None),
            Err(Error::InputNotFound { .. })
        ));
        assert!(matches!(
            collect_pdfs(&file, false, None),
            Err(Error::NotADirectory { .. })
        ));
        assert!(matches!(
            collect_pdfs(temp_dir.path(), false, Some("[")),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
