//! Tests for the `extract` binary

use lopdf::{Dictionary, Object, StringFormat};
use pdf_form_fields::Document;
use std::path::Path;
use std::process::{Command, Output};

fn run_extract(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_extract"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run extract")
}

fn single_field_pdf() -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut widget = Dictionary::new();
    widget.set("Type", Object::Name(b"Annot".to_vec()));
    widget.set("Subtype", Object::Name(b"Widget".to_vec()));
    widget.set("FT", Object::Name(b"Tx".to_vec()));
    widget.set(
        "T",
        Object::String(b"Section1.Name".to_vec(), StringFormat::Literal),
    );
    widget.set(
        "Rect",
        Object::Array(vec![
            Object::Real(72.25),
            Object::Integer(700),
            Object::Integer(272),
            Object::Integer(720),
        ]),
    );
    let widget_id = doc.add_object(widget);

    let mut page = Dictionary::new();
    page.set("Type", Object::Name(b"Page".to_vec()));
    page.set("Parent", Object::Reference(pages_id));
    page.set("Annots", Object::Array(vec![Object::Reference(widget_id)]));
    page.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    );
    let page_id = doc.add_object(page);

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(1));
    pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

#[test]
fn test_missing_input_exit_code() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_extract(&["missing.pdf"], temp_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.pdf"));
}

#[test]
fn test_unparsable_input_exit_code() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("broken.pdf"), b"not a valid PDF file")
        .expect("Failed to write file");

    let output = run_extract(&["broken.pdf"], temp_dir.path());

    assert_eq!(output.status.code(), Some(3));
    assert!(!temp_dir.path().join("broken_fields.json").exists());
}

#[test]
fn test_default_output_path() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("form.pdf"), single_field_pdf())
        .expect("Failed to write test PDF");

    let output = run_extract(&["form.pdf", "--round", "1"], temp_dir.path());
    assert!(output.status.success());

    let doc = Document::read_from(temp_dir.path().join("form_fields.json"))
        .expect("Failed to read output");
    assert_eq!(doc.pdf_name, "form.pdf");
    assert_eq!(doc.pages[0].fields[0].key, "Section1.Name");
    assert_eq!(doc.pages[0].fields[0].coordinates.x0, 72.3);
}

#[test]
fn test_round_out_of_range_rejected() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("form.pdf"), single_field_pdf())
        .expect("Failed to write test PDF");

    let output = run_extract(&["form.pdf", "--round", "400"], temp_dir.path());

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("form_fields.json").exists());
}
