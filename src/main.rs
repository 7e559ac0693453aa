//! `extract` - dump the fillable form fields of a PDF as JSON

use anyhow::Context;
use clap::Parser;
use pdf_form_fields::source::{collect_pdfs, default_output_path, sibling_output_path};
use pdf_form_fields::{extract_file, Document, Error, ExtractConfig, Summary};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "extract",
    about = "Extract fillable PDF form fields into hierarchical JSON",
    version
)]
struct Cli {
    /// Input PDF file
    #[arg(required_unless_present_any = ["dir", "schema"])]
    input: Option<PathBuf>,

    /// Output JSON path (default: <input-stem>_fields.json)
    output: Option<PathBuf>,

    /// Extract every PDF in a directory, writing each result next to its PDF
    #[arg(long, value_name = "DIR", conflicts_with_all = ["input", "output"])]
    dir: Option<PathBuf>,

    /// Only process files whose name matches this glob pattern (with --dir)
    #[arg(long, requires = "dir")]
    pattern: Option<String>,

    /// Search subdirectories (with --dir)
    #[arg(long, requires = "dir")]
    recursive: bool,

    /// Round coordinates to this many decimal places (0-15)
    #[arg(long, value_name = "DIGITS", value_parser = clap::value_parser!(u32).range(0..=15))]
    round: Option<u32>,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print field statistics after each extraction
    #[arg(long)]
    summary: bool,

    /// Print the JSON Schema of the output document and exit
    #[arg(long)]
    schema: bool,
}

impl Cli {
    fn config(&self) -> ExtractConfig {
        ExtractConfig {
            coordinate_precision: self.round,
            pretty: !self.compact,
            ..ExtractConfig::default()
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_form_fields=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<Error>()
                .map(Error::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.schema {
        println!("{}", Document::json_schema()?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.config();

    if let Some(dir) = &cli.dir {
        return run_batch(dir, cli, &config);
    }

    let input = cli
        .input
        .as_deref()
        .context("an input PDF is required")?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, &config.output_suffix));

    println!("Extracting fields from: {}", input.display());
    extract_one(input, &output, cli.summary, &config)?;
    Ok(ExitCode::SUCCESS)
}

fn run_batch(dir: &Path, cli: &Cli, config: &ExtractConfig) -> anyhow::Result<ExitCode> {
    let pdfs = collect_pdfs(dir, cli.recursive, cli.pattern.as_deref())?;

    if pdfs.is_empty() {
        println!("No PDF files found in {}", dir.display());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} PDF(s) to process.", pdfs.len());

    let mut failed = 0usize;
    for pdf in &pdfs {
        let output = sibling_output_path(pdf, &config.output_suffix);
        println!("Processing: {}", pdf.display());
        if let Err(e) = extract_one(pdf, &output, cli.summary, config) {
            tracing::warn!(pdf = %pdf.display(), error = %e, "Extraction failed");
            failed += 1;
        }
    }

    println!(
        "Processed {} PDF(s), {} failed.",
        pdfs.len() - failed,
        failed
    );

    if failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn extract_one(
    input: &Path,
    output: &Path,
    summary: bool,
    config: &ExtractConfig,
) -> pdf_form_fields::Result<()> {
    let doc = extract_file(input, config)?;
    doc.write_to(output, config.pretty)?;

    println!("Fields extracted and saved to: {}", output.display());
    println!("  Total pages: {}", doc.total_pages);
    println!("  Pages with fields: {}", doc.pages.len());
    println!("  Total fields: {}", doc.field_count());

    if summary {
        print!("{}", Summary::from_document(&doc));
    }
    Ok(())
}
