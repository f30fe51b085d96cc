//! Batch command - parse many message files and write a CSV summary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use devis_core::intent::IntentParser;
use devis_core::models::client::Client;

use super::{load_clients, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of message files (one message per file)
    #[arg(required = true)]
    input: String,

    /// JSON file with the known clients
    #[arg(long)]
    clients: Option<PathBuf>,

    /// Summary CSV path
    #[arg(short, long, default_value = "summary.csv")]
    output: PathBuf,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one message file.
struct BatchRow {
    path: PathBuf,
    document_type: String,
    client_id: String,
    client_name: String,
    project_title: String,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let clients = load_clients(args.clients.as_deref())?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} messages to parse",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages")?
            .progress_chars("=>-"),
    );

    let parser = IntentParser::from_config(&config.intent);
    let mut rows = Vec::with_capacity(files.len());

    for path in files {
        match parse_file(&path, &parser, &clients) {
            Ok(row) => rows.push(row),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to parse {}: {}", path.display(), error_msg);
                    rows.push(BatchRow::failed(path, error_msg));
                } else {
                    error!("Failed to parse {}: {}", path.display(), error_msg);
                    anyhow::bail!("Parsing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    write_summary(&args.output, &rows)?;

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    let with_client = rows.iter().filter(|r| !r.client_name.is_empty()).count();

    println!(
        "{} Parsed {} messages in {:?}",
        style("✓").green(),
        rows.len(),
        start.elapsed()
    );
    println!(
        "   {} with a known client, {} failed",
        style(with_client).green(),
        style(failed).red()
    );
    println!(
        "{} Summary written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

fn parse_file(path: &Path, parser: &IntentParser, clients: &[Client]) -> anyhow::Result<BatchRow> {
    let message = fs::read_to_string(path)?;
    if message.trim().is_empty() {
        anyhow::bail!("Empty message");
    }

    let intent = parser.parse(&message, clients);
    debug!("{}: {:?}", path.display(), intent.document_type);

    Ok(BatchRow {
        path: path.to_path_buf(),
        document_type: intent
            .document_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        client_id: intent
            .client_match
            .and_then(|c| c.id.clone())
            .unwrap_or_default(),
        client_name: intent
            .client_match
            .map(|c| c.display_name())
            .unwrap_or_default(),
        project_title: intent.project_title.unwrap_or_default(),
        error: None,
    })
}

impl BatchRow {
    fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            document_type: String::new(),
            client_id: String::new(),
            client_name: String::new(),
            project_title: String::new(),
            error: Some(error),
        }
    }
}

fn write_summary(path: &Path, rows: &[BatchRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "client_id",
        "client_name",
        "project_title",
        "error",
    ])?;

    for row in rows {
        let filename = row.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let status = if row.error.is_some() { "error" } else { "success" };

        wtr.write_record([
            filename,
            status,
            row.document_type.as_str(),
            row.client_id.as_str(),
            row.client_name.as_str(),
            row.project_title.as_str(),
            row.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
