//! Parse command - extract the intent from a single message.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use devis_core::intent::IntentParser;
use devis_core::models::intent::ParsedIntent;

use super::{load_clients, load_config};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Message to parse
    #[arg(required = true)]
    message: String,

    /// JSON file with the known clients
    #[arg(long)]
    clients: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let clients = load_clients(args.clients.as_deref())?;

    info!("Parsing message against {} clients", clients.len());

    let parser = IntentParser::from_config(&config.intent);
    let intent = parser.parse(&args.message, &clients);

    println!("{}", format_intent(&intent, args.format)?);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_intent(intent: &ParsedIntent<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(intent)?),
        OutputFormat::Text => Ok(format_text(intent)),
    }
}

fn format_text(intent: &ParsedIntent<'_>) -> String {
    let mut output = String::new();

    let document = intent.document_type.map(|t| t.label()).unwrap_or("-");
    let client = intent
        .client_match
        .map(|c| c.display_name())
        .unwrap_or_else(|| "-".to_string());
    let title = intent.project_title.as_deref().unwrap_or("-");

    output.push_str(&format!("Document: {}\n", document));
    output.push_str(&format!("Client:   {}\n", client));
    output.push_str(&format!("Title:    {}", title));

    output
}
