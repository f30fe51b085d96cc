//! Draft command - seed a quote or invoice draft from a message.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::info;

use devis_core::intent::IntentParser;
use devis_core::models::document::{DocumentDraft, LineItem, VatRate};

use super::{load_clients, load_config};

/// Arguments for the draft command.
#[derive(Args)]
pub struct DraftArgs {
    /// Message to seed the draft from
    #[arg(required = true)]
    message: String,

    /// JSON file with the known clients
    #[arg(long)]
    clients: Option<PathBuf>,

    /// Sequence number used in the document number
    #[arg(short, long, default_value = "1")]
    sequence: u32,

    /// Issue date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Line item as "description;quantity;unit price[;vat rate[;discount %]]"
    #[arg(short, long = "line")]
    lines: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report missing client, title or lines
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: DraftArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let clients = load_clients(args.clients.as_deref())?;

    let parser = IntentParser::from_config(&config.intent);
    let intent = parser.parse(&args.message, &clients);

    let issue_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut draft = DocumentDraft::from_intent(&intent, &config.documents, issue_date, args.sequence)?;

    for line in &args.lines {
        let item = parse_line(line, draft.default_vat_rate)?;
        draft.add_line(item)?;
    }

    info!(
        "Drafted {} with {} lines, total {} {}",
        draft.number,
        draft.line_items.len(),
        draft.totals.total_gross,
        draft.currency
    );

    if args.validate {
        let issues = draft.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = serde_json::to_string_pretty(&draft)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Draft {} written to {}",
            style("✓").green(),
            draft.number,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Parse "description;quantity;unit price[;vat rate[;discount %]]".
///
/// Decimal commas are accepted in numeric fields.
fn parse_line(line: &str, default_vat_rate: VatRate) -> anyhow::Result<LineItem> {
    let parts: Vec<&str> = line.split(';').map(str::trim).collect();

    if parts.len() < 3 || parts.len() > 5 {
        anyhow::bail!(
            "Invalid line \"{}\": expected description;quantity;unit price[;vat rate[;discount %]]",
            line
        );
    }

    if parts[0].is_empty() {
        anyhow::bail!("Invalid line \"{}\": empty description", line);
    }

    let quantity = parse_decimal(parts[1], "quantity", line)?;
    let unit_price = parse_decimal(parts[2], "unit price", line)?;

    let vat_rate = match parts.get(3) {
        Some(rate) if !rate.is_empty() => rate.parse::<VatRate>()?,
        _ => default_vat_rate,
    };

    let mut item = LineItem::new(parts[0], quantity, unit_price, vat_rate);

    if let Some(discount) = parts.get(4).filter(|d| !d.is_empty()) {
        item = item.with_discount(parse_decimal(discount.trim_end_matches('%'), "discount", line)?);
    }

    Ok(item)
}

fn parse_decimal(value: &str, field: &str, line: &str) -> anyhow::Result<Decimal> {
    value
        .replace(',', ".")
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {} \"{}\" in line \"{}\"", field, value, line))
}
