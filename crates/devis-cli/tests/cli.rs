use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

const REQUEST: &str =
    "Je voudrais un devis pour monsieur Dupont concernant le chantier de rénovation toiture";

fn devis() -> Command {
    Command::cargo_bin("devis").unwrap()
}

fn write_clients(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("clients.json");
    fs::write(
        &path,
        r#"[
            {"id": "c1", "first_name": "Jean", "last_name": "Dupont", "email": "jean@dupont.fr"},
            {"id": "c2", "first_name": "Marie", "last_name": "Martin"}
        ]"#,
    )
    .unwrap();
    path
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[test]
fn parse_outputs_json() {
    let dir = TempDir::new().unwrap();
    let clients = write_clients(dir.path());

    let output = devis()
        .args(["parse", REQUEST, "--clients"])
        .arg(&clients)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["documentType"], "quote");
    assert_eq!(json["clientMatch"]["id"], "c1");
    assert_eq!(json["projectTitle"], "Rénovation toiture");
    assert_eq!(json["hasDocumentType"], true);
    assert_eq!(json["hasClient"], true);
}

#[test]
fn parse_outputs_text() {
    devis()
        .args(["parse", "Bonjour", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document: -"))
        .stdout(predicate::str::contains("Client:   -"))
        .stdout(predicate::str::contains("Title:    -"));
}

#[test]
fn parse_rejects_missing_client_file() {
    devis()
        .args(["parse", REQUEST, "--clients", "/nonexistent/clients.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client file not found"));
}

#[test]
fn draft_computes_totals() {
    let dir = TempDir::new().unwrap();
    let clients = write_clients(dir.path());

    let output = devis()
        .args(["draft", REQUEST, "--date", "2024-03-15", "--sequence", "7"])
        .args(["--line", "Dépose tuiles;2;150", "--line", "Isolant;10;10;5,5"])
        .arg("--clients")
        .arg(&clients)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "quote");
    assert_eq!(json["number"], "DEV-2024-007");
    assert_eq!(json["valid_until"], "2024-04-14");
    assert_eq!(json["client"]["id"], "c1");
    assert_eq!(json["title"], "Rénovation toiture");
    assert_eq!(json["line_items"].as_array().unwrap().len(), 2);

    // 300.00 at 20% plus 100.00 at 5.5%
    assert_eq!(decimal(&json["totals"]["total_net"]), Decimal::new(400, 0));
    assert_eq!(decimal(&json["totals"]["total_vat"]), Decimal::new(6550, 2));
    assert_eq!(decimal(&json["totals"]["total_gross"]), Decimal::new(46550, 2));
}

#[test]
fn draft_reports_validation_issues() {
    devis()
        .args(["draft", "Bonjour", "--date", "2024-03-15", "--validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing client"))
        .stderr(predicate::str::contains("No line items"));
}

#[test]
fn draft_rejects_bad_line() {
    devis()
        .args(["draft", REQUEST, "--line", "Peinture;deux;30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));
}

#[test]
fn batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    let clients = write_clients(dir.path());
    let messages = dir.path().join("messages");
    fs::create_dir(&messages).unwrap();
    fs::write(messages.join("a.txt"), "Facture pour Martin").unwrap();
    fs::write(messages.join("b.txt"), "   ").unwrap();

    let summary = dir.path().join("summary.csv");
    let pattern = messages.join("*.txt");

    devis()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--clients")
        .arg(&clients)
        .arg("--output")
        .arg(&summary)
        .arg("--continue-on-error")
        .assert()
        .success();

    let csv = fs::read_to_string(&summary).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "filename,status,document_type,client_id,client_name,project_title,error"
    );
    assert!(lines.contains(&"a.txt,success,invoice,c2,Marie Martin,,"));
    assert!(lines.contains(&"b.txt,error,,,,,Empty message"));
}

#[test]
fn batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    let pattern = dir.path().join("*.txt");

    devis()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output")
        .arg(dir.path().join("summary.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty message"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    devis()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    devis()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "documents.quote_prefix", "Q"])
        .assert()
        .success();

    devis()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "documents.quote_prefix"])
        .assert()
        .success()
        .stdout("\"Q\"\n");

    let output = devis()
        .arg("-c")
        .arg(&config)
        .args(["draft", "Devis", "--date", "2025-01-02"])
        .output()
        .unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["number"], "Q-2025-001");
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    devis()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "documents.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
