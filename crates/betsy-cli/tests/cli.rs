use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BLOB: &str = "A1|Juan|1000|2024-01-01T15:00:00Z|EA|8888-1234|a@b.com|Calle 1|Taza|Pendiente|Quark|Instagram;\
                    R1|Ana|500|2024-01-02T15:00:00Z|RA;";

/// `betsy` with an isolated config directory.
fn betsy(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("betsy").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn test_total_text() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .args(["total", "--cost", "100", "-q", "2", "-s", "50", "--iva", "-t", "ea"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₡26,00"))
        .stdout(predicate::str::contains("₡276,00"));
}

#[test]
fn test_total_pickup_json() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .args(["total", "--cost", "100", "-q", "2", "-s", "50", "-t", "ra", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\":200.0"));
}

#[test]
fn test_decode_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("list.txt");
    fs::write(&input, BLOB).unwrap();

    betsy(&home)
        .arg("decode")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"orderId\": \"A1\""))
        .stdout(predicate::str::contains("\"orderType\": \"RA\""));
}

#[test]
fn test_decode_html_fails() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .arg("decode")
        .write_stdin("<html><body>busy</body></html>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse sales data"));
}

#[test]
fn test_parse_stdin() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .arg("parse")
        .write_stdin("Nombre completo: Ana Perez Teléfono: 8888-1234 Email: ana@x.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Ana Perez"))
        .stdout(predicate::str::contains("\"phone\": \"88881234\""))
        .stdout(predicate::str::contains("\"email\": \"ana@x.com\""));
}

#[test]
fn test_stats_from_input() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("list.txt");
    fs::write(&input, BLOB).unwrap();

    betsy(&home)
        .args(["stats", "--day", "2024-01-01", "--utc-offset", "-6", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("All orders: 2 (1 EA, 1 RA)"))
        .stdout(predicate::str::contains("Orders: 1"));
}

#[test]
fn test_list_filters_input() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("list.txt");
    fs::write(&input, BLOB).unwrap();

    betsy(&home)
        .args(["list", "-t", "ra", "-f", "json", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("R1"))
        .stdout(predicate::str::contains("A1").not());
}

#[test]
fn test_list_requires_script_url() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script URL not configured"));
}

#[test]
fn test_submit_dry_run() {
    let home = TempDir::new().unwrap();
    let form = r#"{
        "customerInfo": {
            "name": "Ana Perez", "phone": "88881234", "email": "ana@x.com",
            "username": "@ana", "business": "Quark", "orderType": "RA",
            "fechaAcordada": "2024-05-02", "fechaRetirada": "2024-05-03"
        },
        "productInfo": {
            "type": "Taza", "color": "Negro", "tamano": "M", "packaging": "Normal",
            "cantidad": 2, "productCost": 100, "vendedor": "Web"
        }
    }"#;

    betsy(&home)
        .args(["submit", "--dry-run", "--iva"])
        .write_stdin(form)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"iva\": 26.0"))
        .stdout(predicate::str::contains("\"total\": 226.0"));
}

#[test]
fn test_submit_reports_issues() {
    let home = TempDir::new().unwrap();
    betsy(&home)
        .args(["submit", "--dry-run"])
        .write_stdin(r#"{"customerInfo": {"orderType": "RA"}, "productInfo": {}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing customer name"));
}

#[test]
fn test_config_init_get_set() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("betsy.json");

    betsy(&home)
        .arg("-c")
        .arg(&path)
        .args(["config", "init", "--script-url", "https://script.example.com/exec"])
        .assert()
        .success();

    betsy(&home)
        .arg("-c")
        .arg(&path)
        .args(["config", "set", "remote.poll_interval_secs", "15"])
        .assert()
        .success();

    betsy(&home)
        .arg("-c")
        .arg(&path)
        .args(["config", "get", "remote.poll_interval_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));

    betsy(&home)
        .arg("-c")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
