use std::fs;
use std::sync::Arc;

use huginn_takeover_lib::catalog::{Fingerprint, Signature};
use huginn_takeover_lib::detection::ScanOutcome;
use huginn_takeover_lib::report::{to_json, write_to_path};
use tempfile::NamedTempFile;

mod helpers;

use helpers::TestResult;

fn outcomes() -> Vec<ScanOutcome> {
    let fp = Fingerprint::new("GitHub Pages", Signature::substring("There isn't a GitHub Pages site here."))
        .with_links(Some("https://docs.github.com/pages".to_string()), None);
    vec![
        ScanOutcome::vulnerable("docs.example.com", Arc::new(fp), "There isn't a GitHub Pages site here.")
            .with_cname(Some("acme.github.io".to_string()))
            .with_http_status(Some(404)),
        ScanOutcome::http_error("slow.example.com", "operation timed out"),
        ScanOutcome::not_found("gone.example.com"),
    ]
}

#[test]
fn report_fields() -> TestResult<()> {
    let json: serde_json::Value = serde_json::from_str(&to_json(&outcomes())?)?;
    let entries = json.as_array().ok_or("report is not an array")?;
    assert_eq!(entries.len(), 3);

    let vuln = &entries[0];
    assert_eq!(vuln["subdomain"], "docs.example.com");
    assert_eq!(vuln["status"], "vulnerable");
    assert_eq!(vuln["engine"], "GitHub Pages");
    assert_eq!(vuln["documentation"], "https://docs.github.com/pages");
    assert_eq!(vuln["cname"], "acme.github.io");
    assert_eq!(vuln["http_status"], 404);
    assert!(vuln.get("discussion").is_none());

    let slow = &entries[1];
    assert_eq!(slow["status"], "http error");
    assert_eq!(slow["error"], "operation timed out");
    assert!(slow.get("engine").is_none());

    assert_eq!(entries[2]["status"], "not found");
    Ok(())
}

#[test]
fn writes_report_file() -> TestResult<()> {
    let file = NamedTempFile::new()?;
    write_to_path(file.path(), &outcomes())?;

    let txt = fs::read_to_string(file.path())?;
    assert!(txt.contains("\"subdomain\": \"docs.example.com\""));
    Ok(())
}

#[test]
fn empty_report_is_empty_array() -> TestResult<()> {
    assert_eq!(to_json(&[])?, "[]");
    Ok(())
}
