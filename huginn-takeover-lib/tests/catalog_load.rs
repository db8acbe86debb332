use std::io::Write;

use huginn_takeover_lib::catalog::{load_from_path, Catalog};
use huginn_takeover_lib::ScanError;
use tempfile::NamedTempFile;

#[test]
fn loads_catalog_file_in_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"[
  {{"service": "Surge.sh", "cname": ["surge.sh"], "fingerprint": "project not found", "nxdomain": false, "vulnerable": true}},
  {{"service": "Fastly", "cname": ["fastly.net"], "fingerprint": "Fastly error: unknown domain", "vulnerable": false}},
  {{"service": "Ngrok", "cname": ["NGROK.io"], "fingerprint": "/Tunnel .*\\.ngrok\\.io not found/", "vulnerable": true,
    "documentation": "https://ngrok.com/docs", "discussion": ""}}
]"#
    )?;

    let catalog = load_from_path(file.path())?;
    let services: Vec<&str> = catalog.iter().map(|f| f.service.as_str()).collect();
    assert_eq!(services, ["Surge.sh", "Ngrok"]);

    let ngrok = catalog.get(1).ok_or("missing entry")?;
    assert!(ngrok.signature.is_pattern());
    assert_eq!(ngrok.cname_patterns, ["ngrok.io"]);
    assert_eq!(ngrok.documentation_url.as_deref(), Some("https://ngrok.com/docs"));
    assert!(ngrok.discussion_url.is_none());
    assert!(ngrok.signature.find("Tunnel abc.ngrok.io not found").is_some());
    Ok(())
}

#[test]
fn missing_catalog_file() {
    let result = load_from_path("/nonexistent/fingerprints.json");
    assert!(matches!(result, Err(ScanError::Catalog(_))));
}

#[test]
fn bundled_catalog_is_usable() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let catalog = Catalog::bundled()?;
    assert!(!catalog.is_empty());
    assert!(catalog.iter().all(|f| !f.signature.as_str().is_empty()));
    assert!(catalog.iter().all(|f| f.service != "Fastly"));
    Ok(())
}
