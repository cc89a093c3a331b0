use std::io::Read;
use std::path::Path;

use crate::error::{PromoError, Result};
use crate::models::{PromoRecord, RawEmail};

/// Parse a JSON email batch. A single object is accepted as a batch of one.
pub fn parse_emails(json: &str) -> Result<Vec<RawEmail>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        _ => Err(PromoError::Other(
            "email batch must be a JSON array of objects".to_string(),
        )),
    }
}

/// Load emails from `path`, or from stdin when `path` is `-`.
pub fn load_emails(path: &str) -> Result<Vec<RawEmail>> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let file = Path::new(path);
        if !file.exists() {
            return Err(PromoError::Other(format!("File not found: {path}")));
        }
        std::fs::read_to_string(file)?
    };
    let emails = parse_emails(&content)?;
    tracing::debug!(path, count = emails.len(), "loaded emails");
    Ok(emails)
}

pub fn write_results(path: &Path, records: &[PromoRecord]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
