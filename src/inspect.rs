//! One-shot inspector - read the monitor key once and list its fields

use serde::Serialize;
use tracing::error;

use crate::snapshot::object_keys;
use crate::source::SnapshotSource;

/// Outcome of a single inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub key: String,
    pub raw: Option<String>,
    pub keys: Option<Vec<String>>,
    pub error: Option<String>,
}

impl InspectReport {
    /// Human-readable lines, as printed by `fmp inspect`
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        match &self.raw {
            Some(raw) => {
                lines.push(format!("RAW DATA: {}", raw));
                if let Some(keys) = &self.keys {
                    lines.push(format!("KEYS: {}", key_list(keys)));
                }
            }
            None if self.error.is_none() => lines.push(format!("No data in {}", self.key)),
            None => {}
        }

        if let Some(e) = &self.error {
            lines.push(format!("Error: {}", e));
        }

        lines.join("\n")
    }
}

/// `['a', 'b']`, the list form the factory scripts print
fn key_list(keys: &[String]) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Fetch the value once and parse it as a JSON object. Never retries.
pub fn inspect(source: &mut dyn SnapshotSource, key: &str) -> InspectReport {
    let mut report = InspectReport {
        key: key.to_string(),
        raw: None,
        keys: None,
        error: None,
    };

    let raw = match source.fetch() {
        Ok(Some(raw)) => raw,
        Ok(None) => return report,
        Err(e) => {
            error!(source = %source.describe(), error = %e, "Inspection read failed");
            report.error = Some(format!("{:#}", e));
            return report;
        }
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => match object_keys(&value) {
            Some(keys) => report.keys = Some(keys),
            None => report.error = Some("payload is not a JSON object".to_string()),
        },
        Err(e) => {
            error!(error = %e, "Inspection payload is not valid JSON");
            report.error = Some(e.to_string());
        }
    }
    report.raw = Some(raw);

    report
}
