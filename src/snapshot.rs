//! Monitor snapshot decoding and device classification

use serde::Serialize;
use serde_json::{Map, Value};

/// Redis key the factory worker writes monitor snapshots to
pub const MONITOR_KEY: &str = "factory/monitor";

/// Placeholder used when a snapshot carries no `deviceId`
pub const UNKNOWN_DEVICE: &str = "UNKNOWN";

/// Hardware gateways report fixed-width identifiers (MAC-style, no separators)
pub const HARDWARE_ID_LEN: usize = 12;

/// Origin of a device identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Hardware,
    Software,
}

impl DeviceClass {
    /// Classify an identifier: exactly 12 characters with no hyphen is hardware.
    pub fn of(device_id: &str) -> Self {
        if device_id.chars().count() == HARDWARE_ID_LEN && !device_id.contains('-') {
            DeviceClass::Hardware
        } else {
            DeviceClass::Software
        }
    }

    pub fn is_hardware(self) -> bool {
        self == DeviceClass::Hardware
    }

    /// Single-letter flag for the progress line
    pub fn flag(self) -> char {
        match self {
            DeviceClass::Hardware => 'T',
            DeviceClass::Software => 'F',
        }
    }
}

/// One decoded reading of the monitor key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSnapshot {
    pub device_id: String,
    /// As received; the worker writes a number but nothing enforces it
    pub speed: Value,
    pub di1: Value,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}

impl MonitorSnapshot {
    /// Build a snapshot from a decoded JSON object.
    ///
    /// Returns `None` for anything that is not a non-empty object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object().filter(|o| !o.is_empty())?;
        Some(Self::from_map(obj))
    }

    fn from_map(obj: &Map<String, Value>) -> Self {
        let device_id = match obj.get("deviceId") {
            None | Some(Value::Null) => UNKNOWN_DEVICE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            device_id,
            speed: obj.get("speed").cloned().unwrap_or_else(|| Value::from(0)),
            di1: obj.get("di1").cloned().unwrap_or_else(|| Value::from(0)),
            status: obj.get("status").and_then(value_as_text),
            timestamp: obj.get("timestamp").and_then(value_as_text),
        }
    }

    pub fn class(&self) -> DeviceClass {
        DeviceClass::of(&self.device_id)
    }
}

/// Display form of a field value: strings without quotes, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decode raw text read from the monitor key.
///
/// `redis-cli` behind a TTY prints values as quoted strings
/// (`"{\"deviceId\":...}"`), so a quoted payload is decoded once to recover
/// the inner text and then again to get the object. Any failure is `None`.
pub fn decode_payload(raw: &str) -> Option<Value> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        match serde_json::from_str::<Value>(text).ok()? {
            Value::String(inner) => serde_json::from_str(&inner).ok(),
            other => Some(other),
        }
    } else {
        serde_json::from_str(text).ok()
    }
}

/// Decode raw text straight into a snapshot
pub fn parse_snapshot(raw: &str) -> Option<MonitorSnapshot> {
    decode_payload(raw).as_ref().and_then(MonitorSnapshot::from_value)
}

/// Top-level keys of a JSON object, in document order
pub fn object_keys(value: &Value) -> Option<Vec<String>> {
    value.as_object().map(|o| o.keys().cloned().collect())
}
