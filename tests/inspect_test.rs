//! One-shot inspector 集成测试

use anyhow::{anyhow, Result};
use factory_monitor_probe::{inspect, SnapshotSource, MONITOR_KEY};

/// 只返回一次预设结果
struct OnceSource(Option<Result<Option<String>>>);

impl SnapshotSource for OnceSource {
    fn fetch(&mut self) -> Result<Option<String>> {
        self.0.take().unwrap_or_else(|| Err(anyhow!("already read")))
    }

    fn describe(&self) -> String {
        "once".to_string()
    }
}

#[test]
fn test_inspect_lists_keys_in_order() {
    // Given: worker 写入的完整快照
    let raw = r#"{"deviceId":"00D0C9F1A2B3","speed":120.5,"di1":1,"status":"1","timestamp":"2026-10-17T08:00:00Z"}"#;
    let mut source = OnceSource(Some(Ok(Some(raw.to_string()))));

    // When
    let report = inspect(&mut source, MONITOR_KEY);

    // Then
    assert_eq!(report.raw.as_deref(), Some(raw));
    assert_eq!(
        report.keys.unwrap(),
        vec!["deviceId", "speed", "di1", "status", "timestamp"]
    );
    assert!(report.error.is_none());
}

#[test]
fn test_inspect_missing_key() {
    let mut source = OnceSource(Some(Ok(None)));
    let report = inspect(&mut source, MONITOR_KEY);

    assert!(report.raw.is_none());
    assert!(report.error.is_none());
    assert_eq!(report.render(), "No data in factory/monitor");
}

#[test]
fn test_inspect_connection_error() {
    let mut source = OnceSource(Some(Err(anyhow!("Connection refused (os error 111)"))));
    let report = inspect(&mut source, MONITOR_KEY);

    assert_eq!(report.render(), "Error: Connection refused (os error 111)");
}

#[test]
fn test_inspect_invalid_json() {
    // Given: 不是 JSON 的值
    let mut source = OnceSource(Some(Ok(Some("hello".to_string()))));

    // When
    let report = inspect(&mut source, MONITOR_KEY);

    // Then: 先打印原始数据，再打印错误
    assert!(report.keys.is_none());
    let text = report.render();
    assert!(text.starts_with("RAW DATA: hello\nError: "));
}

#[test]
fn test_inspect_json_report_shape() {
    let mut source = OnceSource(Some(Ok(Some(r#"{"deviceId":"x"}"#.to_string()))));
    let report = inspect(&mut source, MONITOR_KEY);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["key"], "factory/monitor");
    assert_eq!(json["keys"][0], "deviceId");
    assert!(json["error"].is_null());
}
