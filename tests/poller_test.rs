//! Stability poller 集成测试 - 使用脚本化数据源

use anyhow::{anyhow, Result};
use factory_monitor_probe::{PollSettings, SnapshotSource, StabilityPoller, Verdict};
use std::collections::VecDeque;
use std::time::Duration;

/// 依次返回预设结果，用完后一直重复最后一个
struct ScriptedSource {
    script: VecDeque<Option<&'static str>>,
    last: Option<&'static str>,
    fail: bool,
}

impl ScriptedSource {
    fn new(script: &[Option<&'static str>]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            last: None,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            script: VecDeque::new(),
            last: None,
            fail: true,
        }
    }
}

impl SnapshotSource for ScriptedSource {
    fn fetch(&mut self) -> Result<Option<String>> {
        if self.fail {
            return Err(anyhow!("docker: command exited with status 1"));
        }
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        Ok(self.last.map(str::to_string))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

const HARDWARE: &str = r#"{"deviceId":"ABC123XYZ000","speed":10,"di1":1}"#;
const SOFTWARE: &str = r#"{"deviceId":"ORDER-MODE-002","speed":0,"di1":0}"#;

fn quick() -> PollSettings {
    PollSettings {
        duration: Duration::from_millis(200),
        interval: Duration::from_millis(10),
    }
}

#[test]
fn test_stable_hardware_passes() {
    // Given: 每次都返回同一个硬件 ID
    let mut source = ScriptedSource::new(&[Some(HARDWARE)]);

    // When: 运行一次短轮询
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, true).unwrap();

    // Then: 全部是硬件样本，没有 flip
    assert!(summary.samples >= 2);
    assert_eq!(summary.hardware, summary.samples);
    assert_eq!(summary.software, 0);
    assert_eq!(summary.flips, 0);
    assert_eq!(summary.verdict, Verdict::Pass);
    assert_eq!(summary.last_device_id.as_deref(), Some("ABC123XYZ000"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Dev: ABC123XYZ000 (HW:T)"));
    assert!(!text.contains("[FLIP]"));
}

#[test]
fn test_hardware_then_simulator_fails_with_one_flip() {
    // Given: 第一次硬件，之后一直是模拟器
    let mut source = ScriptedSource::new(&[Some(HARDWARE), Some(SOFTWARE)]);

    // When
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, true).unwrap();

    // Then: 只记录一次 flip，结论为 FAIL
    assert_eq!(summary.hardware, 1);
    assert_eq!(summary.software, summary.samples - 1);
    assert_eq!(summary.flips, 1);
    assert_eq!(summary.verdict, Verdict::Fail);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("[FLIP] Device changed: ABC123XYZ000 -> ORDER-MODE-002").count(), 1);
}

#[test]
fn test_failing_source_is_inconclusive() {
    // Given: 外部命令每次都失败
    let mut source = ScriptedSource::failing();

    // When
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, true).unwrap();

    // Then: 每个周期都计数，但没有任何分类样本
    assert!(summary.samples > 0);
    assert_eq!(summary.hardware, 0);
    assert_eq!(summary.software, 0);
    assert_eq!(summary.verdict, Verdict::Inconclusive);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.len() as u64, summary.samples);
    assert!(text.chars().all(|c| c == '.'));
}

#[test]
fn test_double_encoded_payload_is_decoded() {
    // Given: redis-cli 在 TTY 下输出的带引号字符串
    let mut source = ScriptedSource::new(&[Some(r#""{\"deviceId\":\"ABC123XYZ000\",\"speed\":12.5,\"di1\":0}""#)]);

    // When
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, true).unwrap();

    // Then: 和未加引号的数据一样被识别为硬件
    assert_eq!(summary.hardware, summary.samples);
    assert_eq!(summary.verdict, Verdict::Pass);
    assert!(String::from_utf8(out).unwrap().contains("Spd: 12.5"));
}

#[test]
fn test_missing_and_malformed_cycles_are_skipped() {
    // Given: 空 key、坏数据、然后正常硬件数据
    let mut source = ScriptedSource::new(&[None, Some("(nil)"), Some("{broken"), Some(HARDWARE)]);

    // When
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, true).unwrap();

    // Then: 前三个周期没有数据，但不影响后续
    assert_eq!(summary.hardware, summary.samples - 3);
    assert_eq!(summary.flips, 0);
    assert_eq!(summary.verdict, Verdict::Pass);
    assert!(String::from_utf8(out).unwrap().starts_with("..."));
}

#[test]
fn test_quiet_run_writes_nothing() {
    let mut source = ScriptedSource::new(&[Some(HARDWARE)]);
    let mut out = Vec::new();
    let summary = StabilityPoller::new(&mut source, quick()).run(&mut out, false).unwrap();

    assert!(out.is_empty());
    assert!(summary.elapsed_secs >= 0.2);
}
