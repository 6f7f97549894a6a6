//! Factory Monitor Probe - 检查 Redis 中 factory/monitor 设备快照的诊断工具

pub mod cli;
pub mod config;
pub mod inspect;
pub mod poller;
pub mod snapshot;
pub mod source;
pub mod stability;

pub use config::ProbeConfig;
pub use inspect::{inspect, InspectReport};
pub use poller::{PollSettings, StabilityPoller};
pub use snapshot::{decode_payload, parse_snapshot, DeviceClass, MonitorSnapshot, MONITOR_KEY};
pub use source::{ComposeCliSource, RedisSource, SnapshotSource};
pub use stability::{CycleOutcome, Flip, RunSummary, StabilityTracker, Verdict};
