//! `fmp stability` 命令 - 轮询监控快照，验证设备 ID 锁定在硬件上

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::io::{self, Write};

use crate::config::ProbeConfig;
use crate::poller::{PollSettings, StabilityPoller};
use crate::source::{ComposeCliSource, RedisSource, SnapshotSource};

use super::output::{format_json, parse_positive_secs};

/// 快照读取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// docker compose exec redis redis-cli get <key>
    Compose,
    /// 直连 Redis
    Redis,
}

/// Stability 命令参数
#[derive(Args, Debug)]
pub struct StabilityArgs {
    /// 轮询时长（秒）
    #[arg(long, short, value_parser = parse_positive_secs)]
    pub duration: Option<f64>,

    /// 轮询间隔（秒）
    #[arg(long, short, value_parser = parse_positive_secs)]
    pub interval: Option<f64>,

    /// 读取方式
    #[arg(long, short, value_enum, default_value = "compose")]
    pub source: SourceKind,

    /// 只输出最终结果（JSON 格式）
    #[arg(long)]
    pub json: bool,
}

impl StabilityArgs {
    /// 命令行参数优先，其次是配置文件
    pub fn settings(&self, config: &ProbeConfig) -> Result<PollSettings> {
        PollSettings::from_secs(
            self.duration.unwrap_or(config.duration_secs),
            self.interval.unwrap_or(config.interval_secs),
        )
    }
}

/// 处理 stability 命令
pub fn handle_stability(args: StabilityArgs, config: ProbeConfig) -> Result<()> {
    let settings = args.settings(&config)?;

    let mut source: Box<dyn SnapshotSource> = match args.source {
        SourceKind::Compose => {
            let source = ComposeCliSource::from_config(&config);
            source.warn_if_unavailable();
            Box::new(source)
        }
        SourceKind::Redis => Box::new(RedisSource::from_config(&config)),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.json {
        writeln!(out, "--- Device Lock Stability Check (via {}) ---", source_label(args.source))?;
        writeln!(
            out,
            "Target: Device ID should latch to Hardware (len 12, no dashes) and never fall back to a simulator ID"
        )?;
    }

    let summary = StabilityPoller::new(source.as_mut(), settings).run(&mut out, !args.json)?;

    if args.json {
        writeln!(out, "{}", format_json(&summary))?;
    } else {
        writeln!(out, "\n\n{}", summary.report())?;
    }
    Ok(())
}

fn source_label(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Compose => "redis-cli",
        SourceKind::Redis => "redis",
    }
}
