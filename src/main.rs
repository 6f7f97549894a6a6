//! Factory Monitor Probe CLI
//!
//! 读取并稳定性测试 Redis 中的设备监控快照

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use factory_monitor_probe::{
    cli::{handle_inspect, handle_stability, InspectArgs, StabilityArgs},
    ProbeConfig,
};

#[derive(Parser)]
#[command(name = "fmp")]
#[command(about = "Factory Monitor Probe - 检查 factory/monitor 设备快照")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/factory-monitor-probe/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 读取一次快照并打印字段
    Inspect(InspectArgs),
    /// 持续轮询，验证设备 ID 稳定锁定在硬件上
    Stability(StabilityArgs),
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug fmp stability
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("factory_monitor_probe=info,fmp=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let config = ProbeConfig::load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Inspect(args) => handle_inspect(args, config)?,
        Commands::Stability(args) => handle_stability(args, config)?,
    }

    Ok(())
}
