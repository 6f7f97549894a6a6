//! `fmp inspect` 命令 - 读取一次监控快照并列出字段

use anyhow::Result;
use clap::Args;

use crate::config::ProbeConfig;
use crate::inspect::inspect;
use crate::source::RedisSource;

use super::output::format_json;

/// Inspect 命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Redis 主机（覆盖配置文件）
    #[arg(long)]
    pub host: Option<String>,

    /// Redis 端口（覆盖配置文件）
    #[arg(long, short)]
    pub port: Option<u16>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// 命令行参数覆盖配置
    pub fn apply(&self, mut config: ProbeConfig) -> ProbeConfig {
        if let Some(host) = &self.host {
            config.redis_host = host.clone();
        }
        if let Some(port) = self.port {
            config.redis_port = port;
        }
        config
    }
}

/// 处理 inspect 命令。读取或解析失败只打印错误，不改变退出码。
pub fn handle_inspect(args: InspectArgs, config: ProbeConfig) -> Result<()> {
    let config = args.apply(config);
    let mut source = RedisSource::from_config(&config);

    let report = inspect(&mut source, &config.key);

    if args.json {
        println!("{}", format_json(&report));
    } else {
        println!("{}", report.render());
    }
    Ok(())
}
