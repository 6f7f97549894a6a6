//! 配置模块 - 加载 ~/.config/factory-monitor-probe/config.json
//!
//! 所有字段都有默认值，配置文件只需写需要覆盖的字段。命令行参数优先于配置文件。

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::snapshot::MONITOR_KEY;

/// docker-compose 映射到宿主机的 Redis 端口
pub const DEFAULT_REDIS_PORT: u16 = 6380;

/// 默认轮询时长（秒）
pub const DEFAULT_DURATION_SECS: f64 = 15.0;

/// 默认轮询间隔（秒）
pub const DEFAULT_INTERVAL_SECS: f64 = 0.5;

/// 探针配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Redis 主机
    pub redis_host: String,
    /// Redis 端口
    pub redis_port: u16,
    /// 监控快照所在的 key
    pub key: String,
    /// docker compose 中 Redis 服务名
    pub compose_service: String,
    /// 轮询时长（秒）
    pub duration_secs: f64,
    /// 轮询间隔（秒）
    pub interval_secs: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            redis_host: "localhost".to_string(),
            redis_port: DEFAULT_REDIS_PORT,
            key: MONITOR_KEY.to_string(),
            compose_service: "redis".to_string(),
            duration_secs: DEFAULT_DURATION_SECS,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl ProbeConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/factory-monitor-probe/config.json"))
    }

    /// 从指定文件加载，文件不存在或解析失败时回退到默认值
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// 严格加载，错误直接返回
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// 轮询时长和间隔必须是有限正数
    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("duration_secs", self.duration_secs),
            ("interval_secs", self.interval_secs),
        ] {
            if !(secs.is_finite() && secs > 0.0) || Duration::try_from_secs_f64(secs).is_err() {
                bail!("{} must be a positive number of seconds, got {}", name, secs);
            }
        }
        Ok(())
    }

    /// Redis 连接 URL
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}
