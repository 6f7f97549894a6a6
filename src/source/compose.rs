//! docker compose 数据源 - 通过容器内的 redis-cli 读取 key

use anyhow::{anyhow, Result};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use super::SnapshotSource;
use crate::config::ProbeConfig;

/// 通过 `docker compose exec <service> redis-cli get <key>` 读取
pub struct ComposeCliSource {
    service: String,
    key: String,
}

impl ComposeCliSource {
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.compose_service.as_str(), config.key.as_str())
    }

    /// 检查 docker 是否可用
    pub fn is_available(&self) -> bool {
        which::which("docker").is_ok()
    }

    /// 启动前检查，docker 不存在时只记录警告
    pub fn warn_if_unavailable(&self) {
        if !self.is_available() {
            warn!("docker not found on PATH, every poll will report no data");
        }
    }

    /// 完整命令参数（不含 docker 本身）
    pub fn args(&self) -> Vec<String> {
        vec![
            "compose".to_string(),
            "exec".to_string(),
            self.service.clone(),
            "redis-cli".to_string(),
            "get".to_string(),
            self.key.clone(),
        ]
    }
}

impl SnapshotSource for ComposeCliSource {
    fn fetch(&mut self) -> Result<Option<String>> {
        let output = Command::new("docker")
            .args(self.args())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            debug!(service = %self.service, status = %output.status, "redis-cli exited with failure");
            return Err(anyhow!("redis-cli via docker compose failed: {}", output.status));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn describe(&self) -> String {
        format!("docker {}", self.args().join(" "))
    }
}
