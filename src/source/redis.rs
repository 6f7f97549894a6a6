//! Redis 直连数据源

use anyhow::{Context, Result};
use redis::Commands;
use std::time::Duration;
use tracing::debug;

use super::SnapshotSource;
use crate::config::ProbeConfig;

/// 连接与读取超时
pub const REDIS_TIMEOUT: Duration = Duration::from_secs(2);

/// 直接对 Redis 执行 GET
pub struct RedisSource {
    url: String,
    key: String,
    conn: Option<redis::Connection>,
}

impl RedisSource {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            conn: None,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.redis_url(), config.key.as_str())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn connect(&self) -> Result<redis::Connection> {
        debug!(url = %self.url, "Connecting to Redis");
        let client = redis::Client::open(self.url.as_str())
            .with_context(|| format!("invalid redis url {}", self.url))?;
        let conn = client
            .get_connection_with_timeout(REDIS_TIMEOUT)
            .with_context(|| format!("connecting to {}", self.url))?;
        conn.set_read_timeout(Some(REDIS_TIMEOUT))?;
        Ok(conn)
    }
}

impl SnapshotSource for RedisSource {
    fn fetch(&mut self) -> Result<Option<String>> {
        let mut conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };

        let value: Option<String> = conn.get(&self.key)?;
        // Only a connection that just served a read is kept for the next cycle
        self.conn = Some(conn);
        Ok(value)
    }

    fn describe(&self) -> String {
        format!("GET {} @ {}", self.key, self.url)
    }
}
