//! Snapshot sources - where the raw monitor value is read from

pub mod compose;
pub mod redis;

use anyhow::Result;

pub use compose::ComposeCliSource;
pub use self::redis::RedisSource;

/// A way to read the raw text stored under the monitor key.
///
/// `Ok(None)` means the key is absent; `Err` means the read itself failed.
pub trait SnapshotSource {
    fn fetch(&mut self) -> Result<Option<String>>;

    /// Short label for logs
    fn describe(&self) -> String;
}
