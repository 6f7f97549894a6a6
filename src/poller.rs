//! Stability poller - samples the monitor key for a fixed duration

use anyhow::{anyhow, Result};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::snapshot::{display_value, parse_snapshot, MonitorSnapshot};
use crate::source::SnapshotSource;
use crate::stability::{CycleOutcome, RunSummary, StabilityTracker};

/// Timing of a polling run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSettings {
    pub duration: Duration,
    pub interval: Duration,
}

impl PollSettings {
    /// Both values must be positive; zero or negative seconds are rejected.
    pub fn from_secs(duration: f64, interval: f64) -> Result<Self> {
        Ok(Self {
            duration: positive_duration("duration", duration)?,
            interval: positive_duration("interval", interval)?,
        })
    }
}

fn positive_duration(name: &str, secs: f64) -> Result<Duration> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(anyhow!("{} must be greater than zero, got {}", name, secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| anyhow!("invalid {} {}: {}", name, secs, e))
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(15),
            interval: Duration::from_millis(500),
        }
    }
}

pub struct StabilityPoller<'a> {
    source: &'a mut dyn SnapshotSource,
    settings: PollSettings,
    tracker: StabilityTracker,
}

impl<'a> StabilityPoller<'a> {
    pub fn new(source: &'a mut dyn SnapshotSource, settings: PollSettings) -> Self {
        Self {
            source,
            settings,
            tracker: StabilityTracker::new(),
        }
    }

    /// Read and decode one value. Any failure is reported as no data.
    pub fn poll_once(&mut self) -> Option<MonitorSnapshot> {
        match self.source.fetch() {
            Ok(Some(raw)) => {
                let snapshot = parse_snapshot(&raw);
                if snapshot.is_none() {
                    debug!(raw_len = raw.len(), "Payload did not decode to a snapshot");
                }
                snapshot
            }
            Ok(None) => {
                debug!("Monitor key is empty");
                None
            }
            Err(e) => {
                debug!(error = %e, "Fetch failed");
                None
            }
        }
    }

    /// Poll until the duration elapses. Progress goes to `out` when `progress` is set.
    pub fn run<W: Write>(mut self, out: &mut W, progress: bool) -> Result<RunSummary> {
        info!(
            source = %self.source.describe(),
            duration_secs = self.settings.duration.as_secs_f64(),
            interval_secs = self.settings.interval.as_secs_f64(),
            "Starting stability poll"
        );

        let started_at = chrono::Utc::now();
        let started = Instant::now();

        while started.elapsed() < self.settings.duration {
            let snapshot = self.poll_once();
            let outcome = self.tracker.record(snapshot);
            if progress {
                write_progress(out, &outcome, started.elapsed())?;
            }
            std::thread::sleep(self.settings.interval);
        }

        let summary =
            RunSummary::from_tracker(&self.tracker, started_at, started.elapsed().as_secs_f64());
        info!(
            samples = summary.samples,
            flips = summary.flips,
            verdict = %summary.verdict,
            "Stability poll finished"
        );
        Ok(summary)
    }
}

/// Render one cycle: a dot for no data, otherwise an in-place status line.
pub fn write_progress<W: Write>(out: &mut W, outcome: &CycleOutcome, elapsed: Duration) -> Result<()> {
    match outcome {
        CycleOutcome::NoData => write!(out, ".")?,
        CycleOutcome::Sample {
            snapshot,
            class,
            flip,
            hardware_pct,
        } => {
            if let Some(flip) = flip {
                writeln!(out, "\n[FLIP] Device changed: {} -> {}", flip.from, flip.to)?;
            }
            write!(
                out,
                "\rTime: {}s | Dev: {} (HW:{}) | Spd: {} | DI1: {} | HW%: {}%",
                elapsed.as_secs(),
                snapshot.device_id,
                class.flag(),
                display_value(&snapshot.speed),
                display_value(&snapshot.di1),
                hardware_pct
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
