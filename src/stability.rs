//! Device lock stability tracking - counts samples and identifier flips

use serde::Serialize;
use std::fmt;

use crate::snapshot::{DeviceClass, MonitorSnapshot};

/// Final classification of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
    Inconclusive,
}

impl Verdict {
    /// PASS is checked first, then FAIL; everything else is inconclusive.
    pub fn decide(hardware: u64, software: u64, flips: u64) -> Self {
        if hardware > 0 && flips == 0 {
            Verdict::Pass
        } else if software > 0 {
            Verdict::Fail
        } else {
            Verdict::Inconclusive
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Pass => "[PASS] Stable Hardware Lock Verified.",
            Verdict::Fail => "[FAIL] Software Device (Simulator) is still active.",
            Verdict::Inconclusive => "[INCONCLUSIVE] No data?",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Inconclusive => "INCONCLUSIVE",
        };
        f.write_str(s)
    }
}

/// Identifier change between two observed samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flip {
    pub from: String,
    pub to: String,
}

/// What a single cycle contributed
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    NoData,
    Sample {
        snapshot: MonitorSnapshot,
        class: DeviceClass,
        flip: Option<Flip>,
        /// Hardware share so far, current cycle included
        hardware_pct: u64,
    },
}

/// Running counters for one polling run
#[derive(Debug, Clone, Default)]
pub struct StabilityTracker {
    samples: u64,
    hardware: u64,
    software: u64,
    flips: u64,
    last_device: Option<String>,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one cycle. Every call counts as a sample, with or without data.
    pub fn record(&mut self, snapshot: Option<MonitorSnapshot>) -> CycleOutcome {
        let outcome = match snapshot {
            None => CycleOutcome::NoData,
            Some(snapshot) => self.observe(snapshot),
        };
        self.samples += 1;
        outcome
    }

    fn observe(&mut self, snapshot: MonitorSnapshot) -> CycleOutcome {
        let class = snapshot.class();
        match class {
            DeviceClass::Hardware => self.hardware += 1,
            DeviceClass::Software => self.software += 1,
        }

        // No-data cycles in between do not reset the comparison point
        let flip = match self.last_device.as_deref() {
            Some(prev) if prev != snapshot.device_id => Some(Flip {
                from: prev.to_string(),
                to: snapshot.device_id.clone(),
            }),
            _ => None,
        };
        if flip.is_some() {
            self.flips += 1;
        }
        self.last_device = Some(snapshot.device_id.clone());

        let hardware_pct = self.hardware * 100 / (self.samples + 1);

        CycleOutcome::Sample {
            snapshot,
            class,
            flip,
            hardware_pct,
        }
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn hardware(&self) -> u64 {
        self.hardware
    }

    pub fn software(&self) -> u64 {
        self.software
    }

    pub fn flips(&self) -> u64 {
        self.flips
    }

    pub fn last_device(&self) -> Option<&str> {
        self.last_device.as_deref()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::decide(self.hardware, self.software, self.flips)
    }
}

/// Result of a finished polling run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub samples: u64,
    pub hardware: u64,
    pub software: u64,
    pub flips: u64,
    pub verdict: Verdict,
    pub last_device_id: Option<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn from_tracker(
        tracker: &StabilityTracker,
        started_at: chrono::DateTime<chrono::Utc>,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            samples: tracker.samples(),
            hardware: tracker.hardware(),
            software: tracker.software(),
            flips: tracker.flips(),
            verdict: tracker.verdict(),
            last_device_id: tracker.last_device().map(str::to_string),
            started_at,
            elapsed_secs,
        }
    }

    /// Human-readable results block
    pub fn report(&self) -> String {
        format!(
            "--- Test Results ---\nTotal Samples: {}\nHardware Samples: {}\nSoftware Samples: {}\nDevice Flips: {}\n\n{}",
            self.samples,
            self.hardware,
            self.software,
            self.flips,
            self.verdict.message()
        )
    }
}
