//! Turns raw byte rates into gauge percentages relative to an observed peak.
//!
//! The peak used as denominator is pluggable: [`AllTimePeak`] keeps the largest rate seen since start and never
//! decays, [`WindowedPeak`] only remembers the last few samples so the scale recovers after a traffic spike.

use crate::health::Sample;
use std::{
    collections::VecDeque,
    fmt,
};

/// Chooses the peak a [`ScaleTracker`] scales against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PeakStrategy {
    #[default]
    AllTime,
    Window(usize),
}

impl PeakStrategy {
    /// `None` and `Some(0)` mean the all-time peak.
    pub fn from_window(samples: Option<usize>) -> Self {
        match samples {
            Some(samples) if samples > 0 => Self::Window(samples),
            _ => Self::AllTime,
        }
    }

    fn policy(self) -> Box<dyn PeakPolicy> {
        match self {
            Self::AllTime => Box::new(AllTimePeak::default()),
            Self::Window(samples) => Box::new(WindowedPeak::new(samples)),
        }
    }
}

pub trait PeakPolicy: fmt::Debug + Send + Sync {
    /// Fold in the largest rate of a new sample and return the peak to scale it against.
    fn update(&mut self, rate: f64) -> f64;

    fn peak(&self) -> f64;
}

#[derive(Debug, Default)]
pub struct AllTimePeak {
    max_observed: f64,
}

impl PeakPolicy for AllTimePeak {
    fn update(&mut self, rate: f64) -> f64 {
        self.max_observed = self.max_observed.max(rate);
        self.max_observed
    }

    fn peak(&self) -> f64 {
        self.max_observed
    }
}

#[derive(Debug)]
pub struct WindowedPeak {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl WindowedPeak {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
}

impl PeakPolicy for WindowedPeak {
    fn update(&mut self, rate: f64) -> f64 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(rate);
        self.peak()
    }

    fn peak(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

/// Upload and download as a share of the current peak, both in `0..=100`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Percentages {
    pub upload: f64,
    pub download: f64,
}

#[derive(Debug)]
pub struct ScaleTracker {
    policy: Box<dyn PeakPolicy>,
}

impl Default for ScaleTracker {
    fn default() -> Self {
        Self::new(PeakStrategy::default())
    }
}

impl ScaleTracker {
    pub fn new(strategy: PeakStrategy) -> Self {
        Self {
            policy: strategy.policy(),
        }
    }

    pub fn observe(&mut self, sample: &Sample) -> Percentages {
        let upload = traffic_rate(sample.upload_bps);
        let download = traffic_rate(sample.download_bps);
        let peak = self.policy.update(upload.max(download));
        Percentages {
            upload: percent_of(upload, peak),
            download: percent_of(download, peak),
        }
    }

    /// Bytes per second the gauges are currently scaled against.
    pub fn peak(&self) -> f64 {
        self.policy.peak()
    }
}

/// Controllers occasionally report garbage; treat it as no traffic.
pub fn traffic_rate(bps: f64) -> f64 {
    if bps.is_finite() && bps > 0.0 {
        bps
    } else {
        0.0
    }
}

fn percent_of(value: f64, peak: f64) -> f64 {
    // An all-zero first sample leaves the peak at 0, which reads as 0% rather than NaN.
    if peak <= 0.0 {
        return 0.0;
    }
    (value / peak * 100.0).clamp(0.0, 100.0)
}
