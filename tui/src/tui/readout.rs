//! Unit conversion and formatting for the big numerals.

use super::widgets::digit_font::{
    truncate_for_display,
    DOWN_ARROW,
    UP_ARROW,
};
use strum::Display;
use unifi_throughput_controller::{
    traffic_rate,
    Sample,
};

const BYTES_PER_MEBIBIT: f64 = 131_072.0;

/// Anything at or above this many mebibit/s on either channel is shown in gigabit/s.
const GIGABIT_THRESHOLD: f64 = 1000.0;

pub(crate) fn bytes_to_mebibit(bytes_per_second: f64) -> f64 {
    bytes_per_second / BYTES_PER_MEBIBIT
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    #[strum(serialize = "mbps")]
    Mbps,
    #[strum(serialize = "gbps")]
    Gbps,
}

impl Unit {
    pub(crate) fn label(self) -> String {
        format!("Speeds ({self})")
    }
}

/// Both channels of one sample in a shared unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Readout {
    pub(crate) upload: f64,
    pub(crate) download: f64,
    pub(crate) unit: Unit,
}

impl Readout {
    pub(crate) fn new(sample: &Sample) -> Self {
        // Same cleanup the gauges get, so the numerals never disagree with the fill.
        let upload = bytes_to_mebibit(traffic_rate(sample.upload_bps));
        let download = bytes_to_mebibit(traffic_rate(sample.download_bps));
        let unit = Unit::for_mebibit(upload, download);
        Self {
            upload: unit.scale(upload),
            download: unit.scale(download),
            unit,
        }
    }

    pub(crate) fn upload_text(&self) -> String {
        truncate_for_display(&format!("{UP_ARROW}{:.2}", self.upload))
    }

    pub(crate) fn download_text(&self) -> String {
        truncate_for_display(&format!("{DOWN_ARROW}{:.2}", self.download))
    }
}

impl Unit {
    fn for_mebibit(upload: f64, download: f64) -> Self {
        if upload >= GIGABIT_THRESHOLD || download >= GIGABIT_THRESHOLD {
            Self::Gbps
        } else {
            Self::Mbps
        }
    }

    /// Converts a mebibit/s value into this unit.
    pub(crate) fn scale(self, mebibit: f64) -> f64 {
        match self {
            Self::Mbps => mebibit,
            Self::Gbps => mebibit / GIGABIT_THRESHOLD,
        }
    }
}

pub(crate) fn latency_text(latency_ms: f64) -> String {
    format!("Latency: {latency_ms:.0}ms")
}
