//! Projects a percentage onto the canvas as either a vertical bar or a half-circle arc.

use super::canvas::Canvas;
use crate::tui::mode::DisplayMode;
use ratatui::style::Style;
use unifi_throughput_controller::Percentages;

pub(crate) const BAR_WIDTH: i32 = 10;
/// Gap between a bar and its side of the canvas.
const BAR_MARGIN: i32 = 1;

/// Radial thickness of an arc band.
const ARC_THICKNESS: i32 = 2;
const ARC_MARGIN: i32 = 2;
/// Terminal cells are about twice as tall as wide, so arcs get a wider x radius.
const ARC_X_STRETCH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Upload,
    Download,
}

/// Cells to fill for one channel, for a given percentage and canvas size.
pub(crate) trait GeometryRenderer {
    fn cells(&self, channel: Channel, percent: f64, width: i32, height: i32) -> Vec<(i32, i32)>;
}

pub(crate) fn renderer(mode: DisplayMode) -> &'static dyn GeometryRenderer {
    match mode {
        DisplayMode::Bars => &BarGeometry,
        DisplayMode::Arcs => &ArcGeometry,
    }
}

/// Fill both gauges in their channel styles.
pub(crate) fn draw_gauges(
    canvas: &mut Canvas<'_>,
    mode: DisplayMode,
    percentages: &Percentages,
    upload: Style,
    download: Style,
) {
    let renderer = renderer(mode);
    let (width, height) = (canvas.width(), canvas.height());
    for (channel, percent, style) in [
        (Channel::Upload, percentages.upload, upload),
        (Channel::Download, percentages.download, download),
    ] {
        for (x, y) in renderer.cells(channel, percent, width, height) {
            canvas.fill(x, y, style);
        }
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Height of a bar and the row its top starts at.
///
/// A bar is never less than one row tall so that a reading is always visible.
pub(crate) fn bar_height_and_offset(percent: f64, canvas_height: i32) -> (i32, i32) {
    let height = (f64::from(canvas_height) * clamp_percent(percent) / 100.0).floor() as i32;
    let mut offset = canvas_height - height;
    if offset == canvas_height {
        offset -= 1;
    }
    (height.max(1), offset)
}

#[derive(Debug)]
pub(crate) struct BarGeometry;

impl GeometryRenderer for BarGeometry {
    fn cells(&self, channel: Channel, percent: f64, width: i32, height: i32) -> Vec<(i32, i32)> {
        let left = match channel {
            Channel::Upload => BAR_MARGIN,
            Channel::Download => width - BAR_WIDTH - BAR_MARGIN,
        };
        let (bar_height, offset) = bar_height_and_offset(percent, height);
        (offset..offset + bar_height)
            .flat_map(|y| (left..left + BAR_WIDTH).map(move |x| (x, y)))
            .collect()
    }
}

#[derive(Debug)]
pub(crate) struct ArcGeometry;

impl ArcGeometry {
    /// Degrees, clockwise from the positive x axis with y growing downwards.
    fn span(channel: Channel, percent: f64) -> (i32, i32) {
        let percent = clamp_percent(percent);
        match channel {
            // From the bottom, sweeping through the left.
            Channel::Upload => (90, 90 + (percent / 100.0 * 180.0) as i32),
            // Mirrors upload: ends at the bottom, starts further up the right side the fuller it is.
            Channel::Download => (-90 + ((100.0 - percent) / 100.0 * 180.0) as i32, 90),
        }
    }
}

impl GeometryRenderer for ArcGeometry {
    fn cells(&self, channel: Channel, percent: f64, width: i32, height: i32) -> Vec<(i32, i32)> {
        let radius = f64::from(width.min(height) - ARC_MARGIN) / 2.0;
        let center_y = height / 2;
        let center_x = match channel {
            Channel::Upload => width / 2 - 1,
            Channel::Download => width / 2 + 1,
        };

        let (from, to) = Self::span(channel, percent);
        let mut cells = Vec::new();
        for degrees in from..to {
            let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
            for step in 0..ARC_THICKNESS {
                let r = radius + f64::from(step);
                let y = center_y + (r * sin) as i32;
                let x = center_x + ((r + ARC_X_STRETCH) * cos) as i32;
                cells.push((x, y));
            }
        }
        cells
    }
}
