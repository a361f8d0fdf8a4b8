use ratatui::style::{
    Color,
    Style,
};
use unifi_throughput_config::{
    Config,
    GaugeColor,
};

/// Terminal colour for a configured gauge colour.
pub(super) fn color(gauge: GaugeColor) -> Color {
    match gauge {
        GaugeColor::Blue => Color::Blue,
        GaugeColor::Red => Color::Red,
        GaugeColor::Green => Color::Green,
        GaugeColor::Yellow => Color::Yellow,
        GaugeColor::Magenta => Color::Magenta,
        GaugeColor::Cyan => Color::Cyan,
        GaugeColor::White => Color::White,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Theme {
    pub(super) default: Style,
    /// Solid gauge cells.
    pub(super) upload_fill: Style,
    pub(super) download_fill: Style,
    /// Digits and arrows.
    pub(super) upload_text: Style,
    pub(super) download_text: Style,
    pub(super) error: Style,
    pub(super) status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(GaugeColor::Blue, GaugeColor::Cyan)
    }
}

impl Theme {
    pub(super) fn new(upload: GaugeColor, download: GaugeColor) -> Self {
        let upload = color(upload);
        let download = color(download);
        Self {
            default: Style::default().bg(Color::Black).fg(Color::Gray),
            upload_fill: Style::default().bg(upload).fg(upload),
            download_fill: Style::default().bg(download).fg(download),
            upload_text: Style::default().bg(Color::Black).fg(upload),
            download_text: Style::default().bg(Color::Black).fg(download),
            error: Style::default().bg(Color::Black).fg(Color::White),
            status: Style::default().bg(Color::Black).fg(Color::DarkGray),
        }
    }

    pub(super) fn from_config(config: &Config) -> Self {
        Self::new(config.upload_color, config.download_color)
    }
}
