use crate::tui::{
    layout::gauge_and_log_areas,
    Component,
};
use color_eyre::Result;
use derive_more::Debug;
use ratatui::{
    layout::Rect,
    style::{
        Color,
        Style,
    },
    widgets::{
        Block,
        Borders,
        Widget as _,
    },
    Frame,
};
use tui_logger::{
    TuiLoggerLevelOutput,
    TuiLoggerWidget,
    TuiWidgetState,
};
use unifi_throughput_config::Config;

/// Live log pane under the gauges, shown with `--verbose`.
#[derive(Debug)]
pub(crate) struct Logs {
    active: bool,
    #[debug(skip)]
    state: TuiWidgetState,
}

impl Logs {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            state: TuiWidgetState::new().set_default_display_level(tui_logger::LevelFilter::Debug),
        }
    }
}

impl Component for Logs {
    fn is_visible(&self) -> bool {
        self.active
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.active = config.verbose;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [_gauges, area] = gauge_and_log_areas(area, true)?;

        TuiLoggerWidget::default()
            .block(Block::default().borders(Borders::TOP).title(" logs "))
            .style(Style::default().bg(Color::Black).fg(Color::Gray))
            .style_error(Style::default().fg(Color::Red))
            .style_debug(Style::default().fg(Color::Green))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_trace(Style::default().fg(Color::Magenta))
            .style_info(Style::default().fg(Color::Cyan))
            .output_separator(':')
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(true)
            .output_file(false)
            .output_line(false)
            .state(&self.state)
            .render(area, frame.buffer_mut());

        Ok(())
    }
}
