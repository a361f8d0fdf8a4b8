use crate::tui::{
    layout::gauge_and_log_areas,
    mode::{
        DisplayMode,
        ModeSwitch,
    },
    readout::{
        bytes_to_mebibit,
        latency_text,
        Readout,
    },
    widgets::{
        canvas::Canvas,
        digit_font,
        geometry::draw_gauges,
    },
    Component,
    Theme,
};
use chrono::{
    DateTime,
    Local,
};
use color_eyre::Result;
use derive_more::Debug;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{
        Paragraph,
        Widget as _,
        Wrap,
    },
    Frame,
};
use tokio::sync::watch;
use unifi_throughput_config::Config;
use unifi_throughput_controller::{
    PollStatus,
    Reading,
};

const ERROR_MESSAGE: &str =
    "Couldn't connect to the controller, double check the URL and your credentials. Retrying soon";

/// Rows between the vertical centre and the unit label above it, or the latency below it.
const LABEL_OFFSET: i32 = 7;
/// Rows the upload numerals start above the vertical centre.
const UPLOAD_DIGITS_OFFSET: i32 = 6;

/// Draws the latest poll outcome: both gauges, the numerals, latency and a status line, or the error overlay.
#[derive(Debug)]
pub(crate) struct Gauges {
    #[debug(skip)]
    status: watch::Receiver<PollStatus>,
    mode: ModeSwitch,
    theme: Theme,
    controller: String,
    show_logs: bool,
}

impl Gauges {
    pub(crate) fn new(status: watch::Receiver<PollStatus>, mode: ModeSwitch, config: &Config) -> Self {
        Self {
            status,
            mode,
            theme: Theme::from_config(config),
            controller: config.url.to_string(),
            show_logs: config.verbose,
        }
    }
}

impl Component for Gauges {
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [area, _logs] = gauge_and_log_areas(area, self.show_logs)?;
        let mode = self.mode.current();
        let status = self.status.borrow_and_update().clone();
        let view = View {
            status: &status,
            mode,
            theme: &self.theme,
            controller: &self.controller,
        };
        view.render(area, frame.buffer_mut());
        Ok(())
    }
}

/// One render pass over a snapshot of the poll status.
struct View<'a> {
    status: &'a PollStatus,
    mode: DisplayMode,
    theme: &'a Theme,
    controller: &'a str,
}

impl View<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        match self.status {
            PollStatus::Connecting => {
                let mut canvas = Canvas::new(buf, area);
                canvas.erase(self.theme.default);
                let text = format!("Connecting to {}", self.controller);
                let middle = canvas.height() / 2;
                print_centred(&mut canvas, middle, &text, self.theme.default);
            }
            PollStatus::Reading(reading) => {
                let mut canvas = Canvas::new(buf, area);
                canvas.erase(self.theme.default);
                self.render_reading(&mut canvas, reading);
            }
            PollStatus::Failed { error, at } => self.render_error(area, buf, error, at),
        }
    }

    fn render_reading(&self, canvas: &mut Canvas<'_>, reading: &Reading) {
        let theme = self.theme;
        draw_gauges(
            canvas,
            self.mode,
            &reading.percentages,
            theme.upload_fill,
            theme.download_fill,
        );

        let readout = Readout::new(&reading.sample);
        let center_x = canvas.width() / 2;
        let center_y = canvas.height() / 2;

        let upload = readout.upload_text();
        let x = center_x - digit_font::width(&upload) / 2;
        digit_font::render(canvas, &upload, x, center_y - UPLOAD_DIGITS_OFFSET, theme.upload_text);

        let download = readout.download_text();
        let x = center_x - digit_font::width(&download) / 2;
        digit_font::render(canvas, &download, x, center_y, theme.download_text);

        print_centred(
            canvas,
            center_y + LABEL_OFFSET,
            &latency_text(reading.sample.latency_ms),
            theme.default,
        );
        print_centred(canvas, center_y - LABEL_OFFSET, &readout.unit.label(), theme.default);

        let peak = readout.unit.scale(bytes_to_mebibit(reading.peak_bps));
        let status = format!(
            "updated {} | peak {peak:.1} {} | {}",
            reading.received_at.format("%H:%M:%S"),
            readout.unit,
            self.mode
        );
        print_centred(canvas, canvas.height() - 1, &status, theme.status);
    }

    fn render_error(&self, area: Rect, buf: &mut Buffer, error: &str, at: &DateTime<Local>) {
        let text = format!("{ERROR_MESSAGE}\n\n{error}\n\nLast attempt at {}", at.format("%H:%M:%S"));
        Paragraph::new(text)
            .style(self.theme.error)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

fn print_centred(canvas: &mut Canvas<'_>, y: i32, text: &str, style: Style) {
    let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    let x = canvas.width() / 2 - len / 2;
    canvas.print(x, y, text, style);
}
