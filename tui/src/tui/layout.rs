use eyre::{
    bail,
    Result,
};
use ratatui::{
    layout::{
        Constraint,
        Direction,
        Layout,
    },
    prelude::Rect,
};

/// Split the screen: gauges on top, optional log pane below.
pub(crate) fn gauge_and_log_areas(area: Rect, show_logs: bool) -> Result<[Rect; 2]> {
    if !show_logs {
        return Ok([area, Rect::new(area.x, area.bottom(), area.width, 0)]);
    }

    let constraints = vec![
        Constraint::Min(0),         // Gauges
        Constraint::Percentage(30), // Logs
    ];

    let [gauges, logs] = *Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
    else {
        bail!("Failed to split the area");
    };

    Ok([gauges, logs])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gauges_get_everything_without_logs() {
        let area = Rect::new(0, 0, 80, 40);
        let [gauges, logs] = gauge_and_log_areas(area, false).unwrap();
        assert_eq!(gauges, area);
        assert_eq!(logs.height, 0);
    }

    #[test]
    fn logs_take_the_bottom() {
        let [gauges, logs] = gauge_and_log_areas(Rect::new(0, 0, 80, 40), true).unwrap();
        assert_eq!(gauges, Rect::new(0, 0, 80, 28));
        assert_eq!(logs, Rect::new(0, 28, 80, 12));
    }
}
