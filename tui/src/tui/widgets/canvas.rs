use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
};

/// Cell-addressed drawing surface over one area of a frame buffer.
///
/// Coordinates are relative to the area's top-left corner and may be negative or past the edge; whatever falls
/// outside the area is dropped.
pub(crate) struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    pub(crate) fn width(&self) -> i32 {
        i32::from(self.area.width)
    }

    pub(crate) fn height(&self) -> i32 {
        i32::from(self.area.height)
    }

    pub(crate) fn erase(&mut self, style: Style) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
        }
    }

    /// Move to `(x, y)` and print `text`, one cell per char, dropping the clipped part.
    pub(crate) fn print(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (offset, ch) in (0..).zip(text.chars()) {
            if let Some(position) = self.position(x + offset, y) {
                if let Some(cell) = self.buf.cell_mut(position) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }

    /// Paint a single cell solid.
    pub(crate) fn fill(&mut self, x: i32, y: i32, style: Style) {
        self.print(x, y, " ", style);
    }

    fn position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let x = self.area.x.checked_add(u16::try_from(x).ok()?)?;
        let y = self.area.y.checked_add(u16::try_from(y).ok()?)?;
        Some((x, y))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    /// The rows of `buf` as plain text.
    pub(crate) fn lines(buf: &Buffer) -> Vec<String> {
        (buf.area.top()..buf.area.bottom())
            .map(|y| {
                (buf.area.left()..buf.area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn prints_relative_to_the_area_and_clips() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 3));
        let mut canvas = Canvas::new(&mut buf, Rect::new(1, 1, 4, 2));
        assert_eq!((canvas.width(), canvas.height()), (4, 2));

        canvas.print(-1, 0, "abcdef", Style::default());
        canvas.print(2, 1, "xyz", Style::default());
        canvas.print(0, 2, "gone", Style::default());
        canvas.print(0, -1, "gone", Style::default());

        assert_eq!(lines(&buf), vec!["      ", " bcde ", "   xy "]);
    }

    #[test]
    fn erase_clears_and_styles_only_the_area() {
        let mut buf = Buffer::filled(Rect::new(0, 0, 3, 2), ratatui::buffer::Cell::new("#"));
        let style = Style::default().bg(Color::Black);
        Canvas::new(&mut buf, Rect::new(1, 0, 2, 2)).erase(style);

        assert_eq!(lines(&buf), vec!["#  ", "#  "]);
        assert_eq!(buf[(1, 1)].bg, Color::Black);
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
    }

    #[test]
    fn fill_paints_one_cell() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        let style = Style::default().bg(Color::Blue);
        Canvas::new(&mut buf, area).fill(1, 0, style);
        assert_eq!(buf[(1, 0)].bg, Color::Blue);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }
}
