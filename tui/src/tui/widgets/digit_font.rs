//! A six-row ASCII font for the big throughput numerals.

use super::canvas::Canvas;
use ratatui::style::Style;

pub(crate) const UP_ARROW: char = '^';
pub(crate) const DOWN_ARROW: char = 'v';

/// Rows every glyph is drawn over.
pub(crate) const GLYPH_HEIGHT: usize = 6;

/// Readouts never show more than this many characters.
const MAX_DISPLAY_CHARS: usize = 5;

#[derive(Debug)]
struct Glyph {
    ch: char,
    width: i32,
    rows: [&'static str; GLYPH_HEIGHT],
}

#[rustfmt::skip]
static GLYPHS: [Glyph; 13] = [
    Glyph { ch: '0', width: 7, rows: ["  ___  ", " /###\\ ", "|#| |#|", "|#| |#|", "|#| |#|", " \\###/ "] },
    Glyph { ch: '1', width: 4, rows: [" __ ", "/##|", " |#|", " |#|", " |#|", " |#|"] },
    Glyph { ch: '2', width: 6, rows: ["___   ", "|###\\ ", "   )#|", "  /#/ ", " /#/_ ", "|####|"] },
    Glyph { ch: '3', width: 7, rows: [" ____  ", "|####\\ ", "  __)#|", " |###< ", " ___)#|", "|####/ "] },
    Glyph { ch: '4', width: 8, rows: [" _  _   ", "|#||#|  ", "|#||#|_ ", "|######|", "   |#|  ", "   |#|  "] },
    Glyph { ch: '5', width: 7, rows: [" _____ ", "|#####|", "|#|__  ", "|####\\ ", " ___)#|", "|####/ "] },
    Glyph { ch: '6', width: 7, rows: ["   __  ", "  /#/  ", " /#/_  ", "|####\\ ", "|#(_)#|", " \\###/ "] },
    Glyph { ch: '7', width: 8, rows: [" ______ ", "|######|", "    /#/ ", "   /#/  ", "  /#/   ", " /#/    "] },
    Glyph { ch: '8', width: 7, rows: ["  ___  ", " /###\\ ", "|#(_)#|", " >###< ", "|#(_)#|", " \\###/ "] },
    Glyph { ch: '9', width: 7, rows: ["  ___  ", " /###\\ ", "|#(_)#|", " \\####|", "   /#/ ", "  /#/  "] },
    Glyph { ch: '.', width: 3, rows: ["   ", "   ", "   ", "   ", " _ ", "(#)"] },
    Glyph { ch: UP_ARROW, width: 6, rows: ["   ", "   ", " /#\\ ", "/###\\", "   ", "   "] },
    Glyph { ch: DOWN_ARROW, width: 6, rows: ["   ", "   ", "\\###/", " \\#/ ", "   ", "   "] },
];

fn glyph(ch: char) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|glyph| glyph.ch == ch)
}

/// Horizontal cells `text` takes up. Unsupported characters count as zero.
pub(crate) fn width(text: &str) -> i32 {
    text.chars().filter_map(glyph).map(|glyph| glyph.width).sum()
}

/// Draw `text` with its top-left corner at `(x, y)` and return the width used.
pub(crate) fn render(canvas: &mut Canvas<'_>, text: &str, x: i32, y: i32, style: Style) -> i32 {
    let mut offset = 0;
    for glyph in text.chars().filter_map(glyph) {
        for (row, line) in (0..).zip(glyph.rows) {
            canvas.print(x + offset, y + row, line, style);
        }
        offset += glyph.width;
    }
    offset
}

/// Cut a readout down to five characters, dropping a dangling decimal point.
pub(crate) fn truncate_for_display(text: &str) -> String {
    let mut truncated = text.chars().take(MAX_DISPLAY_CHARS).collect::<String>();
    if truncated.ends_with('.') {
        truncated.pop();
    }
    truncated
}
