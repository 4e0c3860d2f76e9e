use ratatui::layout::Rect;

/// Screen regions: status glyph, command line, output body.
///
/// Row 0 holds the glyph (one column) and the command line; every other row
/// belongs to the body.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let top_height = area.height.min(1);
    let glyph_width = area.width.min(1);
    let glyph = Rect {
        x: area.x,
        y: area.y,
        width: glyph_width,
        height: top_height,
    };
    let command = Rect {
        x: area.x + glyph_width,
        y: area.y,
        width: area.width - glyph_width,
        height: top_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + top_height,
        width: area.width,
        height: area.height - top_height,
    };
    (glyph, command, body)
}

pub fn body_rect(area: Rect) -> Rect {
    layout_regions(area).2
}

/// Bottom row of the screen, where the hint message is overlaid.
pub fn message_rect(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    }
}
