use ratatui::layout::Position;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::capture::{CaptureBuffer, CaptureStatus};
use crate::ui::app::App;
use crate::ui::editor::PROMPT;
use crate::ui::layout::{layout_regions, message_rect};
use crate::ui::theme::{command_style, message_style};
use crate::ui::view::BufferBody;

/// One-character summary of a capture buffer's state.
///
/// `#` paused, `+` full, ` ` complete, `~` still capturing.
pub fn status_glyph(buffer: &CaptureBuffer) -> char {
    match buffer.status() {
        CaptureStatus::Paused => '#',
        _ if buffer.is_full() => '+',
        CaptureStatus::Complete => ' ',
        CaptureStatus::Capturing => '~',
    }
}

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (glyph, command, body) = layout_regions(area);
    let style = command_style(app.is_pending());

    frame.render_widget(
        Paragraph::new(status_glyph(app.root()).to_string()).style(style),
        glyph,
    );

    let editor = app.editor();
    let line = Line::from(vec![Span::raw(PROMPT), Span::raw(editor.text())]);
    frame.render_widget(Paragraph::new(line).style(style), command);
    if command.width > 0 {
        let column = u16::try_from(editor.cursor_column()).unwrap_or(u16::MAX);
        let x = command.x + column.min(command.width - 1);
        frame.set_cursor_position(Position::new(x, command.y));
    }

    frame.render_widget(Clear, body);
    frame.render_widget(BufferBody::new(app.displayed(), app.view()), body);

    if let Some(message) = app.message() {
        if area.height > 1 {
            frame.render_widget(
                Paragraph::new(message).style(message_style()),
                message_rect(area),
            );
        }
    }
}
