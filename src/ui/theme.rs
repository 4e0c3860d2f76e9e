use ratatui::style::{Color, Style};

pub const COMMAND_TEXT: Color = Color::White;
/// Command line background while the text has unexecuted edits.
pub const COMMAND_PENDING: Color = Color::Blue;
/// Command line background once the text matches what is running.
pub const COMMAND_CURRENT: Color = Color::Rgb(0x00, 0x00, 0x80);
pub const MESSAGE_BG: Color = Color::Blue;

pub fn command_style(pending: bool) -> Style {
    let bg = if pending {
        COMMAND_PENDING
    } else {
        COMMAND_CURRENT
    };
    Style::default().fg(COMMAND_TEXT).bg(bg)
}

pub fn message_style() -> Style {
    Style::default().fg(COMMAND_TEXT).bg(MESSAGE_BG)
}
