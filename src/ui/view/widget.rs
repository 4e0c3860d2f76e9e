use std::io::{self, BufRead, BufReader};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::capture::{CaptureBuffer, ReadMode};

use super::state::{ViewState, TAB_WIDTH};

const LEFT_CLIP: char = '«';
const RIGHT_CLIP: char = '»';

/// Widest UTF-8 encoding of a single character.
const MAX_CHAR_BYTES: usize = 4;

/// Renders the committed bytes of a capture buffer, one record per row.
pub struct BufferBody<'a> {
    buffer: &'a CaptureBuffer,
    view: ViewState,
}

impl<'a> BufferBody<'a> {
    pub fn new(buffer: &'a CaptureBuffer, view: ViewState) -> Self {
        Self { buffer, view }
    }
}

impl Widget for BufferBody<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = usize::from(area.width);
        // Every character takes at least one column, so this many bytes
        // cover the window plus the column that decides the right marker.
        let limit = self
            .view
            .x
            .saturating_add(width + 1)
            .saturating_mul(MAX_CHAR_BYTES);
        let mut reader = BufReader::new(self.buffer.new_reader(ReadMode::Snapshot));
        let mut line = Vec::new();

        // A partial last record reached while skipping is still shown.
        let mut carried = false;
        for _ in 0..self.view.y {
            match read_record(&mut reader, &mut line, limit) {
                Ok(Some(true)) => {}
                Ok(Some(false)) => {
                    carried = true;
                    break;
                }
                Ok(None) | Err(_) => break,
            }
        }

        for row in 0..area.height {
            if !std::mem::take(&mut carried) {
                match read_record(&mut reader, &mut line, limit) {
                    Ok(Some(_)) => {}
                    Ok(None) | Err(_) => break,
                }
            }
            let text = String::from_utf8_lossy(&line);
            for (col, ch) in render_line(&text, self.view.x, width).into_iter().enumerate() {
                let pos = (area.x + col as u16, area.y + row);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char(ch);
                }
            }
        }
    }
}

/// Read the next record into `line`, keeping at most `limit` bytes of it.
///
/// The rest of the record, up to and including its newline, is consumed and
/// dropped. Returns `None` at end of input, otherwise whether the record was
/// newline-terminated.
fn read_record<R: BufRead>(
    reader: &mut R,
    line: &mut Vec<u8>,
    limit: usize,
) -> io::Result<Option<bool>> {
    line.clear();
    let mut seen = false;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(seen.then_some(false));
        }
        seen = true;
        let (content, terminated) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (&available[..end], true),
            None => (available, false),
        };
        let room = limit.saturating_sub(line.len());
        line.extend_from_slice(&content[..content.len().min(room)]);
        let used = content.len() + usize::from(terminated);
        reader.consume(used);
        if terminated {
            return Ok(Some(true));
        }
    }
}

/// Lay out one record for a window starting at column `offset`.
///
/// Tabs expand to the next multiple of [`TAB_WIDTH`]. When the window is
/// scrolled right, column 0 shows `«` if the record has any content left of
/// the window; the last column shows `»` if content continues past it.
/// Characters past the window are never expanded.
pub fn render_line(text: &str, offset: usize, width: usize) -> Vec<char> {
    let mut out = vec![' '; width];
    let end = offset.saturating_add(width);
    let mut col = 0usize;
    for ch in text.chars() {
        if col > end {
            break;
        }
        let (cell, span) = match ch {
            '\t' => (' ', TAB_WIDTH - col % TAB_WIDTH),
            ch if ch.is_control() => (' ', 1),
            ch => (ch, 1),
        };
        if ch != '\t' && (offset..end).contains(&col) {
            out[col - offset] = cell;
        }
        col += span;
    }

    if width == 0 {
        return out;
    }
    if offset > 0 && col > 0 {
        out[0] = LEFT_CLIP;
    }
    if col > end {
        out[width - 1] = RIGHT_CLIP;
    }
    out
}
