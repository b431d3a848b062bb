//! Plain-text views of ftui render buffers.
//!
//! Used by `FOLIO_TUI_HEADLESS` to print a frame and by render tests to
//! assert on what reached the screen.

use ftui::render::buffer::Buffer;

/// Comparison mode for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact.
    Exact,
    /// Trim trailing whitespace on each line.
    TrimTrailing,
    /// Collapse whitespace runs to single spaces and trim each line.
    Fuzzy,
}

/// Convert a render buffer to plain text, one line per row.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);

    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else {
                out.push(' ');
                continue;
            };
            if cell.is_continuation() {
                continue;
            }
            if cell.is_empty() {
                out.push(' ');
            } else if let Some(c) = cell.content.as_char() {
                out.push(c);
            } else {
                let w = cell.content.width();
                for _ in 0..w.max(1) {
                    out.push('?');
                }
            }
        }
    }
    out
}

pub fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n"),
        MatchMode::Fuzzy => text
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
