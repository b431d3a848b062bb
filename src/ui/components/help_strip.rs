//! Bottom status row: transient status message or key hints, plus the
//! clickable terminal toggle.

use ftui::core::geometry::Rect;
use ftui::layout::{Constraint, Direction};
use ftui::text::{Line, Span};
use ftui::widgets::Widget;
use ftui::widgets::paragraph::Paragraph;
use ftui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::ui::style_system::{
    STYLE_KBD_DESC, STYLE_KBD_KEY, STYLE_STATUS_WARNING, STYLE_TAB_ACTIVE, STYLE_TAB_INACTIVE,
    StyleContext,
};

pub const DEFAULT_HINTS: &[(&str, &str)] = &[
    ("Ctrl+K", "commands"),
    ("Ctrl+T", "terminal"),
    ("1-6", "jump"),
    ("q", "quit"),
];

/// Label of the toggle, e.g. `[ >_ terminal ]`.
pub fn toggle_label(cli_open: bool) -> &'static str {
    if cli_open { "[ >_ close ]" } else { "[ >_ terminal ]" }
}

/// Render the strip. Returns the rectangle of the terminal toggle.
pub fn draw_help_strip(
    f: &mut Frame,
    area: Rect,
    status: Option<&str>,
    cli_open: bool,
    styles: &StyleContext,
) -> Rect {
    if area.is_empty() {
        return area;
    }
    let spans: Vec<Span> = match status {
        Some(message) => vec![Span::styled(
            format!(" {message}"),
            styles.style(STYLE_STATUS_WARNING),
        )],
        None => DEFAULT_HINTS
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key} "), styles.style(STYLE_KBD_KEY)),
                    Span::styled(format!(" {label}  "), styles.style(STYLE_KBD_DESC)),
                ]
            })
            .collect(),
    };
    Paragraph::new(Line::from_spans(spans)).render(area, f);

    let label = toggle_label(cli_open);
    let width = (UnicodeWidthStr::width(label) as u16).min(area.width);
    let toggle = Rect::new(area.x + area.width - width, area.y, width, 1);
    let style = if cli_open {
        styles.style(STYLE_TAB_ACTIVE)
    } else {
        styles.style(STYLE_TAB_INACTIVE)
    };
    Paragraph::new(label).style(style).render(toggle, f);
    toggle
}

/// Split `area` into header row, content and a single-line strip at the bottom.
pub fn split_chrome(area: Rect) -> (Rect, Rect, Rect) {
    if area.height < 3 {
        return (
            Rect::new(area.x, area.y, area.width, 0),
            area,
            Rect::new(area.x, area.y + area.height, area.width, 0),
        );
    }
    let chunks = ftui::layout::Flex::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fixed(1),
            Constraint::Min(1),
            Constraint::Fixed(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}
