//! Page body rendering: the rows of [`PageView`] inside the content area.
//!
//! Sections that have not been revealed yet render as blank rows.

use ftui::core::geometry::Rect;
use ftui::text::{Line, Span, Text};
use ftui::widgets::Widget;
use ftui::widgets::paragraph::Paragraph;
use ftui::{Frame, Style};

use crate::page::{LineStyle, PageView};
use crate::ui::style_system::{
    STYLE_PAGE_ACCENT, STYLE_PAGE_HEADING, STYLE_PAGE_TITLE, STYLE_STATUS_SUCCESS,
    STYLE_TEXT_MUTED, STYLE_TEXT_PRIMARY, StyleContext,
};

const LEFT_MARGIN: &str = "  ";

fn line_style(style: LineStyle, styles: &StyleContext) -> Style {
    match style {
        LineStyle::Heading => styles.style(STYLE_PAGE_HEADING),
        LineStyle::Title => styles.style(STYLE_PAGE_TITLE),
        LineStyle::Accent | LineStyle::Stats => styles.style(STYLE_PAGE_ACCENT),
        LineStyle::Muted => styles.style(STYLE_TEXT_MUTED),
        LineStyle::Typed => styles.style(STYLE_STATUS_SUCCESS),
        LineStyle::Text | LineStyle::Bar(_) | LineStyle::Blank => {
            styles.style(STYLE_TEXT_PRIMARY)
        }
    }
}

/// Draw the visible rows. `typed` fills the banner row.
pub fn draw_page(f: &mut Frame, area: Rect, page: &PageView, typed: &str, styles: &StyleContext) {
    if area.is_empty() {
        return;
    }
    let lines: Vec<Line> = page
        .visible_rows()
        .map(|row| match page.row(row) {
            Some((section, line)) if page.is_revealed(section) => {
                let style = line_style(line.style, styles);
                let text = match line.style {
                    LineStyle::Typed => format!("{LEFT_MARGIN}> {typed}\u{258c}"),
                    _ => format!("{LEFT_MARGIN}{}", page.line_text(line)),
                };
                Line::from_spans(vec![Span::styled(text, style)])
            }
            _ => Line::from(""),
        })
        .collect();
    Paragraph::new(Text::from_lines(lines)).render(area, f);
}
