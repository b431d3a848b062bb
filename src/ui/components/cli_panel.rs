//! Floating CLI panel geometry and rendering.
//!
//! The panel is anchored bottom-right of the content area and shifted by the
//! drag offset. The offset itself is unbounded; only the drawn rectangle is
//! kept on screen.

use ftui::core::geometry::Rect;
use ftui::text::{Line, Span, Text};
use ftui::widgets::Widget;
use ftui::widgets::block::{Alignment, Block};
use ftui::widgets::borders::{BorderType, Borders};
use ftui::widgets::paragraph::Paragraph;
use ftui::Frame;

use crate::console::{FloatingCli, PROMPT};
use crate::console::panel::PanelState;
use crate::markup;
use crate::ui::style_system::{
    STYLE_CLI_BORDER, STYLE_CLI_COMMAND, STYLE_CLI_PROMPT, STYLE_CLI_TITLE, StyleContext,
};

pub const PANEL_WIDTH: u16 = 64;
pub const PANEL_HEIGHT: u16 = 16;
const FULLSCREEN_LABEL: &str = "[\u{25a1}]";
const CLOSE_LABEL: &str = "[\u{00d7}]";

/// Rendered panel regions, kept for mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLayout {
    pub area: Rect,
    /// Top border row; the drag handle.
    pub title: Rect,
    pub fullscreen_button: Rect,
    pub close_button: Rect,
    /// Offset that reproduces `area` without clamping.
    pub drawn_offset: (i32, i32),
}

/// Where the panel is drawn inside `content`.
pub fn panel_area(content: Rect, panel: &PanelState) -> Rect {
    if panel.is_fullscreen() {
        return content;
    }
    let width = PANEL_WIDTH.min(content.width);
    let height = PANEL_HEIGHT.min(content.height);
    let (dx, dy) = panel.offset();

    let min_x = content.x as i32;
    let min_y = content.y as i32;
    let max_x = (content.x + content.width - width) as i32;
    let max_y = (content.y + content.height - height) as i32;
    let (base_x, base_y) = home_position(content);
    let x = (base_x + dx).clamp(min_x, max_x.max(min_x));
    let y = (base_y + dy).clamp(min_y, max_y.max(min_y));
    Rect::new(x as u16, y as u16, width, height)
}

/// Top-left corner of an undragged panel: bottom-right of `content`, with
/// one column of margin from the right edge when there is room.
fn home_position(content: Rect) -> (i32, i32) {
    let width = PANEL_WIDTH.min(content.width);
    let height = PANEL_HEIGHT.min(content.height);
    let max_x = (content.x + content.width - width) as i32;
    let base_x = (max_x - 1).max(content.x as i32);
    (base_x, (content.y + content.height - height) as i32)
}

/// Offset at which the panel sits where it is drawn. Differs from the stored
/// offset once the panel has been dragged past the edge of `content`.
pub fn drawn_offset(content: Rect, panel: &PanelState) -> (i32, i32) {
    if panel.is_fullscreen() {
        return panel.offset();
    }
    let area = panel_area(content, panel);
    let (base_x, base_y) = home_position(content);
    (area.x as i32 - base_x, area.y as i32 - base_y)
}

fn layout_for(area: Rect) -> PanelLayout {
    let right = area.x + area.width;
    let close_x = right.saturating_sub(5).max(area.x);
    let full_x = right.saturating_sub(9).max(area.x);
    PanelLayout {
        area,
        title: Rect::new(area.x, area.y, area.width, 1.min(area.height)),
        fullscreen_button: Rect::new(full_x, area.y, 3, 1.min(area.height)),
        close_button: Rect::new(close_x, area.y, 3, 1.min(area.height)),
        drawn_offset: (0, 0),
    }
}

/// Convert one scrollback entry into display lines. Newlines inside the
/// markup start new lines.
pub fn markup_lines(markup_text: &str, styles: &StyleContext) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    for segment in markup::parse(markup_text) {
        let style = styles.tone_style(segment.tone, segment.href.is_some());
        let mut pieces = segment.text.split('\n');
        if let Some(first) = pieces.next()
            && !first.is_empty()
        {
            spans.push(Span::styled(first.to_string(), style));
        }
        for piece in pieces {
            lines.push(Line::from_spans(std::mem::take(&mut spans)));
            if !piece.is_empty() {
                spans.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from_spans(spans));
    lines
}

/// Draw the panel over `content`.
pub fn draw_cli_panel(
    frame: &mut Frame,
    content: Rect,
    cli: &FloatingCli,
    styles: &StyleContext,
) -> PanelLayout {
    let area = panel_area(content, cli.panel());
    let layout = PanelLayout {
        drawn_offset: drawn_offset(content, cli.panel()),
        ..layout_for(area)
    };
    if area.is_empty() {
        return layout;
    }

    let border = styles.style(STYLE_CLI_BORDER);
    Block::new().style(border).render(area, frame);
    let outer = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" visitor@portfolio: ~ ")
        .title_alignment(Alignment::Left)
        .style(border);
    let inner = outer.inner(area);
    outer.render(area, frame);

    if area.width >= 12 {
        let title_style = styles.style(STYLE_CLI_TITLE);
        Paragraph::new(FULLSCREEN_LABEL)
            .style(title_style)
            .render(layout.fullscreen_button, frame);
        Paragraph::new(CLOSE_LABEL)
            .style(title_style)
            .render(layout.close_button, frame);
    }

    if inner.is_empty() {
        return layout;
    }

    let mut lines: Vec<Line<'static>> = cli
        .output()
        .iter()
        .flat_map(|l| markup_lines(&l.markup, styles))
        .collect();
    lines.push(Line::from_spans(vec![
        Span::styled(format!("{PROMPT} "), styles.style(STYLE_CLI_PROMPT)),
        Span::styled(cli.input().to_string(), styles.style(STYLE_CLI_COMMAND)),
        Span::styled("\u{2588}", styles.style(STYLE_CLI_PROMPT)),
    ]));

    // Follow the tail unless the user scrolled up.
    let height = inner.height as usize;
    let end = lines.len().saturating_sub(cli.scroll_from_bottom());
    let start = end.saturating_sub(height);
    let shown: Vec<Line<'static>> = lines.drain(start..end).collect();
    Paragraph::new(Text::from_lines(shown)).render(inner, frame);

    layout
}
