//! Command palette state and rendering.
//! Integration hooks live in `src/ui/app.rs`; this module stays side-effect free.
//!
//! # Interaction Contract
//!
//! | Trigger        | Behavior                                              |
//! |----------------|-------------------------------------------------------|
//! | Ctrl+K         | Toggle palette; opening clears the query              |
//! | Esc            | Close palette, keep nothing                           |
//! | Enter          | Activate highlighted entry, close, dispatch action    |
//! | Up / Down      | Move highlight (wraps)                                |
//! | Any printable  | Append to query, refilter, highlight first match      |
//! | Backspace      | Remove last char, refilter                            |
//! | Click on row   | Activate that row                                     |
//! | Click outside  | Close                                                 |

use ftui::core::geometry::Rect;
use ftui::text::{Line, Span};
use ftui::widgets::Widget;
use ftui::widgets::block::{Alignment, Block};
use ftui::widgets::borders::{BorderType, Borders};
use ftui::widgets::paragraph::Paragraph;
use ftui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::page::SectionId;
use crate::ui::style_system::{
    STYLE_KBD_DESC, STYLE_PALETTE_BORDER, STYLE_PALETTE_QUERY, STYLE_RESULT_ROW,
    STYLE_RESULT_ROW_SELECTED, STYLE_TEXT_MUTED, StyleContext,
};

/// What activating an entry does. Sections scroll the page, the rest open
/// something.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionTag {
    Home,
    About,
    Skills,
    Experience,
    Projects,
    Contact,
    Github,
    Cli,
}

impl ActionTag {
    pub fn section(self) -> Option<SectionId> {
        match self {
            Self::Home => Some(SectionId::Home),
            Self::About => Some(SectionId::About),
            Self::Skills => Some(SectionId::Skills),
            Self::Experience => Some(SectionId::Experience),
            Self::Projects => Some(SectionId::Projects),
            Self::Contact => Some(SectionId::Contact),
            Self::Github | Self::Cli => None,
        }
    }
}

/// Render-ready descriptor for an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    pub id: &'static str,
    pub label: String,
    pub hint: String,
    pub action: ActionTag,
}

fn entry(id: &'static str, label: &str, hint: &str, action: ActionTag) -> CommandEntry {
    CommandEntry {
        id,
        label: label.to_string(),
        hint: hint.to_string(),
        action,
    }
}

/// The fixed catalog in display order.
pub fn default_entries() -> Vec<CommandEntry> {
    vec![
        entry("home", "Go to Home", "#", ActionTag::Home),
        entry("about", "Go to About", "01", ActionTag::About),
        entry("skills", "Go to Skills", "02", ActionTag::Skills),
        entry("exp", "Go to Experience", "03", ActionTag::Experience),
        entry("projects", "Go to Projects", "04", ActionTag::Projects),
        entry("contact", "Go to Contact", "05", ActionTag::Contact),
        entry("github", "Open GitHub", "↗", ActionTag::Github),
        entry("cli", "Open Terminal CLI", "Ctrl+T", ActionTag::Cli),
    ]
}

#[derive(Clone, Debug)]
pub struct PaletteState {
    open: bool,
    query: String,
    entries: Vec<CommandEntry>,
    /// Indices into `entries` matching `query`, in catalog order.
    visible: Vec<usize>,
    /// Position within `visible`.
    highlighted: Option<usize>,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new(default_entries())
    }
}

impl PaletteState {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        let mut state = Self {
            open: false,
            query: String::new(),
            entries,
            visible: Vec::new(),
            highlighted: None,
        };
        state.refilter();
        state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn visible(&self) -> impl Iterator<Item = &CommandEntry> {
        self.visible.iter().map(|&i| &self.entries[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_entry(&self) -> Option<&CommandEntry> {
        let pos = self.highlighted?;
        self.visible.get(pos).map(|&i| &self.entries[i])
    }

    /// Open with an empty query and the full catalog visible.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.refilter();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open();
        }
        self.open
    }

    /// Case-insensitive substring match on labels. The query is not trimmed.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let q = self.query.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.label.to_lowercase().contains(&q))
            .map(|(i, _)| i)
            .collect();
        self.highlighted = if self.visible.is_empty() { None } else { Some(0) };
    }

    /// Move the highlight by `delta`, wrapping. No-op when nothing is visible.
    pub fn move_highlight(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        let current = self.highlighted.unwrap_or(0) as isize;
        self.highlighted = Some((current + delta).rem_euclid(len) as usize);
    }

    /// Activate the highlighted entry and close. `None` (and still open) when
    /// nothing is highlighted.
    pub fn activate(&mut self) -> Option<ActionTag> {
        let action = self.highlighted_entry()?.action;
        self.close();
        Some(action)
    }

    /// Activate the visible row at `pos`, as a mouse click does.
    pub fn activate_at(&mut self, pos: usize) -> Option<ActionTag> {
        let action = self.visible.get(pos).map(|&i| self.entries[i].action)?;
        self.close();
        Some(action)
    }
}

/// Centered overlay rectangle: at most 60 columns, tall enough for every row.
pub fn palette_area(screen: Rect, rows: usize) -> Rect {
    let width = screen.width.min(60).max(20).min(screen.width);
    // border + query + separator + rows + border
    let wanted = rows.max(1) as u16 + 4;
    let height = wanted.min(screen.height);
    let x = screen.x + (screen.width - width) / 2;
    let y = screen.y + screen.height.saturating_sub(height) / 4;
    Rect::new(x, y, width, height)
}

/// Where the palette landed on screen, kept for mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteLayout {
    pub area: Rect,
    pub list: Rect,
    pub scroll_offset: usize,
}

impl PaletteLayout {
    /// Visible-row position under `(x, y)`, if any.
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.list.contains(x, y) {
            return None;
        }
        Some(self.scroll_offset + (y - self.list.y) as usize)
    }
}

/// Draw the palette overlay and return its layout.
pub fn draw_palette(
    frame: &mut Frame,
    screen: Rect,
    state: &PaletteState,
    styles: &StyleContext,
) -> PaletteLayout {
    let pal_area = palette_area(screen, state.entries().len());
    let text_style = styles.style(STYLE_RESULT_ROW);
    let muted_style = styles.style(STYLE_TEXT_MUTED);
    let border_style = styles.style(STYLE_PALETTE_BORDER);

    // Clear the area and draw the outer block.
    Block::new().style(text_style).render(pal_area, frame);
    let outer = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Commands (Ctrl+K) ")
        .title_alignment(Alignment::Left)
        .style(border_style);
    let inner = outer.inner(pal_area);
    outer.render(pal_area, frame);

    let mut layout = PaletteLayout {
        area: pal_area,
        list: Rect::new(inner.x, inner.y, 0, 0),
        scroll_offset: 0,
    };
    if inner.is_empty() {
        return layout;
    }

    let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let (query_display, query_style) = if state.query().is_empty() {
        ("Type a command or search...", muted_style)
    } else {
        (state.query(), styles.style(STYLE_PALETTE_QUERY))
    };
    Paragraph::new(Line::from_spans(vec![
        Span::styled("> ", styles.style(STYLE_PALETTE_QUERY)),
        Span::styled(query_display.to_string(), query_style),
    ]))
    .render(input_area, frame);

    if inner.height > 2 {
        let sep = "\u{2500}".repeat(inner.width as usize);
        Paragraph::new(&*sep)
            .style(muted_style)
            .render(Rect::new(inner.x, inner.y + 1, inner.width, 1), frame);
    }

    let list_y = inner.y + 2;
    let list_h = inner.height.saturating_sub(2);
    let visible_count = list_h as usize;
    let selected = state.highlighted().unwrap_or(0);
    // Scroll the list so the highlight is always visible.
    let scroll_offset = if visible_count > 0 && selected >= visible_count {
        selected - visible_count + 1
    } else {
        0
    };
    layout.list = Rect::new(inner.x, list_y, inner.width, list_h);
    layout.scroll_offset = scroll_offset;

    if state.visible_len() == 0 && list_h > 0 {
        Paragraph::new("  No matching commands")
            .style(muted_style)
            .render(Rect::new(inner.x, list_y, inner.width, 1), frame);
        return layout;
    }

    let selected_style = styles.style(STYLE_RESULT_ROW_SELECTED);
    let hint_style = styles.style(STYLE_KBD_DESC);
    for (i, entry) in state
        .visible()
        .skip(scroll_offset)
        .take(visible_count)
        .enumerate()
    {
        let row_area = Rect::new(inner.x, list_y + i as u16, inner.width, 1);
        let is_selected = state.highlighted() == Some(scroll_offset + i);
        let prefix = if is_selected { "\u{203a} " } else { "  " };
        let hint_w = UnicodeWidthStr::width(entry.hint.as_str());
        let label_w = UnicodeWidthStr::width(entry.label.as_str());
        let pad = (inner.width as usize).saturating_sub(2 + label_w + hint_w + 1);
        let row_style = if is_selected { selected_style } else { text_style };
        Paragraph::new(Line::from_spans(vec![
            Span::styled(
                format!("{prefix}{}{} ", entry.label, " ".repeat(pad)),
                row_style,
            ),
            Span::styled(entry.hint.clone(), if is_selected { row_style } else { hint_style }),
        ]))
        .style(row_style)
        .render(row_area, frame);
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(state: &PaletteState) -> Vec<&str> {
        state.visible().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn opening_shows_full_catalog_highlighting_first() {
        let mut state = PaletteState::default();
        state.set_query("zzz");
        state.open();
        assert!(state.is_open());
        assert_eq!(state.query(), "");
        assert_eq!(state.visible_len(), 8);
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn query_matches_labels_case_insensitively() {
        let mut state = PaletteState::default();
        state.open();
        state.set_query("PRO");
        assert_eq!(labels(&state), ["Go to Projects"]);
        state.set_query("go to");
        assert_eq!(state.visible_len(), 6);
    }

    #[test]
    fn hints_are_not_searched() {
        let mut state = PaletteState::default();
        state.set_query("ctrl");
        assert_eq!(state.visible_len(), 0);
    }

    #[test]
    fn query_is_not_trimmed() {
        let mut state = PaletteState::default();
        state.set_query(" ");
        // Every label contains a space.
        assert_eq!(state.visible_len(), 8);
        state.set_query("  ");
        assert_eq!(state.visible_len(), 0);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut state = PaletteState::default();
        state.open();
        state.move_highlight(-1);
        assert_eq!(state.highlighted(), Some(7));
        state.move_highlight(1);
        assert_eq!(state.highlighted(), Some(0));
        state.move_highlight(10);
        assert_eq!(state.highlighted(), Some(2));
    }

    #[test]
    fn move_on_empty_list_is_noop() {
        let mut state = PaletteState::default();
        state.set_query("xyz");
        state.move_highlight(1);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn activate_returns_action_and_closes() {
        let mut state = PaletteState::default();
        state.open();
        state.set_query("term");
        assert_eq!(state.activate(), Some(ActionTag::Cli));
        assert!(!state.is_open());
    }

    #[test]
    fn activate_without_highlight_keeps_open() {
        let mut state = PaletteState::default();
        state.open();
        state.set_query("nothing matches");
        assert_eq!(state.activate(), None);
        assert!(state.is_open());
    }

    #[test]
    fn activate_at_uses_visible_positions() {
        let mut state = PaletteState::default();
        state.open();
        state.set_query("go to");
        assert_eq!(state.activate_at(3), Some(ActionTag::Experience));
        state.open();
        assert_eq!(state.activate_at(42), None);
        assert!(state.is_open());
    }

    #[test]
    fn toggle_round_trips() {
        let mut state = PaletteState::default();
        assert!(state.toggle());
        assert!(!state.toggle());
    }

    #[test]
    fn section_actions_map_to_sections() {
        let with_section = default_entries()
            .iter()
            .filter(|e| e.action.section().is_some())
            .count();
        assert_eq!(with_section, 6);
        assert_eq!(ActionTag::Github.section(), None);
    }

    #[test]
    fn palette_area_fits_screen() {
        let area = palette_area(Rect::new(0, 0, 100, 30), 8);
        assert_eq!(area.width, 60);
        assert_eq!(area.height, 12);
        assert_eq!(area.x, 20);
        let tiny = palette_area(Rect::new(0, 0, 10, 5), 8);
        assert!(tiny.width <= 10);
        assert!(tiny.height <= 5);
    }

    #[test]
    fn layout_maps_rows_with_scroll_offset() {
        let layout = PaletteLayout {
            area: Rect::new(10, 2, 40, 8),
            list: Rect::new(11, 5, 38, 4),
            scroll_offset: 2,
        };
        assert_eq!(layout.row_at(11, 5), Some(2));
        assert_eq!(layout.row_at(30, 8), Some(5));
        assert_eq!(layout.row_at(30, 9), None);
        assert_eq!(layout.row_at(10, 5), None);
    }

    proptest! {
        #[test]
        fn filter_shows_exactly_the_matching_entries(
            query in prop_oneof!["[a-zA-Z ]{0,6}", "[a-z]{1,2}", "[A-Z][a-z]{0,3}"]
        ) {
            let mut state = PaletteState::default();
            state.set_query(query.clone());
            let q = query.to_lowercase();
            for (i, e) in state.entries.iter().enumerate() {
                let matches = e.label.to_lowercase().contains(&q);
                prop_assert_eq!(state.visible.contains(&i), matches, "entry {}", e.id);
            }
            prop_assert!(state.visible.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(state.highlighted().is_some(), state.visible_len() > 0);

            let first = state.visible.clone();
            state.set_query(query.clone());
            prop_assert_eq!(&state.visible, &first);
        }

        #[test]
        fn highlight_stays_in_bounds(moves in proptest::collection::vec(-9isize..9, 0..20)) {
            let mut state = PaletteState::default();
            state.open();
            for m in moves {
                state.move_highlight(m);
                let h = state.highlighted().unwrap_or(0);
                prop_assert!(h < state.visible_len());
            }
        }
    }
}
