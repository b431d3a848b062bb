//! Header row listing page sections, with the current one highlighted.

use ftui::core::geometry::Rect;
use ftui::widgets::Widget;
use ftui::widgets::paragraph::Paragraph;
use ftui::Frame;

use crate::page::SectionId;
use crate::ui::style_system::{STYLE_PAGE_HEADING, STYLE_TAB_ACTIVE, STYLE_TAB_INACTIVE, StyleContext};

const BRAND: &str = " ~/folio ";

/// Lay the tabs out left to right after the brand. Tabs that do not fit are
/// dropped.
pub fn tab_rects(area: Rect, sections: &[SectionId]) -> Vec<(SectionId, Rect)> {
    let mut x = area.x + BRAND.len() as u16;
    let end = area.x + area.width;
    let mut out = Vec::with_capacity(sections.len());
    for &id in sections {
        let w = id.as_str().len() as u16 + 2;
        if x + w > end {
            break;
        }
        out.push((id, Rect::new(x, area.y, w, 1)));
        x += w + 1;
    }
    out
}

/// Render the navbar and return the tab rectangles for click handling.
pub fn draw_navbar(
    f: &mut Frame,
    area: Rect,
    sections: &[SectionId],
    current: Option<SectionId>,
    styles: &StyleContext,
) -> Vec<(SectionId, Rect)> {
    if area.is_empty() {
        return Vec::new();
    }
    Paragraph::new(BRAND)
        .style(styles.style(STYLE_PAGE_HEADING))
        .render(area, f);
    let tabs = tab_rects(area, sections);
    for (id, rect) in &tabs {
        let style = if Some(*id) == current {
            styles.style(STYLE_TAB_ACTIVE)
        } else {
            styles.style(STYLE_TAB_INACTIVE)
        };
        Paragraph::new(format!(" {id} ").as_str())
            .style(style)
            .render(*rect, f);
    }
    tabs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_follow_brand_with_gaps() {
        let tabs = tab_rects(Rect::new(0, 0, 120, 1), &SectionId::ALL);
        assert_eq!(tabs.len(), 6);
        assert_eq!(tabs[0].1.x, BRAND.len() as u16);
        assert_eq!(tabs[0].1.width, "home".len() as u16 + 2);
        assert_eq!(tabs[1].1.x, tabs[0].1.x + tabs[0].1.width + 1);
    }

    #[test]
    fn narrow_bar_drops_overflowing_tabs() {
        let tabs = tab_rects(Rect::new(0, 0, 30, 1), &SectionId::ALL);
        assert!(tabs.len() < 6);
        assert!(tabs.iter().all(|(_, r)| r.x + r.width <= 30));
    }
}
