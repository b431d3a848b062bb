//! The scrollable portfolio page the palette and CLI navigate.
//!
//! Sections are laid out once as plain rows; the view owns a spring-driven
//! scroll position and the observers behind reveals, bars and counters. The TUI renders
//! it, the headless `exec` path only uses it as a [`SectionNavigator`].

use std::collections::HashSet;
use std::ops::Range;
use std::time::Duration;

use crate::effects::reveal::{REVEAL_THRESHOLD, VisibilityObserver};
use crate::profile::{Profile, SkillBar, Stat};
use crate::ui::ftui_adapter::{Animation, Spring};

/// Navigable page sections, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Home,
    About,
    Skills,
    Experience,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// Case-insensitive lookup by element id.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(id))
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can bring a section into view.
pub trait SectionNavigator {
    /// Scroll `id` into view. Returns `false` when no such section exists.
    fn scroll_into_view(&mut self, id: &str) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Title,
    Accent,
    Text,
    Muted,
    /// Placeholder row filled with the typing banner at render time.
    Typed,
    /// Stats summary; numbers count up once the row is seen.
    Stats,
    /// Skill bar `n`; `text` holds the padded name, cells are drawn live.
    Bar(usize),
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLine {
    pub text: String,
    pub style: LineStyle,
}

impl PageLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }
}

#[derive(Clone, Debug)]
pub struct PageSection {
    pub id: SectionId,
    pub start: usize,
    pub lines: Vec<PageLine>,
}

impl PageSection {
    pub fn rows(&self) -> Range<usize> {
        self.start..self.start + self.lines.len()
    }
}

/// Longest spring step; larger frame deltas are integrated in slices.
const SPRING_SLICE: Duration = Duration::from_millis(16);
/// Rows from the target at which a smooth scroll snaps and ends.
const SNAP_DISTANCE: f64 = 0.5;
/// Fraction of a skill bar row that must be visible before it fills.
pub const BAR_THRESHOLD: f32 = 0.3;
/// Fraction of the stats row that must be visible before it counts up.
pub const STATS_THRESHOLD: f32 = 0.5;
/// Ticks a counter takes to reach its target.
const COUNT_TICKS: u64 = 30;
/// Percentage points a bar fills per tick.
const BAR_STEP: u8 = 5;
/// Cells in a drawn skill bar.
const BAR_CELLS: usize = 20;

fn scroll_spring(from: usize, to: usize) -> Spring {
    Spring::new(from as f64, to as f64)
        .with_stiffness(300.0)
        .with_damping(26.0)
}

/// Element inside a section that animates once it scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gauge {
    /// Skill bar, by index into the profile's bars.
    Bar(usize),
    /// The about section's stats row.
    Stats,
}

#[derive(Debug)]
pub struct PageView {
    sections: Vec<PageSection>,
    total_rows: usize,
    /// Rendered top row: the spring position rounded and clamped.
    scroll: usize,
    target: Option<usize>,
    spring: Spring,
    viewport: usize,
    observer: VisibilityObserver<SectionId>,
    revealed: HashSet<SectionId>,
    gauges: Vec<VisibilityObserver<Gauge>>,
    stats: Vec<Stat>,
    counts: Vec<u64>,
    bars: Vec<SkillBar>,
    fills: Vec<u8>,
}

impl PageView {
    /// Lay out every section except those in `hidden`.
    pub fn new(profile: &Profile, hidden: &[SectionId]) -> Self {
        let mut sections = Vec::new();
        let mut start = 0;
        for id in SectionId::ALL {
            if hidden.contains(&id) {
                continue;
            }
            let lines = section_lines(id, profile);
            let len = lines.len();
            sections.push(PageSection { id, start, lines });
            start += len;
        }
        let mut observer = VisibilityObserver::new(REVEAL_THRESHOLD);
        let mut bar_observer = VisibilityObserver::new(BAR_THRESHOLD);
        let mut stats_observer = VisibilityObserver::new(STATS_THRESHOLD);
        for section in &sections {
            observer.observe(section.id, section.rows());
            for (offset, line) in section.lines.iter().enumerate() {
                let row = section.start + offset;
                match line.style {
                    LineStyle::Bar(i) => bar_observer.observe(Gauge::Bar(i), row..row + 1),
                    LineStyle::Stats => stats_observer.observe(Gauge::Stats, row..row + 1),
                    _ => {}
                }
            }
        }
        Self {
            sections,
            total_rows: start,
            scroll: 0,
            target: None,
            spring: scroll_spring(0, 0),
            viewport: 24,
            observer,
            revealed: HashSet::new(),
            gauges: vec![bar_observer, stats_observer],
            stats: profile.stats.clone(),
            counts: vec![0; profile.stats.len()],
            bars: profile.bars.clone(),
            fills: vec![0; profile.bars.len()],
        }
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Row a smooth scroll is heading to, while one is in flight.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.viewport)
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
        let max = self.max_scroll();
        match self.target {
            Some(target) if self.scroll <= max => {
                self.target = Some(target.min(max));
                self.spring.set_target(target.min(max) as f64);
            }
            _ if self.scroll > max => self.jump(max),
            _ => {}
        }
    }

    fn jump(&mut self, row: usize) {
        self.scroll = row;
        self.target = None;
        self.spring = scroll_spring(row, row);
    }

    /// Jump immediately, cancelling any smooth scroll in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll as isize + delta;
        self.jump(next.clamp(0, self.max_scroll() as isize) as usize);
    }

    pub fn scroll_to_top(&mut self) {
        self.jump(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.jump(self.max_scroll());
    }

    /// Advance the smooth scroll by `dt`. Returns `true` while still moving.
    pub fn tick_scroll(&mut self, dt: Duration) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let settled = |spring: &Spring| (spring.position() - target as f64).abs() < SNAP_DISTANCE;
        let mut left = dt;
        while !left.is_zero() && !settled(&self.spring) {
            let slice = left.min(SPRING_SLICE);
            self.spring.tick(slice);
            left -= slice;
        }
        if settled(&self.spring) {
            self.jump(target);
            return false;
        }
        let max = self.max_scroll() as f64;
        self.scroll = self.spring.position().round().clamp(0.0, max) as usize;
        true
    }

    pub fn visible_rows(&self) -> Range<usize> {
        self.scroll..(self.scroll + self.viewport).min(self.total_rows)
    }

    /// Section at the top of the viewport; the last section once scrolled to
    /// the bottom so short trailing sections can still become current.
    pub fn current_section(&self) -> Option<SectionId> {
        if self.scroll > 0 && self.scroll >= self.max_scroll() {
            return self.sections.last().map(|s| s.id);
        }
        self.sections
            .iter()
            .take_while(|s| s.start <= self.scroll)
            .last()
            .map(|s| s.id)
    }

    /// Sections that just crossed the reveal threshold.
    pub fn poll_reveals(&mut self) -> Vec<SectionId> {
        let viewport = self.visible_rows();
        self.observer.poll(viewport)
    }

    pub fn reveal(&mut self, id: SectionId) {
        self.revealed.insert(id);
    }

    pub fn is_revealed(&self, id: SectionId) -> bool {
        self.revealed.contains(&id)
    }

    /// Bars and stats rows that just scrolled far enough into view.
    pub fn poll_gauges(&mut self) -> Vec<Gauge> {
        let viewport = self.visible_rows();
        self.gauges
            .iter_mut()
            .flat_map(|observer| observer.poll(viewport.clone()))
            .collect()
    }

    /// Indices of stats whose value starts with a number.
    pub fn counted_stats(&self) -> Vec<usize> {
        (0..self.stats.len())
            .filter(|&i| self.stats[i].count_target().is_some())
            .collect()
    }

    /// One count-up tick for stat `index`. Returns `true` while below target.
    pub fn step_counter(&mut self, index: usize) -> bool {
        let Some((target, _)) = self.stats.get(index).and_then(Stat::count_target) else {
            return false;
        };
        let step = target.div_ceil(COUNT_TICKS).max(1);
        let current = &mut self.counts[index];
        *current = (*current + step).min(target);
        *current < target
    }

    /// One fill tick for bar `index`. Returns `true` while below its level.
    pub fn step_bar(&mut self, index: usize) -> bool {
        let Some(level) = self.bars.get(index).map(|b| b.pct.min(100)) else {
            return false;
        };
        let fill = &mut self.fills[index];
        *fill = fill.saturating_add(BAR_STEP).min(level);
        *fill < level
    }

    pub fn bar_fill(&self, index: usize) -> u8 {
        self.fills.get(index).copied().unwrap_or(0)
    }

    /// Text to draw for `line`, with counters and bars at their current value.
    pub fn line_text(&self, line: &PageLine) -> String {
        match line.style {
            LineStyle::Stats => self
                .stats
                .iter()
                .zip(&self.counts)
                .map(|(stat, count)| match stat.count_target() {
                    Some((_, suffix)) => format!("{count}{suffix} {}", stat.label),
                    None => format!("{} {}", stat.value, stat.label),
                })
                .collect::<Vec<_>>()
                .join(" · "),
            LineStyle::Bar(i) => match self.bars.get(i) {
                Some(_) => format!("{}{}", line.text, bar_cells(self.bar_fill(i))),
                None => line.text.clone(),
            },
            _ => line.text.clone(),
        }
    }

    /// Row at `index` along with its owning section.
    pub fn row(&self, index: usize) -> Option<(SectionId, &PageLine)> {
        let section = self
            .sections
            .iter()
            .find(|s| s.rows().contains(&index))?;
        Some((section.id, &section.lines[index - section.start]))
    }
}

impl SectionNavigator for PageView {
    fn scroll_into_view(&mut self, id: &str) -> bool {
        let Some(section_id) = SectionId::parse(id) else {
            return false;
        };
        let Some(start) = self.section(section_id).map(|s| s.start) else {
            return false;
        };
        let target = start.min(self.max_scroll());
        tracing::debug!(section = %section_id, target, "scrolling section into view");
        if self.target.is_some() || target != self.scroll {
            self.target = Some(target);
            self.spring.set_target(target as f64);
        }
        true
    }
}

fn bar_cells(fill: u8) -> String {
    let filled = usize::from(fill.min(100)) * BAR_CELLS / 100;
    format!(
        "[{}{}] {fill:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_CELLS - filled)
    )
}

fn heading(title: &str) -> PageLine {
    PageLine::new(LineStyle::Heading, format!("## {title}"))
}

fn section_lines(id: SectionId, profile: &Profile) -> Vec<PageLine> {
    let mut lines = Vec::new();
    match id {
        SectionId::Home => {
            lines.push(PageLine::blank());
            lines.push(PageLine::new(LineStyle::Title, profile.owner.name.clone()));
            lines.push(PageLine::new(LineStyle::Accent, profile.owner.role.clone()));
            lines.push(PageLine::blank());
            lines.push(PageLine::new(LineStyle::Text, profile.owner.tagline.clone()));
            lines.push(PageLine::blank());
            lines.push(PageLine::new(LineStyle::Typed, ""));
        }
        SectionId::About => {
            lines.push(heading("about"));
            lines.push(PageLine::new(LineStyle::Text, profile.owner.summary.clone()));
            lines.push(PageLine::blank());
            lines.push(PageLine::new(LineStyle::Stats, profile.stats_line()));
        }
        SectionId::Skills => {
            lines.push(heading("skills"));
            let width = profile
                .skills
                .iter()
                .map(|g| g.group.chars().count())
                .max()
                .unwrap_or(0);
            for group in &profile.skills {
                lines.push(PageLine::new(
                    LineStyle::Text,
                    format!("{:<width$}  {}", group.group, group.items.join(" · ")),
                ));
            }
            if !profile.bars.is_empty() {
                lines.push(PageLine::blank());
                let width = profile
                    .bars
                    .iter()
                    .map(|b| b.name.chars().count())
                    .max()
                    .unwrap_or(0);
                for (i, bar) in profile.bars.iter().enumerate() {
                    lines.push(PageLine::new(
                        LineStyle::Bar(i),
                        format!("{:<width$}  ", bar.name),
                    ));
                }
            }
        }
        SectionId::Experience => {
            lines.push(heading("experience"));
            for entry in &profile.experience {
                let org = if entry.org.is_empty() {
                    String::new()
                } else {
                    format!(" @ {}", entry.org)
                };
                lines.push(PageLine::new(
                    LineStyle::Accent,
                    format!("{}  {}{org}", entry.period, entry.role),
                ));
                if !entry.summary.is_empty() {
                    lines.push(PageLine::new(
                        LineStyle::Muted,
                        format!("    {}", entry.summary),
                    ));
                }
            }
        }
        SectionId::Projects => {
            lines.push(heading("projects"));
            for project in &profile.projects {
                lines.push(PageLine::new(LineStyle::Accent, project.name.clone()));
                lines.push(PageLine::new(
                    LineStyle::Muted,
                    format!("    {}", project.stack.join(" · ")),
                ));
            }
        }
        SectionId::Contact => {
            let links = &profile.links;
            lines.push(heading("contact"));
            lines.push(PageLine::new(LineStyle::Text, format!("email     {}", links.email)));
            lines.push(PageLine::new(
                LineStyle::Text,
                format!("github    {}", crate::profile::Links::display(&links.github)),
            ));
            lines.push(PageLine::new(
                LineStyle::Text,
                format!("linkedin  {}", crate::profile::Links::display(&links.linkedin)),
            ));
            lines.push(PageLine::new(
                LineStyle::Text,
                format!("instagram {}", crate::profile::Links::display(&links.instagram)),
            ));
        }
    }
    lines.push(PageLine::blank());
    lines
}
