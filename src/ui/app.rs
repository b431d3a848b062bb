//! FrankenTUI application model for folio.
//!
//! [`FolioApp`] owns every piece of interactive state (page, palette,
//! floating CLI, boot screen, typing banner) and drives timed effects from a
//! single virtual clock. Input routing is modal: the palette wins over the
//! CLI, the CLI wins over the page.

use std::cell::{Cell, RefCell};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ftui::text::{Line, Span, Text};
use ftui::widgets::block::{Alignment, Block};
use ftui::widgets::borders::{BorderType, Borders};
use ftui::widgets::paragraph::Paragraph;
use tracing::{debug, info, warn};

use super::components::cli_panel::{PanelLayout, draw_cli_panel};
use super::components::help_strip::{draw_help_strip, split_chrome};
use super::components::navbar::draw_navbar;
use super::components::page_view::draw_page;
use super::components::palette::{
    ActionTag, PaletteLayout, PaletteState, default_entries, draw_palette,
};
use super::ftui_adapter::{Cmd, Event, Frame, KeyCode, Modifiers, Rect, Widget};
use super::style_system::{
    STYLE_APP_ROOT, STYLE_BOOT_OK, STYLE_BOOT_WARN, STYLE_PAGE_HEADING, STYLE_TEXT_MUTED,
    StyleContext, StyleOptions,
};
use crate::config::FolioConfig;
use crate::console::FloatingCli;
use crate::console::commands::CommandContext;
use crate::effects::boot::{BootLevel, BootScreen, BootStep};
use crate::effects::scheduler::Scheduler;
use crate::effects::typing::TypingBanner;
use crate::ftui_harness::buffer_to_text;
use crate::page::{Gauge, PageView, SectionId, SectionNavigator};
use crate::profile::Profile;

/// Interval between animation ticks.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(30);
/// Delay between consecutive sections revealed by the same scroll.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(60);
/// Interval between count-up ticks of the about stats.
pub const COUNT_INTERVAL: Duration = Duration::from_millis(40);
/// Interval between fill ticks of a skill bar.
pub const BAR_INTERVAL: Duration = Duration::from_millis(30);
/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

/// Who scheduled an effect. Cancelling an owner drops all of its pending work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectOwner {
    BootScreen,
    HeroBanner,
    Section(SectionId),
    SkillBar(usize),
    Stats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Boot(BootStep),
    Type,
    Reveal(SectionId),
    FillBar(usize),
    Count(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    LeftClick,
    LeftDrag,
    LeftRelease,
    ScrollUp,
    ScrollDown,
}

/// Region identified by mouse hit-testing against last-rendered layout rects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MouseHitRegion {
    CliClose,
    CliFullscreen,
    CliTitle,
    CliBody,
    CliToggle,
    Tab(SectionId),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolioMsg {
    /// Ctrl+C, honored in every mode.
    ForceQuit,
    /// Ctrl+K.
    PaletteToggled,
    /// Ctrl+T.
    CliToggled,
    /// F11.
    CliFullscreenToggled,
    Escape,
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Char(char),
    Backspace,
    MouseEvent {
        kind: MouseEventKind,
        x: u16,
        y: u16,
    },
    Resized {
        width: u16,
        height: u16,
    },
    Tick,
    Noop,
}

impl FolioMsg {
    /// Messages that count as user input (and therefore skip the boot screen).
    fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::Tick
                | Self::Noop
                | Self::Resized { .. }
                | Self::MouseEvent {
                    kind: MouseEventKind::LeftDrag
                        | MouseEventKind::LeftRelease
                        | MouseEventKind::ScrollUp
                        | MouseEventKind::ScrollDown,
                    ..
                }
        )
    }
}

impl From<Event> for FolioMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => {
                let ctrl = key.modifiers.contains(Modifiers::CTRL);
                match key.code {
                    KeyCode::Char('c' | 'C') if ctrl => FolioMsg::ForceQuit,
                    KeyCode::Char('k' | 'K') if ctrl => FolioMsg::PaletteToggled,
                    KeyCode::Char('t' | 'T') if ctrl => FolioMsg::CliToggled,
                    KeyCode::Char(_) if ctrl => FolioMsg::Noop,
                    KeyCode::F(11) => FolioMsg::CliFullscreenToggled,
                    KeyCode::Escape => FolioMsg::Escape,
                    KeyCode::Enter => FolioMsg::Enter,
                    KeyCode::Up => FolioMsg::Up,
                    KeyCode::Down => FolioMsg::Down,
                    KeyCode::PageUp => FolioMsg::PageUp,
                    KeyCode::PageDown => FolioMsg::PageDown,
                    KeyCode::Home => FolioMsg::Home,
                    KeyCode::End => FolioMsg::End,
                    KeyCode::Backspace => FolioMsg::Backspace,
                    KeyCode::Char(c) => FolioMsg::Char(c),
                    _ => FolioMsg::Noop,
                }
            }

            Event::Mouse(mouse) => {
                use ftui::core::event::MouseButton;
                use ftui::core::event::MouseEventKind as Mek;
                let kind = match mouse.kind {
                    Mek::Down(MouseButton::Left) => MouseEventKind::LeftClick,
                    Mek::Drag(MouseButton::Left) => MouseEventKind::LeftDrag,
                    Mek::Up(MouseButton::Left) => MouseEventKind::LeftRelease,
                    Mek::ScrollUp => MouseEventKind::ScrollUp,
                    Mek::ScrollDown => MouseEventKind::ScrollDown,
                    _ => return FolioMsg::Noop,
                };
                FolioMsg::MouseEvent {
                    kind,
                    x: mouse.x,
                    y: mouse.y,
                }
            }

            Event::Resize { width, height } => FolioMsg::Resized { width, height },
            Event::Tick => FolioMsg::Tick,
            _ => FolioMsg::Noop,
        }
    }
}

pub struct FolioApp {
    profile: Profile,
    styles: StyleContext,
    page: PageView,
    palette: PaletteState,
    cli: FloatingCli,
    boot: BootScreen,
    banner: TypingBanner,
    scheduler: Scheduler<EffectOwner, Effect>,
    /// Virtual time at which the page became interactive.
    interactive_at: Option<Duration>,
    /// Transient message in the bottom strip; cleared by the next key.
    status: Option<String>,
    /// Spawn the system browser for link actions. Off for headless use.
    open_links: bool,
    last_tick: Instant,
    /// Terminal size seen by the last resize or render.
    frame_size: Cell<(u16, u16)>,
    last_palette: RefCell<Option<PaletteLayout>>,
    last_cli: RefCell<Option<PanelLayout>>,
    last_toggle: RefCell<Option<Rect>>,
    last_tabs: RefCell<Vec<(SectionId, Rect)>>,
}

impl FolioApp {
    pub fn new(config: &FolioConfig, styles: StyleContext) -> Self {
        let profile = config.profile.clone();
        let page = PageView::new(&profile, &config.ui.hidden());
        let mut scheduler = Scheduler::new();

        let (boot, interactive_at) = if config.ui.boot {
            for (delay, step) in BootScreen::plan() {
                scheduler.schedule(EffectOwner::BootScreen, delay, Effect::Boot(step));
            }
            (BootScreen::new(), None)
        } else {
            (BootScreen::skipped(), Some(Duration::ZERO))
        };
        if page.section(SectionId::Home).is_some() {
            scheduler.schedule(EffectOwner::HeroBanner, Duration::ZERO, Effect::Type);
        }

        Self {
            profile,
            styles,
            page,
            palette: PaletteState::new(default_entries()),
            cli: FloatingCli::new(),
            boot,
            banner: TypingBanner::new(config.ui.phrases.clone()),
            scheduler,
            interactive_at,
            status: None,
            open_links: false,
            last_tick: Instant::now(),
            frame_size: Cell::new((0, 0)),
            last_palette: RefCell::new(None),
            last_cli: RefCell::new(None),
            last_toggle: RefCell::new(None),
            last_tabs: RefCell::new(Vec::new()),
        }
    }

    pub fn with_link_opening(mut self, enabled: bool) -> Self {
        self.open_links = enabled;
        self
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn palette(&self) -> &PaletteState {
        &self.palette
    }

    pub fn cli(&self) -> &FloatingCli {
        &self.cli
    }

    pub fn boot(&self) -> &BootScreen {
        &self.boot
    }

    pub fn banner(&self) -> &TypingBanner {
        &self.banner
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive_at.is_some()
    }

    /// Time since the page became interactive, on the effect clock.
    pub fn uptime(&self) -> Duration {
        let now = self.scheduler.now();
        self.interactive_at
            .map_or(Duration::ZERO, |start| now.saturating_sub(start))
    }

    /// Hide the boot screen now and drop its remaining steps.
    pub fn skip_boot(&mut self) {
        if !self.boot.is_visible() {
            return;
        }
        self.boot.dismiss();
        let cancelled = self.scheduler.cancel_owner(&EffectOwner::BootScreen);
        self.mark_interactive();
        debug!(cancelled, "boot screen skipped");
    }

    fn mark_interactive(&mut self) {
        if self.interactive_at.is_none() {
            self.interactive_at = Some(self.scheduler.now());
            info!("page interactive");
        }
    }

    /// Move the effect clock forward by `dt` and run whatever came due.
    pub fn advance(&mut self, dt: Duration) {
        self.sync_viewport();
        let end = self.scheduler.now() + dt;
        // Effects reschedule themselves; keep firing until the clock reaches `end`.
        while let Some(due) = self.scheduler.next_due().filter(|due| *due <= end) {
            for effect in self.scheduler.advance_to(due) {
                self.apply_effect(effect);
            }
        }
        self.scheduler.advance_to(end);
        self.page.tick_scroll(dt);
        if !self.boot.is_visible() {
            self.schedule_reveals();
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Boot(step) => {
                self.boot.apply(step);
                if step == BootStep::Finish {
                    self.mark_interactive();
                }
            }
            Effect::Type => {
                let delay = self.banner.step();
                self.scheduler
                    .schedule(EffectOwner::HeroBanner, delay, Effect::Type);
            }
            Effect::Reveal(id) => self.page.reveal(id),
            Effect::FillBar(i) => {
                if self.page.step_bar(i) {
                    self.scheduler
                        .schedule(EffectOwner::SkillBar(i), BAR_INTERVAL, Effect::FillBar(i));
                }
            }
            Effect::Count(i) => {
                if self.page.step_counter(i) {
                    self.scheduler
                        .schedule(EffectOwner::Stats, COUNT_INTERVAL, Effect::Count(i));
                }
            }
        }
    }

    fn schedule_reveals(&mut self) {
        for (i, id) in self.page.poll_reveals().into_iter().enumerate() {
            let delay = REVEAL_STAGGER * i as u32;
            self.scheduler
                .schedule(EffectOwner::Section(id), delay, Effect::Reveal(id));
        }
        for gauge in self.page.poll_gauges() {
            match gauge {
                Gauge::Bar(i) => {
                    self.scheduler
                        .schedule(EffectOwner::SkillBar(i), BAR_INTERVAL, Effect::FillBar(i));
                }
                Gauge::Stats => {
                    for i in self.page.counted_stats() {
                        self.scheduler
                            .schedule(EffectOwner::Stats, COUNT_INTERVAL, Effect::Count(i));
                    }
                }
            }
        }
    }

    fn sync_viewport(&mut self) {
        let (_, height) = self.frame_size.get();
        if height == 0 {
            return;
        }
        // Header and strip take one row each once there is room for them.
        let rows = if height >= 3 { height - 2 } else { height };
        self.page.set_viewport(rows as usize);
    }

    fn navigate(&mut self, id: &str) {
        if !self.page.scroll_into_view(id) {
            warn!(section = id, "navigation target not on page");
            self.status = Some(format!("Section not found: #{id}"));
        }
    }

    fn dispatch_action(&mut self, action: ActionTag) {
        debug!(?action, "palette action");
        match action {
            ActionTag::Github => {
                let url = self.profile.links.github.clone();
                self.open_link(&url);
            }
            ActionTag::Cli => self.cli.open(),
            section => {
                if let Some(id) = section.section() {
                    self.navigate(id.as_str());
                }
            }
        }
    }

    fn open_link(&mut self, url: &str) {
        if !self.open_links {
            self.status = Some(format!("Open {url}"));
            return;
        }
        match open_in_browser(url) {
            Ok(()) => self.status = Some(format!("Opening {url}")),
            Err(err) => {
                warn!(%url, error = %err, "could not launch browser");
                self.status = Some(format!("Could not open {url}: {err}"));
            }
        }
    }

    fn submit_cli(&mut self) {
        let ctx = CommandContext::new(&self.profile, self.uptime());
        self.cli.submit(&ctx, &mut self.page);
    }

    fn handle_palette_key(&mut self, msg: FolioMsg) {
        match msg {
            FolioMsg::Escape => self.palette.close(),
            FolioMsg::Enter => {
                if let Some(action) = self.palette.activate() {
                    self.dispatch_action(action);
                }
            }
            FolioMsg::Up => self.palette.move_highlight(-1),
            FolioMsg::Down => self.palette.move_highlight(1),
            FolioMsg::Char(c) => self.palette.push_char(c),
            FolioMsg::Backspace => self.palette.pop_char(),
            _ => {}
        }
    }

    fn handle_cli_key(&mut self, msg: FolioMsg) {
        let page_rows = self
            .last_cli
            .borrow()
            .map_or(8, |l| l.area.height.saturating_sub(2).max(1)) as isize;
        match msg {
            FolioMsg::Escape => self.cli.close(),
            FolioMsg::Enter => self.submit_cli(),
            FolioMsg::Up => self.cli.recall_previous(),
            FolioMsg::Down => self.cli.recall_next(),
            FolioMsg::Char(c) => self.cli.push_char(c),
            FolioMsg::Backspace => self.cli.pop_char(),
            FolioMsg::PageUp => self.cli.scroll_output(page_rows),
            FolioMsg::PageDown => self.cli.scroll_output(-page_rows),
            _ => {}
        }
    }

    fn handle_page_key(&mut self, msg: FolioMsg) -> Cmd<FolioMsg> {
        let page_rows = self.page.viewport().saturating_sub(1).max(1) as isize;
        match msg {
            FolioMsg::Escape | FolioMsg::Char('q') => return Cmd::quit(),
            FolioMsg::Up | FolioMsg::Char('k') => self.page.scroll_by(-1),
            FolioMsg::Down | FolioMsg::Char('j') => self.page.scroll_by(1),
            FolioMsg::PageUp => self.page.scroll_by(-page_rows),
            FolioMsg::PageDown | FolioMsg::Char(' ') => self.page.scroll_by(page_rows),
            FolioMsg::Home | FolioMsg::Char('g') => self.page.scroll_to_top(),
            FolioMsg::End | FolioMsg::Char('G') => self.page.scroll_to_bottom(),
            FolioMsg::Char(c @ '1'..='6') => {
                let id = SectionId::ALL[(c as u8 - b'1') as usize];
                self.navigate(id.as_str());
            }
            _ => {}
        }
        Cmd::none()
    }

    fn hit_test(&self, x: u16, y: u16) -> MouseHitRegion {
        if let Some(layout) = *self.last_cli.borrow() {
            if layout.close_button.contains(x, y) {
                return MouseHitRegion::CliClose;
            }
            if layout.fullscreen_button.contains(x, y) {
                return MouseHitRegion::CliFullscreen;
            }
            if layout.title.contains(x, y) {
                return MouseHitRegion::CliTitle;
            }
            if layout.area.contains(x, y) {
                return MouseHitRegion::CliBody;
            }
        }
        if self.last_toggle.borrow().is_some_and(|r| r.contains(x, y)) {
            return MouseHitRegion::CliToggle;
        }
        self.last_tabs
            .borrow()
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map_or(MouseHitRegion::None, |(id, _)| MouseHitRegion::Tab(*id))
    }

    fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        if kind == MouseEventKind::LeftClick && self.palette.is_open() {
            let layout = *self.last_palette.borrow();
            if let Some(layout) = layout {
                if let Some(pos) = layout.row_at(x, y) {
                    if let Some(action) = self.palette.activate_at(pos) {
                        self.dispatch_action(action);
                    }
                } else if !layout.area.contains(x, y) {
                    self.palette.close();
                }
            }
            return;
        }

        let region = self.hit_test(x, y);
        match kind {
            MouseEventKind::LeftClick => match region {
                MouseHitRegion::CliClose => self.cli.close(),
                MouseHitRegion::CliFullscreen => {
                    self.cli.panel_mut().toggle_fullscreen();
                }
                MouseHitRegion::CliTitle => {
                    let drawn = self
                        .last_cli
                        .borrow()
                        .map_or(self.cli.panel().offset(), |l| l.drawn_offset);
                    self.cli
                        .panel_mut()
                        .begin_drag_at(i32::from(x), i32::from(y), drawn);
                }
                MouseHitRegion::CliToggle => {
                    self.cli.toggle();
                }
                MouseHitRegion::Tab(id) => self.navigate(id.as_str()),
                MouseHitRegion::CliBody | MouseHitRegion::None => {}
            },
            MouseEventKind::LeftDrag => {
                self.cli.panel_mut().drag_to(i32::from(x), i32::from(y));
            }
            MouseEventKind::LeftRelease => self.cli.panel_mut().end_drag(),
            MouseEventKind::ScrollUp => match region {
                MouseHitRegion::CliBody => self.cli.scroll_output(WHEEL_ROWS),
                _ => self.page.scroll_by(-WHEEL_ROWS),
            },
            MouseEventKind::ScrollDown => match region {
                MouseHitRegion::CliBody => self.cli.scroll_output(-WHEEL_ROWS),
                _ => self.page.scroll_by(WHEEL_ROWS),
            },
        }
    }

    fn clear_hit_areas(&self) {
        *self.last_palette.borrow_mut() = None;
        *self.last_cli.borrow_mut() = None;
        *self.last_toggle.borrow_mut() = None;
        self.last_tabs.borrow_mut().clear();
    }

    fn render_boot(&self, frame: &mut Frame, area: Rect) {
        let styles = &self.styles;
        let width = area.width.min(72);
        let height = area.height.min(16);
        let boot_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        let outer = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" boot ")
            .title_alignment(Alignment::Left)
            .style(styles.style(STYLE_PAGE_HEADING));
        let inner = outer.inner(boot_area);
        outer.render(boot_area, frame);
        if inner.is_empty() {
            return;
        }

        let mut lines: Vec<Line> = self
            .boot
            .lines()
            .iter()
            .map(|l| {
                let style = match l.level {
                    BootLevel::Warn => styles.style(STYLE_BOOT_WARN),
                    BootLevel::Ok => styles.style(STYLE_BOOT_OK),
                    BootLevel::Info => styles.style(STYLE_TEXT_MUTED),
                };
                Line::from_spans(vec![Span::styled(l.text, style)])
            })
            .collect();
        // Keep the newest lines when the log outgrows the box.
        let log_rows = inner.height.saturating_sub(1) as usize;
        if lines.len() > log_rows {
            lines.drain(..lines.len() - log_rows);
        }
        Paragraph::new(Text::from_lines(lines)).render(inner, frame);

        let pct = self.boot.progress_pct();
        let bar_width = inner.width.saturating_sub(8) as usize;
        let filled = bar_width * pct as usize / 100;
        let bar = format!(
            "[{}{}] {pct:>3}%",
            "#".repeat(filled),
            ".".repeat(bar_width - filled)
        );
        let bar_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        Paragraph::new(&*bar)
            .style(styles.style(STYLE_BOOT_OK))
            .render(bar_row, frame);
    }
}

impl super::ftui_adapter::Model for FolioApp {
    type Message = FolioMsg;

    fn init(&mut self) -> Cmd<FolioMsg> {
        self.last_tick = Instant::now();
        Cmd::tick(FRAME_INTERVAL)
    }

    fn update(&mut self, msg: FolioMsg) -> Cmd<FolioMsg> {
        match msg {
            FolioMsg::Tick => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_tick);
                self.last_tick = now;
                self.advance(dt);
                return Cmd::tick(FRAME_INTERVAL);
            }
            FolioMsg::Resized { width, height } => {
                self.frame_size.set((width, height));
                self.sync_viewport();
                return Cmd::none();
            }
            FolioMsg::ForceQuit => return Cmd::quit(),
            FolioMsg::Noop => return Cmd::none(),
            _ => {}
        }

        if self.boot.is_visible() && msg.is_input() {
            self.skip_boot();
            return Cmd::none();
        }
        if !matches!(msg, FolioMsg::MouseEvent { .. }) {
            self.status = None;
        }

        match msg {
            FolioMsg::PaletteToggled => {
                self.palette.toggle();
            }
            FolioMsg::CliToggled => {
                self.cli.toggle();
            }
            FolioMsg::CliFullscreenToggled => {
                self.cli.panel_mut().toggle_fullscreen();
            }
            FolioMsg::MouseEvent { kind, x, y } => self.handle_mouse(kind, x, y),
            other if self.palette.is_open() => self.handle_palette_key(other),
            other if self.cli.is_open() => self.handle_cli_key(other),
            other => return self.handle_page_key(other),
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());
        if area.is_empty() {
            return;
        }
        self.frame_size.set((area.width, area.height));
        let styles = &self.styles;
        Block::new()
            .style(styles.style(STYLE_APP_ROOT))
            .render(area, frame);

        if self.boot.is_visible() {
            self.clear_hit_areas();
            self.render_boot(frame, area);
            return;
        }

        let (header, content, strip) = split_chrome(area);
        let sections: Vec<SectionId> = self.page.sections().iter().map(|s| s.id).collect();
        *self.last_tabs.borrow_mut() = draw_navbar(
            frame,
            header,
            &sections,
            self.page.current_section(),
            styles,
        );
        draw_page(frame, content, &self.page, self.banner.text(), styles);
        *self.last_toggle.borrow_mut() = (!strip.is_empty()).then(|| {
            draw_help_strip(frame, strip, self.status.as_deref(), self.cli.is_open(), styles)
        });
        *self.last_cli.borrow_mut() = self
            .cli
            .is_open()
            .then(|| draw_cli_panel(frame, content, &self.cli, styles));
        *self.last_palette.borrow_mut() = self
            .palette
            .is_open()
            .then(|| draw_palette(frame, area, &self.palette, styles));
    }
}

/// Platform opener for `url`, detached from the terminal's stdio so it
/// cannot write over the UI.
fn browser_command(url: &str) -> Command {
    let (program, lead): (&str, &[&str]) = if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else if cfg!(target_os = "macos") {
        ("open", &[])
    } else {
        ("xdg-open", &[])
    };
    let mut cmd = Command::new(program);
    cmd.args(lead)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Spawn `cmd` and collect its exit status on a background thread, so a
/// finished opener never lingers as a zombie.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd.spawn()?;
    let program = cmd.get_program().to_string_lossy().into_owned();
    thread::Builder::new()
        .name("opener-wait".into())
        .spawn(move || {
            let status = child.wait();
            match &status {
                Ok(code) if !code.success() => {
                    debug!(%program, status = %code, "opener exited unsuccessfully");
                }
                Err(err) => warn!(%program, error = %err, "could not wait for opener"),
                Ok(_) => {}
            }
            status
        })
}

/// Launch the system browser for `url`.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    spawn_reaped(browser_command(url)).map(drop)
}

/// Run the fullscreen TUI until the user quits.
pub fn run_tui(config: &FolioConfig) -> anyhow::Result<()> {
    let model = FolioApp::new(config, StyleContext::from_env()).with_link_opening(true);
    info!(boot = config.ui.boot, "starting tui");
    ftui::App::fullscreen(model)
        .with_mouse()
        .run()
        .map_err(|e| anyhow::anyhow!("ftui runtime error: {e}"))
}

/// Render one `width`x`height` frame of `app` to plain text.
pub fn render_to_text(app: &FolioApp, width: u16, height: u16) -> String {
    let mut pool = ftui::GraphemePool::new();
    let mut frame = ftui::Frame::new(width, height, &mut pool);
    super::ftui_adapter::Model::view(app, &mut frame);
    buffer_to_text(&frame.buffer)
}

/// Render the settled first screen without a terminal: boot skipped, the
/// sections in view revealed.
pub fn render_headless(config: &FolioConfig, width: u16, height: u16) -> String {
    let mut app = FolioApp::new(config, StyleContext::from_options(StyleOptions::mono()));
    app.frame_size.set((width, height));
    app.skip_boot();
    app.advance(Duration::ZERO);
    app.advance(Duration::from_secs(1));
    render_to_text(&app, width, height)
}
