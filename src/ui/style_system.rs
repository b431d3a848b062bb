//! FrankenTUI style system for folio.
//!
//! Centralizes:
//! - the terminal-green theme the portfolio is drawn in
//! - color profile downgrade (mono / ansi16 / ansi256 / truecolor)
//! - env opt-outs (`NO_COLOR`, `FOLIO_NO_COLOR`, `FOLIO_COLOR_PROFILE`)
//! - semantic `StyleSheet` tokens consumed by all ftui views
//! - [`StyleContext`] facade for style resolution in view code
//!
//! Widgets reference semantic token names (e.g. `STYLE_CLI_ERROR`) rather than
//! raw colors, so a profile downgrade propagates automatically.

use ftui::render::cell::PackedRgba;
use ftui::style::theme::themes;
use ftui::{Color, ColorDepth as ColorProfile, ResolvedTheme, Style, StyleSheet, Theme, ThemeBuilder};

use crate::markup::Tone;

pub const STYLE_APP_ROOT: &str = "app.root";
pub const STYLE_TEXT_PRIMARY: &str = "text.primary";
pub const STYLE_TEXT_MUTED: &str = "text.muted";
pub const STYLE_TEXT_SUBTLE: &str = "text.subtle";
pub const STYLE_STATUS_SUCCESS: &str = "status.success";
pub const STYLE_STATUS_WARNING: &str = "status.warning";
pub const STYLE_STATUS_ERROR: &str = "status.error";
pub const STYLE_STATUS_INFO: &str = "status.info";
pub const STYLE_RESULT_ROW: &str = "result.row";
pub const STYLE_RESULT_ROW_SELECTED: &str = "result.row.selected";
pub const STYLE_TAB_ACTIVE: &str = "tab.active";
pub const STYLE_TAB_INACTIVE: &str = "tab.inactive";
pub const STYLE_KBD_KEY: &str = "kbd.key";
pub const STYLE_KBD_DESC: &str = "kbd.desc";
pub const STYLE_PAGE_HEADING: &str = "page.heading";
pub const STYLE_PAGE_TITLE: &str = "page.title";
pub const STYLE_PAGE_ACCENT: &str = "page.accent";
pub const STYLE_PAGE_HIDDEN: &str = "page.hidden";
pub const STYLE_PALETTE_BORDER: &str = "palette.border";
pub const STYLE_PALETTE_QUERY: &str = "palette.query";
pub const STYLE_CLI_BORDER: &str = "cli.border";
pub const STYLE_CLI_TITLE: &str = "cli.title";
pub const STYLE_CLI_PROMPT: &str = "cli.prompt";
pub const STYLE_CLI_COMMAND: &str = "cli.command";
pub const STYLE_CLI_ACCENT: &str = "cli.accent";
pub const STYLE_CLI_ERROR: &str = "cli.error";
pub const STYLE_CLI_LINK: &str = "cli.link";
pub const STYLE_BOOT_OK: &str = "boot.ok";
pub const STYLE_BOOT_WARN: &str = "boot.warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    pub color_profile: ColorProfile,
    pub no_color: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            color_profile: ColorProfile::detect(),
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EnvValues<'a> {
    no_color: Option<&'a str>,
    folio_no_color: Option<&'a str>,
    colorterm: Option<&'a str>,
    term: Option<&'a str>,
    folio_color_profile: Option<&'a str>,
}

impl StyleOptions {
    pub fn from_env() -> Self {
        let no_color = dotenvy::var("NO_COLOR").ok();
        let folio_no_color = dotenvy::var("FOLIO_NO_COLOR").ok();
        let colorterm = dotenvy::var("COLORTERM").ok();
        let term = dotenvy::var("TERM").ok();
        let folio_color_profile = dotenvy::var("FOLIO_COLOR_PROFILE").ok();

        Self::from_env_values(EnvValues {
            no_color: no_color.as_deref(),
            folio_no_color: folio_no_color.as_deref(),
            colorterm: colorterm.as_deref(),
            term: term.as_deref(),
            folio_color_profile: folio_color_profile.as_deref(),
        })
    }

    /// Resolve options from a snapshot of environment variables.
    ///
    /// | Priority | Condition                                   | `color_profile` |
    /// |----------|---------------------------------------------|-----------------|
    /// | 1        | `NO_COLOR` or `FOLIO_NO_COLOR` is non-empty | Mono            |
    /// | 2        | `FOLIO_COLOR_PROFILE` is valid              | that value      |
    /// | 3        | otherwise                                   | COLORTERM/TERM  |
    fn from_env_values(values: EnvValues<'_>) -> Self {
        let set = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
        let no_color = set(values.no_color) || set(values.folio_no_color);
        let color_profile = if no_color {
            ColorProfile::Mono
        } else {
            values
                .folio_color_profile
                .and_then(parse_color_profile)
                .unwrap_or_else(|| {
                    ColorProfile::detect_from_env(None, values.colorterm, values.term)
                })
        };
        Self {
            color_profile,
            no_color,
        }
    }

    /// Plain, deterministic options for headless frames and tests.
    pub fn mono() -> Self {
        Self {
            color_profile: ColorProfile::Mono,
            no_color: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleContext {
    pub options: StyleOptions,
    pub resolved: ResolvedTheme,
    pub sheet: StyleSheet,
}

impl StyleContext {
    pub fn from_options(options: StyleOptions) -> Self {
        let resolved = terminal_theme().resolve(true);
        let sheet = build_stylesheet(resolved, options);
        Self {
            options,
            resolved,
            sheet,
        }
    }

    pub fn from_env() -> Self {
        Self::from_options(StyleOptions::from_env())
    }

    pub fn style(&self, name: &str) -> Style {
        self.sheet.get_or_default(name)
    }

    /// Style for a run of CLI markup.
    pub fn tone_style(&self, tone: Tone, is_link: bool) -> Style {
        if is_link {
            return self.style(STYLE_CLI_LINK);
        }
        match tone {
            Tone::Plain => self.style(STYLE_TEXT_PRIMARY),
            Tone::Prompt => self.style(STYLE_CLI_PROMPT),
            Tone::Command => self.style(STYLE_CLI_COMMAND),
            Tone::Accent => self.style(STYLE_CLI_ACCENT),
            Tone::Error => self.style(STYLE_CLI_ERROR),
        }
    }
}

fn parse_color_profile(value: &str) -> Option<ColorProfile> {
    match value.trim().to_ascii_lowercase().as_str() {
        "mono" | "none" => Some(ColorProfile::Mono),
        "ansi16" | "16" => Some(ColorProfile::Ansi16),
        "ansi256" | "256" => Some(ColorProfile::Ansi256),
        "truecolor" | "24bit" | "rgb" => Some(ColorProfile::TrueColor),
        _ => None,
    }
}

/// Black background, phosphor-green accents.
fn terminal_theme() -> Theme {
    ThemeBuilder::from_theme(themes::dark())
        .primary(Color::rgb(0, 255, 136))
        .secondary(Color::rgb(0, 212, 255))
        .accent(Color::rgb(0, 255, 136))
        .background(Color::rgb(10, 10, 10))
        .surface(Color::rgb(17, 17, 17))
        .overlay(Color::rgb(26, 26, 26))
        .text(Color::rgb(224, 224, 224))
        .text_muted(Color::rgb(136, 136, 136))
        .text_subtle(Color::rgb(85, 85, 85))
        .success(Color::rgb(0, 255, 136))
        .warning(Color::rgb(255, 204, 0))
        .error(Color::rgb(255, 95, 86))
        .info(Color::rgb(0, 212, 255))
        .border(Color::rgb(51, 51, 51))
        .border_focused(Color::rgb(0, 255, 136))
        .selection_bg(Color::rgb(0, 255, 136))
        .selection_fg(Color::rgb(10, 10, 10))
        .build()
}

fn build_stylesheet(resolved: ResolvedTheme, options: StyleOptions) -> StyleSheet {
    let sheet = StyleSheet::new();
    let profile = options.color_profile;

    if options.no_color {
        // Attributes only; cells keep the terminal's default colors.
        sheet.define(STYLE_PAGE_HEADING, Style::new().bold());
        sheet.define(STYLE_PAGE_TITLE, Style::new().bold());
        sheet.define(STYLE_TAB_ACTIVE, Style::new().bold().underline());
        sheet.define(STYLE_RESULT_ROW_SELECTED, Style::new().bold().underline());
        sheet.define(STYLE_CLI_TITLE, Style::new().bold());
        sheet.define(STYLE_CLI_PROMPT, Style::new().bold());
        sheet.define(STYLE_CLI_ERROR, Style::new().bold());
        sheet.define(STYLE_CLI_LINK, Style::new().underline());
        sheet.define(STYLE_KBD_KEY, Style::new().bold());
        sheet.define(STYLE_BOOT_WARN, Style::new().bold());
        return sheet;
    }

    let c = |color: Color| to_packed(color.downgrade(profile));
    let bg = c(resolved.background);
    let surface = c(resolved.surface);

    sheet.define(STYLE_APP_ROOT, Style::new().fg(c(resolved.text)).bg(bg));
    sheet.define(STYLE_TEXT_PRIMARY, Style::new().fg(c(resolved.text)));
    sheet.define(STYLE_TEXT_MUTED, Style::new().fg(c(resolved.text_muted)));
    sheet.define(STYLE_TEXT_SUBTLE, Style::new().fg(c(resolved.text_subtle)));
    sheet.define(STYLE_STATUS_SUCCESS, Style::new().fg(c(resolved.success)));
    sheet.define(STYLE_STATUS_WARNING, Style::new().fg(c(resolved.warning)));
    sheet.define(STYLE_STATUS_ERROR, Style::new().fg(c(resolved.error)).bold());
    sheet.define(STYLE_STATUS_INFO, Style::new().fg(c(resolved.info)));

    sheet.define(
        STYLE_RESULT_ROW,
        Style::new().fg(c(resolved.text)).bg(surface),
    );
    sheet.define(
        STYLE_RESULT_ROW_SELECTED,
        Style::new()
            .fg(c(resolved.selection_fg))
            .bg(c(resolved.selection_bg))
            .bold(),
    );
    sheet.define(
        STYLE_TAB_ACTIVE,
        Style::new().fg(c(resolved.accent)).bold().underline(),
    );
    sheet.define(STYLE_TAB_INACTIVE, Style::new().fg(c(resolved.text_muted)));
    sheet.define(
        STYLE_KBD_KEY,
        Style::new().fg(c(resolved.text)).bg(c(resolved.overlay)).bold(),
    );
    sheet.define(STYLE_KBD_DESC, Style::new().fg(c(resolved.text_subtle)));

    sheet.define(
        STYLE_PAGE_HEADING,
        Style::new().fg(c(resolved.primary)).bold(),
    );
    sheet.define(STYLE_PAGE_TITLE, Style::new().fg(c(resolved.text)).bold());
    sheet.define(STYLE_PAGE_ACCENT, Style::new().fg(c(resolved.secondary)));
    sheet.define(STYLE_PAGE_HIDDEN, Style::new().fg(bg).bg(bg));

    sheet.define(
        STYLE_PALETTE_BORDER,
        Style::new().fg(c(resolved.border_focused)).bg(surface),
    );
    sheet.define(
        STYLE_PALETTE_QUERY,
        Style::new().fg(c(resolved.primary)).bg(surface).bold(),
    );

    sheet.define(
        STYLE_CLI_BORDER,
        Style::new().fg(c(resolved.border)).bg(surface),
    );
    sheet.define(
        STYLE_CLI_TITLE,
        Style::new().fg(c(resolved.text_muted)).bg(surface).bold(),
    );
    sheet.define(STYLE_CLI_PROMPT, Style::new().fg(c(resolved.success)).bold());
    sheet.define(STYLE_CLI_COMMAND, Style::new().fg(c(resolved.text)));
    sheet.define(STYLE_CLI_ACCENT, Style::new().fg(c(resolved.info)));
    sheet.define(STYLE_CLI_ERROR, Style::new().fg(c(resolved.error)));
    sheet.define(
        STYLE_CLI_LINK,
        Style::new().fg(c(resolved.info)).underline(),
    );

    sheet.define(STYLE_BOOT_OK, Style::new().fg(c(resolved.success)));
    sheet.define(STYLE_BOOT_WARN, Style::new().fg(c(resolved.warning)));

    sheet
}

fn to_packed(color: Color) -> PackedRgba {
    let rgb = color.to_rgb();
    PackedRgba::rgb(rgb.r, rgb.g, rgb.b)
}
