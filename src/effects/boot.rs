//! Boot screen shown before the page becomes interactive.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootLevel {
    Info,
    Ok,
    Warn,
}

#[derive(Clone, Copy, Debug)]
pub struct BootLine {
    pub text: &'static str,
    pub level: BootLevel,
    pub at_ms: u64,
}

const fn line(text: &'static str, level: BootLevel, at_ms: u64) -> BootLine {
    BootLine { text, level, at_ms }
}

pub const BOOT_LINES: [BootLine; 10] = [
    line("BIOS v2.0.26  -  Initializing hardware...", BootLevel::Info, 0),
    line("[  OK  ] mounted /dev/portfolio", BootLevel::Ok, 200),
    line(
        "[  OK  ] loading kernel modules: react, node, spring",
        BootLevel::Ok,
        450,
    ),
    line("[  OK  ] starting network services", BootLevel::Ok, 700),
    line(
        "[ WARN ] port 8080 already in use, rebinding...",
        BootLevel::Warn,
        950,
    ),
    line(
        "[  OK  ] database connection: postgresql@5432",
        BootLevel::Ok,
        1150,
    ),
    line("[  OK  ] redis cache: CONNECTED", BootLevel::Ok, 1350),
    line("[  OK  ] microservices mesh: HEALTHY", BootLevel::Ok, 1550),
    line("[  OK  ] loading UI components...", BootLevel::Ok, 1750),
    line("[  OK  ] boot complete - welcome, visitor", BootLevel::Ok, 1950),
];

/// When the boot screen hides itself.
pub const BOOT_HIDE_AT: Duration = Duration::from_millis(2800);

/// A scheduled boot step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStep {
    Line(usize),
    Finish,
}

#[derive(Debug, Clone)]
pub struct BootScreen {
    shown: usize,
    visible: bool,
}

impl Default for BootScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BootScreen {
    pub fn new() -> Self {
        Self {
            shown: 0,
            visible: true,
        }
    }

    /// A boot screen that was never shown (config `ui.boot = false`).
    pub fn skipped() -> Self {
        Self {
            shown: BOOT_LINES.len(),
            visible: false,
        }
    }

    /// Every step with its delay from boot start.
    pub fn plan() -> impl Iterator<Item = (Duration, BootStep)> {
        BOOT_LINES
            .iter()
            .enumerate()
            .map(|(i, l)| (Duration::from_millis(l.at_ms), BootStep::Line(i)))
            .chain(std::iter::once((BOOT_HIDE_AT, BootStep::Finish)))
    }

    pub fn apply(&mut self, step: BootStep) {
        match step {
            BootStep::Line(i) => self.shown = self.shown.max(i + 1).min(BOOT_LINES.len()),
            BootStep::Finish => self.visible = false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn lines(&self) -> &[BootLine] {
        &BOOT_LINES[..self.shown]
    }

    /// Progress in percent, driven by lines shown.
    pub fn progress_pct(&self) -> u16 {
        (self.shown * 100 / BOOT_LINES.len()) as u16
    }

    /// Hide immediately; the caller cancels the remaining scheduled steps.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ends_with_finish_after_last_line() {
        let plan: Vec<_> = BootScreen::plan().collect();
        assert_eq!(plan.len(), BOOT_LINES.len() + 1);
        assert_eq!(plan.last().unwrap().1, BootStep::Finish);
        let last_line_at = plan[plan.len() - 2].0;
        assert!(last_line_at < BOOT_HIDE_AT);
    }

    #[test]
    fn progress_tracks_lines() {
        let mut boot = BootScreen::new();
        assert_eq!(boot.progress_pct(), 0);
        boot.apply(BootStep::Line(4));
        assert_eq!(boot.lines().len(), 5);
        assert_eq!(boot.progress_pct(), 50);
        // Out-of-order delivery never shrinks the log.
        boot.apply(BootStep::Line(1));
        assert_eq!(boot.lines().len(), 5);
        boot.apply(BootStep::Line(9));
        assert_eq!(boot.progress_pct(), 100);
        assert!(boot.is_visible());
        boot.apply(BootStep::Finish);
        assert!(!boot.is_visible());
    }

    #[test]
    fn warn_line_is_tagged() {
        let warns: Vec<_> = BOOT_LINES
            .iter()
            .filter(|l| l.level == BootLevel::Warn)
            .collect();
        assert_eq!(warns.len(), 1);
        assert!(warns[0].text.contains("8080"));
    }
}
