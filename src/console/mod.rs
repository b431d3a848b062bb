//! Floating terminal panel: command dispatch, scrollback, history, drag state.
//!
//! [`FloatingCli`] is UI-agnostic. The TUI feeds it keystrokes and renders
//! [`FloatingCli::output`]; `folio exec` drives [`FloatingCli::submit`]
//! directly and prints the plain-text scrollback.

pub mod commands;
pub mod history;
pub mod panel;

use tracing::debug;

use crate::markup::{escape_html, span};
use crate::page::SectionNavigator;

use commands::{CommandContext, CommandTable, Reply};
use history::CliHistory;
use panel::PanelState;

pub const PROMPT: &str = "visitor@portfolio:~$";

/// Greeting shown when the panel is first created.
pub const GREETING: &[&str] = &[
    "Welcome to the portfolio terminal.",
    "Type <span class=\"cli-acc\">help</span> to list commands.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// The echoed prompt plus submitted command.
    Echo,
    Output,
}

/// One scrollback entry. `markup` uses the restricted span/anchor dialect of
/// [`crate::markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub markup: String,
}

impl OutputLine {
    fn output(markup: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            markup: markup.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FloatingCli {
    panel: PanelState,
    history: CliHistory,
    input: String,
    output: Vec<OutputLine>,
    table: CommandTable,
    /// Rows scrolled up from the newest output; 0 pins to the bottom.
    scroll_from_bottom: usize,
}

impl Default for FloatingCli {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatingCli {
    pub fn new() -> Self {
        Self {
            panel: PanelState::new(),
            history: CliHistory::new(),
            input: String::new(),
            output: GREETING.iter().map(|&l| OutputLine::output(l)).collect(),
            table: CommandTable::builtin(),
            scroll_from_bottom: 0,
        }
    }

    /// An instance with empty scrollback, for non-interactive use.
    pub fn quiet() -> Self {
        Self {
            output: Vec::new(),
            ..Self::new()
        }
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelState {
        &mut self.panel
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn history(&self) -> &CliHistory {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    pub fn toggle(&mut self) -> bool {
        self.panel.toggle()
    }

    pub fn open(&mut self) {
        self.panel.open();
    }

    pub fn close(&mut self) {
        self.panel.close();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, line: impl Into<String>) {
        self.input = line.into();
    }

    /// Up arrow: replace the input with the next-older history entry.
    pub fn recall_previous(&mut self) {
        if let Some(line) = self.history.previous() {
            self.input = line.to_string();
        }
    }

    /// Down arrow: newer entry, or an empty input once past the newest.
    pub fn recall_next(&mut self) {
        self.input = self.history.next().map(str::to_string).unwrap_or_default();
    }

    pub fn scroll_output(&mut self, delta: isize) {
        let max = self.output.len().saturating_sub(1);
        let next = self.scroll_from_bottom as isize + delta;
        self.scroll_from_bottom = next.clamp(0, max as isize) as usize;
    }

    /// Submit the current input. Returns `false` when the trimmed input was
    /// empty and nothing happened.
    pub fn submit(&mut self, ctx: &CommandContext<'_>, nav: &mut dyn SectionNavigator) -> bool {
        let line = self.input.trim().to_string();
        if line.is_empty() {
            return false;
        }
        self.history.push(line.clone());
        self.input.clear();
        self.output.push(OutputLine {
            kind: LineKind::Echo,
            markup: format!(
                "{} {}",
                span("t-prompt", PROMPT),
                span("cli-out-cmd", &escape_html(&line))
            ),
        });

        let mut words = line.split_whitespace();
        let cmd = words.next().unwrap_or_default().to_lowercase();
        let arg = words.next();
        debug!(command = %cmd, arg = ?arg, "cli submit");

        match (cmd.as_str(), arg) {
            ("goto", Some(section)) => {
                let escaped = escape_html(section);
                let reply = if nav.scroll_into_view(section) {
                    format!("Navigating to {}...", span("cli-acc", &format!("#{escaped}")))
                } else {
                    span("cli-err", &format!("Section not found: {escaped}"))
                };
                self.output.push(OutputLine::output(reply));
            }
            _ => match self.table.get(&cmd).map(|spec| spec.invoke(ctx)) {
                Some(Reply::Text(markup)) => self.output.push(OutputLine::output(markup)),
                Some(Reply::Clear) => self.output.clear(),
                Some(Reply::Exit) => self.panel.close(),
                None => self.output.push(OutputLine::output(format!(
                    "{}  Type {}",
                    span("cli-err", &format!("command not found: {}", escape_html(&line))),
                    span("cli-acc", "help")
                ))),
            },
        }

        self.output.push(OutputLine::output(""));
        self.scroll_from_bottom = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::markup::to_plain;
    use crate::profile::Profile;

    #[derive(Default)]
    struct RecordingNav {
        known: Vec<&'static str>,
        visited: Vec<String>,
    }

    impl SectionNavigator for RecordingNav {
        fn scroll_into_view(&mut self, id: &str) -> bool {
            self.visited.push(id.to_string());
            self.known.iter().any(|k| k.eq_ignore_ascii_case(id))
        }
    }

    fn nav() -> RecordingNav {
        RecordingNav {
            known: vec!["home", "about", "projects"],
            ..Default::default()
        }
    }

    fn run(cli: &mut FloatingCli, nav: &mut RecordingNav, line: &str) -> bool {
        let profile = Profile::default();
        let ctx = CommandContext::new(&profile, Duration::from_secs(3));
        cli.set_input(line);
        cli.submit(&ctx, nav)
    }

    fn plain(cli: &FloatingCli) -> Vec<String> {
        cli.output().iter().map(|l| to_plain(&l.markup)).collect()
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        assert!(!run(&mut cli, &mut nav, "   "));
        assert!(cli.output().is_empty());
        assert!(cli.history().is_empty());
        assert_eq!(cli.input(), "   ");
    }

    #[test]
    fn submit_echoes_and_records_history() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        assert!(run(&mut cli, &mut nav, "  date "));
        assert_eq!(cli.input(), "");
        assert_eq!(cli.history().entries().next(), Some("date"));
        let echo = &cli.output()[0];
        assert_eq!(echo.kind, LineKind::Echo);
        assert_eq!(to_plain(&echo.markup), format!("{PROMPT} date"));
        assert_eq!(cli.output().last().map(|l| l.markup.as_str()), Some(""));
    }

    #[test]
    fn commands_are_case_insensitive() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "HELP");
        assert!(plain(&cli)[1].starts_with("Available commands:"));
    }

    #[test]
    fn clear_leaves_only_the_spacer() {
        let mut cli = FloatingCli::new();
        let mut nav = nav();
        run(&mut cli, &mut nav, "help");
        run(&mut cli, &mut nav, "clear");
        // Everything before goes; the spacer after every command stays.
        assert_eq!(cli.output().len(), 1);
        assert_eq!(cli.output()[0].markup, "");
        assert_eq!(cli.history().len(), 2);
    }

    #[test]
    fn command_after_clear_starts_below_a_blank_line() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "clear");
        run(&mut cli, &mut nav, "date");
        let kinds: Vec<LineKind> = cli.output().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            [LineKind::Output, LineKind::Echo, LineKind::Output, LineKind::Output]
        );
        assert_eq!(cli.output()[0].markup, "");
    }

    #[test]
    fn exit_closes_panel() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        cli.open();
        run(&mut cli, &mut nav, "exit");
        assert!(!cli.is_open());
        // The echo and spacer remain.
        assert_eq!(cli.output().len(), 2);
    }

    #[test]
    fn unknown_command_reports_and_points_at_help() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "foobar");
        assert_eq!(plain(&cli)[1], "command not found: foobar  Type help");
        assert!(cli.output()[1].markup.contains("class=\"cli-err\""));
    }

    #[test]
    fn unknown_command_input_is_escaped() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "<script>");
        let markup = &cli.output()[1].markup;
        assert!(markup.contains("&lt;script&gt;"));
        assert!(!markup.contains("<script>"));
        assert!(cli.output()[0].markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn goto_known_section_navigates() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "goto Projects");
        assert_eq!(nav.visited, ["Projects"]);
        assert_eq!(plain(&cli)[1], "Navigating to #Projects...");
    }

    #[test]
    fn goto_missing_section_reports_inline() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "goto nosuchsection");
        assert_eq!(plain(&cli)[1], "Section not found: nosuchsection");
    }

    #[test]
    fn goto_without_argument_is_unknown() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        run(&mut cli, &mut nav, "goto");
        assert!(nav.visited.is_empty());
        assert_eq!(plain(&cli)[1], "command not found: goto  Type help");
    }

    #[test]
    fn recall_walks_history_and_clears() {
        let mut cli = FloatingCli::quiet();
        let mut nav = nav();
        for line in ["a", "b", "c"] {
            run(&mut cli, &mut nav, line);
        }
        cli.recall_previous();
        assert_eq!(cli.input(), "c");
        cli.recall_previous();
        assert_eq!(cli.input(), "b");
        cli.recall_next();
        assert_eq!(cli.input(), "c");
        cli.recall_next();
        assert_eq!(cli.input(), "");
    }

    #[test]
    fn recall_on_empty_history_keeps_input() {
        let mut cli = FloatingCli::quiet();
        cli.set_input("draft");
        cli.recall_previous();
        assert_eq!(cli.input(), "draft");
    }
}
