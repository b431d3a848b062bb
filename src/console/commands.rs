//! Static command table for the floating CLI.
//!
//! The set is closed: `help, about, skills, projects, contact, date, uptime,
//! clear, exit`. `goto` is not in the table; the dispatcher handles it before
//! the lookup because it takes an argument.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use crate::markup::{escape_html, link, span};
use crate::profile::{Links, Profile};

/// What a command handler produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Markup to append to the scrollback.
    Text(String),
    /// No output; empty the scrollback.
    Clear,
    /// No output; close the panel.
    Exit,
}

/// Read-only inputs a handler may consult.
#[derive(Clone, Debug)]
pub struct CommandContext<'a> {
    pub profile: &'a Profile,
    pub now: DateTime<Local>,
    /// Time since the UI became interactive.
    pub uptime: Duration,
}

impl<'a> CommandContext<'a> {
    pub fn new(profile: &'a Profile, uptime: Duration) -> Self {
        Self {
            profile,
            now: Local::now(),
            uptime,
        }
    }
}

type Handler = fn(&CommandContext<'_>) -> Reply;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    handler: Handler,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl CommandSpec {
    pub fn invoke(&self, ctx: &CommandContext<'_>) -> Reply {
        (self.handler)(ctx)
    }
}

/// Rows of the `help` listing, in display order. `{owner}` is substituted.
pub const HELP_ROWS: &[(&str, &str)] = &[
    ("about", "who is {owner}"),
    ("skills", "list tech stack"),
    ("projects", "list projects"),
    ("contact", "contact info"),
    ("goto [section]", "scroll to section"),
    ("date", "show current date"),
    ("uptime", "portfolio uptime"),
    ("clear", "clear terminal"),
    ("exit", "close this terminal"),
];

const BUILTINS: &[(&str, Handler)] = &[
    ("help", help),
    ("about", about),
    ("skills", skills),
    ("projects", projects),
    ("contact", contact),
    ("date", date),
    ("uptime", uptime),
    ("clear", clear),
    ("exit", exit),
];

/// Name → handler lookup, immutable once built.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandTable {
    pub fn builtin() -> Self {
        let commands = BUILTINS
            .iter()
            .map(|&(name, handler)| (name, CommandSpec { name, handler }))
            .collect();
        Self { commands }
    }

    /// Look up a lowercase command name.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

const HELP_NAME_WIDTH: usize = 12;

fn help(ctx: &CommandContext<'_>) -> Reply {
    let mut out = String::from("Available commands:");
    for (name, summary) in HELP_ROWS {
        let pad = HELP_NAME_WIDTH.saturating_sub(name.len()).max(1);
        let summary = summary.replace("{owner}", &ctx.profile.owner.name);
        out.push_str(&format!(
            "\n  {}{:pad$}- {}",
            span("cli-acc", name),
            "",
            escape_html(&summary)
        ));
    }
    Reply::Text(out)
}

fn about(ctx: &CommandContext<'_>) -> Reply {
    let owner = &ctx.profile.owner;
    Reply::Text(format!(
        "{} - {}\n{}\n{}",
        escape_html(&owner.name.to_uppercase()),
        escape_html(&owner.role),
        escape_html(&owner.summary),
        escape_html(&ctx.profile.stats_line()),
    ))
}

/// Skills as a JSON-looking object with aligned values, in configured order.
fn skills(ctx: &CommandContext<'_>) -> Reply {
    let groups = &ctx.profile.skills;
    let keys: Vec<String> = groups
        .iter()
        .map(|g| format!("{}:", serde_json::Value::String(g.group.clone())))
        .collect();
    let width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0) + 1;
    let mut rows = Vec::with_capacity(groups.len());
    for (key, group) in keys.iter().zip(groups) {
        let items = group
            .items
            .iter()
            .map(|s| serde_json::Value::String(s.clone()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(format!("  {key:<width$} [{items}]"));
    }
    let body = format!("{{\n{}\n}}", rows.join(",\n"));
    Reply::Text(escape_html(&body))
}

fn projects(ctx: &CommandContext<'_>) -> Reply {
    let projects = &ctx.profile.projects;
    let width = projects
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(19);
    let mut out: Vec<String> = projects
        .iter()
        .map(|p| {
            let name = format!("{:<width$}", p.name);
            let mut row = format!(
                "drwxr-xr-x  {} {}",
                escape_html(&name),
                escape_html(&p.stack.join(" · "))
            );
            if let Some(url) = &p.link {
                row.push_str(&format!("  {}", link(url, Links::display(url))));
            }
            row
        })
        .collect();
    let github = &ctx.profile.links.github;
    out.push(String::new());
    out.push(format!("→ {}", link(github, Links::display(github))));
    Reply::Text(out.join("\n"))
}

fn contact(ctx: &CommandContext<'_>) -> Reply {
    let links = &ctx.profile.links;
    let rows = [
        (
            "email",
            link(&format!("mailto:{}", links.email), &links.email),
        ),
        (
            "github",
            link(&links.github, &format!("@{}", Links::handle(&links.github))),
        ),
        ("linkedin", link(&links.linkedin, Links::display(&links.linkedin))),
        (
            "instagram",
            link(
                &links.instagram,
                &format!("@{}", Links::handle(&links.instagram)),
            ),
        ),
    ];
    let out: Vec<String> = rows
        .iter()
        .map(|(label, value)| format!("{label:<9}: {value}"))
        .collect();
    Reply::Text(out.join("\n"))
}

fn date(ctx: &CommandContext<'_>) -> Reply {
    Reply::Text(format_date(&ctx.now))
}

fn uptime(ctx: &CommandContext<'_>) -> Reply {
    Reply::Text(format!(
        "Portfolio uptime: {}  (since page load)",
        format_uptime(ctx.uptime)
    ))
}

fn clear(_: &CommandContext<'_>) -> Reply {
    Reply::Clear
}

fn exit(_: &CommandContext<'_>) -> Reply {
    Reply::Exit
}

/// `Thursday, October 15, 2026 at 3:04:05 PM`
pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y at %-I:%M:%S %p").to_string()
}

/// `{minutes}m {seconds}s`, both floored.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::to_plain;
    use chrono::Utc;

    fn ctx(profile: &Profile) -> CommandContext<'_> {
        CommandContext::new(profile, Duration::from_secs(125))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(s) => s,
            other => panic!("expected text reply, got {other:?}"),
        }
    }

    #[test]
    fn table_is_the_closed_builtin_set() {
        let table = CommandTable::builtin();
        assert_eq!(
            table.names(),
            [
                "about", "clear", "contact", "date", "exit", "help", "projects", "skills",
                "uptime"
            ]
        );
        assert!(!table.contains("goto"));
        assert!(!table.contains("HELP"));
    }

    #[test]
    fn help_lists_every_command_with_goto() {
        let profile = Profile::default();
        let table = CommandTable::builtin();
        let out = to_plain(&text(table.get("help").unwrap().invoke(&ctx(&profile))));
        assert!(out.starts_with("Available commands:"));
        for (name, _) in HELP_ROWS {
            assert!(out.contains(name), "help is missing {name}");
        }
        assert!(out.contains("who is Priyansh Gandharv"));
    }

    #[test]
    fn clear_and_exit_are_sentinels() {
        let profile = Profile::default();
        let table = CommandTable::builtin();
        assert_eq!(table.get("clear").unwrap().invoke(&ctx(&profile)), Reply::Clear);
        assert_eq!(table.get("exit").unwrap().invoke(&ctx(&profile)), Reply::Exit);
    }

    #[test]
    fn skills_render_as_aligned_json_object() {
        let profile = Profile::default();
        let out = to_plain(&text(skills(&ctx(&profile))));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.first(), Some(&"{"));
        assert_eq!(lines.last(), Some(&"}"));
        assert_eq!(
            lines[1],
            "  \"frontend\":  [\"React\", \"Next.js\", \"TypeScript\", \"Tailwind\"],"
        );
        assert_eq!(lines[4], "  \"database\":  [\"PostgreSQL\", \"MongoDB\", \"Redis\"]");
    }

    #[test]
    fn projects_end_with_profile_link() {
        let profile = Profile::default();
        let markup = text(projects(&ctx(&profile)));
        assert!(markup.contains("href=\"https://github.com/Rxpriyansh\""));
        let plain = to_plain(&markup);
        assert!(plain.contains("drwxr-xr-x  e-commerce-api      Node.js · PostgreSQL"));
        assert!(plain.ends_with("→ github.com/Rxpriyansh"));
    }

    #[test]
    fn contact_rows_are_links() {
        let profile = Profile::default();
        let plain = to_plain(&text(contact(&ctx(&profile))));
        assert!(plain.contains("email    : priyanshgandharv529@gmail.com"));
        assert!(plain.contains("github   : @Rxpriyansh"));
        assert!(plain.contains("instagram: @rx_priyansh"));
    }

    #[test]
    fn contact_email_with_quotes_stays_one_link() {
        let mut profile = Profile::default();
        profile.links.email = "a\"><span class=\"cli-err\">x@y.z".into();
        let markup = text(contact(&ctx(&profile)));
        let email_row = markup.lines().next().unwrap();
        let segments = crate::markup::parse(email_row);
        let link = segments.last().unwrap();
        assert_eq!(link.text, profile.links.email);
        assert_eq!(
            link.href.as_deref(),
            Some(format!("mailto:{}", profile.links.email).as_str())
        );
        assert!(segments.iter().all(|s| s.tone != crate::markup::Tone::Error));
    }

    #[test]
    fn configured_content_is_escaped() {
        let mut profile = Profile::default();
        profile.owner.name = "<b>Eve</b>".into();
        let markup = text(about(&ctx(&profile)));
        assert!(markup.contains("&lt;B&gt;EVE&lt;/B&gt;"));
    }

    #[test]
    fn uptime_is_minutes_and_seconds() {
        assert_eq!(format_uptime(Duration::from_millis(125_900)), "2m 5s");
        assert_eq!(format_uptime(Duration::ZERO), "0m 0s");
        let profile = Profile::default();
        assert_eq!(
            text(uptime(&ctx(&profile))),
            "Portfolio uptime: 2m 5s  (since page load)"
        );
    }

    #[test]
    fn date_is_full_human_readable() {
        let fixed = Utc.with_ymd_and_hms(2026, 10, 15, 15, 4, 5).unwrap();
        assert_eq!(format_date(&fixed), "Thursday, October 15, 2026 at 3:04:05 PM");
    }
}
