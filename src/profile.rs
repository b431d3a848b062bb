//! Portfolio content: who the page is about and what it shows.
//!
//! Every field has a default that reproduces the published portfolio, so an
//! empty (or missing) config file renders the full page. `config.rs` layers
//! TOML overrides on top.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub role: String,
    pub tagline: String,
    /// Longer blurb used by the about section and the `about` command.
    pub summary: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            name: "Priyansh Gandharv".into(),
            role: "Full Stack Software Engineer".into(),
            tagline: "I build distributed systems and real-time products that stay fast under load."
                .into(),
            summary: "Specializing in distributed systems, real-time architecture, and high-performance applications."
                .into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
    pub instagram: String,
    pub email: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            github: "https://github.com/Rxpriyansh".into(),
            linkedin: "https://www.linkedin.com/in/priyansh-gandharv".into(),
            instagram: "https://www.instagram.com/rx_priyansh".into(),
            email: "priyanshgandharv529@gmail.com".into(),
        }
    }
}

impl Links {
    /// Last path segment of a profile URL, e.g. `Rxpriyansh`.
    pub fn handle(url: &str) -> &str {
        url.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(url)
    }

    /// URL without scheme and `www.`, e.g. `github.com/Rxpriyansh`.
    pub fn display(url: &str) -> &str {
        let no_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        no_scheme
            .strip_prefix("www.")
            .unwrap_or(no_scheme)
            .trim_end_matches('/')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Stat {
    /// Leading integer of the value and the suffix after it: `10K+` is
    /// `(10, "K+")`. `None` when the value does not start with a digit.
    pub fn count_target(&self) -> Option<(u64, &str)> {
        let digits = self.value.len()
            - self
                .value
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .len();
        let target = self.value[..digits].parse().ok()?;
        Some((target, &self.value[digits..]))
    }
}

/// Proficiency bar shown under the skill groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBar {
    pub name: String,
    /// Fill percentage, 0..=100.
    pub pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub group: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub period: String,
    pub role: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Everything the page and the CLI say about the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub owner: Owner,
    pub links: Links,
    pub stats: Vec<Stat>,
    pub skills: Vec<SkillGroup>,
    pub bars: Vec<SkillBar>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<Project>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            owner: Owner::default(),
            links: Links::default(),
            stats: vec![
                stat("3+", "years"),
                stat("20+", "projects"),
                stat("10K+", "req/sec handled"),
            ],
            skills: vec![
                skills("frontend", &["React", "Next.js", "TypeScript", "Tailwind"]),
                skills("backend", &["Node.js", "Java", "Spring Boot", "GraphQL"]),
                skills("infra", &["Docker", "Kubernetes", "AWS", "CI/CD"]),
                skills("database", &["PostgreSQL", "MongoDB", "Redis"]),
            ],
            bars: vec![
                bar("React / Next.js", 90),
                bar("Node.js", 88),
                bar("Java / Spring Boot", 80),
                bar("PostgreSQL", 82),
                bar("Docker / Kubernetes", 75),
            ],
            experience: vec![
                ExperienceEntry {
                    period: "2023 - present".into(),
                    role: "Full Stack Software Engineer".into(),
                    org: "Independent".into(),
                    summary: "Event-driven backends and real-time dashboards for client products."
                        .into(),
                },
                ExperienceEntry {
                    period: "2021 - 2023".into(),
                    role: "Backend Engineer".into(),
                    org: "Product studio".into(),
                    summary: "Spring Boot and Node.js services behind Redis caches and PostgreSQL."
                        .into(),
                },
            ],
            projects: vec![
                project(
                    "e-commerce-api",
                    &["Node.js", "PostgreSQL", "Redis", "Docker"],
                ),
                project(
                    "analytics-dashboard",
                    &["React", "D3.js", "WebSocket", "Node.js"],
                ),
                project(
                    "ai-chat-platform",
                    &["Python", "OpenAI", "React", "FastAPI"],
                ),
            ],
        }
    }
}

impl Profile {
    /// One-line stats summary, e.g. `3+ years · 20+ projects`.
    pub fn stats_line(&self) -> String {
        self.stats
            .iter()
            .map(|s| format!("{} {}", s.value, s.label))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

fn stat(value: &str, label: &str) -> Stat {
    Stat {
        value: value.into(),
        label: label.into(),
    }
}

fn skills(group: &str, items: &[&str]) -> SkillGroup {
    SkillGroup {
        group: group.into(),
        items: items.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn bar(name: &str, pct: u8) -> SkillBar {
    SkillBar {
        name: name.into(),
        pct,
    }
}

fn project(name: &str, stack: &[&str]) -> Project {
    Project {
        name: name.into(),
        stack: stack.iter().map(|s| (*s).to_string()).collect(),
        link: None,
    }
}
