//! Configuration file for folio.
//!
//! The file is TOML. Every table is optional and falls back to the built-in
//! portfolio content:
//!
//! ```toml
//! [owner]
//! name = "Ada Lovelace"
//! role = "Analyst"
//!
//! [links]
//! github = "https://github.com/ada"
//!
//! [[skills]]
//! group = "math"
//! items = ["analysis", "notes"]
//!
//! [[bars]]
//! name = "Analysis"
//! pct = 95
//!
//! [ui]
//! boot = false
//! phrases = ["computing...", "engine online"]
//! hidden_sections = ["experience"]
//! ```
//!
//! Lookup order: `--config <PATH>`, then `$FOLIO_CONFIG`, then
//! `<config_dir>/folio/folio.toml`. A missing file yields defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::effects::typing::default_phrases;
use crate::page::SectionId;
use crate::profile::Profile;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Presentation switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the boot log before the page.
    pub boot: bool,
    /// Phrases cycled by the hero typing banner.
    pub phrases: Vec<String>,
    /// Sections left off the page. Navigating to one reports "not found".
    pub hidden_sections: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            boot: true,
            phrases: default_phrases(),
            hidden_sections: Vec::new(),
        }
    }
}

impl UiConfig {
    /// Parsed `hidden_sections`. Only valid after [`FolioConfig::validate`].
    pub fn hidden(&self) -> Vec<SectionId> {
        self.hidden_sections
            .iter()
            .filter_map(|s| SectionId::parse(s))
            .collect()
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default)]
    pub ui: UiConfig,
}

impl FolioConfig {
    /// Resolve the config path and load it.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");

        Ok(config)
    }

    /// `$FOLIO_CONFIG`, else `<config_dir>/folio/folio.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = dotenvy::var("FOLIO_CONFIG")
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|p| p.join("folio").join("folio.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let profile = &self.profile;
        if profile.owner.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "owner.name cannot be empty".into(),
            ));
        }

        for group in &profile.skills {
            if group.group.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "skill group name cannot be empty".into(),
                ));
            }
        }

        for bar in &profile.bars {
            if bar.pct > 100 {
                return Err(ConfigError::Validation(format!(
                    "bars.{}.pct must be at most 100 (got {})",
                    bar.name, bar.pct
                )));
            }
        }

        let links = &profile.links;
        validate_email(&links.email)?;
        for (field, url) in [
            ("links.github", links.github.as_str()),
            ("links.linkedin", links.linkedin.as_str()),
            ("links.instagram", links.instagram.as_str()),
        ] {
            validate_link(field, url)?;
        }
        for project in &profile.projects {
            if let Some(url) = &project.link {
                validate_link(&format!("projects.{}.link", project.name), url)?;
            }
        }

        for section in &self.ui.hidden_sections {
            if SectionId::parse(section).is_none() {
                return Err(ConfigError::Validation(format!(
                    "Unknown section in ui.hidden_sections: {section}"
                )));
            }
        }

        Ok(())
    }
}

fn has_markup_breaking_chars(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, '"' | '<' | '>') || c.is_whitespace())
}

fn validate_link(field: &str, url: &str) -> Result<(), ConfigError> {
    let ok = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| url.starts_with(scheme));
    if !ok {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or mailto: (got {url:?})"
        )));
    }
    if has_markup_breaking_chars(url) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain quotes, angle brackets or whitespace (got {url:?})"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ConfigError> {
    let well_formed = email
        .split_once('@')
        .is_some_and(|(user, host)| !user.is_empty() && !host.is_empty());
    if !well_formed || has_markup_breaking_chars(email) {
        return Err(ConfigError::Validation(format!(
            "links.email is not a usable address (got {email:?})"
        )));
    }
    Ok(())
}
