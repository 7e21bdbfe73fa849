//! Configuration management for codementor
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::agents::{AgentKind, MentorStyle, SkillLevel};
use crate::cli::Cli;
use crate::error::{MentorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure for codementor
///
/// Holds everything the client needs: where the backend lives, how the
/// mentor should talk to the user, and chat session defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Mentor tuning (skill level, teaching style)
    #[serde(default)]
    pub mentor: MentorConfig,

    /// Chat session defaults
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Live Code Mentor backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Mentor tuning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorConfig {
    /// Self-reported skill level: "beginner", "intermediate", "advanced"
    #[serde(default = "default_skill_level")]
    pub skill_level: String,

    /// Teaching style: "patient", "socratic", "direct"
    #[serde(default = "default_mentor_style")]
    pub style: String,
}

fn default_skill_level() -> String {
    "beginner".to_string()
}

fn default_mentor_style() -> String {
    "patient".to_string()
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            skill_level: default_skill_level(),
            style: default_mentor_style(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Default agent persona: "coding", "health", "travel", "business", "english"
    #[serde(default = "default_agent")]
    pub default_agent: String,

    /// How many prior turns are sent as conversation context
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_agent() -> String {
    "coding".to_string()
}

fn default_history_window() -> usize {
    10
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_agent: default_agent(),
            history_window: default_history_window(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file with CLI overrides applied
    ///
    /// A missing file falls back to defaults; a malformed file is an
    /// error. The `--backend` and `--skill` CLI flags win over file
    /// values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path, cli: &Cli) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        if let Some(backend) = &cli.backend {
            config.backend.base_url = backend.clone();
        }
        if let Some(skill) = &cli.skill {
            config.mentor.skill_level = skill.clone();
        }

        Ok(config)
    }

    /// Default config file location: `<config_dir>/codementor/config.yaml`
    ///
    /// Falls back to `config/config.yaml` relative to the working
    /// directory when the platform config directory cannot be resolved.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "codementor", "codementor")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config/config.yaml"))
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `MentorError::Config` for an unparsable base URL, zero
    /// timeout or history window, or unknown skill/style/agent names.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.backend.base_url).map_err(|e| {
            MentorError::Config(format!(
                "Invalid backend.base_url {:?}: {}",
                self.backend.base_url, e
            ))
        })?;
        if self.backend.timeout_seconds == 0 {
            return Err(MentorError::Config(
                "backend.timeout_seconds must be greater than zero".to_string(),
            )
            .into());
        }
        if self.chat.history_window == 0 {
            return Err(MentorError::Config(
                "chat.history_window must be greater than zero".to_string(),
            )
            .into());
        }
        SkillLevel::parse_str(&self.mentor.skill_level).map_err(MentorError::Config)?;
        MentorStyle::parse_str(&self.mentor.style).map_err(MentorError::Config)?;
        AgentKind::parse_str(&self.chat.default_agent).map_err(MentorError::Config)?;
        Ok(())
    }

    /// Parsed skill level (validated at load time)
    pub fn skill_level(&self) -> SkillLevel {
        SkillLevel::parse_str(&self.mentor.skill_level).unwrap_or(SkillLevel::Beginner)
    }

    /// Parsed mentor style (validated at load time)
    pub fn mentor_style(&self) -> MentorStyle {
        MentorStyle::parse_str(&self.mentor.style).unwrap_or(MentorStyle::Patient)
    }

    /// Parsed default agent (validated at load time)
    pub fn default_agent(&self) -> AgentKind {
        AgentKind::parse_str(&self.chat.default_agent).unwrap_or(AgentKind::Coding)
    }
}
