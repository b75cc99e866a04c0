use crate::cycle::TOTAL_CHAPTERS;
use crate::error::{ParayanError, Result};
use crate::paths;
use crate::roster::{RosterEngine, MAX_MEMBERS};
use crate::schedule::DEFAULT_READING_DAY;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Error,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Weekday the group reads on; the message shows the next one.
    #[serde(default = "default_reading_day")]
    pub reading_day: Weekday,
    #[serde(default = "default_total_chapters")]
    pub total_chapters: u32,
    #[serde(default = "default_max_members")]
    pub max_members: usize,
}

fn default_version() -> u32 {
    1
}

fn default_reading_day() -> Weekday {
    DEFAULT_READING_DAY
}

fn default_total_chapters() -> u32 {
    TOTAL_CHAPTERS
}

fn default_max_members() -> usize {
    MAX_MEMBERS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            reading_day: default_reading_day(),
            total_chapters: default_total_chapters(),
            max_members: default_max_members(),
        }
    }
}

impl Config {
    pub fn engine(&self) -> RosterEngine {
        RosterEngine::new(self.total_chapters, self.max_members)
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ParayanError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.total_chapters == 0 {
            warnings.push(ConfigWarning::error("total_chapters must be at least 1"));
        }
        if self.max_members == 0 {
            warnings.push(ConfigWarning::error("max_members must be at least 1"));
        }
        if self.total_chapters != TOTAL_CHAPTERS {
            warnings.push(ConfigWarning::warning(format!(
                "total_chapters={} differs from the standard {TOTAL_CHAPTERS}-chapter cycle",
                self.total_chapters
            )));
        }

        warnings
    }

    /// Whether any warning is severe enough to stop roster commands.
    pub fn has_errors(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
