//! Configuration handling for the wizard

use crate::document::PageSize;
use crate::render::DEFAULT_FILE_NAME;
use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const OUTPUT_DIR_ENV: &str = "RESUME_WIZARD_OUTPUT_DIR";
pub const RENDER_MODE_ENV: &str = "RESUME_WIZARD_RENDER_MODE";

/// Which input the PDF adapter receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Compose the structured document
    #[default]
    Document,
    /// Rasterize the on-screen preview
    Snapshot,
}

impl FromStr for RenderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(Self::Document),
            "snapshot" => Ok(Self::Snapshot),
            other => bail!("unknown render mode '{other}', expected 'document' or 'snapshot'"),
        }
    }
}

/// User configuration for the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Directory the PDF is written to
    pub output_dir: Option<PathBuf>,
    /// File name of the PDF
    pub file_name: Option<String>,
    /// Document or snapshot rendering
    pub render_mode: Option<RenderMode>,
    /// Switch to the preview when generation starts
    pub open_preview_on_generate: Option<bool>,
    /// Paper size of the generated PDF (`a4` or `letter`)
    pub page_size: Option<PageSize>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "resume-wizard", "resume-wizard")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the platform config directory, writing the
    /// defaults on first run
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                let config = Self::default();
                config.save_to(&path)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WizardConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `RESUME_WIZARD_*` overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = value(OUTPUT_DIR_ENV) {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(mode) = value(RENDER_MODE_ENV) {
            self.render_mode = Some(mode.parse()?);
        }
        Ok(self)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn file_name(&self) -> &str {
        self.file_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode.unwrap_or_default()
    }

    pub fn open_preview_on_generate(&self) -> bool {
        self.open_preview_on_generate.unwrap_or(true)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size.unwrap_or_default()
    }
}
