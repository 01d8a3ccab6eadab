//! Window configuration.
//!
//! Every tutorial program opens the same kind of window. The defaults live in
//! [`WindowConfig::default`]; a JSON file at `<config dir>/learngl/window.json`
//! may override any subset of the fields.

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a [`WindowConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

/// Window and context settings shared by every tutorial program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested core profile version as `(major, minor)`.
    pub gl_version: (u8, u8),
    pub resizable: bool,
    pub vsync: bool,
    pub clear_color: Vec4,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Learn OpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            resizable: false,
            vsync: true,
            clear_color: Vec4::new(0.2, 0.3, 0.3, 1.0),
        }
    }
}

impl WindowConfig {
    /// Where [`WindowConfig::load`] looks for the config file.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("learngl").join("window.json"))
    }

    /// Loads the user's config file, falling back to the defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_json(&text)?;
                log::debug!("loaded window config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses a JSON document. Missing fields take their default value.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.gl_version < (3, 3) {
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} has no core profile with vertex array objects, need 3.3 or newer",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}
