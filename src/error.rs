//! Crate-level error types.

use std::fmt;

use crate::{
    abs::{AppError, MeshError, ShaderError},
    config::ConfigError,
};

/// Errors that end a tutorial program.
#[derive(Debug)]
pub enum Error {
    /// Window or OpenGL context creation failed.
    Context(AppError),
    /// The window configuration could not be loaded.
    Config(ConfigError),
    /// A shader could not be loaded, compiled or linked.
    Shader(ShaderError),
    /// A mesh could not be created or drawn.
    Mesh(MeshError),
}

impl Error {
    /// Process exit status for this error. Each kind of failure gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Context(_) => 2,
            Self::Config(_) => 3,
            Self::Shader(ShaderError::SourceLoad { .. }) => 4,
            Self::Shader(ShaderError::Compile { .. }) => 5,
            Self::Shader(ShaderError::Link { .. }) => 6,
            Self::Shader(_) | Self::Mesh(_) => 7,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(e) => write!(f, "context error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Mesh(e) => write!(f, "mesh error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Mesh(e) => Some(e),
        }
    }
}

impl From<AppError> for Error {
    fn from(e: AppError) -> Self {
        Self::Context(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ShaderError> for Error {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<MeshError> for Error {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}
