//! This module contains the OpenGL building blocks shared by the tutorial programs,
//! including application setup, shader management and mesh handling.

pub mod app;
pub mod gl;
pub mod mesh;
pub mod shader;

#[cfg(test)]
pub(crate) mod mock;

pub use app::*;
pub use gl::*;
pub use mesh::*;
pub use shader::*;
