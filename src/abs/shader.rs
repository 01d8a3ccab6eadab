//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! A [`ShaderProgram`] only exists once both of its stages compiled and linked; every failure is
//! returned as a [`ShaderError`] instead. Activating a program hands out a [`ProgramBinding`],
//! which is also the only way to set [`Uniform`] values. Bindings nest: dropping one makes the
//! previously active program current again.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::gl::GlBackend;

/// One programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The OpenGL enum passed to `glCreateShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors raised while building a [`Shader`] or [`ShaderProgram`].
#[derive(Debug)]
pub enum ShaderError {
    /// The source file for a stage could not be read.
    SourceLoad {
        stage: ShaderStage,
        path: PathBuf,
        source: std::io::Error,
    },
    /// A stage failed to compile. `log` holds the driver diagnostics.
    Compile { stage: ShaderStage, log: String },
    /// The stages compiled but could not be linked together.
    Link { log: String },
    /// The driver refused to create a shader or program object.
    Allocation(String),
    /// No shader of this stage was handed to the linker.
    MissingStage(ShaderStage),
    /// More than one shader of this stage was handed to the linker.
    DuplicateStage(ShaderStage),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceLoad {
                stage,
                path,
                source,
            } => write!(
                f,
                "failed to read {stage} shader source {}: {source}",
                path.display()
            ),
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{}", log.trim_end())
            }
            Self::Link { log } => write!(f, "shader program failed to link:\n{}", log.trim_end()),
            Self::Allocation(msg) => write!(f, "failed to create shader object: {msg}"),
            Self::MissingStage(stage) => write!(f, "shader program has no {stage} shader"),
            Self::DuplicateStage(stage) => {
                write!(f, "shader program has more than one {stage} shader")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceLoad { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Drivers are allowed to fail without saying why.
fn diagnostics(log: String) -> String {
    if log.trim().is_empty() {
        "no diagnostics reported by the driver".to_string()
    } else {
        log
    }
}

fn read_source(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    let source = fs::read_to_string(path).map_err(|source| ShaderError::SourceLoad {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded {stage} shader source from {} ({} bytes)",
        path.display(),
        source.len()
    );
    Ok(source)
}

/// Represents an individual compiled OpenGL shader.
pub struct Shader<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    id: G::Shader,
    stage: ShaderStage,
}

impl<G: GlBackend> Shader<G> {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<G>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(ShaderError::Allocation)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        let log = gl.get_shader_info_log(shader);
        if !gl.get_shader_compile_status(shader) {
            gl.delete_shader(shader);
            return Err(ShaderError::Compile {
                stage,
                log: diagnostics(log),
            });
        }
        if !log.trim().is_empty() {
            log::warn!("{stage} shader compiled with warnings:\n{}", log.trim_end());
        }
        log::debug!("compiled {stage} shader {shader:?}");

        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
            stage,
        })
    }

    /// Reads the whole file at `path` and compiles it.
    pub fn from_file(
        gl: &Arc<G>,
        stage: ShaderStage,
        path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let source = read_source(stage, path.as_ref())?;
        Self::new(gl, stage, &source)
    }
}

impl<G: GlBackend> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to the given location of the currently active program.
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation);
}

impl Uniform for bool {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_i32(location, *self as i32);
    }
}

impl Uniform for i32 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_i32(location, *self);
    }
}

impl Uniform for f32 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec2 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_2_f32(location, self.x, self.y);
    }
}

impl Uniform for Vec3 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_3_f32(location, self.x, self.y, self.z);
    }
}

impl Uniform for Vec4 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_4_f32(location, self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Mat4 {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_matrix_4_f32_slice(location, false, &self.to_cols_array());
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// Represents a linked OpenGL shader program made of one vertex and one fragment shader.
pub struct ShaderProgram<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    id: G::Program,
}

impl<G: GlBackend> ShaderProgram<G> {
    /// Links a new shader program from already compiled shaders.
    ///
    /// Exactly one vertex and one fragment shader must be given. The shaders are detached again
    /// after linking, so they can be dropped (or reused for another program) right away.
    pub fn new(gl: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self, ShaderError> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            match shaders.iter().filter(|shader| shader.stage == stage).count() {
                0 => return Err(ShaderError::MissingStage(stage)),
                1 => {}
                _ => return Err(ShaderError::DuplicateStage(stage)),
            }
        }

        let program = gl.create_program().map_err(ShaderError::Allocation)?;
        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        let log = gl.get_program_info_log(program);
        if !gl.get_program_link_status(program) {
            gl.delete_program(program);
            return Err(ShaderError::Link {
                log: diagnostics(log),
            });
        }
        if !log.trim().is_empty() {
            log::warn!("shader program linked with warnings:\n{}", log.trim_end());
        }
        log::debug!("linked shader program {program:?}");

        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
        })
    }

    /// Compiles both stages from source and links them.
    ///
    /// Stops at the first stage that fails to compile; nothing is linked in that case. The
    /// intermediate shader objects are released before this returns, whatever the outcome.
    pub fn from_sources(
        gl: &Arc<G>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = Shader::new(gl, ShaderStage::Fragment, fragment_source)?;
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Reads both stages from disk, then behaves like [`ShaderProgram::from_sources`].
    ///
    /// Both files are read before anything is compiled.
    pub fn from_files(
        gl: &Arc<G>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_source = read_source(ShaderStage::Vertex, vertex_path.as_ref())?;
        let fragment_source = read_source(ShaderStage::Fragment, fragment_path.as_ref())?;
        Self::from_sources(gl, &vertex_source, &fragment_source)
    }

    /// Binds the shader program for use until the returned guard is dropped.
    ///
    /// Whatever program was current before is made current again when the guard drops, so guards
    /// must be dropped in the reverse order they were created.
    pub fn use_program(&self) -> ProgramBinding<'_, G> {
        let previous = self.gl.current_program();
        self.gl.use_program(Some(self.id));
        ProgramBinding {
            program: self,
            previous,
        }
    }

    pub fn id(&self) -> G::Program {
        self.id
    }
}

impl<G: GlBackend> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
        log::debug!("deleted shader program {:?}", self.id);
    }
}

/// Keeps a [`ShaderProgram`] active. Dropping it restores the program that was active before.
pub struct ProgramBinding<'a, G: GlBackend = glow::Context> {
    program: &'a ShaderProgram<G>,
    previous: Option<G::Program>,
}

impl<G: GlBackend> ProgramBinding<'_, G> {
    /// Sets a uniform variable in the active program.
    ///
    /// Names the linker did not keep (undeclared or optimised out) are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        let gl = &*self.program.gl;
        match gl.get_uniform_location(self.program.id, name) {
            Some(location) => value.set_uniform(gl, &location),
            None => log::trace!("uniform `{name}` is not active in {:?}", self.program.id),
        }
    }
}

impl<G: GlBackend> Drop for ProgramBinding<'_, G> {
    fn drop(&mut self) {
        self.program.gl.use_program(self.previous);
    }
}
