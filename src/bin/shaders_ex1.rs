//! The per-vertex color triangle with shaders read from disk. The vertex shader flips it upside
//! down.

use std::process::ExitCode;

use glam::Vec3;
use learngl::{
    Error,
    abs::{App, ColorVertex, Mesh, ShaderProgram},
    config::WindowConfig,
};

const VERTEX_SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/shader_ex1.vert");
const FRAGMENT_SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/shader_ex1.frag");

const VERTICES: [ColorVertex; 3] = [
    ColorVertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(1.0, 0.0, 0.0)),
    ColorVertex::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    ColorVertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.0, 0.0, 1.0)),
];

fn main() -> ExitCode {
    learngl::run_tutorial("shaders_ex1", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;

    let program = ShaderProgram::from_files(&app.gl, VERTEX_SHADER_PATH, FRAGMENT_SHADER_PATH)?;
    let triangle = Mesh::new(&app.gl, &VERTICES, glow::TRIANGLES)?;

    app.run(|_, _| {
        let _program = program.use_program();
        triangle.draw();
        Ok(())
    })
}
