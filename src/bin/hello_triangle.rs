//! A single orange triangle on a dark blue background.

use std::process::ExitCode;

use glam::Vec4;
use learngl::{
    Error,
    abs::{App, Mesh, PositionVertex, ShaderProgram},
    config::WindowConfig,
};

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position.x, position.y, position.z, 1.0);
}";

const FRAGMENT_SHADER: &str = "#version 330 core
out vec4 color;
void main() {
    color = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}";

const VERTICES: [PositionVertex; 3] = [
    PositionVertex::new(-0.5, -0.5, 0.0),
    PositionVertex::new(0.5, -0.5, 0.0),
    PositionVertex::new(0.0, 0.5, 0.0),
];

fn main() -> ExitCode {
    learngl::run_tutorial("hello_triangle", run)
}

fn run() -> Result<(), Error> {
    let config = WindowConfig::load()?;
    let mut app = App::new(&config)?;
    // A clear color set in the config file wins over the tutorial's own.
    if config.clear_color == WindowConfig::default().clear_color {
        app.clear_color = Vec4::new(0.0, 0.0, 0.4, 1.0);
    }

    let program = ShaderProgram::from_sources(&app.gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
    let triangle = Mesh::new(&app.gl, &VERTICES, glow::TRIANGLES)?;

    app.run(|_, _| {
        let _program = program.use_program();
        triangle.draw();
        Ok(())
    })
}
