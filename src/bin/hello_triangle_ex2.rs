//! Two triangles, each in its own vertex array, drawn with one program.

use std::process::ExitCode;

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

const LEFT: [PositionVertex; 3] = [
    PositionVertex::new(-0.6, -0.5, 0.0),
    PositionVertex::new(-0.6, 0.5, 0.0),
    PositionVertex::new(-0.1, 0.0, 0.0),
];

const RIGHT: [PositionVertex; 3] = [
    PositionVertex::new(0.1, 0.0, 0.0),
    PositionVertex::new(0.6, 0.5, 0.0),
    PositionVertex::new(0.6, -0.5, 0.0),
];

fn main() -> ExitCode {
    learngl::run_tutorial("hello_triangle_ex2", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;

    let program = ShaderProgram::from_sources(&app.gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
    let left = Mesh::new(&app.gl, &LEFT, glow::TRIANGLES)?;
    let right = Mesh::new(&app.gl, &RIGHT, glow::TRIANGLES)?;

    app.run(|_, _| {
        let _program = program.use_program();
        left.draw();
        right.draw();
        Ok(())
    })
}
