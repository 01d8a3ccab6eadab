//! A rectangle built from four vertices and six indices.

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

const VERTICES: [PositionVertex; 4] = [
    PositionVertex::new(-0.5, -0.5, 0.0),
    PositionVertex::new(-0.5, 0.5, 0.0),
    PositionVertex::new(0.5, 0.5, 0.0),
    PositionVertex::new(0.5, -0.5, 0.0),
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> ExitCode {
    learngl::run_tutorial("hello_rectangle", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;

    let program = ShaderProgram::from_sources(&app.gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
    let rectangle = Mesh::indexed(&app.gl, &VERTICES, &INDICES, glow::TRIANGLES)?;

    app.run(|_, _| {
        let _program = program.use_program();
        rectangle.draw();
        Ok(())
    })
}
