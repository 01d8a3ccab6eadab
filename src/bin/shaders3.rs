//! A triangle with a color per vertex, interpolated across the face.

use std::process::ExitCode;

use glam::{Vec3, Vec4};
use learngl::{
    Error,
    abs::{App, ColorVertex, Mesh, ShaderProgram},
    config::WindowConfig,
};

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 position;
layout (location = 1) in vec3 color;
out vec3 ourColor;
void main() {
    gl_Position = vec4(position, 1.0);
    ourColor = color;
}";

const FRAGMENT_SHADER: &str = "#version 330 core
in vec3 ourColor;
out vec4 color;
void main() {
    color = vec4(ourColor, 1.0f);
}";

const VERTICES: [ColorVertex; 3] = [
    ColorVertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(1.0, 0.0, 0.0)),
    ColorVertex::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    ColorVertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::new(0.0, 0.0, 1.0)),
];

fn main() -> ExitCode {
    learngl::run_tutorial("shaders3", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;

    let program = ShaderProgram::from_sources(&app.gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
    let triangle = Mesh::new(&app.gl, &VERTICES, glow::TRIANGLES)?;

    app.run(|_, time| {
        let active = program.use_program();
        // No-op here: the fragment shader takes its color from the vertices, not a uniform.
        let green = (time * 2.0).sin() / 2.0 + 0.5;
        active.set_uniform("ourColor", Vec4::new(0.0, green, 0.0, 1.0));
        triangle.draw();
        Ok(())
    })
}
