//! Two triangles in one vertex array, drawn with two programs that share a vertex shader.

use std::process::ExitCode;

use learngl::{
    Error,
    abs::{App, Mesh, PositionVertex, Shader, ShaderProgram, ShaderStage},
    config::WindowConfig,
};

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position.x, position.y, position.z, 1.0);
}";

const ORANGE_SHADER: &str = "#version 330 core
out vec4 color;
void main() {
    color = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}";

const GREEN_SHADER: &str = "#version 330 core
out vec4 color;
void main() {
    color = vec4(0.2f, 1.0f, 0.5f, 1.0f);
}";

const VERTICES: [PositionVertex; 6] = [
    PositionVertex::new(-0.6, -0.5, 0.0),
    PositionVertex::new(-0.6, 0.5, 0.0),
    PositionVertex::new(-0.1, 0.0, 0.0),
    PositionVertex::new(0.1, 0.0, 0.0),
    PositionVertex::new(0.6, 0.5, 0.0),
    PositionVertex::new(0.6, -0.5, 0.0),
];

fn main() -> ExitCode {
    learngl::run_tutorial("hello_triangle_ex3", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;

    let (orange, green) = {
        let vertex = Shader::new(&app.gl, ShaderStage::Vertex, VERTEX_SHADER)?;
        let orange = Shader::new(&app.gl, ShaderStage::Fragment, ORANGE_SHADER)?;
        let green = Shader::new(&app.gl, ShaderStage::Fragment, GREEN_SHADER)?;
        (
            ShaderProgram::new(&app.gl, &[&vertex, &orange])?,
            ShaderProgram::new(&app.gl, &[&vertex, &green])?,
        )
    };
    let triangles = Mesh::new(&app.gl, &VERTICES, glow::TRIANGLES)?;

    app.run(|_, _| {
        let vertex_array = triangles.bind();
        {
            let _program = orange.use_program();
            vertex_array.draw_range(0, 3)?;
        }
        {
            let _program = green.use_program();
            vertex_array.draw_range(3, 3)?;
        }
        Ok(())
    })
}
