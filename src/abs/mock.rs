//! A recording [`GlBackend`] for tests.
//!
//! [`MockGl`] hands out integer object names, keeps track of which objects are alive and how often
//! each was deleted, and mirrors the current program / vertex array / buffer bindings. Shader
//! "compilation" is a small structural check (a `#version` directive, balanced delimiters and a
//! `void main` entry point) and linking checks that every fragment `in` is fed by a vertex `out`
//! of the same type. Misuse such as deleting an object twice or activating an unlinked program is
//! recorded in [`MockState::errors`] instead of panicking, so tests can assert on it.

use std::{
    cell::{Ref, RefCell},
    collections::{HashMap, HashSet},
};

use super::gl::GlBackend;

#[derive(Debug, Clone)]
pub struct MockShader {
    pub shader_type: u32,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub info_log: String,
    pub uniforms: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub program: Option<u32>,
    pub vertex_array: Option<u32>,
    pub mode: u32,
    pub first: i32,
    pub count: i32,
    pub indexed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttrib {
    pub vertex_array: Option<u32>,
    pub index: u32,
    pub size: i32,
    pub stride: i32,
    pub offset: i32,
    pub enabled: bool,
}

#[derive(Debug, Default)]
pub struct MockState {
    next_id: u32,
    pub shaders: HashMap<u32, MockShader>,
    pub programs: HashMap<u32, MockProgram>,
    pub vertex_arrays: HashSet<u32>,
    pub buffers: HashMap<u32, Vec<u8>>,
    pub deletions: HashMap<u32, u32>,
    pub current_program: Option<u32>,
    pub current_vertex_array: Option<u32>,
    pub bound_buffers: HashMap<u32, u32>,
    pub element_buffers: HashMap<u32, u32>,
    pub attribs: Vec<VertexAttrib>,
    pub draws: Vec<DrawCall>,
    pub uniforms: Vec<(String, Vec<f32>)>,
    pub compile_count: usize,
    pub fail_allocations: bool,
    pub warning: Option<String>,
    pub silent_failures: bool,
    pub errors: Vec<String>,
}

impl MockState {
    fn allocate(&mut self, kind: &str) -> Result<u32, String> {
        if self.fail_allocations {
            return Err(format!("out of memory while creating {kind}"));
        }
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn record_deletion(&mut self, id: u32, was_alive: bool, kind: &str) {
        *self.deletions.entry(id).or_insert(0) += 1;
        if !was_alive {
            self.errors.push(format!("deleted {kind} {id} which is not alive"));
        }
    }

    /// Number of times the object with the given name was deleted.
    pub fn deletions_of(&self, id: u32) -> u32 {
        self.deletions.get(&id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct MockGl {
    state: RefCell<MockState>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `create_*` call fail.
    pub fn fail_allocations(&self) {
        self.state.borrow_mut().fail_allocations = true;
    }

    /// Reports `log` as the info log of every following successful compile and link.
    pub fn warn_with(&self, log: &str) {
        self.state.borrow_mut().warning = Some(log.to_string());
    }

    /// Leaves the info log empty when a compile or link fails.
    pub fn silence_failures(&self) {
        self.state.borrow_mut().silent_failures = true;
    }

    pub fn state(&self) -> Ref<'_, MockState> {
        self.state.borrow()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }
}

/// Removes comments and preprocessor lines.
fn strip_source(source: &str) -> String {
    source
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(|line| line.split("//").next().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_source(source: &str) -> Result<(), String> {
    if !source.trim_start().starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".to_string());
    }

    let body = strip_source(source);
    let mut stack = Vec::new();
    for (offset, c) in body.char_indices() {
        match c {
            '(' | '{' | '[' => stack.push(c),
            ')' | '}' | ']' => {
                let open = match c {
                    ')' => '(',
                    '}' => '{',
                    _ => '[',
                };
                if stack.pop() != Some(open) {
                    return Err(format!("0:{offset}: error: syntax error, unexpected '{c}'"));
                }
            }
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err("0:0: error: syntax error, unexpected end of file".to_string());
    }

    let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.contains("void main(") && !normalized.contains("void main (") {
        return Err("error: entry point `main` is not defined".to_string());
    }

    Ok(())
}

/// Returns `(type, name)` for every global declaration with the given storage qualifier.
fn declarations(source: &str, qualifier: &str) -> Vec<(String, String)> {
    strip_source(source)
        .split(';')
        .filter_map(|statement| {
            let statement = statement
                .rsplit(['{', '}'])
                .next()
                .unwrap_or_default()
                .trim();
            let statement = match statement.strip_prefix("layout") {
                Some(rest) => rest.split_once(')').map(|(_, rest)| rest)?,
                None => statement,
            };
            let tokens = statement.split_whitespace().collect::<Vec<_>>();
            match tokens.as_slice() {
                [q, ty, name] if *q == qualifier => Some((ty.to_string(), name.to_string())),
                _ => None,
            }
        })
        .collect()
}

fn link(vertex: &str, fragment: &str) -> Result<HashSet<String>, String> {
    let outputs = declarations(vertex, "out");
    for (ty, name) in declarations(fragment, "in") {
        match outputs.iter().find(|(_, out_name)| *out_name == name) {
            Some((out_ty, _)) if *out_ty == ty => {}
            Some((out_ty, _)) => {
                return Err(format!(
                    "error: `{name}` declared as `{ty}` in the fragment shader but `{out_ty}` in the vertex shader"
                ));
            }
            None => {
                return Err(format!(
                    "error: fragment shader input `{name}` has no matching output in the previous stage"
                ));
            }
        }
    }

    Ok(declarations(vertex, "uniform")
        .into_iter()
        .chain(declarations(fragment, "uniform"))
        .map(|(_, name)| name)
        .collect())
}

impl GlBackend for MockGl {
    type Shader = u32;
    type Program = u32;
    type VertexArray = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate("shader")?;
        state.shaders.insert(
            id,
            MockShader {
                shader_type,
                source: String::new(),
                compiled: false,
                info_log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(shader) = self.state.borrow_mut().shaders.get_mut(&shader) {
            shader.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.compile_count += 1;
        let warning = state.warning.clone().unwrap_or_default();
        let silent = state.silent_failures;
        if let Some(shader) = state.shaders.get_mut(&shader) {
            match check_source(&shader.source) {
                Ok(()) => {
                    shader.compiled = true;
                    shader.info_log = warning;
                }
                Err(log) => {
                    shader.compiled = false;
                    shader.info_log = if silent { String::new() } else { log };
                }
            }
        }
    }

    fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|shader| shader.compiled)
    }

    fn get_shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|shader| shader.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let was_alive = state.shaders.remove(&shader).is_some();
        state.record_deletion(shader, was_alive, "shader");
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate("program")?;
        state.programs.insert(id, MockProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.errors.push(format!("attached dead shader {shader}"));
        }
        if let Some(program) = state.programs.get_mut(&program) {
            program.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.retain(|attached| *attached != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let Some(attached) = state.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };

        let source_of = |shader_type: u32| {
            attached
                .iter()
                .filter_map(|id| state.shaders.get(id))
                .find(|shader| shader.shader_type == shader_type && shader.compiled)
                .map(|shader| shader.source.clone())
        };
        let result = match (
            source_of(glow::VERTEX_SHADER),
            source_of(glow::FRAGMENT_SHADER),
        ) {
            (Some(vertex), Some(fragment)) => link(&vertex, &fragment),
            (None, _) => Err("error: no compiled vertex shader attached".to_string()),
            (_, None) => Err("error: no compiled fragment shader attached".to_string()),
        };

        let warning = state.warning.clone().unwrap_or_default();
        let silent = state.silent_failures;
        if let Some(program) = state.programs.get_mut(&program) {
            match result {
                Ok(uniforms) => {
                    program.linked = true;
                    program.info_log = warning;
                    program.uniforms = uniforms;
                }
                Err(log) => {
                    program.linked = false;
                    program.info_log = if silent { String::new() } else { log };
                }
            }
        }
    }

    fn get_program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|program| program.linked)
    }

    fn get_program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|program| program.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let was_alive = state.programs.remove(&program).is_some();
        if state.current_program == Some(program) {
            state.current_program = None;
        }
        state.record_deletion(program, was_alive, "program");
    }

    fn use_program(&self, program: Option<u32>) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = program
            && !state.programs.get(&id).is_some_and(|p| p.linked)
        {
            state.errors.push(format!("activated unlinked program {id}"));
        }
        state.current_program = program;
    }

    fn current_program(&self) -> Option<u32> {
        self.state.borrow().current_program
    }

    fn get_uniform_location(&self, program: u32, name: &str) -> Option<String> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .filter(|program| program.uniforms.contains(name))
            .map(|_| name.to_string())
    }

    fn uniform_1_i32(&self, location: &String, x: i32) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), vec![x as f32]));
    }

    fn uniform_1_f32(&self, location: &String, x: f32) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), vec![x]));
    }

    fn uniform_2_f32(&self, location: &String, x: f32, y: f32) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), vec![x, y]));
    }

    fn uniform_3_f32(&self, location: &String, x: f32, y: f32, z: f32) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), vec![x, y, z]));
    }

    fn uniform_4_f32(&self, location: &String, x: f32, y: f32, z: f32, w: f32) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), vec![x, y, z, w]));
    }

    fn uniform_matrix_4_f32_slice(&self, location: &String, _transpose: bool, v: &[f32]) {
        self.state
            .borrow_mut()
            .uniforms
            .push((location.clone(), v.to_vec()));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate("vertex array")?;
        state.vertex_arrays.insert(id);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = vertex_array
            && !state.vertex_arrays.contains(&id)
        {
            state.errors.push(format!("bound dead vertex array {id}"));
        }
        state.current_vertex_array = vertex_array;
    }

    fn current_vertex_array(&self) -> Option<u32> {
        self.state.borrow().current_vertex_array
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        let mut state = self.state.borrow_mut();
        let was_alive = state.vertex_arrays.remove(&vertex_array);
        state.element_buffers.remove(&vertex_array);
        if state.current_vertex_array == Some(vertex_array) {
            state.current_vertex_array = None;
        }
        state.record_deletion(vertex_array, was_alive, "vertex array");
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate("buffer")?;
        state.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        let mut state = self.state.borrow_mut();
        // The element array binding is part of the bound vertex array's state.
        if target == glow::ELEMENT_ARRAY_BUFFER {
            match (state.current_vertex_array, buffer) {
                (Some(vao), Some(buffer)) => {
                    state.element_buffers.insert(vao, buffer);
                }
                (Some(vao), None) => {
                    state.element_buffers.remove(&vao);
                }
                (None, _) => {}
            }
        }
        match buffer {
            Some(buffer) => state.bound_buffers.insert(target, buffer),
            None => state.bound_buffers.remove(&target),
        };
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], _usage: u32) {
        let mut state = self.state.borrow_mut();
        let bound = if target == glow::ELEMENT_ARRAY_BUFFER {
            state
                .current_vertex_array
                .and_then(|vao| state.element_buffers.get(&vao).copied())
        } else {
            state.bound_buffers.get(&target).copied()
        };
        match bound {
            Some(buffer) => {
                state.buffers.insert(buffer, data.to_vec());
            }
            None => state
                .errors
                .push(format!("uploaded to target {target:#x} with no buffer bound")),
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.state.borrow_mut();
        let was_alive = state.buffers.remove(&buffer).is_some();
        state.bound_buffers.retain(|_, bound| *bound != buffer);
        state.record_deletion(buffer, was_alive, "buffer");
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut state = self.state.borrow_mut();
        let vertex_array = state.current_vertex_array;
        if let Some(attrib) = state
            .attribs
            .iter_mut()
            .find(|a| a.vertex_array == vertex_array && a.index == index)
        {
            attrib.enabled = true;
        }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        _data_type: u32,
        _normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        let mut state = self.state.borrow_mut();
        if !state.bound_buffers.contains_key(&glow::ARRAY_BUFFER) {
            state
                .errors
                .push(format!("attribute {index} set up with no array buffer bound"));
        }
        let vertex_array = state.current_vertex_array;
        state.attribs.push(VertexAttrib {
            vertex_array,
            index,
            size,
            stride,
            offset,
            enabled: false,
        });
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        let mut state = self.state.borrow_mut();
        let call = DrawCall {
            program: state.current_program,
            vertex_array: state.current_vertex_array,
            mode,
            first,
            count,
            indexed: false,
        };
        state.draws.push(call);
    }

    fn draw_elements(&self, mode: u32, count: i32, _element_type: u32, offset: i32) {
        let mut state = self.state.borrow_mut();
        if state
            .current_vertex_array
            .is_none_or(|vao| !state.element_buffers.contains_key(&vao))
        {
            state
                .errors
                .push("indexed draw with no element buffer".to_string());
        }
        let call = DrawCall {
            program: state.current_program,
            vertex_array: state.current_vertex_array,
            mode,
            first: offset,
            count,
            indexed: true,
        };
        state.draws.push(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_skip_layout_and_function_bodies() {
        let source = "#version 330 core\n\
            layout (location = 0) in vec3 position;\
            layout (location = 1) in vec3 color;\
            out vec3 ourColor;\
            uniform float scale;\
            void main() {gl_Position = vec4(position, 1.0);ourColor = color;}";
        assert_eq!(
            declarations(source, "in"),
            vec![
                ("vec3".to_string(), "position".to_string()),
                ("vec3".to_string(), "color".to_string())
            ]
        );
        assert_eq!(
            declarations(source, "out"),
            vec![("vec3".to_string(), "ourColor".to_string())]
        );
        assert_eq!(
            declarations(source, "uniform"),
            vec![("float".to_string(), "scale".to_string())]
        );
    }

    #[test]
    fn test_check_source() {
        assert!(check_source("#version 330 core\nvoid main(){}").is_ok());
        assert!(check_source("void main(){}").is_err());
        assert!(check_source("#version 330 core\nvoid main(){").is_err());
        assert!(check_source("#version 330 core\nvoid other(){}").is_err());
    }
}
