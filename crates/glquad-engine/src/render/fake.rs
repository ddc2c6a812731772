//! Recording `GlApi` implementation for tests.
//!
//! Models just enough GL state to check what the engine uploads and binds:
//! object ids, buffer contents, the VAO-owned element buffer binding, and a
//! crude GLSL validity check for compile/link status.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::api::GlApi;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, buffer: u32, len: usize, usage: u32 },
    BindVertexArray(Option<u32>),
    VertexAttribPointer { index: u32, size: i32, normalized: bool, stride: i32, offset: i32 },
    EnableVertexAttribArray(u32),
    UseProgram(Option<u32>),
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    Clear(u32),
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
    DeleteBuffer(u32),
    DeleteVertexArray(u32),
    DeleteShader(u32),
    DeleteProgram(u32),
}

#[derive(Debug)]
struct FakeShader {
    stage: u32,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    creations_left: Option<usize>,
    calls: Vec<Call>,
    live: HashSet<u32>,

    array_buffer: Option<u32>,
    vertex_array: Option<u32>,
    // Element buffer binding is VAO state; `None` key is the default VAO.
    element_buffers: HashMap<Option<u32>, u32>,
    buffers: HashMap<u32, Vec<u8>>,
    attrib_sources: HashMap<(u32, u32), u32>,

    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeGl {
    state: RefCell<State>,
}

impl FakeGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allows only `n` more object creations; later ones fail.
    pub(crate) fn fail_after(n: usize) -> Self {
        let gl = Self::default();
        gl.state.borrow_mut().creations_left = Some(n);
        gl
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn buffer_contents(&self, buffer: u32) -> Vec<u8> {
        self.state
            .borrow()
            .buffers
            .get(&buffer)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn element_buffer_of(&self, vertex_array: u32) -> Option<u32> {
        self.state
            .borrow()
            .element_buffers
            .get(&Some(vertex_array))
            .copied()
    }

    pub(crate) fn attrib_source(&self, vertex_array: u32, index: u32) -> Option<u32> {
        self.state
            .borrow()
            .attrib_sources
            .get(&(vertex_array, index))
            .copied()
    }

    pub(crate) fn bound_array_buffer(&self) -> Option<u32> {
        self.state.borrow().array_buffer
    }

    pub(crate) fn bound_vertex_array(&self) -> Option<u32> {
        self.state.borrow().vertex_array
    }

    pub(crate) fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub(crate) fn is_live(&self, id: u32) -> bool {
        self.state.borrow().live.contains(&id)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn allocate(&self, what: &str) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        if let Some(left) = s.creations_left.as_mut() {
            if *left == 0 {
                return Err(format!("out of {what} names"));
            }
            *left -= 1;
        }
        s.next_id += 1;
        let id = s.next_id;
        s.live.insert(id);
        Ok(id)
    }

    fn release(&self, id: u32) {
        self.state.borrow_mut().live.remove(&id);
    }
}

/// Accepts anything that looks like a GLSL translation unit.
fn check_glsl(source: &str) -> Result<(), String> {
    if !source.trim_start().starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".into());
    }
    let mut depth = 0i32;
    for (line, text) in source.lines().enumerate() {
        for c in text.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(format!("0:{}(1): error: syntax error, unexpected '}}'", line + 1));
            }
        }
    }
    if depth != 0 {
        return Err("0:0(0): error: syntax error, unexpected end of file".into());
    }
    if !source.contains("void main()") {
        return Err("error: no function with name 'main'".into());
    }
    Ok(())
}

impl GlApi for FakeGl {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.allocate("buffer")?;
        self.state.borrow_mut().buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer { target, buffer });
        let mut s = self.state.borrow_mut();
        match target {
            glow::ARRAY_BUFFER => s.array_buffer = buffer,
            glow::ELEMENT_ARRAY_BUFFER => {
                let vao = s.vertex_array;
                match buffer {
                    Some(b) => {
                        s.element_buffers.insert(vao, b);
                    }
                    None => {
                        s.element_buffers.remove(&vao);
                    }
                }
            }
            _ => {}
        }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        let bound = {
            let s = self.state.borrow();
            match target {
                glow::ARRAY_BUFFER => s.array_buffer,
                glow::ELEMENT_ARRAY_BUFFER => s.element_buffers.get(&s.vertex_array).copied(),
                _ => None,
            }
        };
        let Some(buffer) = bound else {
            panic!("buffer_data with nothing bound to {target:#x}");
        };
        self.record(Call::BufferData { target, buffer, len: data.len(), usage });
        self.state.borrow_mut().buffers.insert(buffer, data.to_vec());
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.release(buffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        self.allocate("vertex array")
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
        self.state.borrow_mut().vertex_array = vertex_array;
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer { index, size, normalized, stride, offset });
        let mut s = self.state.borrow_mut();
        if let (Some(vao), Some(vbo)) = (s.vertex_array, s.array_buffer) {
            s.attrib_sources.insert((vao, index), vbo);
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
        self.release(vertex_array);
    }

    fn create_shader(&self, stage: u32) -> Result<u32, String> {
        let id = self.allocate("shader")?;
        self.state.borrow_mut().shaders.insert(
            id,
            FakeShader { stage, source: String::new(), compiled: false, log: String::new() },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            match check_glsl(&sh.source) {
                Ok(()) => {
                    sh.compiled = true;
                    sh.log.clear();
                }
                Err(log) => {
                    sh.compiled = false;
                    sh.log = log;
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|sh| sh.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|sh| sh.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.release(shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate("program")?;
        self.state.borrow_mut().programs.insert(id, FakeProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        let State { programs, shaders, .. } = &mut *s;
        let Some(p) = programs.get_mut(&program) else { return };

        let stages: Vec<(u32, bool)> = p
            .attached
            .iter()
            .filter_map(|id| shaders.get(id).map(|sh| (sh.stage, sh.compiled)))
            .collect();

        let has = |stage: u32| stages.iter().any(|(s, _)| *s == stage);
        if stages.iter().any(|(_, compiled)| !compiled) {
            p.linked = false;
            p.log = "error: linking with uncompiled/unspecialized shader".into();
        } else if !has(glow::VERTEX_SHADER) || !has(glow::FRAGMENT_SHADER) {
            p.linked = false;
            p.log = "error: program lacks a vertex or fragment stage".into();
        } else {
            p.linked = true;
            p.log.clear();
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.release(program);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport { x, y, width, height });
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements { mode, count, element_type, offset });
    }
}
