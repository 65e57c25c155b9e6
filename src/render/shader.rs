//! Shader program loading and compilation

use glow::HasContext;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("could not read shader source {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("shader source {0} is empty")]
    EmptySource(String),

    #[error("could not create shader object: {0}")]
    Create(String),

    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: &'static str, log: String },

    #[error("shader program link failed: {0}")]
    Link(String),
}

/// Read both shader stages from disk. Pure file I/O, no GL involved.
pub fn load_sources<P: AsRef<Path>>(
    vertex_path: P,
    fragment_path: P,
) -> Result<(String, String), ShaderError> {
    let read = |path: &Path| -> Result<String, ShaderError> {
        let text = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(ShaderError::EmptySource(path.display().to_string()));
        }
        Ok(text)
    };

    Ok((read(vertex_path.as_ref())?, read(fragment_path.as_ref())?))
}

pub struct ShaderProgram {
    program: glow::Program,
}

impl ShaderProgram {
    /// Load, compile and link a vertex/fragment shader pair.
    pub fn load<P: AsRef<Path>>(
        gl: &glow::Context,
        vertex_path: P,
        fragment_path: P,
    ) -> Result<Self, ShaderError> {
        let (vertex_source, fragment_source) = load_sources(&vertex_path, &fragment_path)?;

        unsafe {
            let vertex = compile(gl, glow::VERTEX_SHADER, "vertex", &vertex_source)?;
            let fragment = match compile(gl, glow::FRAGMENT_SHADER, "fragment", &fragment_source) {
                Ok(shader) => shader,
                Err(e) => {
                    gl.delete_shader(vertex);
                    return Err(e);
                }
            };

            let program = gl.create_program().map_err(ShaderError::Create)?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // shaders are no longer needed once the program is linked
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            log::info!(
                "shader program linked from {} and {}",
                vertex_path.as_ref().display(),
                fragment_path.as_ref().display()
            );
            Ok(Self { program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
        }
    }
}

unsafe fn compile(
    gl: &glow::Context,
    shader_type: u32,
    stage: &'static str,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shipped_sources() {
        let (vertex, fragment) = load_sources("shaders/basic.vert", "shaders/basic.frag").unwrap();

        assert!(vertex.starts_with("#version 460 core"));
        assert!(fragment.starts_with("#version 460 core"));
        assert!(vertex.contains("gl_Position"));
        assert!(fragment.contains("texture("));
    }

    #[test]
    fn test_missing_source_file() {
        let result = load_sources("shaders/missing.vert", "shaders/basic.frag");
        assert!(matches!(result, Err(ShaderError::Io { .. })));
    }
}
