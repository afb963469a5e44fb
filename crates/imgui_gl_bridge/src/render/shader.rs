//! GUI shader program compilation
//!
//! Builds the one program the GUI renderer needs: the vertex stage applies the
//! projection to a 2D position and forwards UV and color, the fragment stage
//! multiplies the sampled texel by the vertex color.

use super::device::{DeviceError, GraphicsDevice, ProgramHandle, ShaderStage, UniformLocation};
use super::vertex_layout::AttributeLocations;
use crate::error::{BridgeError, BridgeResult};

/// Position attribute name
pub const ATTR_POSITION: &str = "a_position";
/// Texture coordinate attribute name
pub const ATTR_UV: &str = "a_uv";
/// Color attribute name
pub const ATTR_COLOR: &str = "a_color";
/// Sampler uniform name
pub const UNIFORM_TEXTURE: &str = "u_texture";
/// Projection uniform name
pub const UNIFORM_PROJECTION: &str = "u_projection";

const VERTEX_SHADER_BODY: &str = "
uniform mat4 u_projection;
in vec2 a_position;
in vec2 a_uv;
in vec4 a_color;
out vec2 v_uv;
out vec4 v_color;
void main() {
    v_uv = a_uv;
    v_color = a_color;
    gl_Position = u_projection * vec4(a_position.xy, 0.0, 1.0);
}
";

const FRAGMENT_SHADER_BODY: &str = "
uniform sampler2D u_texture;
in vec2 v_uv;
in vec4 v_color;
out vec4 o_color;
void main() {
    o_color = v_color * texture(u_texture, v_uv.st);
}
";

/// Uniform locations of the GUI program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocations {
    /// Font/texture sampler
    pub texture: UniformLocation,
    /// Orthographic projection
    pub projection: UniformLocation,
}

/// Linked GUI program with its resolved locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    /// Program object
    pub program: ProgramHandle,
    /// Vertex attribute locations
    pub attributes: AttributeLocations,
    /// Uniform locations
    pub uniforms: UniformLocations,
}

/// Full source of a stage, prefixed by the version directive
pub fn shader_source(glsl_version: &str, stage: ShaderStage) -> String {
    let body = match stage {
        ShaderStage::Vertex => VERTEX_SHADER_BODY,
        ShaderStage::Fragment => FRAGMENT_SHADER_BODY,
    };
    format!("{}\n{}", glsl_version.trim_end(), body)
}

impl ShaderProgram {
    /// Compile, link and resolve the GUI program
    ///
    /// Intermediate shader objects are deleted whether or not linking
    /// succeeds; the program itself is deleted if a location is missing.
    pub fn compile(device: &mut dyn GraphicsDevice, glsl_version: &str) -> BridgeResult<Self> {
        let vertex = device
            .compile_shader(ShaderStage::Vertex, &shader_source(glsl_version, ShaderStage::Vertex))
            .map_err(|e| compile_error(ShaderStage::Vertex, e))?;

        let fragment = match device
            .compile_shader(ShaderStage::Fragment, &shader_source(glsl_version, ShaderStage::Fragment))
        {
            Ok(fragment) => fragment,
            Err(e) => {
                device.delete_shader(vertex);
                return Err(compile_error(ShaderStage::Fragment, e));
            }
        };

        let linked = device.link_program(vertex, fragment);
        device.delete_shader(vertex);
        device.delete_shader(fragment);

        let program = linked.map_err(|e| match e {
            DeviceError::ProgramLink(log) => BridgeError::ProgramLink(log),
            other => BridgeError::Device(other),
        })?;

        match Self::resolve(device, program) {
            Ok(shader) => {
                log::debug!("GUI program {:?} linked: {:?}", program, shader.attributes);
                Ok(shader)
            }
            Err(e) => {
                device.delete_program(program);
                Err(e)
            }
        }
    }

    fn resolve(device: &dyn GraphicsDevice, program: ProgramHandle) -> BridgeResult<Self> {
        let attribute = |name: &'static str| {
            device
                .attribute_location(program, name)
                .ok_or(BridgeError::MissingLocation(name))
        };
        let uniform = |name: &'static str| {
            device
                .uniform_location(program, name)
                .ok_or(BridgeError::MissingLocation(name))
        };

        Ok(Self {
            program,
            attributes: AttributeLocations {
                position: attribute(ATTR_POSITION)?,
                uv: attribute(ATTR_UV)?,
                color: attribute(ATTR_COLOR)?,
            },
            uniforms: UniformLocations {
                texture: uniform(UNIFORM_TEXTURE)?,
                projection: uniform(UNIFORM_PROJECTION)?,
            },
        })
    }

    /// Delete the program object
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_program(self.program);
    }
}

fn compile_error(stage: ShaderStage, error: DeviceError) -> BridgeError {
    match error {
        DeviceError::ShaderCompile(log) => {
            log::error!("{:?} shader failed to compile: {}", stage, log);
            BridgeError::ShaderCompilation { stage, log }
        }
        other => BridgeError::Device(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DeviceCall, RecordingDevice};

    #[test]
    fn test_source_has_version_prefix() {
        let source = shader_source("#version 330 core\n", ShaderStage::Fragment);
        assert!(source.starts_with("#version 330 core\n"));
        assert!(source.contains(UNIFORM_TEXTURE));
    }

    #[test]
    fn test_compile_resolves_locations() {
        let mut device = RecordingDevice::new();
        let shader = ShaderProgram::compile(&mut device, "#version 130").unwrap();

        assert!(shader.program.is_some());
        assert!(device.programs.contains(&shader.program));
        assert_ne!(shader.attributes.position, shader.attributes.uv);
        assert_ne!(shader.uniforms.texture, shader.uniforms.projection);
        // Both stages are released once linked
        assert!(device.shaders.is_empty());
    }

    #[test]
    fn test_fragment_failure_releases_vertex_stage() {
        let mut device = RecordingDevice::new();
        device.fail_shader_stage = Some(ShaderStage::Fragment);

        let result = ShaderProgram::compile(&mut device, "#version 130");

        assert!(matches!(
            result,
            Err(BridgeError::ShaderCompilation { stage: ShaderStage::Fragment, .. })
        ));
        assert!(device.shaders.is_empty());
        assert_eq!(device.count_calls(|c| matches!(c, DeviceCall::LinkProgram)), 0);
    }

    #[test]
    fn test_link_failure() {
        let mut device = RecordingDevice::new();
        device.fail_link = true;

        let result = ShaderProgram::compile(&mut device, "#version 130");

        assert!(matches!(result, Err(BridgeError::ProgramLink(_))));
        assert!(device.shaders.is_empty());
        assert!(device.programs.is_empty());
    }

    #[test]
    fn test_missing_location_deletes_program() {
        let mut device = RecordingDevice::new();
        device.missing_locations.insert(UNIFORM_PROJECTION);

        let result = ShaderProgram::compile(&mut device, "#version 130");

        assert!(matches!(result, Err(BridgeError::MissingLocation(UNIFORM_PROJECTION))));
        assert!(device.programs.is_empty());
    }
}
