#[derive(Debug)]
pub struct FragmentShader {
    //may need additional type design for future backends
    #[allow(dead_code)] //nop implementation does not use
    pub(crate) label: &'static str,
    #[allow(dead_code)] //nop implementation does not use
    pub(crate) wgsl_code: String,
}
#[derive(Debug)]
pub struct VertexShader {
    //may need additional type design for future backends
    #[allow(dead_code)] //nop implementation does not use
    pub(crate) label: &'static str,
    #[allow(dead_code)] //nop implementation does not use
    pub(crate) wgsl_code: String,
}

impl FragmentShader {
    pub fn new(label: &'static str, wgsl_code: String) -> Self {
        Self { label, wgsl_code }
    }
}

impl VertexShader {
    pub fn new(label: &'static str, wgsl_code: String) -> Self {
        Self { label, wgsl_code }
    }
}

/// WGSL source for the built-in textured-quad pipeline.
///
/// Binding layout: group 0 holds the transform uniform at binding 0, the
/// texture at binding 1 and the sampler at binding 2; the position buffer
/// feeds shader location 0 and the texcoord buffer location 1.
pub(crate) const QUAD_SHADER_WGSL: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var quad_texture: texture_2d<f32>;
@group(0) @binding(2) var quad_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(1) texcoord: vec2<f32>) -> VertexOutput {
    var output: VertexOutput;
    output.clip_position = uniforms.mvp * vec4<f32>(position, 0.0, 1.0);
    output.texcoord = texcoord;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(quad_texture, quad_sampler, input.texcoord);
}
"#;

/// The built-in vertex shader for textured quads.
pub fn quad_vertex_shader() -> VertexShader {
    VertexShader::new("textured_quad_vertex", QUAD_SHADER_WGSL.to_string())
}

/// The built-in fragment shader for textured quads.
pub fn quad_fragment_shader() -> FragmentShader {
    FragmentShader::new("textured_quad_fragment", QUAD_SHADER_WGSL.to_string())
}
