/// WGSL shader for lit, instanced tiles.
///
/// Must stay in sync with `frame::Uniforms` and `frame::MAX_LIGHTS`.
pub const TILE_SHADER: &str = r#"
struct PositionalLight {
    position: vec4<f32>,
    color: vec4<f32>,
    cone: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<PositionalLight, 4>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    var lit = uniforms.ambient.rgb;
    for (var i = 0u; i < uniforms.light_count.x; i = i + 1u) {
        let light = uniforms.lights[i];
        let l = normalize(light.position.xyz - in.world_pos);
        var strength = max(dot(n, l), 0.0);
        if (light.cone.z > 0.5) {
            // Spot lights aim at the scene origin.
            let axis = normalize(-light.position.xyz);
            strength = strength * smoothstep(light.cone.x, light.cone.y, dot(-l, axis));
        }
        lit = lit + light.color.rgb * strength;
    }
    return vec4<f32>(in.color.rgb * lit, in.color.a);
}
"#;
