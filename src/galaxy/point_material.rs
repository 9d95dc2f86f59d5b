use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
        },
    },
};

const SHADER_ASSET_PATH: &str = "shaders/galaxy_points.wgsl";

/// Additively blended square points with per-vertex colors.
///
/// Each point arrives as a quad whose four vertices share the point center; the vertex
/// shader pushes them apart by `size`, either in view space (size shrinks with distance)
/// or in clip space (fixed size on screen).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GalaxyPointMaterial {
    /// x: point size, y: 1.0 when the size attenuates with distance.
    #[uniform(0)]
    pub settings: Vec4,
    pub alpha_mode: AlphaMode,
}

impl GalaxyPointMaterial {
    pub fn new(size: f32, size_attenuation: bool) -> Self {
        Self {
            settings: Vec4::new(size, if size_attenuation { 1.0 } else { 0.0 }, 0.0, 0.0),
            alpha_mode: AlphaMode::Add,
        }
    }

    pub fn size(&self) -> f32 {
        self.settings.x
    }

    pub fn size_attenuation(&self) -> bool {
        self.settings.y > 0.5
    }
}

impl Material for GalaxyPointMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(1),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // quads always face the camera
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
