//! A recording device: the test double behind the GPU contract.
//!
//! Hands out sequential handles and records every uniform and draw so tests
//! and the headless demo can assert on what the driver submitted.

use std::collections::HashMap;

use glam::{DVec3, Vec3};

use crate::{
    BlendFactor, BlendOp, GridVertex, MeshHandle, PrimitiveType, RenderDevice, RenderError,
    ShaderHandle, TextureFormat, TextureHandle, UniformValue,
};

/// One recorded draw submission.
#[derive(Clone, Debug)]
pub struct DrawCall {
    pub primitive: PrimitiveType,
    pub shader: ShaderHandle,
    pub mesh: MeshHandle,
    pub position: DVec3,
    pub scale: Vec3,
}

/// In-memory [`RenderDevice`] implementation.
#[derive(Default)]
pub struct RecordingDevice {
    next_handle: u32,
    shaders: Vec<ShaderHandle>,
    textures: HashMap<TextureHandle, (u32, u32, u32)>,
    texture_data: HashMap<TextureHandle, Vec<f32>>,
    meshes: HashMap<MeshHandle, (usize, usize)>,
    uniforms: HashMap<(ShaderHandle, String), UniformValue>,
    draws: Vec<DrawCall>,
    render_target: Option<TextureHandle>,
}

impl RecordingDevice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    /// All draws submitted so far.
    #[must_use]
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// The last value set for a uniform, if any.
    #[must_use]
    pub fn uniform(&self, shader: ShaderHandle, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(&(shader, name.to_owned()))
    }

    /// Dimensions `(width, height, layers)` of a created texture.
    #[must_use]
    pub fn texture_dimensions(&self, texture: TextureHandle) -> Option<(u32, u32, u32)> {
        self.textures.get(&texture).copied()
    }

    /// Raw texel data uploaded into a texture.
    #[must_use]
    pub fn texture_data(&self, texture: TextureHandle) -> Option<&[f32]> {
        self.texture_data.get(&texture).map(Vec::as_slice)
    }

    /// Vertex and index counts of an uploaded mesh.
    #[must_use]
    pub fn mesh_sizes(&self, mesh: MeshHandle) -> Option<(usize, usize)> {
        self.meshes.get(&mesh).copied()
    }

    /// Number of shader programs created.
    #[must_use]
    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// The currently bound render target, if any.
    #[must_use]
    pub fn render_target(&self) -> Option<TextureHandle> {
        self.render_target
    }

    /// Forget recorded draws, keeping created resources.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl RenderDevice for RecordingDevice {
    fn create_shader_program(
        &mut self,
        vertex_source: &str,
        pixel_source: &str,
    ) -> Result<ShaderHandle, RenderError> {
        if vertex_source.trim().is_empty() || pixel_source.trim().is_empty() {
            return Err(RenderError::ShaderCompilation(
                "empty shader source".to_owned(),
            ));
        }
        let handle = ShaderHandle(self.next());
        self.shaders.push(handle);
        Ok(handle)
    }

    fn create_render_texture(
        &mut self,
        width: u32,
        height: u32,
        layers: u32,
        _format: TextureFormat,
    ) -> Result<TextureHandle, RenderError> {
        if width == 0 || height == 0 || layers == 0 {
            return Err(RenderError::ResourceCreation(format!(
                "zero-sized texture {width}x{height}x{layers}"
            )));
        }
        let handle = TextureHandle(self.next());
        self.textures.insert(handle, (width, height, layers));
        Ok(handle)
    }

    fn upload_texture_data(&mut self, texture: TextureHandle, data: &[f32]) {
        self.texture_data.insert(texture, data.to_vec());
    }

    fn create_mesh(
        &mut self,
        vertices: &[GridVertex],
        indices: &[u32],
    ) -> Result<MeshHandle, RenderError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(RenderError::InvalidMesh("empty vertex or index data".to_owned()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RenderError::InvalidMesh(format!(
                "index {bad} out of bounds for {} vertices",
                vertices.len()
            )));
        }
        let handle = MeshHandle(self.next());
        self.meshes.insert(handle, (vertices.len(), indices.len()));
        Ok(handle)
    }

    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) {
        // Every uniform name is accepted: the contract is to no-op on
        // unknown names, and a recorder has no shader reflection to
        // distinguish them.
        self.uniforms.insert((shader, name.to_owned()), value);
    }

    fn set_render_target(&mut self, target: Option<TextureHandle>) {
        self.render_target = target;
    }

    fn clear(&mut self, _color: [f32; 4]) {}

    fn set_blend_func(&mut self, _src: BlendFactor, _dst: BlendFactor, _op: BlendOp) {}

    fn draw(
        &mut self,
        primitive: PrimitiveType,
        shader: ShaderHandle,
        mesh: MeshHandle,
        transform: &crate::Transform,
    ) {
        self.draws.push(DrawCall {
            primitive,
            shader,
            mesh,
            position: transform.position(),
            scale: transform.scale(),
        });
    }
}
