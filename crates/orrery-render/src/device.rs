//! The opaque GPU device contract.
//!
//! The LOD core only ever talks to the GPU through this trait: resource
//! creation at startup, uniforms and draws per frame. Real backends live
//! outside this workspace; tests and the headless demo use
//! [`RecordingDevice`](crate::RecordingDevice).

use glam::{Mat3, Vec3};

use crate::{GridVertex, RenderError, Transform};

/// Opaque handle to a compiled shader program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque handle to an uploaded vertex/index buffer pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Pixel format for render/data textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    /// Four f32 channels per texel; used for displacement/normal data.
    Rgba32Float,
}

/// A uniform value handed to the device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Texture(TextureHandle),
}

/// Primitive topology for draw calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    TriangleList,
}

/// Blend factor for [`RenderDevice::set_blend_func`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    InvSrcAlpha,
}

/// Blend operator for [`RenderDevice::set_blend_func`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendOp {
    Add,
}

/// The boundary between the LOD core and the GPU.
pub trait RenderDevice {
    /// Compile and link a shader program from vertex and pixel sources.
    fn create_shader_program(
        &mut self,
        vertex_source: &str,
        pixel_source: &str,
    ) -> Result<ShaderHandle, RenderError>;

    /// Create a texture that can serve as a render target or data texture.
    /// `layers` stacks multiple `width × height` images in one handle.
    fn create_render_texture(
        &mut self,
        width: u32,
        height: u32,
        layers: u32,
        format: TextureFormat,
    ) -> Result<TextureHandle, RenderError>;

    /// Upload raw texel data into a texture created by
    /// [`create_render_texture`](Self::create_render_texture).
    fn upload_texture_data(&mut self, texture: TextureHandle, data: &[f32]);

    /// Upload a vertex/index pair and return a handle for drawing.
    fn create_mesh(
        &mut self,
        vertices: &[GridVertex],
        indices: &[u32],
    ) -> Result<MeshHandle, RenderError>;

    /// Set a named uniform. Silently no-ops when the shader has no uniform
    /// of that name; some uniforms are legitimately absent in shader
    /// variants and callers set them unconditionally.
    fn set_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue);

    /// Redirect subsequent draws into `target`, or back to the frame buffer
    /// with `None`.
    fn set_render_target(&mut self, target: Option<TextureHandle>);

    /// Clear the current render target.
    fn clear(&mut self, color: [f32; 4]);

    /// Configure blending for subsequent draws.
    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor, op: BlendOp);

    /// Draw an uploaded mesh with the given shader and world transform.
    fn draw(
        &mut self,
        primitive: PrimitiveType,
        shader: ShaderHandle,
        mesh: MeshHandle,
        transform: &Transform,
    );
}
