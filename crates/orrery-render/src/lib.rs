//! Render-facing leaves of the terrain engine.
//!
//! The GPU itself stays behind the [`RenderDevice`] trait; this crate owns
//! the contract, a recording test double, the shared planar grid mesh, the
//! world transform value, and double-precision frustum culling.

mod device;
mod error;
mod frustum;
mod grid;
mod recording;
mod transform;

pub use device::{
    BlendFactor, BlendOp, MeshHandle, PrimitiveType, RenderDevice, ShaderHandle, TextureFormat,
    TextureHandle, UniformValue,
};
pub use error::RenderError;
pub use frustum::Frustum;
pub use grid::{GridMesh, GridVertex};
pub use recording::{DrawCall, RecordingDevice};
pub use transform::Transform;
