//! Render resource error types.

/// Errors raised while creating GPU-side resources.
///
/// Resource creation happens once at driver construction; any of these is
/// fatal at startup because the renderer cannot proceed without its shaders
/// and buffers. Per-frame spatial queries never produce errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A shader program failed to compile or link.
    #[error("failed to build shader program: {0}")]
    ShaderCompilation(String),

    /// A texture or buffer could not be created.
    #[error("failed to create render resource: {0}")]
    ResourceCreation(String),

    /// Mesh data handed to the device was structurally invalid.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}
