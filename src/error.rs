// src/error.rs

//! Error kinds for the render pipeline.
//!
//! Only two things can actually fail: the atlas has dimensions we do not
//! recognize, or a custom pose is structurally unusable. Everything else in
//! the pipeline is a total function over well-formed input. Degenerate
//! projected quads are recovered locally in the rasterizer (the UV solve
//! falls back to the quad center) and never surface as errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The atlas matches neither the legacy 64x32 nor the modern 64x64
    /// layout. Fatal; nothing is rendered.
    #[error("unsupported texture layout: {width}x{height} (expected 64x32 or 64x64)")]
    UnsupportedTextureLayout { width: u32, height: u32 },

    /// A custom pose definition failed validation. Fatal; raised before any
    /// geometry work.
    #[error("invalid pose: {0}")]
    InvalidPose(String),
}
