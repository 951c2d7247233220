// src/lib.rs

//! `skinrender` — a self-contained software 3D pipeline that renders a
//! blocky voxel-skin avatar into a raw RGBA pixel buffer.
//!
//! No GPU, no windowing system, no 3D engine: body parts are fixed
//! axis-aligned boxes textured from a flat skin atlas, posed by
//! pivot-relative Euler rotations, projected through a virtual orbiting
//! camera, and painted back-to-front with per-pixel alpha compositing.
//!
//! The crate neither fetches nor decodes images; callers hand in a decoded
//! RGBA atlas (legacy 64x32 or modern 64x64) and get back a pixel buffer
//! plus metadata. A render is a pure synchronous function over its inputs:
//! no I/O, no shared state, safe to run from any number of threads at once.
//!
//! ```no_run
//! use skinrender::{render, RenderOptions};
//!
//! # fn main() -> Result<(), skinrender::RenderError> {
//! let atlas: Vec<u8> = vec![0; 64 * 64 * 4]; // decoded RGBA skin
//! let output = render(&atlas, 64, 64, &RenderOptions::default())?;
//! assert_eq!(output.pixels.len(), (output.width * output.height * 4) as usize);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod options;
pub mod pose;
pub mod regions;
pub mod renderer;
pub mod texture;

pub use error::RenderError;
pub use geometry::{build_character_meshes, ArmVariant, BodyPart, BodyPartMesh, FaceName, Layer};
pub use math::{Point2, Rotation3, Vec3, ViewConfig};
pub use options::{PoseSelection, RenderOptions};
pub use pose::{
    get_pose, interpolate, resolve_pose, validate_pose, BodyPartPose, PoseDefinition,
    POSE_CROSSED_ARMS, POSE_POINTING, POSE_RUNNING, POSE_SITTING, POSE_STANDING, POSE_WALKING,
    POSE_WAVING,
};
pub use renderer::{render, RenderInfo, RenderOutput};
pub use texture::{Rgba, SkinFormat, SkinTexture, TextureRegion};
