// src/renderer.rs

//! The rasterizer/compositor and the pipeline orchestrator.
//!
//! One render is a single linear pass: build meshes for the resolved pose,
//! transform and project every cube face, cull back faces, depth-sort the
//! surviving quads (painter's algorithm, farthest first), then scan each
//! quad's bounding box and composite nearest-neighbor texture samples into
//! the output buffer. No state survives between calls; the pixel buffer is
//! exclusively owned by the pass that fills it.

use crate::error::RenderError;
use crate::geometry::{build_character_meshes, BodyPart, BodyPartMesh, FaceName};
use crate::math::{
    average_depth, project_orthographic, rotate_around_pivot, view_transform, Point2, Vec3,
    ViewConfig,
};
use crate::options::{PoseSelection, RenderOptions};
use crate::pose::{check_pose, resolve_pose, PoseDefinition};
use crate::texture::{Rgba, SkinTexture, TextureRegion};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

/// The figure spans 32 model units head to toe.
const MODEL_HEIGHT: f32 = 32.0;

/// Fraction of the canvas height the figure is fitted to.
const FIT_FACTOR: f32 = 0.85;

/// Quads closer together than this share a depth bucket and fall back to
/// the base-before-overlay ordering, so skin and overlay never invert.
const DEPTH_EPSILON: f32 = 0.1;

/// A face after transform and projection, queued for rasterization.
/// Created during projection, consumed by the same frame's paint loop.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedQuad {
    /// Screen-space corners, same TL/TR/BR/BL order as the model face.
    pub screen: [Point2; 4],
    pub uv: TextureRegion,
    /// Average camera-space Z; larger is nearer to the camera.
    pub depth: f32,
    pub is_overlay: bool,
    pub part: BodyPart,
    pub face: FaceName,
}

/// Descriptive metadata returned alongside the pixel buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInfo {
    pub skin_format: crate::texture::SkinFormat,
    pub arm_variant: crate::geometry::ArmVariant,
    pub pose_name: String,
    pub has_visible_overlay: bool,
}

/// A finished render: raw RGBA pixels plus metadata.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Row-major RGBA, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub info: RenderInfo,
}

/// Transform, cull and project every face of every mesh under `pose`.
///
/// Returned quads are unsorted; [`sort_quads`] establishes paint order.
pub fn collect_quads(
    meshes: &[BodyPartMesh],
    pose: &PoseDefinition,
    view: &ViewConfig,
    canvas_width: u32,
    canvas_height: u32,
) -> Vec<ProjectedQuad> {
    let scale = canvas_height as f32 * FIT_FACTOR / MODEL_HEIGHT;
    let mut quads = Vec::with_capacity(meshes.len() * 6);

    for mesh in meshes {
        let part_pose = pose.part(mesh.part);
        let offset = part_pose.offset.unwrap_or(Vec3::ZERO);

        for face in &mesh.faces {
            // Pose rotation about the part pivot, then world placement,
            // then the camera transform.
            let transformed = face.vertices.map(|v| {
                let v = rotate_around_pivot(v, mesh.pivot, part_pose.rotation);
                view_transform(v + mesh.position + offset, view)
            });

            // Back-face cull in camera space. With the TL/TR/BR/BL winding,
            // a camera-facing quad has a negative-Z winding normal.
            let edge1 = transformed[1] - transformed[0];
            let edge2 = transformed[3] - transformed[0];
            if edge1.cross(edge2).z >= 0.0 {
                continue;
            }

            let screen =
                transformed.map(|v| project_orthographic(v, canvas_width, canvas_height, scale));

            quads.push(ProjectedQuad {
                screen,
                uv: face.uv,
                depth: average_depth(&transformed),
                is_overlay: mesh.is_overlay(),
                part: mesh.part,
                face: face.name,
            });
        }
    }

    quads
}

/// Painter's-algorithm ordering: farthest quads first, and within a depth
/// bucket base layers before overlays.
pub fn sort_quads(quads: &mut [ProjectedQuad]) {
    quads.sort_by(|a, b| {
        if (a.depth - b.depth).abs() > DEPTH_EPSILON {
            a.depth.partial_cmp(&b.depth).unwrap_or(Ordering::Equal)
        } else {
            a.is_overlay.cmp(&b.is_overlay)
        }
    });
}

/// Four-edge same-sign cross-product containment test.
fn point_in_quad(x: f32, y: f32, quad: &[Point2; 4]) -> bool {
    let [p0, p1, p2, p3] = *quad;
    let cross = |a: Point2, b: Point2| (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);

    let c0 = cross(p0, p1);
    let c1 = cross(p1, p2);
    let c2 = cross(p2, p3);
    let c3 = cross(p3, p0);

    let all_non_negative = c0 >= 0.0 && c1 >= 0.0 && c2 >= 0.0 && c3 >= 0.0;
    let all_non_positive = c0 <= 0.0 && c1 <= 0.0 && c2 <= 0.0 && c3 <= 0.0;
    all_non_negative || all_non_positive
}

/// Inverse-bilinear UV solve for a near-parallelogram quad.
///
/// Treats the top and left edges as a 2x2 linear basis from the top-left
/// corner and inverts it by Cramer's rule. Deliberately not
/// perspective-correct: under orthographic projection the quads are
/// parallelograms and this is exact, which preserves the pixel-art look.
/// A degenerate quad (parallel or zero-length edges) falls back to the
/// center texel rather than failing.
fn quad_uv(x: f32, y: f32, quad: &[Point2; 4]) -> (f32, f32) {
    let [p0, p1, _, p3] = *quad;

    let top_x = p1.x - p0.x;
    let top_y = p1.y - p0.y;
    let left_x = p3.x - p0.x;
    let left_y = p3.y - p0.y;

    let det = top_x * left_y - top_y * left_x;
    if det.abs() < 1e-4 {
        return (0.5, 0.5);
    }

    let dx = x - p0.x;
    let dy = y - p0.y;
    let u = (dx * left_y - dy * left_x) / det;
    let v = (top_x * dy - top_y * dx) / det;
    (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// Rasterize one quad into the frame buffer. Returns how many pixels were
/// composited (zero when the quad is off-canvas or fully transparent).
fn rasterize_quad(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    texture: &SkinTexture,
    quad: &ProjectedQuad,
) -> usize {
    let xs = quad.screen.map(|p| p.x);
    let ys = quad.screen.map(|p| p.y);
    let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min).floor();
    let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max).ceil();
    let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min).floor();
    let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max).ceil();

    // Clip the bounding box to the canvas.
    let start_x = min_x.max(0.0) as u32;
    let start_y = min_y.max(0.0) as u32;
    let end_x = max_x.min(frame_width as f32).max(0.0) as u32;
    let end_y = max_y.min(frame_height as f32).max(0.0) as u32;
    if start_x >= end_x || start_y >= end_y {
        return 0;
    }

    let mut drawn = 0usize;
    for y in start_y..end_y {
        for x in start_x..end_x {
            let fx = x as f32;
            let fy = y as f32;
            if !point_in_quad(fx, fy, &quad.screen) {
                continue;
            }

            let (u, v) = quad_uv(fx, fy, &quad.screen);
            let src = texture.sample_region_nearest(quad.uv, u, v);
            if src.a == 0 {
                continue;
            }

            let idx = ((y * frame_width + x) * 4) as usize;
            let dst = Rgba::new(frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]);
            frame[idx..idx + 4].copy_from_slice(&src.blend_over(dst).to_bytes());
            drawn += 1;
        }
    }
    drawn
}

/// Render a posed avatar from a decoded RGBA skin atlas.
///
/// The atlas must be 64x64 (modern) or 64x32 (legacy); anything else is
/// [`RenderError::UnsupportedTextureLayout`]. A custom pose that fails
/// validation is [`RenderError::InvalidPose`]. On success the output buffer
/// is complete; there are no partial results.
pub fn render(
    skin_data: &[u8],
    skin_width: u32,
    skin_height: u32,
    options: &RenderOptions,
) -> Result<RenderOutput, RenderError> {
    let texture = SkinTexture::new(skin_data, skin_width, skin_height)?;
    let format = texture.format();

    // Resolve the pose before any geometry work; invalid custom poses
    // abort here.
    let pose: &PoseDefinition = match &options.pose {
        PoseSelection::Named(name) => resolve_pose(name),
        PoseSelection::Custom(def) => {
            check_pose(def)?;
            def
        }
    };

    let include_overlay = options.include_overlay && format.has_overlay();
    let meshes = build_character_meshes(options.arm_variant, include_overlay, format);

    let mut quads = collect_quads(&meshes, pose, &options.view, options.width, options.height);
    sort_quads(&mut quads);

    let mut pixels = vec![0u8; (options.width * options.height * 4) as usize];
    if let Some(bg) = options.background {
        let bytes = bg.to_bytes();
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    let mut has_visible_overlay = false;
    let mut total_drawn = 0usize;
    for quad in &quads {
        // Fully transparent overlay faces are skipped outright; skins
        // without a hat layer render cleanly this way.
        if quad.is_overlay && !texture.region_has_visible_pixels(quad.uv) {
            continue;
        }
        let drawn = rasterize_quad(&mut pixels, options.width, options.height, &texture, quad);
        if drawn > 0 && quad.is_overlay {
            has_visible_overlay = true;
        }
        total_drawn += drawn;
    }

    debug!(
        "rendered {:?} pose={} quads={} pixels={} overlay_visible={}",
        format,
        pose.name,
        quads.len(),
        total_drawn,
        has_visible_overlay
    );

    Ok(RenderOutput {
        pixels,
        width: options.width,
        height: options.height,
        info: RenderInfo {
            skin_format: format,
            arm_variant: options.arm_variant,
            pose_name: pose.name.to_string(),
            has_visible_overlay,
        },
    })
}
