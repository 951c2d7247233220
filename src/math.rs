// src/math.rs

//! 3D vector, rotation and projection math for the render pipeline.
//!
//! Everything in this module is a pure, stateless function over immutable
//! value types; the rasterizer and geometry builder compose these to move
//! model-space cube vertices into screen space.
//!
//! Conventions (these must stay consistent across the whole pipeline):
//! - `+X` is the viewer's right, `+Y` is up, `+Z` is toward the viewer.
//! - Euler angles are degrees. A [`Rotation3`] is applied in the fixed order
//!   roll (Z), then pitch (X), then yaw (Y).
//! - Screen Y grows downward; projection flips it.
//!
//! Axis rotations reduce their angle modulo 360 before converting to
//! radians, so a yaw of 720 produces the same bits as a yaw of 0.

use serde::{Deserialize, Serialize};

/// A point or direction in model/camera space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the zero vector for zero-length input rather than NaN.
    pub fn normalized(self) -> Vec3 {
        let len = self.dot(self).sqrt();
        if len == 0.0 {
            Vec3::ZERO
        } else {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A projected point in screen space (pixels, Y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Euler rotation in degrees. Applied roll first, then pitch, then yaw.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation3 {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation3 {
    pub const NONE: Rotation3 = Rotation3::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// True when every component is a finite number (rejects NaN and
    /// infinities; range is deliberately not checked).
    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

/// Orbiting camera description: yaw angle and elevation in degrees plus a
/// uniform zoom factor. `angle=0` faces the character's front, `angle=90`
/// its left side, `angle=180` its back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub angle: f32,
    pub elevation: f32,
    pub zoom: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            angle: 25.0,
            elevation: 10.0,
            zoom: 1.0,
        }
    }
}

/// Reduce an angle in degrees to `[0, 360)` before trig. Keeps rendering
/// deterministic for out-of-range pose angles: 720 and 0 are the same bits.
fn reduced_radians(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0).to_radians()
}

/// Rotate a point around the X axis (pitch).
pub fn rotate_x(p: Vec3, degrees: f32) -> Vec3 {
    let (sin, cos) = reduced_radians(degrees).sin_cos();
    Vec3 {
        x: p.x,
        y: p.y * cos - p.z * sin,
        z: p.y * sin + p.z * cos,
    }
}

/// Rotate a point around the Y axis (yaw).
pub fn rotate_y(p: Vec3, degrees: f32) -> Vec3 {
    let (sin, cos) = reduced_radians(degrees).sin_cos();
    Vec3 {
        x: p.x * cos + p.z * sin,
        y: p.y,
        z: -p.x * sin + p.z * cos,
    }
}

/// Rotate a point around the Z axis (roll).
pub fn rotate_z(p: Vec3, degrees: f32) -> Vec3 {
    let (sin, cos) = reduced_radians(degrees).sin_cos();
    Vec3 {
        x: p.x * cos - p.y * sin,
        y: p.x * sin + p.y * cos,
        z: p.z,
    }
}

/// Apply an Euler rotation in the fixed roll -> pitch -> yaw order.
///
/// This order is the contract between the pose tables and the renderer;
/// changing it changes what every preset pose looks like.
pub fn apply_rotation(p: Vec3, rotation: Rotation3) -> Vec3 {
    let p = rotate_z(p, rotation.roll);
    let p = rotate_x(p, rotation.pitch);
    rotate_y(p, rotation.yaw)
}

/// Rotate a point around a pivot: translate to the pivot origin, rotate,
/// translate back.
pub fn rotate_around_pivot(p: Vec3, pivot: Vec3, rotation: Rotation3) -> Vec3 {
    apply_rotation(p - pivot, rotation) + pivot
}

/// Camera view transform: rotate the scene by `-angle` around Y, then
/// `-elevation` around X, then scale by `zoom`.
///
/// The negations make a positive angle orbit the *camera* clockwise around
/// the subject instead of spinning the subject.
pub fn view_transform(p: Vec3, view: &ViewConfig) -> Vec3 {
    let p = rotate_y(p, -view.angle);
    let p = rotate_x(p, -view.elevation);
    p.scale(view.zoom)
}

/// Orthographic projection to screen space, centered on the canvas midpoint
/// with Y flipped (screen Y grows downward).
pub fn project_orthographic(p: Vec3, canvas_width: u32, canvas_height: u32, scale: f32) -> Point2 {
    let center_x = canvas_width as f32 / 2.0;
    let center_y = canvas_height as f32 / 2.0;
    Point2 {
        x: center_x + p.x * scale,
        y: center_y - p.y * scale,
    }
}

/// Perspective projection variant. Divides by a depth-dependent scale;
/// provided for completeness, the pipeline default is orthographic.
pub fn project_perspective(
    p: Vec3,
    canvas_width: u32,
    canvas_height: u32,
    fov_degrees: f32,
    distance: f32,
) -> Point2 {
    let center_x = canvas_width as f32 / 2.0;
    let center_y = canvas_height as f32 / 2.0;
    let fov_rad = fov_degrees.to_radians();
    let scale = distance / (distance + p.z);
    let focal = canvas_width as f32 / (2.0 * (fov_rad / 2.0).tan());
    Point2 {
        x: center_x + p.x * scale * focal,
        y: center_y - p.y * scale * focal,
    }
}

/// Average Z of a set of camera-space points, used as a quad's sort depth.
pub fn average_depth(points: &[Vec3]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.z).sum::<f32>() / points.len() as f32
}

/// Face normal from three vertices (counter-clockwise winding).
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalized()
}

/// Back-face test: a face is visible when its normal points toward the
/// camera, i.e. against the view direction.
pub fn is_face_visible(normal: Vec3, view_direction: Vec3) -> bool {
    normal.dot(view_direction) < 0.0
}
