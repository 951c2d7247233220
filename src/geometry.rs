// src/geometry.rs

//! Cube-based body-part geometry.
//!
//! A character is six axis-aligned boxes (head, torso, two arms, two legs),
//! each optionally doubled by a slightly inflated overlay box. Vertices are
//! generated in model space around each part's local origin; the part's
//! world position and rotation pivot come from fixed tables, not from the
//! skin.
//!
//! Vertex order per face is the UV contract with the rasterizer: top-left,
//! top-right, bottom-right, bottom-left, as seen from outside the cube.
//! Reorder these and every texture shows up flipped or rotated.

use crate::math::Vec3;
use crate::regions::face_regions_for;
use crate::texture::{SkinFormat, TextureRegion};
use serde::{Deserialize, Serialize};

/// The fixed set of body parts. Never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Head,
        BodyPart::Torso,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];
}

/// Classic (4px wide) or slim (3px wide) arm geometry. Selected once per
/// render and applied to both arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmVariant {
    #[default]
    Classic,
    Slim,
}

/// Base skin layer or the inflated second-skin overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Base,
    Overlay,
}

/// Cube face names, fixed order right, left, top, bottom, front, back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceName {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl FaceName {
    pub const ALL: [FaceName; 6] = [
        FaceName::Right,
        FaceName::Left,
        FaceName::Top,
        FaceName::Bottom,
        FaceName::Front,
        FaceName::Back,
    ];

    /// Outward unit normal in model space.
    pub fn normal(self) -> Vec3 {
        match self {
            FaceName::Right => Vec3::new(1.0, 0.0, 0.0),
            FaceName::Left => Vec3::new(-1.0, 0.0, 0.0),
            FaceName::Top => Vec3::new(0.0, 1.0, 0.0),
            FaceName::Bottom => Vec3::new(0.0, -1.0, 0.0),
            FaceName::Front => Vec3::new(0.0, 0.0, 1.0),
            FaceName::Back => Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

/// One textured face of a body-part cube, in model space, unrotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeFace {
    pub name: FaceName,
    /// Top-left, top-right, bottom-right, bottom-left as seen from outside.
    pub vertices: [Vec3; 4],
    pub uv: TextureRegion,
    pub normal: Vec3,
}

/// All six faces of one body-part layer, plus where it sits and where it
/// bends. Rebuilt fresh for every render; pure data, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPartMesh {
    pub part: BodyPart,
    pub layer: Layer,
    pub faces: [CubeFace; 6],
    pub position: Vec3,
    pub pivot: Vec3,
}

impl BodyPartMesh {
    pub fn is_overlay(&self) -> bool {
        self.layer == Layer::Overlay
    }
}

/// Cube dimensions in atlas-pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Dimensions {
    width: f32,
    height: f32,
    depth: f32,
}

fn part_dimensions(part: BodyPart, variant: ArmVariant) -> Dimensions {
    match part {
        BodyPart::Head => Dimensions {
            width: 8.0,
            height: 8.0,
            depth: 8.0,
        },
        BodyPart::Torso => Dimensions {
            width: 8.0,
            height: 12.0,
            depth: 4.0,
        },
        BodyPart::LeftArm | BodyPart::RightArm => Dimensions {
            width: match variant {
                ArmVariant::Classic => 4.0,
                ArmVariant::Slim => 3.0,
            },
            height: 12.0,
            depth: 4.0,
        },
        BodyPart::LeftLeg | BodyPart::RightLeg => Dimensions {
            width: 4.0,
            height: 12.0,
            depth: 4.0,
        },
    }
}

/// World position of each part's local origin. Model origin is mid-torso
/// height, Y up; the whole figure spans roughly 32 units of height.
fn part_position(part: BodyPart) -> Vec3 {
    match part {
        BodyPart::Head => Vec3::new(0.0, 4.0, 0.0),
        BodyPart::Torso => Vec3::new(0.0, -6.0, 0.0),
        BodyPart::LeftArm => Vec3::new(4.0, -2.0, 2.0),
        BodyPart::RightArm => Vec3::new(-4.0, -2.0, 2.0),
        BodyPart::LeftLeg => Vec3::new(2.0, -12.0, 0.0),
        BodyPart::RightLeg => Vec3::new(-2.0, -12.0, 0.0),
    }
}

/// Rotation pivot relative to the part's local origin: head at the neck,
/// arms at the shoulder, legs at the hip, torso at its top edge.
fn part_pivot(part: BodyPart) -> Vec3 {
    match part {
        BodyPart::Head => Vec3::new(0.0, -4.0, 0.0),
        BodyPart::Torso => Vec3::new(0.0, 6.0, 0.0),
        BodyPart::LeftArm => Vec3::new(-1.0, 4.0, 0.0),
        BodyPart::RightArm => Vec3::new(1.0, 4.0, 0.0),
        BodyPart::LeftLeg | BodyPart::RightLeg => Vec3::new(0.0, 6.0, 0.0),
    }
}

/// Model-space vertices for one box face, in the fixed TL/TR/BR/BL order.
fn face_vertices(dims: Dimensions, face: FaceName) -> [Vec3; 4] {
    let w = dims.width / 2.0;
    let h = dims.height / 2.0;
    let d = dims.depth / 2.0;

    match face {
        // +Z, toward the viewer
        FaceName::Front => [
            Vec3::new(-w, h, d),
            Vec3::new(w, h, d),
            Vec3::new(w, -h, d),
            Vec3::new(-w, -h, d),
        ],
        // -Z; mirrored so its texture reads correctly from behind
        FaceName::Back => [
            Vec3::new(w, h, -d),
            Vec3::new(-w, h, -d),
            Vec3::new(-w, -h, -d),
            Vec3::new(w, -h, -d),
        ],
        // +X
        FaceName::Right => [
            Vec3::new(w, h, d),
            Vec3::new(w, h, -d),
            Vec3::new(w, -h, -d),
            Vec3::new(w, -h, d),
        ],
        // -X
        FaceName::Left => [
            Vec3::new(-w, h, -d),
            Vec3::new(-w, h, d),
            Vec3::new(-w, -h, d),
            Vec3::new(-w, -h, -d),
        ],
        // +Y; "top" row of the texture is the back edge
        FaceName::Top => [
            Vec3::new(-w, h, -d),
            Vec3::new(w, h, -d),
            Vec3::new(w, h, d),
            Vec3::new(-w, h, d),
        ],
        // -Y; "top" row of the texture is the front edge
        FaceName::Bottom => [
            Vec3::new(-w, -h, d),
            Vec3::new(w, -h, d),
            Vec3::new(w, -h, -d),
            Vec3::new(-w, -h, -d),
        ],
    }
}

/// Build the mesh for one body part layer.
pub fn build_part_mesh(
    part: BodyPart,
    layer: Layer,
    variant: ArmVariant,
    format: SkinFormat,
) -> BodyPartMesh {
    let mut dims = part_dimensions(part, variant);

    // Overlay boxes are uniformly inflated so they never sit coincident
    // with the base surface.
    if layer == Layer::Overlay {
        let inflate = if part == BodyPart::Head { 0.5 } else { 0.25 };
        dims.width += inflate * 2.0;
        dims.height += inflate * 2.0;
        dims.depth += inflate * 2.0;
    }

    let regions = face_regions_for(format, part, layer, variant);
    let faces = FaceName::ALL.map(|face| CubeFace {
        name: face,
        vertices: face_vertices(dims, face),
        uv: regions.get(face),
        normal: face.normal(),
    });

    BodyPartMesh {
        part,
        layer,
        faces,
        position: part_position(part),
        pivot: part_pivot(part),
    }
}

/// Build every mesh of the character: six base meshes, plus six overlay
/// meshes when `include_overlay` is set. (Callers disable the overlay for
/// legacy atlases, which have no overlay rows.)
pub fn build_character_meshes(
    variant: ArmVariant,
    include_overlay: bool,
    format: SkinFormat,
) -> Vec<BodyPartMesh> {
    let mut meshes = Vec::with_capacity(if include_overlay { 12 } else { 6 });
    for part in BodyPart::ALL {
        meshes.push(build_part_mesh(part, Layer::Base, variant, format));
        if include_overlay {
            meshes.push(build_part_mesh(part, Layer::Overlay, variant, format));
        }
    }
    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::face_normal;

    #[test]
    fn test_mesh_counts() {
        // Contract: 6 base meshes, 12 with overlays
        let base_only = build_character_meshes(ArmVariant::Classic, false, SkinFormat::Modern);
        assert_eq!(base_only.len(), 6);
        assert!(base_only.iter().all(|m| !m.is_overlay()));

        let with_overlay = build_character_meshes(ArmVariant::Classic, true, SkinFormat::Modern);
        assert_eq!(with_overlay.len(), 12);
        assert_eq!(with_overlay.iter().filter(|m| m.is_overlay()).count(), 6);
    }

    #[test]
    fn test_every_mesh_has_six_faces_in_order() {
        // Contract: faces come in the fixed right/left/top/bottom/front/back
        // order on every mesh
        for mesh in build_character_meshes(ArmVariant::Classic, true, SkinFormat::Modern) {
            let names: Vec<FaceName> = mesh.faces.iter().map(|f| f.name).collect();
            assert_eq!(names, FaceName::ALL.to_vec());
        }
    }

    #[test]
    fn test_winding_matches_outward_normal() {
        // Contract: the TL/TR/BR/BL winding of each face produces a
        // geometric normal equal to the face's declared outward normal
        let mesh = build_part_mesh(
            BodyPart::Head,
            Layer::Base,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        for face in &mesh.faces {
            let [v0, v1, _, v3] = face.vertices;
            // TL->TR and TL->BL edges; their cross points inward for a
            // screen-wound quad, so flip it to compare against outward.
            let n = face_normal(v0, v1, v3).scale(-1.0);
            assert!(
                (n.x - face.normal.x).abs() < 1e-5
                    && (n.y - face.normal.y).abs() < 1e-5
                    && (n.z - face.normal.z).abs() < 1e-5,
                "{:?}: winding normal {:?} != declared {:?}",
                face.name,
                n,
                face.normal
            );
        }
    }

    #[test]
    fn test_head_dimensions() {
        // Contract: head is an 8x8x8 cube centered on its origin
        let mesh = build_part_mesh(
            BodyPart::Head,
            Layer::Base,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        for face in &mesh.faces {
            for v in &face.vertices {
                assert!(v.x.abs() <= 4.0 && v.y.abs() <= 4.0 && v.z.abs() <= 4.0);
            }
        }
    }

    #[test]
    fn test_overlay_inflation() {
        // Contract: overlay head is inflated by 0.5 per axis-half, arms by
        // 0.25
        let head = build_part_mesh(
            BodyPart::Head,
            Layer::Overlay,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        let max_x = head
            .faces
            .iter()
            .flat_map(|f| f.vertices.iter())
            .fold(0.0f32, |acc, v| acc.max(v.x));
        assert_eq!(max_x, 4.5);

        let arm = build_part_mesh(
            BodyPart::RightArm,
            Layer::Overlay,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        let max_x = arm
            .faces
            .iter()
            .flat_map(|f| f.vertices.iter())
            .fold(0.0f32, |acc, v| acc.max(v.x));
        assert_eq!(max_x, 2.25);
    }

    #[test]
    fn test_slim_arms_are_narrower() {
        // Contract: slim arm boxes are 3 units wide, classic 4
        let classic = build_part_mesh(
            BodyPart::LeftArm,
            Layer::Base,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        let slim = build_part_mesh(
            BodyPart::LeftArm,
            Layer::Base,
            ArmVariant::Slim,
            SkinFormat::Modern,
        );
        let width = |m: &BodyPartMesh| {
            let xs: Vec<f32> = m.faces[0].vertices.iter().map(|v| v.x).collect();
            xs.iter().cloned().fold(f32::MIN, f32::max) * 2.0
        };
        assert_eq!(width(&classic), 4.0);
        assert_eq!(width(&slim), 3.0);
    }

    #[test]
    fn test_pivots_and_positions_are_fixed_constants() {
        // Contract: arms pivot at the shoulder, legs at the hip, head at
        // the neck, independent of variant and layer
        let head = build_part_mesh(
            BodyPart::Head,
            Layer::Base,
            ArmVariant::Slim,
            SkinFormat::Modern,
        );
        assert_eq!(head.pivot, Vec3::new(0.0, -4.0, 0.0));
        assert_eq!(head.position, Vec3::new(0.0, 4.0, 0.0));

        let leg = build_part_mesh(
            BodyPart::LeftLeg,
            Layer::Overlay,
            ArmVariant::Classic,
            SkinFormat::Modern,
        );
        assert_eq!(leg.pivot, Vec3::new(0.0, 6.0, 0.0));
        assert_eq!(leg.position, Vec3::new(2.0, -12.0, 0.0));
    }
}
