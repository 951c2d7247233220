// src/regions.rs

//! Static texture-region table for the skin atlas.
//!
//! Maps (body part, layer, arm variant, cube face) to the rectangle in the
//! atlas holding that face's pixels. The coordinates are the community skin
//! layout and are design constants, never computed from the skin itself.
//!
//! Note on handedness: "right" and "left" region names in the atlas refer
//! to the *character's* perspective, while face names in [`crate::geometry`]
//! use the viewer's axes (+X is the viewer's right). The table below already
//! accounts for the swap: the +X face of a cube carries the character's
//! left-side texture and vice versa.

use crate::geometry::{ArmVariant, BodyPart, FaceName, Layer};
use crate::texture::{SkinFormat, TextureRegion};

/// The six face rectangles of one body-part layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegions {
    pub right: TextureRegion,
    pub left: TextureRegion,
    pub top: TextureRegion,
    pub bottom: TextureRegion,
    pub front: TextureRegion,
    pub back: TextureRegion,
}

impl FaceRegions {
    pub fn get(&self, face: FaceName) -> TextureRegion {
        match face {
            FaceName::Right => self.right,
            FaceName::Left => self.left,
            FaceName::Top => self.top,
            FaceName::Bottom => self.bottom,
            FaceName::Front => self.front,
            FaceName::Back => self.back,
        }
    }
}

const fn region(x: u32, y: u32, width: u32, height: u32) -> TextureRegion {
    TextureRegion::new(x, y, width, height)
}

const HEAD_BASE: FaceRegions = FaceRegions {
    right: region(16, 8, 8, 8),
    front: region(8, 8, 8, 8),
    left: region(0, 8, 8, 8),
    back: region(24, 8, 8, 8),
    top: region(8, 0, 8, 8),
    bottom: region(16, 0, 8, 8),
};

const HEAD_OVERLAY: FaceRegions = FaceRegions {
    right: region(48, 8, 8, 8),
    front: region(40, 8, 8, 8),
    left: region(32, 8, 8, 8),
    back: region(56, 8, 8, 8),
    top: region(40, 0, 8, 8),
    bottom: region(48, 0, 8, 8),
};

const TORSO_BASE: FaceRegions = FaceRegions {
    right: region(28, 20, 4, 12),
    front: region(20, 20, 8, 12),
    left: region(16, 20, 4, 12),
    back: region(32, 20, 8, 12),
    top: region(20, 16, 8, 4),
    bottom: region(28, 16, 8, 4),
};

const TORSO_OVERLAY: FaceRegions = FaceRegions {
    right: region(28, 36, 4, 12),
    front: region(20, 36, 8, 12),
    left: region(16, 36, 4, 12),
    back: region(32, 36, 8, 12),
    top: region(20, 32, 8, 4),
    bottom: region(28, 32, 8, 4),
};

const RIGHT_ARM_CLASSIC_BASE: FaceRegions = FaceRegions {
    right: region(48, 20, 4, 12),
    front: region(44, 20, 4, 12),
    left: region(40, 20, 4, 12),
    back: region(52, 20, 4, 12),
    top: region(44, 16, 4, 4),
    bottom: region(48, 16, 4, 4),
};

const RIGHT_ARM_CLASSIC_OVERLAY: FaceRegions = FaceRegions {
    right: region(48, 36, 4, 12),
    front: region(44, 36, 4, 12),
    left: region(40, 36, 4, 12),
    back: region(52, 36, 4, 12),
    top: region(44, 32, 4, 4),
    bottom: region(48, 32, 4, 4),
};

const RIGHT_ARM_SLIM_BASE: FaceRegions = FaceRegions {
    right: region(47, 20, 4, 12),
    front: region(44, 20, 3, 12),
    left: region(40, 20, 4, 12),
    back: region(51, 20, 3, 12),
    top: region(44, 16, 3, 4),
    bottom: region(47, 16, 3, 4),
};

const RIGHT_ARM_SLIM_OVERLAY: FaceRegions = FaceRegions {
    right: region(47, 36, 4, 12),
    front: region(44, 36, 3, 12),
    left: region(40, 36, 4, 12),
    back: region(51, 36, 3, 12),
    top: region(44, 32, 3, 4),
    bottom: region(47, 32, 3, 4),
};

const LEFT_ARM_CLASSIC_BASE: FaceRegions = FaceRegions {
    right: region(40, 52, 4, 12),
    front: region(36, 52, 4, 12),
    left: region(32, 52, 4, 12),
    back: region(44, 52, 4, 12),
    top: region(36, 48, 4, 4),
    bottom: region(40, 48, 4, 4),
};

const LEFT_ARM_CLASSIC_OVERLAY: FaceRegions = FaceRegions {
    right: region(56, 52, 4, 12),
    front: region(52, 52, 4, 12),
    left: region(48, 52, 4, 12),
    back: region(60, 52, 4, 12),
    top: region(52, 48, 4, 4),
    bottom: region(56, 48, 4, 4),
};

const LEFT_ARM_SLIM_BASE: FaceRegions = FaceRegions {
    right: region(39, 52, 4, 12),
    front: region(36, 52, 3, 12),
    left: region(32, 52, 4, 12),
    back: region(43, 52, 3, 12),
    top: region(36, 48, 3, 4),
    bottom: region(39, 48, 3, 4),
};

const LEFT_ARM_SLIM_OVERLAY: FaceRegions = FaceRegions {
    right: region(55, 52, 4, 12),
    front: region(52, 52, 3, 12),
    left: region(48, 52, 4, 12),
    back: region(59, 52, 3, 12),
    top: region(52, 48, 3, 4),
    bottom: region(55, 48, 3, 4),
};

const RIGHT_LEG_BASE: FaceRegions = FaceRegions {
    right: region(8, 20, 4, 12),
    front: region(4, 20, 4, 12),
    left: region(0, 20, 4, 12),
    back: region(12, 20, 4, 12),
    top: region(4, 16, 4, 4),
    bottom: region(8, 16, 4, 4),
};

const RIGHT_LEG_OVERLAY: FaceRegions = FaceRegions {
    right: region(8, 36, 4, 12),
    front: region(4, 36, 4, 12),
    left: region(0, 36, 4, 12),
    back: region(12, 36, 4, 12),
    top: region(4, 32, 4, 4),
    bottom: region(8, 32, 4, 4),
};

const LEFT_LEG_BASE: FaceRegions = FaceRegions {
    right: region(24, 52, 4, 12),
    front: region(20, 52, 4, 12),
    left: region(16, 52, 4, 12),
    back: region(28, 52, 4, 12),
    top: region(20, 48, 4, 4),
    bottom: region(24, 48, 4, 4),
};

const LEFT_LEG_OVERLAY: FaceRegions = FaceRegions {
    right: region(8, 52, 4, 12),
    front: region(4, 52, 4, 12),
    left: region(0, 52, 4, 12),
    back: region(12, 52, 4, 12),
    top: region(4, 48, 4, 4),
    bottom: region(8, 48, 4, 4),
};

/// Region lookup for the modern 64x64 layout.
pub fn face_regions(part: BodyPart, layer: Layer, variant: ArmVariant) -> &'static FaceRegions {
    use ArmVariant::*;
    use BodyPart::*;
    use Layer::*;
    match (part, layer) {
        (Head, Base) => &HEAD_BASE,
        (Head, Overlay) => &HEAD_OVERLAY,
        (Torso, Base) => &TORSO_BASE,
        (Torso, Overlay) => &TORSO_OVERLAY,
        (RightArm, Base) => match variant {
            Classic => &RIGHT_ARM_CLASSIC_BASE,
            Slim => &RIGHT_ARM_SLIM_BASE,
        },
        (RightArm, Overlay) => match variant {
            Classic => &RIGHT_ARM_CLASSIC_OVERLAY,
            Slim => &RIGHT_ARM_SLIM_OVERLAY,
        },
        (LeftArm, Base) => match variant {
            Classic => &LEFT_ARM_CLASSIC_BASE,
            Slim => &LEFT_ARM_SLIM_BASE,
        },
        (LeftArm, Overlay) => match variant {
            Classic => &LEFT_ARM_CLASSIC_OVERLAY,
            Slim => &LEFT_ARM_SLIM_OVERLAY,
        },
        (RightLeg, Base) => &RIGHT_LEG_BASE,
        (RightLeg, Overlay) => &RIGHT_LEG_OVERLAY,
        (LeftLeg, Base) => &LEFT_LEG_BASE,
        (LeftLeg, Overlay) => &LEFT_LEG_OVERLAY,
    }
}

/// Region lookup that honors the atlas layout.
///
/// Legacy 64x32 atlases store only the right limbs and have no overlay
/// rows, so left limbs resolve to the mirrored right-limb regions and the
/// layer is forced to base. This keeps every returned region inside the
/// atlas bounds. (The geometry builder never requests overlay meshes for
/// legacy atlases in the first place.)
pub fn face_regions_for(
    format: SkinFormat,
    part: BodyPart,
    layer: Layer,
    variant: ArmVariant,
) -> &'static FaceRegions {
    match format {
        SkinFormat::Modern => face_regions(part, layer, variant),
        SkinFormat::Legacy => {
            let part = match part {
                BodyPart::LeftArm => BodyPart::RightArm,
                BodyPart::LeftLeg => BodyPart::RightLeg,
                other => other,
            };
            face_regions(part, Layer::Base, variant)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_modern_regions_in_bounds() {
        // Contract: every region of the modern table lies inside 64x64
        for part in BodyPart::ALL {
            for layer in [Layer::Base, Layer::Overlay] {
                for variant in [ArmVariant::Classic, ArmVariant::Slim] {
                    let regions = face_regions(part, layer, variant);
                    for face in FaceName::ALL {
                        let r = regions.get(face);
                        assert!(
                            r.x + r.width <= 64 && r.y + r.height <= 64,
                            "{:?}/{:?}/{:?}/{:?} out of bounds: {:?}",
                            part,
                            layer,
                            variant,
                            face,
                            r
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_all_legacy_regions_in_bounds() {
        // Contract: legacy lookups never touch rows >= 32
        for part in BodyPart::ALL {
            for variant in [ArmVariant::Classic, ArmVariant::Slim] {
                let regions =
                    face_regions_for(SkinFormat::Legacy, part, Layer::Base, variant);
                for face in FaceName::ALL {
                    let r = regions.get(face);
                    assert!(
                        r.y + r.height <= 32,
                        "legacy {:?}/{:?} out of bounds: {:?}",
                        part,
                        face,
                        r
                    );
                }
            }
        }
    }

    #[test]
    fn test_legacy_mirrors_left_limbs() {
        // Contract: legacy left limbs use the right-limb regions
        assert_eq!(
            face_regions_for(
                SkinFormat::Legacy,
                BodyPart::LeftArm,
                Layer::Base,
                ArmVariant::Classic
            ),
            face_regions(BodyPart::RightArm, Layer::Base, ArmVariant::Classic)
        );
        assert_eq!(
            face_regions_for(
                SkinFormat::Legacy,
                BodyPart::LeftLeg,
                Layer::Base,
                ArmVariant::Classic
            ),
            face_regions(BodyPart::RightLeg, Layer::Base, ArmVariant::Classic)
        );
    }

    #[test]
    fn test_slim_front_regions_are_narrower() {
        // Contract: slim arms are 3 texels wide on front/back faces
        let classic = face_regions(BodyPart::RightArm, Layer::Base, ArmVariant::Classic);
        let slim = face_regions(BodyPart::RightArm, Layer::Base, ArmVariant::Slim);
        assert_eq!(classic.front.width, 4);
        assert_eq!(slim.front.width, 3);
        assert_eq!(slim.back.width, 3);
        // Side faces span the arm depth and stay 4 wide
        assert_eq!(slim.left.width, 4);
    }

    #[test]
    fn test_head_base_front_region() {
        // Contract: the canonical face region of the head
        assert_eq!(
            face_regions(BodyPart::Head, Layer::Base, ArmVariant::Classic).front,
            TextureRegion::new(8, 8, 8, 8)
        );
    }
}
