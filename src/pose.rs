// src/pose.rs

//! Pose presets, validation and interpolation.
//!
//! A pose assigns every body part a rotation (degrees, applied around the
//! part's pivot) and an optional positional offset. Seven hand-tuned named
//! poses are built in; callers may also supply a full custom definition,
//! which must pass [`validate_pose`] before any geometry work happens.

use crate::error::RenderError;
use crate::geometry::BodyPart;
use crate::math::{Rotation3, Vec3};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rotation plus optional offset for one body part.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyPartPose {
    pub rotation: Rotation3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vec3>,
}

impl BodyPartPose {
    pub const fn rotation(pitch: f32, yaw: f32, roll: f32) -> Self {
        BodyPartPose {
            rotation: Rotation3::new(pitch, yaw, roll),
            offset: None,
        }
    }

    pub const fn with_offset(pitch: f32, yaw: f32, roll: f32, offset: Vec3) -> Self {
        BodyPartPose {
            rotation: Rotation3::new(pitch, yaw, roll),
            offset: Some(offset),
        }
    }
}

const REST: BodyPartPose = BodyPartPose::rotation(0.0, 0.0, 0.0);

fn custom_name() -> &'static str {
    "custom"
}

/// A complete skeletal pose: one [`BodyPartPose`] per body part.
///
/// Deserialized poses (the custom-pose path) are always named "custom";
/// the preset names are reserved for the built-in constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseDefinition {
    #[serde(skip_deserializing, default = "custom_name")]
    pub name: &'static str,
    pub head: BodyPartPose,
    pub torso: BodyPartPose,
    pub left_arm: BodyPartPose,
    pub right_arm: BodyPartPose,
    pub left_leg: BodyPartPose,
    pub right_leg: BodyPartPose,
}

impl PoseDefinition {
    /// Look up the pose of a single part.
    pub fn part(&self, part: BodyPart) -> &BodyPartPose {
        match part {
            BodyPart::Head => &self.head,
            BodyPart::Torso => &self.torso,
            BodyPart::LeftArm => &self.left_arm,
            BodyPart::RightArm => &self.right_arm,
            BodyPart::LeftLeg => &self.left_leg,
            BodyPart::RightLeg => &self.right_leg,
        }
    }

    fn parts(&self) -> [&BodyPartPose; 6] {
        [
            &self.head,
            &self.torso,
            &self.left_arm,
            &self.right_arm,
            &self.left_leg,
            &self.right_leg,
        ]
    }
}

/// Default neutral stance, arms hanging with a slight outward roll.
pub const POSE_STANDING: PoseDefinition = PoseDefinition {
    name: "standing",
    head: REST,
    torso: REST,
    left_arm: BodyPartPose::rotation(0.0, 0.0, 3.0),
    right_arm: BodyPartPose::rotation(0.0, 0.0, -3.0),
    left_leg: REST,
    right_leg: REST,
};

/// Mid-stride walk.
pub const POSE_WALKING: PoseDefinition = PoseDefinition {
    name: "walking",
    head: REST,
    torso: REST,
    left_arm: BodyPartPose::rotation(30.0, 0.0, 3.0),
    right_arm: BodyPartPose::rotation(-30.0, 0.0, -3.0),
    left_leg: BodyPartPose::rotation(-25.0, 0.0, 0.0),
    right_leg: BodyPartPose::rotation(25.0, 0.0, 0.0),
};

/// Extended stride, torso leaning in.
pub const POSE_RUNNING: PoseDefinition = PoseDefinition {
    name: "running",
    head: BodyPartPose::rotation(-5.0, 0.0, 0.0),
    torso: BodyPartPose::rotation(-10.0, 0.0, 0.0),
    left_arm: BodyPartPose::rotation(50.0, 0.0, 5.0),
    right_arm: BodyPartPose::rotation(-50.0, 0.0, -5.0),
    left_leg: BodyPartPose::rotation(-40.0, 0.0, 0.0),
    right_leg: BodyPartPose::rotation(40.0, 0.0, 0.0),
};

/// Right arm raised, head tilted toward it.
pub const POSE_WAVING: PoseDefinition = PoseDefinition {
    name: "waving",
    head: BodyPartPose::rotation(0.0, 15.0, 5.0),
    torso: REST,
    left_arm: BodyPartPose::rotation(0.0, 0.0, 3.0),
    right_arm: BodyPartPose::rotation(-120.0, 20.0, -20.0),
    left_leg: REST,
    right_leg: REST,
};

/// Seated, legs forward and slightly lowered.
pub const POSE_SITTING: PoseDefinition = PoseDefinition {
    name: "sitting",
    head: BodyPartPose::rotation(5.0, 0.0, 0.0),
    torso: REST,
    left_arm: BodyPartPose::rotation(-45.0, 0.0, 10.0),
    right_arm: BodyPartPose::rotation(-45.0, 0.0, -10.0),
    left_leg: BodyPartPose::with_offset(-90.0, 0.0, 0.0, Vec3::new(0.0, -3.0, 4.0)),
    right_leg: BodyPartPose::with_offset(-90.0, 0.0, 0.0, Vec3::new(0.0, -3.0, 4.0)),
};

/// Right arm extended forward.
pub const POSE_POINTING: PoseDefinition = PoseDefinition {
    name: "pointing",
    head: BodyPartPose::rotation(-5.0, -10.0, 0.0),
    torso: BodyPartPose::rotation(0.0, -5.0, 0.0),
    left_arm: BodyPartPose::rotation(0.0, 0.0, 5.0),
    right_arm: BodyPartPose::rotation(-90.0, -10.0, 0.0),
    left_leg: REST,
    right_leg: REST,
};

/// Arms folded across the chest.
pub const POSE_CROSSED_ARMS: PoseDefinition = PoseDefinition {
    name: "crossed_arms",
    head: BodyPartPose::rotation(5.0, 0.0, 0.0),
    torso: REST,
    left_arm: BodyPartPose::with_offset(-50.0, 0.0, 50.0, Vec3::new(-2.0, -2.0, 2.0)),
    right_arm: BodyPartPose::with_offset(-50.0, 0.0, -50.0, Vec3::new(2.0, -2.0, 2.0)),
    left_leg: REST,
    right_leg: REST,
};

/// Name -> preset lookup. Initialized once, never mutated.
static POSES: Lazy<HashMap<&'static str, &'static PoseDefinition>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for pose in [
        &POSE_STANDING,
        &POSE_WALKING,
        &POSE_RUNNING,
        &POSE_WAVING,
        &POSE_SITTING,
        &POSE_POINTING,
        &POSE_CROSSED_ARMS,
    ] {
        m.insert(pose.name, pose);
    }
    m
});

/// Look up a named preset. `None` for unknown names.
pub fn get_pose(name: &str) -> Option<&'static PoseDefinition> {
    POSES.get(name).copied()
}

/// Resolve a pose name, falling back to standing for names we do not know.
pub fn resolve_pose(name: &str) -> &'static PoseDefinition {
    match get_pose(name) {
        Some(pose) => pose,
        None => {
            warn!("unknown pose name {:?}, falling back to standing", name);
            &POSE_STANDING
        }
    }
}

/// Validate a custom pose: every rotation component (and any offset) must
/// be finite. Out-of-range angles are fine; the rotation math reduces them
/// modulo 360.
pub fn validate_pose(pose: &PoseDefinition) -> bool {
    pose.parts().iter().all(|p| {
        p.rotation.is_finite()
            && p.offset
                .map_or(true, |o| o.x.is_finite() && o.y.is_finite() && o.z.is_finite())
    })
}

/// Validate a custom pose, producing the pipeline's fatal error on failure.
pub fn check_pose(pose: &PoseDefinition) -> Result<(), RenderError> {
    if validate_pose(pose) {
        Ok(())
    } else {
        Err(RenderError::InvalidPose(
            "rotation or offset contains a non-finite component".to_string(),
        ))
    }
}

/// Linearly blend two poses by `t` in `[0, 1]`. Rotations and offsets blend
/// component-wise; an absent offset counts as zero. The result is tagged
/// "custom".
pub fn interpolate(a: &PoseDefinition, b: &PoseDefinition, t: f32) -> PoseDefinition {
    let lerp = |x: f32, y: f32| x + (y - x) * t;

    let blend_rotation = |x: &Rotation3, y: &Rotation3| Rotation3 {
        pitch: lerp(x.pitch, y.pitch),
        yaw: lerp(x.yaw, y.yaw),
        roll: lerp(x.roll, y.roll),
    };

    let blend_part = |x: &BodyPartPose, y: &BodyPartPose| {
        let offset = if x.offset.is_some() || y.offset.is_some() {
            let ox = x.offset.unwrap_or(Vec3::ZERO);
            let oy = y.offset.unwrap_or(Vec3::ZERO);
            Some(Vec3::new(
                lerp(ox.x, oy.x),
                lerp(ox.y, oy.y),
                lerp(ox.z, oy.z),
            ))
        } else {
            None
        };
        BodyPartPose {
            rotation: blend_rotation(&x.rotation, &y.rotation),
            offset,
        }
    };

    PoseDefinition {
        name: "custom",
        head: blend_part(&a.head, &b.head),
        torso: blend_part(&a.torso, &b.torso),
        left_arm: blend_part(&a.left_arm, &b.left_arm),
        right_arm: blend_part(&a.right_arm, &b.right_arm),
        left_leg: blend_part(&a.left_leg, &b.left_leg),
        right_leg: blend_part(&a.right_leg, &b.right_leg),
    }
}
