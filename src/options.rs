// src/options.rs

//! Render options for the avatar pipeline.
//!
//! These structs are the pipeline's configuration surface. They can be
//! deserialized from a configuration or request payload; every field has a
//! sensible default so partial inputs work (`#[serde(default)]` throughout).

use crate::geometry::ArmVariant;
use crate::math::ViewConfig;
use crate::pose::PoseDefinition;
use crate::texture::Rgba;
use serde::{Deserialize, Serialize};

/// Which pose to render: a preset by name, or a full custom definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoseSelection {
    Named(String),
    Custom(PoseDefinition),
}

impl Default for PoseSelection {
    fn default() -> Self {
        PoseSelection::Named("standing".to_string())
    }
}

/// Complete options for one render invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output canvas width in pixels.
    pub width: u32,
    /// Output canvas height in pixels.
    pub height: u32,
    /// Pose preset name or custom definition.
    pub pose: PoseSelection,
    /// Classic or slim arm geometry. "Auto" detection from skin metadata
    /// is the caller's job; by the time options reach the pipeline the
    /// variant is concrete.
    pub arm_variant: ArmVariant,
    /// Whether to build and draw the overlay (second skin) layer.
    /// Ignored for legacy atlases, which have none.
    pub include_overlay: bool,
    /// Camera angle/elevation/zoom.
    pub view: ViewConfig,
    /// Optional solid background; `None` renders on transparency.
    pub background: Option<Rgba>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 300,
            height: 400,
            pose: PoseSelection::default(),
            arm_variant: ArmVariant::Classic,
            include_overlay: true,
            view: ViewConfig::default(),
            background: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Contract: defaults mirror the documented option defaults
        let opts = RenderOptions::default();
        assert_eq!(opts.width, 300);
        assert_eq!(opts.height, 400);
        assert_eq!(opts.pose, PoseSelection::Named("standing".to_string()));
        assert_eq!(opts.arm_variant, ArmVariant::Classic);
        assert!(opts.include_overlay);
        assert_eq!(opts.view.angle, 25.0);
        assert_eq!(opts.view.elevation, 10.0);
        assert_eq!(opts.view.zoom, 1.0);
        assert_eq!(opts.background, None);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        // Contract: missing fields come from Default
        let opts: RenderOptions =
            serde_json::from_str(r#"{ "width": 128, "arm_variant": "slim" }"#).unwrap();
        assert_eq!(opts.width, 128);
        assert_eq!(opts.height, 400);
        assert_eq!(opts.arm_variant, ArmVariant::Slim);
    }

    #[test]
    fn test_pose_selection_accepts_name_or_definition() {
        // Contract: the untagged pose field takes either form
        let named: RenderOptions = serde_json::from_str(r#"{ "pose": "waving" }"#).unwrap();
        assert_eq!(named.pose, PoseSelection::Named("waving".to_string()));

        let custom: RenderOptions = serde_json::from_str(
            r#"{ "pose": {
                "head": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } },
                "torso": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } },
                "left_arm": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } },
                "right_arm": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } },
                "left_leg": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } },
                "right_leg": { "rotation": { "pitch": 0.0, "yaw": 0.0, "roll": 0.0 } }
            } }"#,
        )
        .unwrap();
        assert!(matches!(custom.pose, PoseSelection::Custom(_)));
    }
}
