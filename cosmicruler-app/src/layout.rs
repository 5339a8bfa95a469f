use std::path::Path;

use cosmicruler_common::types::{RgbaColor, RED, TRANSPARENT};
use cosmicruler_common::value::ScalarOrArray;
use cosmicruler_guides::axis::opts::{ScaleRenderConfig, Side, TextStyle, TickShape};
use cosmicruler_physics::cosmology::FlatLambdaCdm;
use cosmicruler_scales::transform::{CoordinateTransformConfig, TransformShape};
use cosmicruler_scenegraph::marks::rect::SceneRectMark;
use serde::{Deserialize, Serialize};

use crate::error::RulerAppError;
use crate::scales::ScaleKind;

/// Catalog rows per galaxy per arcmin² for a 1/256 subsample of 5000 deg²
pub const VIS_CATFACTOR: f64 = 5000.0 * 3600.0 / 256.0;

/// Catalog rows per galaxy per deg² for a 1/256 subsample of 5000 deg²
pub const HALPHA_CATFACTOR: f64 = 5000.0 / 256.0;

/// Rounded rectangle outlining the cut edge of the ruler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub stroke: RgbaColor,
    pub stroke_width: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 1180.0,
            height: 1380.0,
            corner_radius: 5.0,
            stroke: RED,
            stroke_width: 1.0,
        }
    }
}

impl FrameConfig {
    pub fn to_mark(&self) -> SceneRectMark {
        SceneRectMark {
            name: "frame".to_string(),
            width: ScalarOrArray::new_scalar(self.width),
            height: ScalarOrArray::new_scalar(self.height),
            corner_radius: ScalarOrArray::new_scalar(self.corner_radius),
            fill: ScalarOrArray::new_scalar(TRANSPARENT),
            stroke: ScalarOrArray::new_scalar(self.stroke),
            stroke_width: ScalarOrArray::new_scalar(self.stroke_width),
            ..Default::default()
        }
    }
}

/// Where and how the scales of a ruler are drawn.
///
/// Scale `i` (after optional reversal) has its baseline at
/// `(x0, y0 + i * spacing)` and runs `length` pixels to the right. Every
/// field has a default, so a JSON layout only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerLayout {
    pub width: f32,
    pub height: f32,
    pub frame: Option<FrameConfig>,
    pub x0: f32,
    pub y0: f32,
    pub spacing: f32,
    pub length: f32,
    /// Draw the last scale at the top
    pub reverse: bool,
    /// Shared redshift-to-position transform
    pub transform: CoordinateTransformConfig,
    pub cosmology: FlatLambdaCdm,
    pub scales: Vec<ScaleKind>,
    pub vis_catfactor: f64,
    pub halpha_catfactor: f64,
    pub render: ScaleRenderConfig,
}

impl Default for RulerLayout {
    fn default() -> Self {
        Self::glass()
    }
}

impl RulerLayout {
    /// Engraved glass ruler: rotated labels above each baseline, stacked
    /// bottom-up
    pub fn glass() -> Self {
        let frame = FrameConfig::default();
        Self {
            width: frame.width,
            height: frame.height,
            frame: Some(frame),
            x0: 12.0,
            y0: 90.0,
            spacing: 145.0,
            length: 1156.0,
            reverse: true,
            transform: CoordinateTransformConfig {
                domain: (0.0, 2.0),
                shape: TransformShape::Sqrt,
            },
            cosmology: FlatLambdaCdm::planck15(),
            scales: ScaleKind::ALL.to_vec(),
            vis_catfactor: VIS_CATFACTOR,
            halpha_catfactor: HALPHA_CATFACTOR,
            render: ScaleRenderConfig {
                line_width: 2.0,
                tick_length: 25.0,
                label_offset: 10.0,
                title_offset: 15.0,
                label_style: TextStyle::new("Helvetica Neue", 24.0),
                title_style: TextStyle::new("Helvetica Neue", 32.0),
                rotate_labels: true,
                side: Side::Above,
                tick_shape: TickShape::Compact,
                label_shift: [8.0, 20.0],
                ..Default::default()
            },
        }
    }

    /// Flat proof print with upright labels below each baseline, stacked
    /// top-down
    pub fn fiducial() -> Self {
        let glass = Self::glass();
        let frame = FrameConfig {
            width: 1100.0,
            height: 1570.0,
            ..Default::default()
        };
        Self {
            width: frame.width,
            height: frame.height,
            frame: Some(frame),
            x0: 10.0,
            spacing: 160.0,
            length: 1060.0,
            reverse: false,
            render: ScaleRenderConfig {
                label_offset: 30.0,
                rotate_labels: false,
                side: Side::Below,
                label_shift: [0.0, 0.0],
                ..glass.render.clone()
            },
            ..glass
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RulerAppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulerAppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RulerAppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let layout = Self::from_json(&json)?;
        log::info!("Loaded layout from {}", path.display());
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_layout() {
        let layout = RulerLayout::from_json(
            r#"{
                "scales": ["redshift", "lbt"],
                "reverse": false,
                "transform": {"domain": [0.0, 1.0], "shape": "lin"},
                "render": {"side": "below", "label_style": "font-size:10"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            layout.scales,
            vec![ScaleKind::Redshift, ScaleKind::LookbackTime]
        );
        assert!(!layout.reverse);
        assert_eq!(layout.transform.shape, TransformShape::Linear);
        assert_eq!(layout.render.label_style.font_size, 10.0);
        // Untouched fields keep their defaults
        assert_eq!(layout.length, 1156.0);
        assert_eq!(layout.render.tick_length, 6.0);
        assert_eq!(layout.frame, Some(FrameConfig::default()));
    }

    #[test]
    fn test_invalid_json_layout() {
        assert!(matches!(
            RulerLayout::from_json(r#"{"scales": ["parsecs"]}"#),
            Err(RulerAppError::Layout(_))
        ));
        assert!(matches!(
            RulerLayout::from_path("/nonexistent/layout.json"),
            Err(RulerAppError::Io { .. })
        ));
    }

    #[test]
    fn test_fiducial_layout() {
        let layout = RulerLayout::fiducial();
        assert_eq!(layout.height, 1570.0);
        assert_eq!(layout.y0, 90.0);
        assert_eq!(layout.render.tick_length, 25.0);
        assert_eq!(layout.render.side, Side::Below);
        assert!(!layout.render.rotate_labels);

        let round_trip =
            RulerLayout::from_json(&serde_json::to_string(&layout).unwrap()).unwrap();
        assert_eq!(round_trip, layout);
    }
}
