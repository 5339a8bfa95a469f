use cosmicruler_common::types::{RgbaColor, StrokeCap, BLACK};
use cosmicruler_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;

/// `len` straight segments from `(x, y)` to `(x2, y2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRuleMark {
    pub name: String,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub stroke: ScalarOrArray<RgbaColor>,
    pub stroke_width: ScalarOrArray<f32>,
    pub stroke_cap: StrokeCap,
    pub indices: Option<Vec<usize>>,
}

impl SceneRuleMark {
    /// Builds a mark from explicit segment endpoints `[x, y, x2, y2]`
    pub fn from_segments(name: impl Into<String>, segments: &[[f32; 4]]) -> Self {
        Self {
            name: name.into(),
            len: segments.len() as u32,
            x: segments.iter().map(|s| s[0]).collect::<Vec<_>>().into(),
            y: segments.iter().map(|s| s[1]).collect::<Vec<_>>().into(),
            x2: segments.iter().map(|s| s[2]).collect::<Vec<_>>().into(),
            y2: segments.iter().map(|s| s[3]).collect::<Vec<_>>().into(),
            ..Default::default()
        }
    }

    pub fn with_stroke(mut self, stroke: RgbaColor, stroke_width: f32) -> Self {
        self.stroke = ScalarOrArray::new_scalar(stroke);
        self.stroke_width = ScalarOrArray::new_scalar(stroke_width);
        self
    }

    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x2.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &RgbaColor> + '_> {
        self.stroke
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    /// Segment endpoints in drawing order
    pub fn segments(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        izip!(self.x_iter(), self.y_iter(), self.x2_iter(), self.y2_iter())
            .map(|(x, y, x2, y2)| [*x, *y, *x2, *y2])
    }
}

impl Default for SceneRuleMark {
    fn default() -> Self {
        Self {
            name: "rule_mark".to_string(),
            len: 1,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            x2: ScalarOrArray::new_scalar(0.0),
            y2: ScalarOrArray::new_scalar(0.0),
            stroke: ScalarOrArray::new_scalar(BLACK),
            stroke_width: ScalarOrArray::new_scalar(1.0),
            stroke_cap: StrokeCap::Butt,
            indices: None,
        }
    }
}

impl From<SceneRuleMark> for SceneMark {
    fn from(mark: SceneRuleMark) -> Self {
        SceneMark::Rule(mark)
    }
}
