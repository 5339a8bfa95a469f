use cosmicruler_common::types::{RgbaColor, BLACK};
use cosmicruler_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub align: ScalarOrArray<TextAlignSpec>,
    pub baseline: ScalarOrArray<TextBaselineSpec>,
    /// Clockwise rotation in degrees around `(x, y)`
    pub angle: ScalarOrArray<f32>,
    pub color: ScalarOrArray<RgbaColor>,
    pub font: ScalarOrArray<String>,
    pub font_size: ScalarOrArray<f32>,
    pub font_weight: ScalarOrArray<FontWeightSpec>,
    pub indices: Option<Vec<usize>>,
}

/// One resolved string of a [`SceneTextMark`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextInstance<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub align: TextAlignSpec,
    pub baseline: TextBaselineSpec,
    pub angle: f32,
    pub color: RgbaColor,
    pub font: &'a str,
    pub font_size: f32,
    pub font_weight: FontWeightSpec,
}

impl SceneTextMark {
    pub fn text_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.text.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn align_iter(&self) -> Box<dyn Iterator<Item = &TextAlignSpec> + '_> {
        self.align.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn baseline_iter(&self) -> Box<dyn Iterator<Item = &TextBaselineSpec> + '_> {
        self.baseline
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn angle_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.angle.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &RgbaColor> + '_> {
        self.color.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.font.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.font_size
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_weight_iter(&self) -> Box<dyn Iterator<Item = &FontWeightSpec> + '_> {
        self.font_weight
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn instances(&self) -> impl Iterator<Item = TextInstance<'_>> + '_ {
        izip!(
            self.text_iter(),
            self.x_iter(),
            self.y_iter(),
            self.align_iter(),
            self.baseline_iter(),
            self.angle_iter(),
            self.color_iter(),
            self.font_iter(),
            self.font_size_iter(),
            self.font_weight_iter()
        )
        .map(
            |(text, x, y, align, baseline, angle, color, font, font_size, font_weight)| {
                TextInstance {
                    text,
                    x: *x,
                    y: *y,
                    align: *align,
                    baseline: *baseline,
                    angle: *angle,
                    color: *color,
                    font,
                    font_size: *font_size,
                    font_weight: *font_weight,
                }
            },
        )
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            len: 1,
            text: ScalarOrArray::new_scalar(String::new()),
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            align: ScalarOrArray::new_scalar(TextAlignSpec::Left),
            baseline: ScalarOrArray::new_scalar(TextBaselineSpec::Alphabetic),
            angle: ScalarOrArray::new_scalar(0.0),
            color: ScalarOrArray::new_scalar(BLACK),
            font: ScalarOrArray::new_scalar("sans-serif".to_string()),
            font_size: ScalarOrArray::new_scalar(10.0),
            font_weight: ScalarOrArray::new_scalar(FontWeightSpec::default()),
            indices: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(mark)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignSpec {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignSpec {
    /// SVG `text-anchor` value
    pub fn text_anchor(&self) -> &'static str {
        match self {
            TextAlignSpec::Left => "start",
            TextAlignSpec::Center => "middle",
            TextAlignSpec::Right => "end",
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextBaselineSpec {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

impl TextBaselineSpec {
    /// SVG `dominant-baseline` value
    pub fn dominant_baseline(&self) -> &'static str {
        match self {
            TextBaselineSpec::Alphabetic => "alphabetic",
            TextBaselineSpec::Top => "hanging",
            TextBaselineSpec::Middle => "central",
            TextBaselineSpec::Bottom => "text-after-edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeightSpec {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl Default for FontWeightSpec {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

impl FontWeightSpec {
    /// SVG `font-weight` value
    pub fn to_svg_value(&self) -> String {
        match self {
            FontWeightSpec::Name(FontWeightNameSpec::Normal) => "normal".to_string(),
            FontWeightSpec::Name(FontWeightNameSpec::Bold) => "bold".to_string(),
            FontWeightSpec::Number(weight) => weight.to_string(),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}
