use std::str::FromStr;

use cosmicruler_common::types::{RgbaColor, BLACK};
use cosmicruler_scenegraph::marks::text::{FontWeightNameSpec, FontWeightSpec};
use serde::{Deserialize, Serialize};

use crate::error::RulerGuidesError;

/// Which side of the baseline ticks and labels hang from; the title goes on
/// the other side
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Below,
    Above,
}

impl Side {
    /// Direction of "away from the baseline" in SVG y
    pub fn sign(&self) -> f32 {
        match self {
            Side::Below => 1.0,
            Side::Above => -1.0,
        }
    }
}

/// Medium and minor tick lengths relative to the major tick length
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TickShape {
    /// Variant 1: 75% and 50%
    #[default]
    Standard,
    /// Variant 2: two thirds and one third
    Compact,
}

impl TickShape {
    pub fn ratios(&self) -> (f32, f32) {
        match self {
            TickShape::Standard => (0.75, 0.5),
            TickShape::Compact => (0.666, 0.333),
        }
    }
}

impl TryFrom<u8> for TickShape {
    type Error = RulerGuidesError;

    fn try_from(variant: u8) -> Result<Self, Self::Error> {
        match variant {
            1 => Ok(TickShape::Standard),
            2 => Ok(TickShape::Compact),
            other => Err(RulerGuidesError::InvalidTickShape(other)),
        }
    }
}

impl From<TickShape> for u8 {
    fn from(shape: TickShape) -> Self {
        match shape {
            TickShape::Standard => 1,
            TickShape::Compact => 2,
        }
    }
}

/// Font settings for labels or titles.
///
/// Deserializes from either a structured value or a CSS declaration list such
/// as `"font-size:24;font-family:Helvetica Neue"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TextStyleInput")]
pub struct TextStyle {
    pub font: String,
    pub font_size: f32,
    pub font_weight: FontWeightSpec,
    pub color: RgbaColor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "CMU Serif, Arial".to_string(),
            font_size: 12.0,
            font_weight: FontWeightSpec::default(),
            color: BLACK,
        }
    }
}

impl TextStyle {
    pub fn new(font: impl Into<String>, font_size: f32) -> Self {
        Self {
            font: font.into(),
            font_size,
            ..Default::default()
        }
    }

    /// Parses `font-size`, `font-family` and `font-weight` declarations on top
    /// of the defaults. Other properties are ignored with a warning.
    pub fn from_css(style: &str) -> Result<Self, RulerGuidesError> {
        let invalid = || RulerGuidesError::InvalidStyle(style.to_string());
        let mut text_style = TextStyle::default();
        for declaration in style.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let (property, value) = declaration.split_once(':').ok_or_else(invalid)?;
            let value = value.trim();
            match property.trim() {
                "font-size" => {
                    text_style.font_size = value
                        .trim_end_matches("px")
                        .trim()
                        .parse()
                        .map_err(|_| invalid())?;
                }
                "font-family" => text_style.font = value.to_string(),
                "font-weight" => {
                    text_style.font_weight = match value {
                        "normal" => FontWeightSpec::Name(FontWeightNameSpec::Normal),
                        "bold" => FontWeightSpec::Name(FontWeightNameSpec::Bold),
                        number => FontWeightSpec::Number(number.parse().map_err(|_| invalid())?),
                    };
                }
                other => log::warn!("Ignoring unsupported style property {other:?} in {style:?}"),
            }
        }
        Ok(text_style)
    }
}

impl FromStr for TextStyle {
    type Err = RulerGuidesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_css(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextStyleInput {
    Css(String),
    Fields(TextStyleFields),
}

#[derive(Deserialize)]
#[serde(default)]
struct TextStyleFields {
    font: String,
    font_size: f32,
    font_weight: FontWeightSpec,
    color: RgbaColor,
}

impl Default for TextStyleFields {
    fn default() -> Self {
        let TextStyle {
            font,
            font_size,
            font_weight,
            color,
        } = TextStyle::default();
        Self {
            font,
            font_size,
            font_weight,
            color,
        }
    }
}

impl TryFrom<TextStyleInput> for TextStyle {
    type Error = RulerGuidesError;

    fn try_from(input: TextStyleInput) -> Result<Self, Self::Error> {
        match input {
            TextStyleInput::Css(css) => TextStyle::from_css(&css),
            TextStyleInput::Fields(fields) => Ok(TextStyle {
                font: fields.font,
                font_size: fields.font_size,
                font_weight: fields.font_weight,
                color: fields.color,
            }),
        }
    }
}

/// Drawing options for one printed scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleRenderConfig {
    pub line_width: f32,
    /// Length of major ticks; medium and minor ticks scale from it
    pub tick_length: f32,
    /// Gap between the end of a major tick and its label
    pub label_offset: f32,
    /// Distance of the title from the baseline, on the side opposite to labels
    pub title_offset: f32,
    pub label_style: TextStyle,
    pub title_style: TextStyle,
    pub rotate_labels: bool,
    pub side: Side,
    pub tick_shape: TickShape,
    /// Pixel nudge `(dx, dy)` applied to every label
    pub label_shift: [f32; 2],
    pub stroke: RgbaColor,
}

impl Default for ScaleRenderConfig {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            tick_length: 6.0,
            label_offset: 14.0,
            title_offset: 10.0,
            label_style: TextStyle::default(),
            title_style: TextStyle::default(),
            rotate_labels: false,
            side: Side::Below,
            tick_shape: TickShape::Standard,
            label_shift: [0.0, 0.0],
            stroke: BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_style() {
        let style = TextStyle::from_css("font-size:24;font-family:Helvetica Neue").unwrap();
        assert_eq!(style.font, "Helvetica Neue");
        assert_eq!(style.font_size, 24.0);

        let style: TextStyle = "font-size: 10px; font-weight: bold; stroke: none;".parse().unwrap();
        assert_eq!(style.font_size, 10.0);
        assert_eq!(style.font_weight, FontWeightSpec::Name(FontWeightNameSpec::Bold));

        assert!(matches!(
            TextStyle::from_css("font-size:large"),
            Err(RulerGuidesError::InvalidStyle(_))
        ));
        assert!(TextStyle::from_css("font-size").is_err());
    }

    #[test]
    fn test_config_serde() {
        let config: ScaleRenderConfig = serde_json::from_str(
            r#"{
                "tick_length": 25.0,
                "label_style": "font-size:24;font-family:Helvetica Neue",
                "title_style": {"font": "Helvetica Neue", "font_size": 32.0},
                "side": "above",
                "tick_shape": 2,
                "label_shift": [8.0, 20.0]
            }"#,
        )
        .unwrap();
        assert_eq!(config.tick_length, 25.0);
        assert_eq!(config.line_width, 1.0);
        assert_eq!(config.label_style.font_size, 24.0);
        assert_eq!(config.title_style.font_size, 32.0);
        assert_eq!(config.title_style.color, BLACK);
        assert_eq!(config.side, Side::Above);
        assert_eq!(config.tick_shape, TickShape::Compact);

        let round_trip: ScaleRenderConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(round_trip, config);

        assert!(serde_json::from_str::<ScaleRenderConfig>(r#"{"tick_shape": 3}"#).is_err());
    }
}
