#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, VariantNames};

/// Straight RGBA color, each channel in `[0, 1]`
pub type RgbaColor = [f32; 4];

pub const BLACK: RgbaColor = [0.0, 0.0, 0.0, 1.0];
pub const RED: RgbaColor = [1.0, 0.0, 0.0, 1.0];
pub const TRANSPARENT: RgbaColor = [0.0, 0.0, 0.0, 0.0];

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames, AsRefStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_cap_names() {
        assert_eq!(StrokeCap::VARIANTS, &["butt", "round", "square"]);
        assert_eq!(StrokeCap::Round.as_ref(), "round");
    }
}
