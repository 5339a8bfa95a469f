use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RulerScaleError;
use crate::ticks::{auto_subdivide_with, resolve_point, TickDeltas, TickPolicy};
use crate::transform::PositionTransform;

/// Positions closer than this are the same tick (or the same label slot)
pub const POSITION_TOLERANCE: f64 = 1e-6;

/// Name of the extra annotation drawn as a peak marker
pub const PEAK: &str = "peak";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub position: f64,
    pub text: String,
}

impl Label {
    pub fn new(position: f64, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// One printed scale of the ruler: ticks, labels and named extra annotations.
///
/// Positions are either physical values (while the scale is being built) or
/// normalized positions (after [`Scale::apply_transform`]); the scale itself
/// does not track which.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    name: String,
    title: String,
    major_ticks: Vec<f64>,
    medium_ticks: Vec<f64>,
    minor_ticks: Vec<f64>,
    labels: Vec<Label>,
    extras: IndexMap<String, Label>,
}

impl Scale {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn major_ticks(&self) -> &[f64] {
        &self.major_ticks
    }

    pub fn medium_ticks(&self) -> &[f64] {
        &self.medium_ticks
    }

    pub fn minor_ticks(&self) -> &[f64] {
        &self.minor_ticks
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn extras(&self) -> &IndexMap<String, Label> {
        &self.extras
    }

    pub fn extra(&self, name: &str) -> Option<&Label> {
        self.extras.get(name)
    }

    pub fn peak(&self) -> Option<&Label> {
        self.extra(PEAK)
    }

    pub fn add_major_ticks(&mut self, ticks: impl IntoIterator<Item = f64>) -> &mut Self {
        self.major_ticks.extend(ticks);
        self
    }

    pub fn add_medium_ticks(&mut self, ticks: impl IntoIterator<Item = f64>) -> &mut Self {
        self.medium_ticks.extend(ticks);
        self
    }

    pub fn add_minor_ticks(&mut self, ticks: impl IntoIterator<Item = f64>) -> &mut Self {
        self.minor_ticks.extend(ticks);
        self
    }

    pub fn add_label(&mut self, position: f64, text: impl Into<String>) -> &mut Self {
        self.labels.push(Label::new(position, text));
        self
    }

    /// Adds one label per source value, placed at `transform(value)` and
    /// captioned with `format(value)`.
    ///
    /// Values whose conversion fails are skipped with a warning.
    pub fn add_labels_with<F, E>(
        &mut self,
        values: &[f64],
        transform: F,
        format: impl Fn(f64) -> String,
    ) -> &mut Self
    where
        F: Fn(f64) -> Result<f64, E>,
        E: Display,
    {
        for &value in values {
            if let Some(position) = resolve_point(value, &transform) {
                self.labels.push(Label::new(position, format(value)));
            }
        }
        self
    }

    /// Replaces the extra annotation called `name`
    pub fn set_extra(
        &mut self,
        name: impl Into<String>,
        position: f64,
        text: impl Into<String>,
    ) -> &mut Self {
        self.extras.insert(name.into(), Label::new(position, text));
        self
    }

    pub fn set_peak(&mut self, position: f64, text: impl Into<String>) -> &mut Self {
        self.set_extra(PEAK, position, text)
    }

    pub fn extend_ticks(&mut self, deltas: TickDeltas) -> &mut Self {
        self.major_ticks.extend(deltas.major);
        self.medium_ticks.extend(deltas.medium);
        self.minor_ticks.extend(deltas.minor);
        self
    }

    /// Appends the ticks [`crate::ticks::auto_subdivide`] generates for `breakpoints`
    pub fn add_auto_subticks(
        &mut self,
        breakpoints: &[f64],
        policy: TickPolicy,
    ) -> Result<&mut Self, RulerScaleError> {
        let deltas = crate::ticks::auto_subdivide(breakpoints, policy)?;
        Ok(self.extend_ticks(deltas))
    }

    /// Appends auto-generated ticks for breakpoints given in a source unit
    pub fn add_auto_subticks_with<F, E>(
        &mut self,
        breakpoints: &[f64],
        policy: TickPolicy,
        transform: F,
    ) -> Result<&mut Self, RulerScaleError>
    where
        F: Fn(f64) -> Result<f64, E>,
        E: Display,
    {
        let deltas = auto_subdivide_with(breakpoints, policy, transform)?;
        Ok(self.extend_ticks(deltas))
    }

    /// Converts every tick, label and extra position with `transform`.
    ///
    /// Either every position is converted or, on the first failure, the scale
    /// is left untouched and the error returned. Order is preserved and no
    /// deduplication happens.
    pub fn apply_transform(
        &mut self,
        transform: &impl PositionTransform,
    ) -> Result<(), RulerScaleError> {
        let convert = |ticks: &[f64]| {
            ticks
                .iter()
                .map(|v| transform.position(*v))
                .collect::<Result<Vec<_>, _>>()
        };
        let major_ticks = convert(&self.major_ticks)?;
        let medium_ticks = convert(&self.medium_ticks)?;
        let minor_ticks = convert(&self.minor_ticks)?;
        let labels = self
            .labels
            .iter()
            .map(|label| Ok(Label::new(transform.position(label.position)?, &label.text)))
            .collect::<Result<Vec<_>, RulerScaleError>>()?;
        let extras = self
            .extras
            .iter()
            .map(|(name, label)| {
                Ok((
                    name.clone(),
                    Label::new(transform.position(label.position)?, &label.text),
                ))
            })
            .collect::<Result<IndexMap<_, _>, RulerScaleError>>()?;

        log::debug!(
            "Normalized scale {:?}: {} major, {} medium, {} minor, {} labels",
            self.name,
            major_ticks.len(),
            medium_ticks.len(),
            minor_ticks.len(),
            labels.len()
        );

        self.major_ticks = major_ticks;
        self.medium_ticks = medium_ticks;
        self.minor_ticks = minor_ticks;
        self.labels = labels;
        self.extras = extras;
        Ok(())
    }

    /// Consumes a scale built in physical units and returns it normalized
    pub fn normalized(mut self, transform: &impl PositionTransform) -> Result<Self, RulerScaleError> {
        self.apply_transform(transform)?;
        Ok(self)
    }

    /// Sorts major ticks and collapses near-duplicates, and drops labels
    /// sharing a position with an earlier label.
    ///
    /// Runs of majors within [`POSITION_TOLERANCE`] of each other keep the
    /// smallest value. Labels keep their insertion order and the first label
    /// at a position wins. Medium and minor ticks are left as they are.
    pub fn clean(&mut self) {
        self.major_ticks.sort_by(f64::total_cmp);
        self.major_ticks
            .dedup_by(|next, kept| (*next - *kept).abs() < POSITION_TOLERANCE);

        let mut labels: Vec<Label> = Vec::with_capacity(self.labels.len());
        for label in self.labels.drain(..) {
            if !labels
                .iter()
                .any(|kept| (kept.position - label.position).abs() < POSITION_TOLERANCE)
            {
                labels.push(label);
            }
        }
        self.labels = labels;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{CoordinateTransform, TransformShape};
    use float_cmp::assert_approx_eq;

    fn linear(min: f64, max: f64) -> CoordinateTransform {
        CoordinateTransform::new(min, max, TransformShape::Linear).unwrap()
    }

    #[test]
    fn test_apply_transform() {
        let mut scale = Scale::new("z");
        scale
            .add_major_ticks([0.0, 1.0, 2.0])
            .add_medium_ticks([0.5])
            .add_label(1.0, "1")
            .set_peak(1.5, "peak");
        scale.apply_transform(&linear(0.0, 2.0)).unwrap();

        assert_eq!(scale.major_ticks(), &[0.0, 0.5, 1.0]);
        assert_eq!(scale.medium_ticks(), &[0.25]);
        assert_eq!(scale.labels(), &[Label::new(0.5, "1")]);
        assert_eq!(scale.peak(), Some(&Label::new(0.75, "peak")));
    }

    #[test]
    fn test_apply_transform_is_atomic() {
        let transform = CoordinateTransform::new(0.0, 2.0, TransformShape::Sqrt).unwrap();
        let mut scale = Scale::new("z");
        scale.add_major_ticks([1.0, 2.0]).add_minor_ticks([-1.0]);
        let before = scale.clone();

        let err = scale.apply_transform(&transform).unwrap_err();
        assert!(matches!(err, RulerScaleError::InvalidValue { .. }));
        assert_eq!(scale, before);
    }

    #[test]
    fn test_clean_majors() {
        let mut scale = Scale::new("z");
        scale.add_major_ticks([2.0, 1.0000000001, 1.0]);
        scale.clean();
        assert_eq!(scale.major_ticks(), &[1.0, 2.0]);
    }

    #[test]
    fn test_clean_labels_first_wins() {
        let mut scale = Scale::new("z");
        scale
            .add_label(0.5, "a")
            .add_label(0.1, "c")
            .add_label(0.5000001, "b");
        scale.clean();
        assert_eq!(scale.labels(), &[Label::new(0.5, "a"), Label::new(0.1, "c")]);
    }

    #[test]
    fn test_clean_is_idempotent_and_ignores_subticks() {
        let mut scale = Scale::new("z");
        scale
            .add_major_ticks([0.3, 0.1, 0.3, 0.2])
            .add_medium_ticks([0.15, 0.15]);
        scale.clean();
        let once = scale.clone();
        scale.clean();
        assert_eq!(scale, once);
        assert_eq!(scale.major_ticks(), &[0.1, 0.2, 0.3]);
        assert_eq!(scale.medium_ticks(), &[0.15, 0.15]);
    }

    #[test]
    fn test_add_labels_with_skips_failures() {
        let mut scale = Scale::new("lbt");
        scale.add_labels_with(
            &[1.0, 4.0, -1.0],
            |v| {
                if v >= 0.0 {
                    Ok(v.sqrt())
                } else {
                    Err(format!("{v} has no root"))
                }
            },
            |v| format!("{v:.0}"),
        );
        assert_eq!(scale.labels(), &[Label::new(1.0, "1"), Label::new(2.0, "4")]);
    }

    #[test]
    fn test_auto_subticks_accumulate() {
        let mut scale = Scale::new("z");
        scale
            .add_auto_subticks(&[0.0, 1.0], TickPolicy::LinHalf)
            .unwrap()
            .add_auto_subticks(&[1.0, 10.0], TickPolicy::LogDecade)
            .unwrap();
        assert_eq!(scale.major_ticks(), &[0.0, 1.0, 1.0, 10.0]);
        assert_eq!(scale.medium_ticks(), &[0.5]);
        assert_eq!(scale.minor_ticks().len(), 8);

        scale.clean();
        assert_eq!(scale.major_ticks(), &[0.0, 1.0, 10.0]);
    }

    #[test]
    fn test_normalized() {
        let mut scale = Scale::new("z").with_title("Redshift");
        scale.add_major_ticks([0.5]).set_extra("marker", 1.0, "m");
        let scale = scale.normalized(&linear(0.0, 2.0)).unwrap();
        assert_eq!(scale.title(), "Redshift");
        assert_approx_eq!(f64, scale.major_ticks()[0], 0.25);
        assert_eq!(scale.extra("marker"), Some(&Label::new(0.5, "m")));
        assert!(scale.peak().is_none());
    }
}
