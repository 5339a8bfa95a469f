use cosmicruler_common::value::ScalarOrArray;
use cosmicruler_scales::scale::{Label, Scale};
use cosmicruler_scales::transform::linear::LinearTransform;
use cosmicruler_scales::transform::PositionTransform;
use cosmicruler_scenegraph::marks::rule::SceneRuleMark;
use cosmicruler_scenegraph::marks::text::{SceneTextMark, TextAlignSpec, TextBaselineSpec};
use cosmicruler_scenegraph::scene_graph::SceneGraph;

use super::opts::{ScaleRenderConfig, Side, TextStyle};
use crate::error::RulerGuidesError;

/// Draws a normalized scale as a group of marks and returns the group's path.
///
/// The baseline runs from `origin` to `origin + (length, 0)`; a normalized
/// position `p` lands at `origin.x + p * length` without clamping. The scale
/// is cleaned first. Everything is computed before the scene is touched, so
/// on error nothing is added.
pub fn render_scale(
    scale: &mut Scale,
    scene: &mut SceneGraph,
    origin: [f32; 2],
    length: f32,
    config: &ScaleRenderConfig,
) -> Result<Vec<usize>, RulerGuidesError> {
    if !length.is_finite() || length <= 0.0 {
        return Err(RulerGuidesError::InvalidLength(length));
    }
    if !origin.iter().all(|v| v.is_finite()) {
        return Err(RulerGuidesError::InvalidOrigin(origin));
    }
    scale.clean();

    let [x0, y0] = origin;
    let name = scale.name().to_string();
    let pixels = LinearTransform::new(x0 as f64, (x0 + length) as f64)?;
    let pixel_x = |p: f64| -> Result<f32, RulerGuidesError> {
        if !p.is_finite() {
            return Err(RulerGuidesError::NonFinitePosition {
                scale: name.clone(),
                position: p,
            });
        }
        Ok(pixels.value(p)? as f32)
    };

    let sign = config.side.sign();
    let tick_length = config.tick_length;
    let (medium_ratio, minor_ratio) = config.tick_shape.ratios();
    let tick_segments = |ticks: &[f64], ratio: f32| -> Result<Vec<[f32; 4]>, RulerGuidesError> {
        ticks
            .iter()
            .map(|p| {
                let x = pixel_x(*p)?;
                Ok([x, y0, x, y0 + sign * tick_length * ratio])
            })
            .collect()
    };
    let major = tick_segments(scale.major_ticks(), 1.0)?;
    let medium = tick_segments(scale.medium_ticks(), medium_ratio)?;
    let minor = tick_segments(scale.minor_ticks(), minor_ratio)?;

    let label_y = y0 + sign * (tick_length + config.label_offset) + config.label_shift[1];
    let label_x = |label: &Label| -> Result<f32, RulerGuidesError> {
        Ok(pixel_x(label.position)? + config.label_shift[0])
    };
    let labels = scale
        .labels()
        .iter()
        .map(|label| Ok((label_x(label)?, label.text.clone())))
        .collect::<Result<Vec<_>, RulerGuidesError>>()?;

    let peak = match scale.peak() {
        Some(peak) => {
            let x = pixel_x(peak.position)?;
            let half_width = tick_length / 4.0;
            let foot_y = y0 + sign * tick_length;
            Some((
                [
                    [x - half_width, foot_y, x, y0],
                    [x, y0, x + half_width, foot_y],
                ],
                (label_x(peak)?, peak.text.clone()),
            ))
        }
        None => None,
    };

    log::debug!(
        "Rendering scale {name:?}: {} major, {} medium, {} minor ticks, {} labels",
        major.len(),
        medium.len(),
        minor.len(),
        labels.len()
    );

    let path = scene.add_group(format!("{name}-scale"));
    let group = scene.get_group_mut(&path)?;
    let stroke = |segments: &[[f32; 4]], mark_name: &str| {
        SceneRuleMark::from_segments(mark_name, segments)
            .with_stroke(config.stroke, config.line_width)
    };

    group
        .add_group(format!("{name}-baseline"))
        .add_rule(stroke(&[[x0, y0, x0 + length, y0]], "baseline"));
    group
        .add_group(format!("{name}-majticks"))
        .add_rule(stroke(&major, "majticks"));
    group
        .add_group(format!("{name}-medticks"))
        .add_rule(stroke(&medium, "medticks"));
    group
        .add_group(format!("{name}-minticks"))
        .add_rule(stroke(&minor, "minticks"));
    group
        .add_group(format!("{name}-labels"))
        .add_text(label_mark("labels", &labels, label_y, config));

    if let Some((legs, label)) = peak {
        group
            .add_group(format!("{name}-peak"))
            .add_rule(stroke(&legs, "peak"))
            .add_text(label_mark("peak-label", &[label], label_y, config));
    }

    let title_baseline = match config.side {
        Side::Below => TextBaselineSpec::Alphabetic,
        Side::Above => TextBaselineSpec::Top,
    };
    group.add_group(format!("{name}-title")).add_text(text_mark(
        "title",
        vec![scale.title().to_string()],
        vec![x0],
        y0 - sign * config.title_offset,
        &config.title_style,
        TextAlignSpec::Left,
        title_baseline,
        0.0,
    ));

    Ok(path)
}

/// Text placement for labels: centered under (or over) the tick, or turned by
/// 90 degrees so that it reads away from the baseline
fn label_mark(
    name: &str,
    labels: &[(f32, String)],
    y: f32,
    config: &ScaleRenderConfig,
) -> SceneTextMark {
    let (align, baseline, angle) = match (config.rotate_labels, config.side) {
        (false, Side::Below) => (TextAlignSpec::Center, TextBaselineSpec::Top, 0.0),
        (false, Side::Above) => (TextAlignSpec::Center, TextBaselineSpec::Bottom, 0.0),
        (true, Side::Below) => (TextAlignSpec::Left, TextBaselineSpec::Middle, 90.0),
        (true, Side::Above) => (TextAlignSpec::Right, TextBaselineSpec::Middle, 90.0),
    };
    text_mark(
        name,
        labels.iter().map(|(_, text)| text.clone()).collect(),
        labels.iter().map(|(x, _)| *x).collect(),
        y,
        &config.label_style,
        align,
        baseline,
        angle,
    )
}

#[allow(clippy::too_many_arguments)]
fn text_mark(
    name: &str,
    text: Vec<String>,
    x: Vec<f32>,
    y: f32,
    style: &TextStyle,
    align: TextAlignSpec,
    baseline: TextBaselineSpec,
    angle: f32,
) -> SceneTextMark {
    SceneTextMark {
        name: name.to_string(),
        len: text.len() as u32,
        text: text.into(),
        x: x.into(),
        y: ScalarOrArray::new_scalar(y),
        align: ScalarOrArray::new_scalar(align),
        baseline: ScalarOrArray::new_scalar(baseline),
        angle: ScalarOrArray::new_scalar(angle),
        color: ScalarOrArray::new_scalar(style.color),
        font: ScalarOrArray::new_scalar(style.font.clone()),
        font_size: ScalarOrArray::new_scalar(style.font_size),
        font_weight: ScalarOrArray::new_scalar(style.font_weight),
        indices: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::opts::TickShape;
    use cosmicruler_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn rules(scene: &SceneGraph, group: &str) -> Vec<[f32; 4]> {
        let names = scene.group_names();
        let group = scene.get_group(&names[group]).unwrap();
        group
            .marks
            .iter()
            .filter_map(|mark| match mark {
                SceneMark::Rule(rule) => Some(rule.segments().collect::<Vec<_>>()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn texts(scene: &SceneGraph, group: &str) -> Vec<SceneTextMark> {
        let names = scene.group_names();
        scene
            .get_group(&names[group])
            .unwrap()
            .marks
            .iter()
            .filter_map(|mark| match mark {
                SceneMark::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn sample_scale() -> Scale {
        let mut scale = Scale::new("z").with_title("Redshift");
        scale
            .add_major_ticks([1.0, 0.0, 0.5, 0.5000000001])
            .add_medium_ticks([0.25])
            .add_minor_ticks([0.125])
            .add_label(0.0, "0")
            .add_label(0.5, "1")
            .add_label(0.5000001, "dup");
        scale
    }

    #[test]
    fn test_tick_pixels() {
        let mut scene = SceneGraph::new(1000.0, 200.0);
        let mut scale = sample_scale();
        let path = render_scale(
            &mut scale,
            &mut scene,
            [50.0, 100.0],
            900.0,
            &ScaleRenderConfig::default(),
        )
        .unwrap();
        assert_eq!(scene.get_group(&path).unwrap().name, "z-scale");

        let majors = rules(&scene, "z-majticks");
        let xs = majors.iter().map(|s| s[0]).collect::<Vec<_>>();
        assert_eq!(xs, vec![50.0, 500.0, 950.0]);
        assert!(majors.iter().all(|s| s[1] == 100.0 && s[3] == 106.0));

        assert_eq!(rules(&scene, "z-baseline"), vec![[50.0, 100.0, 950.0, 100.0]]);
        assert_eq!(rules(&scene, "z-medticks"), vec![[275.0, 100.0, 275.0, 104.5]]);
        assert_eq!(rules(&scene, "z-minticks"), vec![[162.5, 100.0, 162.5, 103.0]]);

        let labels = texts(&scene, "z-labels");
        assert_eq!(labels[0].len, 2);
        assert_eq!(labels[0].x, ScalarOrArray::new_array(vec![50.0, 500.0]));
        assert_eq!(labels[0].y, ScalarOrArray::new_scalar(120.0));
        assert_eq!(labels[0].align, ScalarOrArray::new_scalar(TextAlignSpec::Center));

        let title = texts(&scene, "z-title");
        assert_eq!(title[0].y, ScalarOrArray::new_scalar(90.0));
        assert!(!scene.group_names().contains_key("z-peak"));
    }

    #[test]
    fn test_above_rotated_compact() {
        let config = ScaleRenderConfig {
            tick_length: 25.0,
            label_offset: 10.0,
            title_offset: 15.0,
            rotate_labels: true,
            side: Side::Above,
            tick_shape: TickShape::Compact,
            label_shift: [8.0, 20.0],
            ..Default::default()
        };
        let mut scene = SceneGraph::new(1180.0, 1380.0);
        let mut scale = sample_scale();
        scale.set_peak(0.75, "1.795");
        render_scale(&mut scale, &mut scene, [12.0, 90.0], 1156.0, &config).unwrap();

        let medium = rules(&scene, "z-medticks");
        assert_approx_eq!(f32, medium[0][3], 90.0 - 25.0 * 0.666, epsilon = 1e-4);

        let labels = texts(&scene, "z-labels");
        assert_eq!(labels[0].angle, ScalarOrArray::new_scalar(90.0));
        assert_eq!(labels[0].align, ScalarOrArray::new_scalar(TextAlignSpec::Right));
        assert_eq!(labels[0].y, ScalarOrArray::new_scalar(90.0 - 35.0 + 20.0));
        assert_eq!(labels[0].x, ScalarOrArray::new_array(vec![20.0, 598.0]));

        let peak = rules(&scene, "z-peak");
        assert_eq!(peak.len(), 2);
        assert_eq!(peak[0], [879.0 - 6.25, 65.0, 879.0, 90.0]);
        assert_eq!(peak[1], [879.0, 90.0, 879.0 + 6.25, 65.0]);
        let peak_text = texts(&scene, "z-peak");
        assert_eq!(peak_text[0].text, ScalarOrArray::new_array(vec!["1.795".to_string()]));

        let title = texts(&scene, "z-title");
        assert_eq!(title[0].y, ScalarOrArray::new_scalar(105.0));
        assert_eq!(title[0].baseline, ScalarOrArray::new_scalar(TextBaselineSpec::Top));
    }

    #[test]
    fn test_invalid_inputs_leave_scene_untouched() {
        let mut scene = SceneGraph::new(100.0, 100.0);
        let mut scale = sample_scale();
        let config = ScaleRenderConfig::default();

        assert!(matches!(
            render_scale(&mut scale, &mut scene, [0.0, 0.0], 0.0, &config),
            Err(RulerGuidesError::InvalidLength(_))
        ));
        assert!(matches!(
            render_scale(&mut scale, &mut scene, [0.0, 0.0], f32::NAN, &config),
            Err(RulerGuidesError::InvalidLength(_))
        ));

        scale.add_minor_ticks([f64::NAN]);
        assert!(matches!(
            render_scale(&mut scale, &mut scene, [0.0, 0.0], 100.0, &config),
            Err(RulerGuidesError::NonFinitePosition { .. })
        ));
        assert!(scene.marks.is_empty());
    }
}
