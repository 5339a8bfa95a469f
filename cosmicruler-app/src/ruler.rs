use cosmicruler_guides::axis::ruler::render_scale;
use cosmicruler_physics::catalog::FlagshipRecord;
use cosmicruler_scales::scale::Scale;
use cosmicruler_scales::transform::CoordinateTransform;
use cosmicruler_scenegraph::scene_graph::SceneGraph;
use rayon::prelude::*;

use crate::error::RulerAppError;
use crate::layout::RulerLayout;
use crate::scales::ScaleInputs;

/// Builds every scale of `layout` in redshift units, in declaration order.
///
/// Scales are built in parallel. Count scales are left out when `records` is
/// `None`; any other failure aborts the whole ruler.
pub fn build_scales(
    layout: &RulerLayout,
    records: Option<&[FlagshipRecord]>,
) -> Result<Vec<Scale>, RulerAppError> {
    let inputs = ScaleInputs {
        cosmology: layout.cosmology,
        records,
        vis_catfactor: layout.vis_catfactor,
        halpha_catfactor: layout.halpha_catfactor,
    };
    let built = layout
        .scales
        .par_iter()
        .map(|kind| kind.build(&inputs))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(built.into_iter().flatten().collect())
}

/// Draws the frame and the stacked, normalized scales.
///
/// Nothing is written anywhere; the caller decides how to save the scene.
pub fn assemble(
    layout: &RulerLayout,
    records: Option<&[FlagshipRecord]>,
) -> Result<SceneGraph, RulerAppError> {
    let transform = CoordinateTransform::try_from(layout.transform)?;
    let mut scales = build_scales(layout, records)?
        .into_iter()
        .map(|scale| scale.normalized(&transform))
        .collect::<Result<Vec<_>, _>>()?;
    if layout.reverse {
        scales.reverse();
    }

    let mut scene = SceneGraph::new(layout.width, layout.height);
    if let Some(frame) = &layout.frame {
        scene.add_mark(frame.to_mark());
    }
    for (i, scale) in scales.iter_mut().enumerate() {
        let y = layout.y0 + i as f32 * layout.spacing;
        render_scale(scale, &mut scene, [layout.x0, y], layout.length, &layout.render)?;
    }
    log::info!(
        "Assembled {} scales on a {}x{} canvas",
        scales.len(),
        layout.width,
        layout.height
    );
    Ok(scene)
}
