//! PNG rasterization of the SVG output through `resvg`.
use std::panic;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use resvg::render;
use usvg::fontdb::Database;

use crate::error::RulerSceneGraphError;
use crate::scene_graph::SceneGraph;
use crate::svg::write_output;

lazy_static! {
    pub static ref FONT_DB: Mutex<usvg::fontdb::Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> usvg::fontdb::Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    font_database
}

/// Renders an SVG document to PNG bytes, `scale` pixels per SVG unit
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, RulerSceneGraphError> {
    let font_database = match FONT_DB.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };

    let rasterize = move || -> Result<Vec<u8>, RulerSceneGraphError> {
        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let opts = usvg::Options {
            fontdb: Arc::new(font_database),
            ..Default::default()
        };
        let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
        let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

        let width = (rtree.size().width() * scale).ceil() as u32;
        let height = (rtree.size().height() * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RulerSceneGraphError::InvalidRasterSize { width, height })?;

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        render(&rtree, transform, &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| RulerSceneGraphError::PngEncoding(err.to_string()))
    };

    // A panic inside usvg/resvg becomes a RasterizerPanic error
    let response = panic::catch_unwind(panic::AssertUnwindSafe(rasterize));
    match response {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RulerSceneGraphError::RasterizerPanic(message))
        }
    }
}

impl SceneGraph {
    pub fn to_png(&self, scale: f32) -> Result<Vec<u8>, RulerSceneGraphError> {
        svg_to_png(&self.to_svg()?, scale)
    }

    /// Writes the SVG and its PNG rendering.
    ///
    /// Both documents are rendered before either file is touched, so a
    /// rasterizer failure leaves nothing on disk.
    pub fn save_svg_and_png(
        &self,
        svg_path: impl AsRef<Path>,
        png_path: impl AsRef<Path>,
        scale: f32,
    ) -> Result<(), RulerSceneGraphError> {
        let svg = self.to_svg()?;
        let png = svg_to_png(&svg, scale)?;
        write_output(svg_path.as_ref(), svg)?;
        write_output(png_path.as_ref(), png)
    }
}
