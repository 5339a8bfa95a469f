//! SVG 1.1 writer for [`SceneGraph`].
//!
//! Groups become `<g id="...">` elements so that every printed scale, and each
//! tick tier within it, can be picked out in a vector editor afterwards.
use std::fmt::Write;
use std::path::Path;

use cosmicruler_common::types::RgbaColor;

use crate::error::RulerSceneGraphError;
use crate::marks::group::SceneGroup;
use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use crate::scene_graph::SceneGraph;

impl SceneGraph {
    /// Serializes the scene graph as a standalone SVG document
    pub fn to_svg(&self) -> Result<String, RulerSceneGraphError> {
        let mut svg = String::new();
        writeln!(
            svg,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
        )?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        let root = self.origin != [0.0, 0.0];
        if root {
            writeln!(
                svg,
                r#"  <g transform="translate({},{})">"#,
                self.origin[0], self.origin[1]
            )?;
        }
        let depth = if root { 2 } else { 1 };
        for mark in &self.marks {
            write_mark(&mut svg, mark, depth)?;
        }
        if root {
            writeln!(svg, "  </g>")?;
        }
        writeln!(svg, "</svg>")?;
        Ok(svg)
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<(), RulerSceneGraphError> {
        write_output(path.as_ref(), self.to_svg()?)
    }
}

pub(crate) fn write_output(
    path: &Path,
    contents: impl AsRef<[u8]>,
) -> Result<(), RulerSceneGraphError> {
    std::fs::write(path, contents).map_err(|source| RulerSceneGraphError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn write_mark(svg: &mut String, mark: &SceneMark, depth: usize) -> std::fmt::Result {
    match mark {
        SceneMark::Group(group) => write_group(svg, group, depth),
        SceneMark::Rule(rule) => write_rule(svg, rule, depth),
        SceneMark::Text(text) => write_text(svg, text, depth),
        SceneMark::Rect(rect) => write_rect(svg, rect, depth),
    }
}

fn write_group(svg: &mut String, group: &SceneGroup, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    write!(svg, r#"{indent}<g id="{}""#, escape(&group.name))?;
    if group.origin != [0.0, 0.0] {
        write!(
            svg,
            r#" transform="translate({},{})""#,
            group.origin[0], group.origin[1]
        )?;
    }
    if group.marks.is_empty() {
        return writeln!(svg, "/>");
    }
    writeln!(svg, ">")?;
    for mark in &group.marks {
        write_mark(svg, mark, depth + 1)?;
    }
    writeln!(svg, "{indent}</g>")
}

fn write_rule(svg: &mut String, rule: &SceneRuleMark, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    for ((segment, stroke), stroke_width) in rule
        .segments()
        .zip(rule.stroke_iter())
        .zip(rule.stroke_width_iter())
    {
        let [x1, y1, x2, y2] = segment;
        writeln!(
            svg,
            r#"{indent}<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{} stroke-width="{stroke_width}" stroke-linecap="{}"/>"#,
            paint("stroke", stroke),
            rule.stroke_cap.as_ref()
        )?;
    }
    Ok(())
}

fn write_text(svg: &mut String, text: &SceneTextMark, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    for instance in text.instances() {
        write!(
            svg,
            r#"{indent}<text x="{}" y="{}" text-anchor="{}" dominant-baseline="{}" font-family="{}" font-size="{}" font-weight="{}"{}"#,
            instance.x,
            instance.y,
            instance.align.text_anchor(),
            instance.baseline.dominant_baseline(),
            escape(instance.font),
            instance.font_size,
            instance.font_weight.to_svg_value(),
            paint("fill", &instance.color),
        )?;
        if instance.angle != 0.0 {
            write!(
                svg,
                r#" transform="rotate({},{},{})""#,
                instance.angle, instance.x, instance.y
            )?;
        }
        writeln!(svg, ">{}</text>", escape(instance.text))?;
    }
    Ok(())
}

fn write_rect(svg: &mut String, rect: &SceneRectMark, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    for instance in rect.instances() {
        write!(
            svg,
            r#"{indent}<rect x="{}" y="{}" width="{}" height="{}""#,
            instance.x, instance.y, instance.width, instance.height
        )?;
        if instance.corner_radius > 0.0 {
            write!(svg, r#" rx="{}""#, instance.corner_radius)?;
        }
        writeln!(
            svg,
            r#"{}{} stroke-width="{}"/>"#,
            paint("fill", &instance.fill),
            paint("stroke", &instance.stroke),
            instance.stroke_width
        )?;
    }
    Ok(())
}

/// `fill`/`stroke` attribute plus its opacity when not fully opaque
fn paint(attr: &str, color: &RgbaColor) -> String {
    if color[3] <= 0.0 {
        return format!(r#" {attr}="none""#);
    }
    let [r, g, b] = [color[0], color[1], color[2]].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    if color[3] < 1.0 {
        format!(
            r#" {attr}="rgb({r},{g},{b})" {attr}-opacity="{}""#,
            color[3]
        )
    } else {
        format!(r#" {attr}="rgb({r},{g},{b})""#)
    }
}

/// Escapes text content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
