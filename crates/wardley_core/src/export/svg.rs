//! SVG rendering of a map snapshot.

use crate::model::canvas::CanvasGeometry;
use crate::model::component::{Component, ComponentId};
use crate::model::snapshot::MapSnapshot;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt::Write;

const GRID_STEP: f64 = 40.0;
const NODE_RADIUS: f64 = 18.0;
const ARROW_HEAD_LENGTH: f64 = 10.0;

const BACKGROUND: &str = "#f9fafc";
const GRID_LINE: &str = "#e0e0e0";
const AXIS: &str = "#546e7a";
const NODE_FILL: &str = "#2196f3";
const NODE_STROKE: &str = "#1565c0";
const NODE_TEXT: &str = "#263238";
const EDGE_LINE: &str = "#455a64";
const EDGE_ARROW: &str = "#37474f";

/// Renders a standalone SVG document. Dangling relationships are skipped.
pub fn render_svg(snapshot: &MapSnapshot, geometry: &CanvasGeometry) -> Result<String, std::fmt::Error> {
    let (width, height) = (geometry.width, geometry.height);
    let mut out = String::new();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(out, r#"  <rect width="{width}" height="{height}" fill="{BACKGROUND}"/>"#)?;
    write_grid(&mut out, geometry)?;
    write_axes(&mut out, geometry)?;

    let by_id: HashMap<&ComponentId, &Component> = snapshot
        .components
        .iter()
        .map(|component| (&component.id, component))
        .collect();
    writeln!(out, r#"  <g class="relationships">"#)?;
    for relationship in &snapshot.relationships {
        let (Some(a), Some(b)) = (by_id.get(&relationship.source), by_id.get(&relationship.target))
        else {
            continue;
        };
        writeln!(
            out,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{EDGE_LINE}" stroke-width="2"/>"#,
            a.x, a.y, b.x, b.y
        )?;
        let angle = (b.y - a.y).atan2(b.x - a.x);
        for wing in [angle - PI / 6.0, angle + PI / 6.0] {
            writeln!(
                out,
                r#"    <line x1="{}" y1="{}" x2="{:.2}" y2="{:.2}" stroke="{EDGE_ARROW}" stroke-width="2"/>"#,
                b.x,
                b.y,
                b.x - ARROW_HEAD_LENGTH * wing.cos(),
                b.y - ARROW_HEAD_LENGTH * wing.sin()
            )?;
        }
        if relationship.kind != "default" {
            writeln!(
                out,
                r#"    <text x="{}" y="{}" font-size="10" text-anchor="middle" fill="{AXIS}">{}</text>"#,
                (a.x + b.x) / 2.0,
                (a.y + b.y) / 2.0 - 5.0,
                escape_xml(&relationship.kind)
            )?;
        }
    }
    writeln!(out, "  </g>")?;

    writeln!(out, r#"  <g class="components">"#)?;
    for component in &snapshot.components {
        writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{NODE_RADIUS}" fill="{NODE_FILL}" stroke="{NODE_STROKE}" stroke-width="2"/>"#,
            component.x, component.y
        )?;
        writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="12" text-anchor="middle" fill="{NODE_TEXT}">{}</text>"#,
            component.x,
            component.y + 32.0,
            escape_xml(component.label())
        )?;
    }
    writeln!(out, "  </g>")?;
    out.push_str("</svg>\n");
    Ok(out)
}

fn write_grid(out: &mut String, geometry: &CanvasGeometry) -> std::fmt::Result {
    let (left, right) = (geometry.plot_left(), geometry.plot_right());
    let (top, bottom) = (geometry.plot_top(), geometry.plot_bottom());
    writeln!(out, r#"  <g class="grid" stroke="{GRID_LINE}" stroke-width="1">"#)?;
    let mut y = top;
    while y <= bottom {
        writeln!(out, r#"    <line x1="{left}" y1="{y}" x2="{right}" y2="{y}"/>"#)?;
        y += GRID_STEP;
    }
    let mut x = left;
    while x <= right {
        writeln!(out, r#"    <line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}"/>"#)?;
        x += GRID_STEP;
    }
    writeln!(out, "  </g>")
}

fn write_axes(out: &mut String, geometry: &CanvasGeometry) -> std::fmt::Result {
    let (left, right) = (geometry.plot_left(), geometry.plot_right());
    let (top, bottom) = (geometry.plot_top(), geometry.plot_bottom());
    let label_y = geometry.height - geometry.margin / 2.0;
    let mid_y = geometry.height / 2.0;
    let label_x = geometry.margin / 2.0;
    writeln!(
        out,
        r#"  <path d="M{left} {top} L{left} {bottom} L{right} {bottom}" fill="none" stroke="{AXIS}" stroke-width="2"/>"#
    )?;
    writeln!(
        out,
        r#"  <text x="{left}" y="{label_y}" font-size="14" text-anchor="middle" fill="{AXIS}">Genesis</text>"#
    )?;
    writeln!(
        out,
        r#"  <text x="{right}" y="{label_y}" font-size="14" text-anchor="middle" fill="{AXIS}">Commodity</text>"#
    )?;
    writeln!(
        out,
        r#"  <text x="{label_x}" y="{mid_y}" font-size="14" text-anchor="middle" fill="{AXIS}" transform="rotate(-90 {label_x} {mid_y})">Visibility</text>"#
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
