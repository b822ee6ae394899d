//! SVG path data serializer

use crate::emit::geometry::{PathOp, Tile};
use std::f64::consts::PI;
use std::fmt::Write;

const FULL_TURN_EPSILON: f64 = 1e-9;

/// Format a coordinate with at most two decimals and no trailing zeros
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Append the path data for a list of operations
pub fn serialize(ops: &[PathOp], out: &mut String) {
    let mut current: Option<(f64, f64)> = None;
    let mut subpath_start: Option<(f64, f64)> = None;

    for op in ops {
        match *op {
            PathOp::MoveTo { x, y } => {
                push_command(out, 'M', &[x, y]);
                current = Some((x, y));
                subpath_start = current;
            }
            PathOp::LineTo { x, y } => {
                push_command(out, 'L', &[x, y]);
                current = Some((x, y));
            }
            PathOp::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => {
                let from = (radius.mul_add(start.cos(), cx), radius.mul_add(start.sin(), cy));
                match current {
                    Some(point) if same_point(point, from) => {}
                    Some(_) => push_command(out, 'L', &[from.0, from.1]),
                    None => {
                        push_command(out, 'M', &[from.0, from.1]);
                        subpath_start = Some(from);
                    }
                }
                current = Some(push_arc(out, cx, cy, radius, start, end));
            }
            PathOp::Close => {
                out.push('Z');
                current = subpath_start;
            }
        }
    }
}

/// Path data for every tile, in emission order
pub fn path_data(tiles: &[Tile]) -> String {
    let mut out = String::new();
    for tile in tiles {
        serialize(&tile.outline(), &mut out);
    }
    out
}

/// Standalone SVG document holding one filled path
pub fn document(path: &str, width: u32, height: u32, fill: [u8; 4]) -> String {
    let [r, g, b, a] = fill;
    let opacity = if a == u8::MAX {
        String::new()
    } else {
        format!(
            " fill-opacity=\"{}\"",
            format_number(f64::from(a) / f64::from(u8::MAX))
        )
    };
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\"><path fill=\"#{r:02x}{g:02x}{b:02x}\"{opacity} d=\"{path}\"/></svg>"
    )
}

fn same_point(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
}

fn push_command(out: &mut String, command: char, values: &[f64]) {
    out.push(command);
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format_number(value));
    }
}

// A single SVG arc command cannot describe a full turn, so full circles are
// written as two half arcs.
fn push_arc(out: &mut String, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> (f64, f64) {
    let sweep = end - start;
    let point_at = |angle: f64| (radius.mul_add(angle.cos(), cx), radius.mul_add(angle.sin(), cy));
    let r = format_number(radius);

    if sweep >= 2.0f64.mul_add(PI, -FULL_TURN_EPSILON) {
        let half = point_at(start + PI);
        let back = point_at(start);
        let _ = write!(
            out,
            "A{r} {r} 0 1 1 {} {}A{r} {r} 0 1 1 {} {}",
            format_number(half.0),
            format_number(half.1),
            format_number(back.0),
            format_number(back.1)
        );
        back
    } else {
        let to = point_at(end);
        let large_arc = u8::from(sweep > PI);
        let _ = write!(
            out,
            "A{r} {r} 0 {large_arc} 1 {} {}",
            format_number(to.0),
            format_number(to.1)
        );
        to
    }
}
