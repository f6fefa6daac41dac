//! Line-list geometry handed to the renderers.
//!
//! Every scene is drawn as coloured line segments: pairs of [`LineVertex`]
//! values, appended to a caller-owned buffer so frames reuse one allocation.

use glam::{Quat, Vec3};

use crate::bars::BarRing;
use crate::constants::*;
use crate::curve::catmull_rom;
use crate::heightfield::Heightfield;
use crate::ribbon::RibbonHistory;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    #[inline]
    pub fn new(position: Vec3, rgb: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }
}

#[inline]
fn segment(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, rgb: [f32; 3]) {
    out.push(LineVertex::new(a, rgb));
    out.push(LineVertex::new(b, rgb));
}

/// Append a polyline as independent segments.
pub fn push_polyline(out: &mut Vec<LineVertex>, points: &[Vec3], rgb: [f32; 3]) {
    for pair in points.windows(2) {
        segment(out, pair[0], pair[1], rgb);
    }
}

/// Placement of ribbon lines in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct RibbonLayout {
    pub left_end: f32,
    pub right_end: f32,
    pub first_line_z: f32,
    pub line_separation: f32,
    pub height_scale: f32,
    pub lift_growth: f32,
    pub lift_base: f32,
    /// Smoothed points per raw sample; 0 disables smoothing.
    pub upsample: usize,
}

impl Default for RibbonLayout {
    fn default() -> Self {
        Self {
            left_end: RIBBON_LEFT_END,
            right_end: RIBBON_RIGHT_END,
            first_line_z: RIBBON_FIRST_LINE_Z,
            line_separation: RIBBON_LINE_SEPARATION,
            height_scale: RIBBON_HEIGHT_SCALE,
            lift_growth: RIBBON_LIFT_GROWTH,
            lift_base: RIBBON_LIFT_BASE,
            upsample: RIBBON_UPSAMPLE,
        }
    }
}

impl RibbonLayout {
    /// Raw points for line `line` (0 = newest): x along the line, y from the
    /// sample value, z fixed per line.
    pub fn line_points(&self, slot: &[f32], line: usize) -> Vec<Vec3> {
        let width = slot.len().max(1) as f32;
        let length = self.right_end - self.left_end;
        let z = self.first_line_z + line as f32 * self.line_separation;
        let lift = (self.lift_growth * line as f32).exp() * self.lift_base;
        slot.iter()
            .enumerate()
            .map(|(j, &v)| {
                Vec3::new(
                    j as f32 / width * length + self.left_end,
                    (v - REFERENCE_MIDPOINT) / 128.0 * self.height_scale + lift,
                    z,
                )
            })
            .collect()
    }

    /// Points for line `line`, smoothed when `upsample > 0`.
    pub fn smoothed_line(&self, slot: &[f32], line: usize) -> Vec<Vec3> {
        let raw = self.line_points(slot, line);
        if self.upsample == 0 {
            return raw;
        }
        catmull_rom(&raw, slot.len() * self.upsample)
    }
}

/// Every history slot as a smoothed polyline, newest at the front.
pub fn ribbon_lines(
    out: &mut Vec<LineVertex>,
    history: &RibbonHistory,
    layout: &RibbonLayout,
    rgb: [f32; 3],
) {
    let capacity = history.capacity().max(1) as f32;
    for (line, slot) in history.iter_newest_first().enumerate() {
        // Older lines fade toward the background.
        let fade = 1.0 - 0.6 * line as f32 / capacity;
        let shade = [rgb[0] * fade, rgb[1] * fade, rgb[2] * fade];
        push_polyline(out, &layout.smoothed_line(slot, line), shade);
    }
}

/// Wireframe of the masked heightfield, every `stride`-th row and column,
/// centred on the origin in the XZ plane.
pub fn heightfield_wireframe(
    out: &mut Vec<LineVertex>,
    field: &Heightfield,
    stride: usize,
    emissive_intensity: f32,
) {
    let n = field.size();
    let stride = stride.max(1);
    let heights = field.rendered_heights();
    let point = |row: usize, col: usize| {
        let (x, z) = field.world_position(row, col);
        Vec3::new(x, heights[row * n + col], z)
    };
    let shade = |a: Vec3, b: Vec3| fluid_color((a.y + b.y) * 0.5, emissive_intensity);

    for row in (0..n).step_by(stride) {
        for col in 0..n.saturating_sub(1) {
            if !field.is_inside(row * n + col) && !field.is_inside(row * n + col + 1) {
                continue;
            }
            let (a, b) = (point(row, col), point(row, col + 1));
            segment(out, a, b, shade(a, b));
        }
    }
    for col in (0..n).step_by(stride) {
        for row in 0..n.saturating_sub(1) {
            if !field.is_inside(row * n + col) && !field.is_inside((row + 1) * n + col) {
                continue;
            }
            let (a, b) = (point(row, col), point(row + 1, col));
            segment(out, a, b, shade(a, b));
        }
    }
}

/// Water colour lit by height, plus the emissive glow scaled by intensity.
pub fn fluid_color(height: f32, emissive_intensity: f32) -> [f32; 3] {
    let light = (0.55 + height * 0.08).clamp(0.2, 1.0);
    let mut rgb = [0.0; 3];
    for (k, c) in rgb.iter_mut().enumerate() {
        *c = (FLUID_BASE_COLOR[k] * light + FLUID_EMISSIVE_COLOR[k] * emissive_intensity)
            .clamp(0.0, 1.0);
    }
    rgb
}

// Box corners as (x, y, z) unit offsets; y runs from the base upward.
const BOX_CORNERS: [[f32; 3]; 8] = [
    [-0.5, 0.0, -0.5],
    [0.5, 0.0, -0.5],
    [0.5, 0.0, 0.5],
    [-0.5, 0.0, 0.5],
    [-0.5, 1.0, -0.5],
    [0.5, 1.0, -0.5],
    [0.5, 1.0, 0.5],
    [-0.5, 1.0, 0.5],
];

const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Edges of every bar, scaled vertically by its current magnitude.
pub fn bar_edges(out: &mut Vec<LineVertex>, ring: &BarRing) {
    let size = Vec3::new(ring.width, ring.height, ring.depth);
    for (i, &scale) in ring.scales().iter().enumerate() {
        let place = ring.placement(i);
        let rot = Quat::from_rotation_y(place.yaw);
        let corners = BOX_CORNERS.map(|c| {
            let local = Vec3::from(c) * size * Vec3::new(1.0, scale, 1.0);
            place.position + rot * local
        });
        for (a, b) in BOX_EDGES {
            // Surface coordinate: across the bar and up its height.
            let st = [
                (BOX_CORNERS[a][0] + BOX_CORNERS[b][0]) * 0.5 + 0.5,
                (BOX_CORNERS[a][1] + BOX_CORNERS[b][1]) * 0.5,
            ];
            segment(out, corners[a], corners[b], ring.shade(st));
        }
    }
}
