//! Ring of frequency bars standing on a turntable.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::constants::*;
use crate::params::BarColor;

/// Where a bar stands and how it is turned to face outward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPlacement {
    pub position: Vec3,
    /// Rotation about +Y in radians (the negated placement angle).
    pub yaw: f32,
}

#[derive(Clone, Debug)]
pub struct BarRing {
    count: usize,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    radius: f32,
    scales: Vec<f32>,
    color: BarColor,
    psychedelic: bool,
    time: f32,
}

impl Default for BarRing {
    fn default() -> Self {
        Self::new(BAR_COUNT)
    }
}

impl BarRing {
    pub fn new(count: usize) -> Self {
        let total_width = count as f32 * (BAR_WIDTH + BAR_SPACING);
        Self {
            count,
            width: BAR_WIDTH,
            height: BAR_HEIGHT,
            depth: BAR_DEPTH,
            radius: total_width / TAU,
            scales: vec![1.0; count],
            color: BarColor::default(),
            psychedelic: false,
            time: 1.0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn placement(&self, i: usize) -> BarPlacement {
        let angle = i as f32 / self.count as f32 * TAU;
        BarPlacement {
            position: Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius),
            yaw: -angle,
        }
    }

    /// Vertical scale per bar, in [0, 1] once audio has arrived.
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Scale the first `min(count, bins.len())` bars by their bin magnitude.
    pub fn apply_frequencies(&mut self, bins: &[u8]) {
        for (scale, &bin) in self.scales.iter_mut().zip(bins) {
            *scale = bin as f32 / BYTE_MAX;
        }
    }

    pub fn color(&self) -> BarColor {
        self.color
    }

    pub fn set_color(&mut self, color: BarColor) {
        self.color = color;
    }

    pub fn is_psychedelic(&self) -> bool {
        self.psychedelic
    }

    pub fn set_psychedelic(&mut self, on: bool) {
        self.psychedelic = on;
    }

    pub fn toggle_psychedelic(&mut self) -> bool {
        self.psychedelic = !self.psychedelic;
        self.psychedelic
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance_time(&mut self) {
        self.time += PSYCHEDELIC_TIME_STEP;
    }

    /// Colour at surface coordinate `st` (both in [0, 1]) of a bar face.
    pub fn shade(&self, st: [f32; 2]) -> [f32; 3] {
        if self.psychedelic {
            psychedelic_color(st, self.time)
        } else {
            self.color.to_rgb_f32()
        }
    }
}

/// Animated colour bands shifting with time.
pub fn psychedelic_color(st: [f32; 2], time: f32) -> [f32; 3] {
    let [x, y] = st;
    [
        (x * 10.0 + time * 2.0).sin() * 0.5 + 0.5,
        (y * 10.0 + time * 3.0).sin() * 0.5 + 0.5,
        ((x + y) * 10.0 + time * 4.0).sin() * 0.5 + 0.5,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_radius_fits_bar_footprints() {
        let ring = BarRing::new(32);
        let expected = 32.0 * 2.0 / TAU;
        assert!((ring.radius() - expected).abs() < 1e-5);
    }

    #[test]
    fn bars_are_evenly_spaced_on_circle() {
        let ring = BarRing::new(8);
        for i in 0..8 {
            let p = ring.placement(i);
            assert!((p.position.length() - ring.radius()).abs() < 1e-4);
            assert_eq!(p.position.y, 0.0);
        }
        let quarter = ring.placement(2);
        assert!(quarter.position.x.abs() < 1e-4);
        assert!((quarter.yaw + TAU / 4.0).abs() < 1e-5);
    }

    #[test]
    fn frequencies_scale_matching_bars_only() {
        let mut ring = BarRing::new(4);
        ring.apply_frequencies(&[255, 0]);
        assert_eq!(ring.scales(), &[1.0, 0.0, 1.0, 1.0]);
        ring.apply_frequencies(&[51; 10]);
        assert!(ring.scales().iter().all(|&s| (s - 0.2).abs() < 1e-6));
    }

    #[test]
    fn psychedelic_toggle_restores_slider_colour() {
        let mut ring = BarRing::new(4);
        ring.set_color(BarColor::new(255, 0, 0));
        assert!(ring.toggle_psychedelic());
        ring.advance_time();
        let wild = ring.shade([0.3, 0.7]);
        assert!(wild.iter().all(|c| (0.0..=1.0).contains(c)));
        assert!(!ring.toggle_psychedelic());
        assert_eq!(ring.shade([0.3, 0.7]), [1.0, 0.0, 0.0]);
    }
}
