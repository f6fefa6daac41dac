//! Damped 2D wave heightfield inside a circular container.
//!
//! Heights, velocities and accelerations live in parallel row-major arrays
//! (`index = row * size + col`). Cells outside the container keep evolving
//! physically so waves can travel under the rim, but their exported height
//! is masked to zero.

use std::f32::consts::TAU;

use crate::constants::{BYTE_MAX, IMPULSE_RING_FRACTION, WAVE_PROPAGATION};
use crate::error::GridError;
use crate::params::FluidParams;

#[derive(Clone, Debug)]
pub struct Heightfield {
    size: usize,
    cell_size: f32,
    container_radius: f32,
    height: Vec<f32>,
    velocity: Vec<f32>,
    acceleration: Vec<f32>,
    rendered: Vec<f32>,
    inside: Vec<bool>,
}

impl Heightfield {
    /// Grid spanning the container diameter: `cell_size = 2R / size`.
    pub fn new(size: usize, container_radius: f32) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cell_size = container_radius * 2.0 / size as f32;
        Self::with_cell_size(size, container_radius, cell_size)
    }

    pub fn with_cell_size(
        size: usize,
        container_radius: f32,
        cell_size: f32,
    ) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !(container_radius.is_finite() && container_radius > 0.0) {
            return Err(GridError::InvalidRadius(container_radius));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        let len = size * size;
        let mut field = Self {
            size,
            cell_size,
            container_radius,
            height: vec![0.0; len],
            velocity: vec![0.0; len],
            acceleration: vec![0.0; len],
            rendered: vec![0.0; len],
            inside: vec![false; len],
        };
        // The mask only depends on grid geometry, so it is built once.
        for row in 0..size {
            for col in 0..size {
                let (x, z) = field.world_position(row, col);
                field.inside[row * size + col] = (x * x + z * z).sqrt() < container_radius;
            }
        }
        Ok(field)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn container_radius(&self) -> f32 {
        self.container_radius
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// World-space (x, z) of a cell, measured from the container centre.
    pub fn world_position(&self, row: usize, col: usize) -> (f32, f32) {
        let half = self.size as f32 / 2.0;
        (
            (col as f32 - half) * self.cell_size,
            (row as f32 - half) * self.cell_size,
        )
    }

    pub fn is_inside(&self, index: usize) -> bool {
        self.inside.get(index).copied().unwrap_or(false)
    }

    pub fn heights(&self) -> &[f32] {
        &self.height
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocity
    }

    pub fn accelerations(&self) -> &[f32] {
        &self.acceleration
    }

    /// Heights as they should be drawn: zero outside the container.
    pub fn rendered_heights(&self) -> &[f32] {
        &self.rendered
    }

    /// Sum of absolute velocities, a cheap proxy for how lively the surface is.
    pub fn total_speed(&self) -> f32 {
        self.velocity.iter().map(|v| v.abs()).sum()
    }

    pub fn reset(&mut self) {
        self.height.fill(0.0);
        self.velocity.fill(0.0);
        self.acceleration.fill(0.0);
        self.rendered.fill(0.0);
    }

    /// Cell a frequency bin lands on. Bins are spread around a ring at half
    /// the container radius, low frequencies starting on the +x axis.
    pub fn impulse_target(&self, bin: usize, bin_count: usize) -> Option<usize> {
        if bin_count == 0 {
            return None;
        }
        let r = self.container_radius;
        let angle = bin as f32 / bin_count as f32 * TAU;
        let x = angle.cos() * r * IMPULSE_RING_FRACTION;
        let z = angle.sin() * r * IMPULSE_RING_FRACTION;
        let grid_x = ((x + r) / self.cell_size).round();
        let grid_z = ((z + r) / self.cell_size).round();
        let n = self.size as f32;
        if !(0.0..n).contains(&grid_x) || !(0.0..n).contains(&grid_z) {
            return None;
        }
        Some(self.index(grid_z as usize, grid_x as usize))
    }

    /// Accumulate `amount` into one cell's acceleration. Returns false when
    /// the index lies outside the grid.
    pub fn add_impulse(&mut self, index: usize, amount: f32) -> bool {
        match self.acceleration.get_mut(index) {
            Some(a) => {
                *a += amount;
                true
            }
            None => false,
        }
    }

    /// Turn one frame of frequency magnitudes into accelerations. Several bins
    /// may hit the same cell; their contributions add up. Returns how many
    /// bins landed inside the grid.
    pub fn inject_impulses(&mut self, bins: &[u8], params: &FluidParams) -> usize {
        let mut landed = 0;
        for (i, &bin) in bins.iter().enumerate() {
            let magnitude = bin as f32 / BYTE_MAX;
            if let Some(target) = self.impulse_target(i, bins.len()) {
                self.acceleration[target] += params.impulse_strength() * magnitude;
                landed += 1;
            }
        }
        if landed < bins.len() {
            log::trace!("dropped {} impulses outside the grid", bins.len() - landed);
        }
        landed
    }

    /// Advance one tick: integrate, mask, then queue wave propagation for the
    /// next tick.
    pub fn step(&mut self, params: &FluidParams) {
        let damping = params.damping();
        for i in 0..self.height.len() {
            self.velocity[i] += self.acceleration[i];
            self.velocity[i] /= damping;
            self.height[i] += self.velocity[i];
            self.acceleration[i] = 0.0;
            self.rendered[i] = if self.inside[i] { self.height[i] } else { 0.0 };
        }

        let n = self.size;
        if n < 3 {
            return;
        }
        for row in 1..n - 1 {
            for col in 1..n - 1 {
                let i = row * n + col;
                let neighbors =
                    self.height[i - 1] + self.height[i + 1] + self.height[i - n] + self.height[i + n];
                let laplacian = neighbors - 4.0 * self.height[i];
                self.acceleration[i] += laplacian * WAVE_PROPAGATION;
            }
        }
    }
}
