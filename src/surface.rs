//! CPU iWave height-field surface.
//!
//! Tessendorf, "Interactive Water Surfaces": a height field advanced by a damped
//! wave equation whose spatial operator is a precomputed radial convolution
//! kernel (see [`DerivativeKernel`]).

use crate::error::{Result, SurfaceError};
use crate::kernel::DerivativeKernel;
use crate::stability::{check_stability, StabilityBound};
use crate::SurfaceSimulation;
use log::{debug, trace};
use rayon::prelude::*;
use std::ops::RangeInclusive;

/// Height reported for cells outside the grid.
pub const HEIGHT_SENTINEL: f32 = 0.5;
/// Obstruction reported for cells outside the grid.
pub const OBSTRUCTION_SENTINEL: f32 = 1.0;

// For 30fps: acceleration <= 225 and damping <= 60
pub const DEFAULT_ACCELERATION: f32 = 20.0;
pub const DEFAULT_DAMPING: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct IWaveSurface {
    width: usize,
    height: usize,
    heights: Vec<f32>,
    previous: Vec<f32>,
    derivative: Vec<f32>,
    source: Vec<f32>,
    obstruction: Vec<f32>,
    kernel: DerivativeKernel,
    // Reflected coordinate for every position in [-p, n + p) along each axis
    reflect_x: Vec<usize>,
    reflect_y: Vec<usize>,
    pub acceleration: f32,
    pub damping: f32,
}

impl SurfaceSimulation for IWaveSurface {
    fn place_source(&mut self, x: i32, y: i32, radius: f32, strength: f32) {
        self.place_source(x, y, radius, strength)
    }

    fn set_obstruction(&mut self, x: i32, y: i32, radius: f32, strength: f32) {
        self.set_obstruction(x, y, radius, strength)
    }

    fn sim_frame(&mut self, delta: f32) {
        self.sim_frame(delta)
    }

    fn reset(&mut self) {
        self.reset()
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn height_at(&self, x: i32, y: i32) -> f32 {
        self.height_at(x, y)
    }

    fn obstruction_at(&self, x: i32, y: i32) -> f32 {
        self.obstruction_at(x, y)
    }
}

impl IWaveSurface {
    pub fn new(width: usize, height: usize, kernel_radius: usize) -> Result<Self> {
        let size = width
            .checked_mul(height)
            .filter(|&size| size > 0 && width <= i32::MAX as usize && height <= i32::MAX as usize)
            .ok_or(SurfaceError::InvalidDimensions { width, height })?;

        let kernel = DerivativeKernel::new(kernel_radius);
        let reflect_x = reflection_table(width, kernel_radius);
        let reflect_y = reflection_table(height, kernel_radius);

        debug!(
            "created {}x{} iwave surface with kernel radius {}",
            width, height, kernel_radius
        );

        let mut surface = Self {
            width,
            height,
            heights: vec![0.0; size],
            previous: vec![0.0; size],
            derivative: vec![0.0; size],
            source: vec![0.0; size],
            obstruction: vec![1.0; size],
            kernel,
            reflect_x,
            reflect_y,
            acceleration: DEFAULT_ACCELERATION,
            damping: DEFAULT_DAMPING,
        };
        surface.reset();
        Ok(surface)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn kernel(&self) -> &DerivativeKernel {
        &self.kernel
    }

    /// Linear offset of (x, y), or `None` outside the grid.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x + y * self.width)
    }

    /// Linear offset of (x, y) after folding both coordinates back into the grid.
    /// Never fails.
    pub fn reflected_index(&self, x: i32, y: i32) -> usize {
        reflect(x, self.width) + reflect(y, self.height) * self.width
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn previous_heights(&self) -> &[f32] {
        &self.previous
    }

    pub fn derivative(&self) -> &[f32] {
        &self.derivative
    }

    pub fn sources(&self) -> &[f32] {
        &self.source
    }

    pub fn obstructions(&self) -> &[f32] {
        &self.obstruction
    }

    pub fn height_at(&self, x: i32, y: i32) -> f32 {
        self.index(x, y)
            .map_or(HEIGHT_SENTINEL, |idx| self.heights[idx])
    }

    pub fn obstruction_at(&self, x: i32, y: i32) -> f32 {
        self.index(x, y)
            .map_or(OBSTRUCTION_SENTINEL, |idx| self.obstruction[idx])
    }

    pub fn source_at(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |idx| self.source[idx])
    }

    /// Zeroes every field and clears all obstructions.
    pub fn reset(&mut self) {
        self.heights.fill(0.0);
        self.previous.fill(0.0);
        self.derivative.fill(0.0);
        self.source.fill(0.0);
        self.obstruction.fill(1.0);
    }

    /// Adds a cone of height `radius` at (x, y), scaled by `strength`, into the
    /// source field. Accumulates until the next frame consumes it.
    pub fn place_source(&mut self, x: i32, y: i32, radius: f32, strength: f32) {
        trace!("source at ({}, {}) r={} s={}", x, y, radius, strength);
        let extent = (radius + 0.5) as i32;

        for iy in clipped_offsets(y, extent, self.height) {
            for ix in clipped_offsets(x, extent, self.width) {
                let (fx, fy) = (ix as f32, iy as f32);
                let contrib = radius - (fx * fx + fy * fy).sqrt();
                if contrib > 0.0 {
                    let idx = self.offset_index(x, y, ix, iy);
                    self.source[idx] += contrib * strength;
                }
            }
        }
    }

    /// Lowers the obstruction mask to `1 - strength` over a square around (x, y).
    /// Never raises a cell; only `reset` does.
    pub fn set_obstruction(&mut self, x: i32, y: i32, radius: f32, strength: f32) {
        trace!("obstruction at ({}, {}) r={} s={}", x, y, radius, strength);
        let extent = (radius + 0.5).abs() as i32;
        let candidate = 1.0 - strength.clamp(0.0, 1.0);

        for iy in clipped_offsets(y, extent, self.height) {
            for ix in clipped_offsets(x, extent, self.width) {
                let idx = self.offset_index(x, y, ix, iy);
                self.obstruction[idx] = candidate.min(self.obstruction[idx]);
            }
        }
    }

    // Only valid for offsets produced by `clipped_offsets`
    fn offset_index(&self, x: i32, y: i32, ix: i64, iy: i64) -> usize {
        (x as i64 + ix) as usize + (y as i64 + iy) as usize * self.width
    }

    /// Advances the surface by one frame of length `delta` seconds.
    pub fn sim_frame(&mut self, delta: f32) {
        trace!("sim frame delta={}", delta);
        self.apply_sources();
        self.convolve();
        self.propagate(delta);
    }

    /// Checks this surface's coefficients against the stability bound for `delta`.
    pub fn check_stability(&self, delta: f32) -> Result<StabilityBound> {
        check_stability(self.acceleration, self.damping, delta)
    }

    /// Adds and consumes the source field, then applies the obstruction mask.
    pub fn apply_sources(&mut self) {
        for ((h, s), o) in self
            .heights
            .iter_mut()
            .zip(self.source.iter_mut())
            .zip(self.obstruction.iter())
        {
            *h += *s;
            *h *= *o;
            *s = 0.0;
        }
    }

    /// Recomputes the derivative field as the kernel convolved with the current
    /// heights, sampling out-of-range taps by reflection.
    pub fn convolve(&mut self) {
        let width = self.width;
        let side = self.kernel.side();
        let taps = self.kernel.values();
        let heights = &self.heights;
        let reflect_x = &self.reflect_x;
        let reflect_y = &self.reflect_y;

        self.derivative
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let mut sum = 0.0f32;
                    for dy in 0..side {
                        let row_offset = reflect_y[y + dy] * width;
                        let kernel_row = &taps[dy * side..(dy + 1) * side];
                        for (dx, &k) in kernel_row.iter().enumerate() {
                            sum += heights[row_offset + reflect_x[x + dx]] * k;
                        }
                    }
                    *out = sum;
                }
            });
    }

    /// Semi-implicit damped wave step using the current derivative field.
    pub fn propagate(&mut self, delta: f32) {
        let alpha_dt = self.damping * delta;
        let one_plus_alpha_dt = 1.0 + alpha_dt;
        let acceleration = self.acceleration;

        for ((h, prev), d) in self
            .heights
            .iter_mut()
            .zip(self.previous.iter_mut())
            .zip(self.derivative.iter())
        {
            let current = *h;
            *h = (current * (2.0 - alpha_dt) / one_plus_alpha_dt)
                - (*prev / one_plus_alpha_dt)
                - (*d * acceleration * delta * delta / one_plus_alpha_dt);
            *prev = current;
        }
    }
}

/// Folds a coordinate into [0, n): negatives mirror about 0, values past the end
/// mirror about the last cell. Repeats for offsets wider than the grid.
fn reflect(c: i32, n: usize) -> usize {
    let n = n as i64;
    let mut c = c as i64;
    loop {
        if c < 0 {
            c = -c;
        } else if c >= n {
            c = 2 * n - c - 1;
        } else {
            return c as usize;
        }
    }
}

/// Brush offsets in `[-extent, extent]` that land inside `[0, n)` around `center`.
/// Empty when the brush misses the grid entirely.
fn clipped_offsets(center: i32, extent: i32, n: usize) -> RangeInclusive<i64> {
    let (center, extent) = (center as i64, extent as i64);
    let lo = (-extent).max(-center);
    let hi = extent.min(n as i64 - 1 - center);
    lo..=hi
}

/// `table[i]` is the reflected coordinate of `i - radius`.
fn reflection_table(n: usize, radius: usize) -> Vec<usize> {
    let radius = radius as i64;
    (0..n as i64 + 2 * radius)
        .map(|i| reflect((i - radius) as i32, n))
        .collect()
}
