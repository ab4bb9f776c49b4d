//! Radial derivative kernel for the iWave convolution.
//!
//! Each tap (k, l) holds `G(r) / G0` with `r = sqrt(k² + l²)` and
//!
//! ```text
//! G(r) = Σ_{i=1..N} q_i² · exp(-σ q_i²) · J0(q_i · r),   q_i = i · dq
//! ```
//!
//! `G0` is the same sum at `r = 0`, so the center tap is exactly 1.0.

use log::debug;
use std::collections::HashMap;

/// Number of quadrature steps.
pub const QUADRATURE_STEPS: u32 = 10_000;
/// Quadrature step in wavenumber.
pub const QUADRATURE_STEP: f32 = 0.001;
/// Gaussian falloff that keeps the integral convergent.
pub const QUADRATURE_SIGMA: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeKernel {
    radius: usize,
    side: usize,
    values: Vec<f32>,
}

impl DerivativeKernel {
    /// Builds the (2p+1)×(2p+1) kernel for radius `p`. Identical radii give
    /// bit-identical kernels.
    pub fn new(radius: usize) -> Self {
        let side = 2 * radius + 1;
        let g0 = radial_integral(0.0);

        // Taps at the same distance share one integral
        let mut by_distance: HashMap<i64, f32> = HashMap::new();
        let mut values = vec![0.0; side * side];

        for y in 0..side {
            for x in 0..side {
                let k = x as i64 - radius as i64;
                let l = y as i64 - radius as i64;
                let dist_sq = k * k + l * l;

                let value = *by_distance
                    .entry(dist_sq)
                    .or_insert_with(|| radial_integral((dist_sq as f32).sqrt()) / g0);

                values[x + y * side] = value;
            }
        }

        debug!(
            "built derivative kernel: radius {}, side {}, {} distinct distances",
            radius,
            side,
            by_distance.len()
        );

        Self {
            radius,
            side,
            values,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, always odd.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major tap values, `x + y * side`.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Tap at offset (k, l) from the center, or `None` outside [-p, p]².
    pub fn get(&self, k: i32, l: i32) -> Option<f32> {
        let p = self.radius as i64;
        let (k, l) = (k as i64, l as i64);
        if k < -p || k > p || l < -p || l > p {
            return None;
        }
        let x = (k + p) as usize;
        let y = (l + p) as usize;
        Some(self.values[x + y * self.side])
    }
}

/// Unnormalized quadrature of `q² exp(-σq²) J0(q r)`.
fn radial_integral(r: f32) -> f32 {
    (1..=QUADRATURE_STEPS)
        .map(|i| {
            let q = QUADRATURE_STEP * i as f32;
            let q2 = q * q;
            q2 * (-QUADRATURE_SIGMA * q2).exp() * bessel_j0((q * r) as f64) as f32
        })
        .sum()
}

/// Bessel function of the first kind, order zero.
///
/// Power series below |x| = 8, Hankel asymptotic expansion above.
pub(crate) fn bessel_j0(x: f64) -> f64 {
    let ax = x.abs();

    if ax < 8.0 {
        let x2 = ax * ax / 4.0;
        let mut sum = 1.0f64;
        let mut term = 1.0f64;

        for k in 1..60 {
            term *= -x2 / (k * k) as f64;
            sum += term;
            if term.abs() < 1e-17 {
                break;
            }
        }
        sum
    } else {
        let z = 8.0 / ax;
        let y = z * z;
        let xx = ax - 0.785_398_164;

        let p = 1.0
            + y * (-0.109_862_862_7e-2
                + y * (0.273_451_040_7e-4 + y * (-0.207_337_063_9e-5 + y * 0.209_388_721_1e-6)));
        let q = -0.156_249_999_5e-1
            + y * (0.143_048_876_5e-3
                + y * (-0.691_114_765_1e-5 + y * (0.762_109_516_1e-6 - y * 0.934_935_152e-7)));

        (0.636_619_772 / ax).sqrt() * (xx.cos() * p - z * xx.sin() * q)
    }
}
