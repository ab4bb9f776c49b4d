use crate::export::SurfaceData;
use log::warn;

/// Magnitude past which a height is treated as runaway growth.
pub const DIVERGENCE_THRESHOLD: f32 = 1.0e6;

#[derive(Debug, Clone)]
pub struct SurfaceMetrics {
    pub total_energy: f32,
    pub max_amplitude: f32,
    pub mean_height: f32,
    pub rms_height: f32,
    pub obstructed_cells: usize,
    pub diverging: bool,
    pub frame: usize,
}

impl SurfaceMetrics {
    pub fn analyze(surface: &impl SurfaceData, frame: usize) -> Self {
        let mut total_energy: f32 = 0.0;
        let mut max_amplitude: f32 = 0.0;
        let mut height_sum: f32 = 0.0;
        let mut non_finite = false;

        for &h in surface.heights() {
            if !h.is_finite() {
                non_finite = true;
                continue;
            }
            total_energy += h * h;
            height_sum += h;
            max_amplitude = max_amplitude.max(h.abs());
        }

        let obstructed_cells = surface.obstructions().iter().filter(|&&o| o < 1.0).count();

        let size = (surface.width() * surface.height()).max(1) as f32;
        let diverging = non_finite || max_amplitude > DIVERGENCE_THRESHOLD;
        if diverging {
            warn!(
                "surface diverging at frame {}: max amplitude {}, non-finite values: {}",
                frame, max_amplitude, non_finite
            );
        }

        Self {
            total_energy,
            max_amplitude,
            mean_height: height_sum / size,
            rms_height: (total_energy / size).sqrt(),
            obstructed_cells,
            diverging,
            frame,
        }
    }

    pub fn print_summary(&self) {
        println!("Frame {} Metrics:", self.frame);
        println!("  Total Energy: {:.6}", self.total_energy);
        println!("  Max Amplitude: {:.6}", self.max_amplitude);
        println!("  Mean Height: {:.6}", self.mean_height);
        println!("  RMS Height: {:.6}", self.rms_height);
        println!("  Obstructed Cells: {}", self.obstructed_cells);
        if self.diverging {
            println!("  WARNING: surface is diverging");
        }
        println!();
    }
}

#[derive(Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<SurfaceMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self {
            metrics_history: Vec::new(),
        }
    }

    pub fn record_frame(&mut self, surface: &impl SurfaceData, frame: usize) {
        let metrics = SurfaceMetrics::analyze(surface, frame);
        self.metrics_history.push(metrics);
    }

    pub fn any_diverging(&self) -> bool {
        self.metrics_history.iter().any(|m| m.diverging)
    }

    /// Frame with the largest total energy.
    pub fn peak_energy_frame(&self) -> Option<usize> {
        self.metrics_history
            .iter()
            .max_by(|a, b| a.total_energy.total_cmp(&b.total_energy))
            .map(|m| m.frame)
    }

    pub fn print_trends(&self) {
        if self.metrics_history.len() < 2 {
            return;
        }

        let first = &self.metrics_history[0];
        let last = &self.metrics_history[self.metrics_history.len() - 1];

        println!("=== TREND ANALYSIS ===");
        println!(
            "Energy change: {:.6} -> {:.6} ({:+.3}%)",
            first.total_energy,
            last.total_energy,
            (last.total_energy - first.total_energy) / first.total_energy.max(0.001) * 100.0
        );
        println!(
            "Max amplitude change: {:.6} -> {:.6}",
            first.max_amplitude, last.max_amplitude
        );
        if let Some(frame) = self.peak_energy_frame() {
            println!("Peak energy at frame {}", frame);
        }
    }
}
