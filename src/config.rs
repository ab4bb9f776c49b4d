use crate::error::{Result, SurfaceError};
use crate::stability::check_stability;
use crate::surface::IWaveSurface;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Surface and front-end settings, loadable from JSON. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    // Signed so that a negative radius in a config file is reported, not misparsed
    pub kernel_radius: i64,
    pub acceleration: f32,
    pub damping: f32,
    pub target_fps: u32,
    pub source_radius: f32,
    pub source_strength: f32,
    pub obstruction_radius: f32,
    pub obstruction_strength: f32,
    pub cell_size: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 90,
            kernel_radius: 6,
            acceleration: crate::surface::DEFAULT_ACCELERATION,
            damping: crate::surface::DEFAULT_DAMPING,
            target_fps: 30,
            source_radius: 5.0,
            source_strength: 1.0,
            obstruction_radius: 2.0,
            obstruction_strength: 1.0,
            cell_size: 4.0,
        }
    }
}

impl SurfaceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Longest delta handed to `sim_frame`; slower frames are clamped to it.
    pub fn max_frame_delta(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    pub fn kernel_radius(&self) -> Result<usize> {
        usize::try_from(self.kernel_radius)
            .map_err(|_| SurfaceError::NegativeKernelRadius(self.kernel_radius))
    }

    /// Checks dimensions, kernel radius, cell size and coefficient stability at
    /// the target frame delta.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.kernel_radius()?;
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SurfaceError::InvalidCellSize(self.cell_size));
        }
        check_stability(self.acceleration, self.damping, self.max_frame_delta())?;
        Ok(())
    }

    pub fn build_surface(&self) -> Result<IWaveSurface> {
        let mut surface = IWaveSurface::new(self.width, self.height, self.kernel_radius()?)?;
        surface.acceleration = self.acceleration;
        surface.damping = self.damping;
        Ok(surface)
    }
}
