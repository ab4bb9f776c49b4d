//! Interactive water surface simulation for itswave

pub mod analysis;
pub mod config;
pub mod desktop;
pub mod error;
pub mod export;
pub mod kernel;
pub mod render;
pub mod stability;
pub mod surface;
pub mod timing;

/// Height-field surface driven by an external input layer and polled by an
/// external renderer.
pub trait SurfaceSimulation {
    /// Adds a circular disturbance into the next frame's source field.
    fn place_source(&mut self, x: i32, y: i32, radius: f32, strength: f32);
    /// Lowers the obstruction mask around (x, y); never raises it.
    fn set_obstruction(&mut self, x: i32, y: i32, radius: f32, strength: f32);
    fn sim_frame(&mut self, delta: f32);
    fn reset(&mut self);
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Height at a cell, or a sentinel outside the grid.
    fn height_at(&self, x: i32, y: i32) -> f32;
    /// Obstruction at a cell, or a sentinel outside the grid.
    fn obstruction_at(&self, x: i32, y: i32) -> f32;
}

pub type DefaultSurface = surface::IWaveSurface;

pub use analysis::{AnalysisRecorder, SurfaceMetrics};
pub use config::SurfaceConfig;
pub use desktop::WaterApp;
pub use error::{Result, SurfaceError};
pub use export::{ImageExporter, SurfaceData, SurfaceSnapshot};
pub use kernel::DerivativeKernel;
pub use render::Renderer;
pub use stability::{check_stability, StabilityBound};
pub use surface::IWaveSurface;
pub use timing::{FrameTimer, RollingAverage};
