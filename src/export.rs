use crate::error::Result;
use crate::render::Renderer;
use crate::surface::IWaveSurface;
use crate::SurfaceSimulation;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read-only view of the fields a renderer polls each frame.
pub trait SurfaceData {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn heights(&self) -> &[f32];
    fn obstructions(&self) -> &[f32];
}

impl SurfaceData for IWaveSurface {
    fn width(&self) -> usize { self.width() }
    fn height(&self) -> usize { self.height() }
    fn heights(&self) -> &[f32] { self.heights() }
    fn obstructions(&self) -> &[f32] { self.obstructions() }
}

/// Owned copy of a surface's visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub frame: usize,
    pub width: usize,
    pub height: usize,
    pub heights: Vec<f32>,
    pub obstructions: Vec<f32>,
}

impl SurfaceSnapshot {
    pub fn capture(surface: &impl SurfaceData, frame: usize) -> Self {
        Self {
            frame,
            width: surface.width(),
            height: surface.height(),
            heights: surface.heights().to_vec(),
            obstructions: surface.obstructions().to_vec(),
        }
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

impl SurfaceData for SurfaceSnapshot {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn heights(&self) -> &[f32] { &self.heights }
    fn obstructions(&self) -> &[f32] { &self.obstructions }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_surface_png(&self, surface: &impl SurfaceData, path: &Path) -> Result<()> {
        let img = self.renderer.render_to_image(surface);
        img.save(path)?;
        Ok(())
    }

    pub fn export_heightmap_png(&self, surface: &impl SurfaceData, path: &Path) -> Result<()> {
        let img = self.renderer.render_heightmap(surface);
        img.save(path)?;
        Ok(())
    }

    /// Steps the surface `steps` times, writing `{prefix}_frame_NNNN.png` after each.
    pub fn export_frame_sequence(
        &self,
        surface: &mut (impl SurfaceData + SurfaceSimulation),
        steps: usize,
        delta: f32,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<()> {
        for i in 0..steps {
            surface.sim_frame(delta);

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);

            self.export_surface_png(&*surface, &path)?;
        }
        info!("exported {} frames to {}", steps, output_dir.display());
        Ok(())
    }
}
