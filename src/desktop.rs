use crate::config::SurfaceConfig;
use crate::error::Result;
use crate::export::ImageExporter;
use crate::render::surface_pixel;
use crate::stability::StabilityBound;
use crate::surface::IWaveSurface;
use crate::timing::FrameTimer;
use eframe::egui;
use glam::{IVec2, Vec2};
use rand::Rng;

pub struct WaterApp {
    surface: IWaveSurface,
    config: SurfaceConfig,
    exporter: ImageExporter,
    timer: FrameTimer,
    texture: Option<egui::TextureHandle>,
    paused: bool,
    raining: bool,
    rain_chance: f32,
    frame_count: usize,
    pointer_cell: Option<IVec2>,
    status: Option<String>,
}

impl WaterApp {
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        let surface = config.build_surface()?;
        let exporter = ImageExporter::new(
            (surface.width() as f32 * config.cell_size) as u32,
            (surface.height() as f32 * config.cell_size) as u32,
        );

        Ok(Self {
            surface,
            timer: FrameTimer::new(config.max_frame_delta()),
            config,
            exporter,
            texture: None,
            paused: false,
            raining: false,
            rain_chance: 0.2,
            frame_count: 0,
            pointer_cell: None,
            status: None,
        })
    }

    fn screen_to_cell(&self, pos: egui::Pos2, rect: egui::Rect) -> IVec2 {
        let local = Vec2::new(pos.x - rect.left(), pos.y - rect.top()) / self.config.cell_size;
        local.floor().as_ivec2()
    }

    fn drop_rain(&mut self) {
        if rand::random::<f32>() < self.rain_chance {
            let mut rng = rand::thread_rng();
            let x = rng.gen_range(0..self.surface.width() as i32);
            let y = rng.gen_range(0..self.surface.height() as i32);
            let radius = rng.gen_range(1.0..self.config.source_radius.max(1.5));
            self.surface
                .place_source(x, y, radius, self.config.source_strength * 0.5);
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let pixels = self
            .surface
            .heights()
            .iter()
            .zip(self.surface.obstructions())
            .map(|(&h, &o)| {
                let [r, g, b, a] = surface_pixel(h, o);
                egui::Color32::from_rgba_unmultiplied(r, g, b, a)
            })
            .collect();
        let image = egui::ColorImage {
            size: [self.surface.width(), self.surface.height()],
            pixels,
        };

        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, egui::TextureOptions::NEAREST);
            return;
        }
        self.texture = Some(ctx.load_texture("water", image, egui::TextureOptions::NEAREST));
    }

    fn details_window(&self, ctx: &egui::Context) {
        egui::Window::new("Details").show(ctx, |ui| {
            ui.label(format!(
                "Frame Time: {:.3} ms",
                self.timer.smoothed_frame_time() * 1000.0
            ));
            ui.label(format!("FPS: {:.1}", self.timer.fps()));
            match self.pointer_cell {
                Some(cell) => ui.label(format!("Pointer Cell: {} {}", cell.x, cell.y)),
                None => ui.label("Pointer Cell: -"),
            };
            ui.label(format!("Frames: {}", self.frame_count));
        });
    }
}

impl eframe::App for WaterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let delta = self.timer.tick();

        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.surface.reset();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("itswave - Interactive Water Surface");

            ui.horizontal(|ui| {
                if ui.button("Pause/Resume").clicked() {
                    self.paused = !self.paused;
                }

                if ui.button("Reset").clicked() {
                    self.surface.reset();
                }

                ui.checkbox(&mut self.raining, "Rain");

                if ui.button("Export PNG").clicked() {
                    let path = std::path::Path::new("frame.png");
                    self.status = Some(match self.exporter.export_surface_png(&self.surface, path) {
                        Ok(()) => "Frame exported!".to_string(),
                        Err(e) => format!("Export failed: {}", e),
                    });
                }

                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });

            ui.horizontal(|ui| {
                ui.add(
                    egui::Slider::new(&mut self.surface.acceleration, 0.0..=400.0)
                        .text("Acceleration"),
                );
                ui.add(egui::Slider::new(&mut self.surface.damping, 0.0..=80.0).text("Damping"));
                ui.add(egui::Slider::new(&mut self.rain_chance, 0.0..=1.0).text("Rain Chance"));
            });

            if let Ok(bound) = StabilityBound::for_delta(self.timer.max_delta()) {
                if !bound.allows(self.surface.acceleration, self.surface.damping) {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!(
                            "Unstable at {:.0} fps: keep acceleration <= {:.0} and damping <= {:.0}",
                            1.0 / bound.delta,
                            bound.max_acceleration,
                            bound.max_damping
                        ),
                    );
                }
            }

            ui.separator();

            let canvas_size = egui::Vec2::new(
                self.surface.width() as f32 * self.config.cell_size,
                self.surface.height() as f32 * self.config.cell_size,
            );
            let (rect, response) =
                ui.allocate_exact_size(canvas_size, egui::Sense::click_and_drag());

            self.pointer_cell = response.hover_pos().map(|pos| self.screen_to_cell(pos, rect));

            // Left button paints sources, right button paints obstructions
            if response.is_pointer_button_down_on() {
                if let Some(cell) = self.pointer_cell {
                    let (primary, secondary) =
                        ui.input(|i| (i.pointer.primary_down(), i.pointer.secondary_down()));
                    if primary {
                        self.surface.place_source(
                            cell.x,
                            cell.y,
                            self.config.source_radius,
                            self.config.source_strength,
                        );
                    } else if secondary {
                        self.surface.set_obstruction(
                            cell.x,
                            cell.y,
                            self.config.obstruction_radius,
                            self.config.obstruction_strength,
                        );
                    }
                }
            }

            if !self.paused {
                if self.raining {
                    self.drop_rain();
                }
                self.surface.sim_frame(delta);
                self.frame_count += 1;
            }

            self.upload_texture(ui.ctx());
            if let Some(texture) = &self.texture {
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            ui.label(format!(
                "Frame: {} | Grid: {}x{} | Left-drag: Disturb | Right-drag: Obstruct | Space: Reset",
                self.frame_count,
                self.surface.width(),
                self.surface.height()
            ));
        });

        self.details_window(ctx);

        ctx.request_repaint();
    }
}
