use itswave::{AnalysisRecorder, ImageExporter, SurfaceConfig, SurfaceMetrics, SurfaceSnapshot};
use log::info;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match config_path(&args) {
        Some(path) => SurfaceConfig::load(&path)?,
        None => SurfaceConfig::default(),
    };
    if let Err(e) = config.validate() {
        log::warn!("config check failed: {}", e);
    }

    if args.len() > 1 && args[1] == "test" {
        // Run headless scenario and export PNGs
        run_headless_test(&config)?;
    } else {
        run_gui_app(config)?;
    }

    Ok(())
}

fn config_path(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn run_headless_test(config: &SurfaceConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running headless water surface test with quantitative analysis...");

    let mut surface = config.build_surface()?;
    let exporter = ImageExporter::new(
        (surface.width() as f32 * config.cell_size) as u32,
        (surface.height() as f32 * config.cell_size) as u32,
    );
    let mut recorder = AnalysisRecorder::new();
    let delta = config.max_frame_delta();

    // A wall with a gap, and a drop on one side of it
    let wall_x = surface.width() as i32 / 2;
    let gap_y = surface.height() as i32 / 2;
    for y in 0..surface.height() as i32 {
        if (y - gap_y).abs() > 4 {
            surface.set_obstruction(wall_x, y, 0.0, config.obstruction_strength);
        }
    }
    surface.place_source(
        wall_x / 2,
        gap_y,
        config.source_radius,
        config.source_strength,
    );

    recorder.record_frame(&surface, 0);
    SurfaceMetrics::analyze(&surface, 0).print_summary();
    exporter.export_surface_png(&surface, Path::new("test_frame_0000.png"))?;

    for frame in 1..=60 {
        surface.sim_frame(delta);
        recorder.record_frame(&surface, frame);

        if frame % 5 == 0 {
            let path = format!("test_frame_{:04}.png", frame);
            exporter.export_surface_png(&surface, Path::new(&path))?;
            exporter.export_heightmap_png(&surface, Path::new(&format!("test_height_{:04}.png", frame)))?;

            let metrics = SurfaceMetrics::analyze(&surface, frame);
            metrics.print_summary();
        }

        if frame <= 3 {
            println!("Frame {} height visualization:", frame);
            debug_visualize_heights(&surface);
        }
    }

    SurfaceSnapshot::capture(&surface, 60).save_json(Path::new("test_snapshot.json"))?;

    recorder.print_trends();
    info!("headless run finished, diverged: {}", recorder.any_diverging());

    println!("Test completed! Generated 13 frames with detailed analysis.");
    Ok(())
}

fn debug_visualize_heights(surface: &itswave::IWaveSurface) {
    let cy = surface.height() as i32 / 2;
    let cx = surface.width() as i32 / 4;

    for y in cy - 5..cy + 5 {
        for x in cx - 20..cx + 20 {
            let h = surface.height_at(x, y);
            if h > 0.5 {
                print!("██");
            } else if h > 0.1 {
                print!("▓▓");
            } else if h > 0.01 {
                print!("▒▒");
            } else if h < -0.1 {
                print!("░░");
            } else {
                print!("  ");
            }
        }
        println!();
    }
    println!();
}

fn run_gui_app(config: SurfaceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = itswave::WaterApp::new(config.clone())?;
    let size = [
        config.width as f32 * config.cell_size + 32.0,
        config.height as f32 * config.cell_size + 160.0,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_title("itswave - Interactive Water Surface"),
        ..Default::default()
    };

    eframe::run_native("itswave", options, Box::new(move |_cc| Box::new(app)))?;
    Ok(())
}
