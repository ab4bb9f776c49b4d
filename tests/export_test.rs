use itswave::render::{height_gray, pix_from_normalized, surface_pixel};
use itswave::{
    AnalysisRecorder, IWaveSurface, ImageExporter, Renderer, SurfaceMetrics, SurfaceSnapshot,
};
use std::fs;

#[test]
fn test_flat_open_water_is_half_blue() {
    assert_eq!(surface_pixel(0.0, 1.0), [0, 0, 128, 255]);
    assert_eq!(surface_pixel(5.0, 1.0), [0, 0, 255, 255]);
    assert_eq!(surface_pixel(-100.0, 1.0), [0, 0, 0, 255]);
    assert_eq!(surface_pixel(0.0, 0.0), [255, 0, 128, 255]);
    assert_eq!(height_gray(0.0), 128);
    assert_eq!(pix_from_normalized(1.0), 255);
    assert_eq!(pix_from_normalized(0.0), 0);
}

#[test]
fn test_render_scales_grid_to_output() {
    let mut surface = IWaveSurface::new(4, 4, 1).unwrap();
    surface.set_obstruction(0, 0, 0.0, 1.0);

    let img = Renderer::new(8, 8).render_to_image(&surface);
    assert_eq!(img.dimensions(), (8, 8));
    // Cell (0, 0) covers output pixels (0..2, 0..2)
    assert_eq!(img.get_pixel(1, 1).0, [255, 0, 128, 255]);
    assert_eq!(img.get_pixel(2, 0).0, [0, 0, 128, 255]);

    let gray = Renderer::new(4, 4).render_heightmap(&surface);
    assert_eq!(gray.get_pixel(3, 3).0, [128]);
}

#[test]
fn test_export_png_and_sequence() {
    let dir = std::env::temp_dir().join("itswave_export_test");
    fs::create_dir_all(&dir).unwrap();

    let mut surface = IWaveSurface::new(16, 16, 2).unwrap();
    surface.place_source(8, 8, 3.0, 1.0);
    let exporter = ImageExporter::new(32, 32);

    exporter
        .export_surface_png(&surface, &dir.join("surface.png"))
        .unwrap();
    exporter
        .export_heightmap_png(&surface, &dir.join("height.png"))
        .unwrap();
    exporter
        .export_frame_sequence(&mut surface, 3, 1.0 / 30.0, &dir, "seq")
        .unwrap();

    assert!(dir.join("surface.png").exists());
    assert!(dir.join("height.png").exists());
    for i in 0..3 {
        assert!(dir.join(format!("seq_frame_{:04}.png", i)).exists());
    }
    assert!(surface.sources().iter().all(|&s| s == 0.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_snapshot_json_round_trip() {
    let dir = std::env::temp_dir().join("itswave_snapshot_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("snapshot.json");

    let mut surface = IWaveSurface::new(6, 5, 1).unwrap();
    surface.place_source(2, 2, 2.0, 1.0);
    surface.set_obstruction(5, 4, 0.0, 0.5);
    surface.sim_frame(1.0 / 30.0);

    let snapshot = SurfaceSnapshot::capture(&surface, 1);
    snapshot.save_json(&path).unwrap();
    let loaded = SurfaceSnapshot::load_json(&path).unwrap();

    assert_eq!(loaded.frame, 1);
    assert_eq!((loaded.width, loaded.height), (6, 5));
    assert_eq!(loaded.heights, surface.heights());
    assert_eq!(loaded.obstructions, surface.obstructions());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_metrics_on_flat_surface() {
    let mut surface = IWaveSurface::new(10, 10, 1).unwrap();
    surface.set_obstruction(5, 5, 1.0, 0.5);

    let metrics = SurfaceMetrics::analyze(&surface, 0);
    assert_eq!(metrics.total_energy, 0.0);
    assert_eq!(metrics.max_amplitude, 0.0);
    assert_eq!(metrics.obstructed_cells, 9);
    assert!(!metrics.diverging);
}

#[test]
fn test_recorder_tracks_history() {
    let mut surface = IWaveSurface::new(16, 16, 2).unwrap();
    let mut recorder = AnalysisRecorder::new();
    recorder.record_frame(&surface, 0);

    surface.place_source(8, 8, 3.0, 1.0);
    for frame in 1..=5 {
        surface.sim_frame(1.0 / 30.0);
        recorder.record_frame(&surface, frame);
    }

    assert_eq!(recorder.metrics_history.len(), 6);
    assert!(!recorder.any_diverging());
    assert!(recorder.peak_energy_frame().unwrap() > 0);
    assert!(recorder.metrics_history[1].max_amplitude > 0.0);
}
