use itswave::{IWaveSurface, SurfaceError, SurfaceSimulation};

#[test]
fn test_surface_creation() {
    let surface = IWaveSurface::new(50, 40, 2).unwrap();
    assert_eq!(surface.width(), 50);
    assert_eq!(surface.height(), 40);
    assert_eq!(surface.heights().len(), 2000);
    assert_eq!(surface.previous_heights().len(), 2000);
    assert_eq!(surface.derivative().len(), 2000);
    assert_eq!(surface.sources().len(), 2000);
    assert_eq!(surface.obstructions().len(), 2000);
    assert_eq!(surface.kernel().side(), 5);
}

#[test]
fn test_fresh_surface_is_flat_and_unobstructed() {
    let surface = IWaveSurface::new(10, 10, 1).unwrap();
    assert!(surface.heights().iter().all(|&h| h == 0.0));
    assert!(surface.sources().iter().all(|&s| s == 0.0));
    assert!(surface.obstructions().iter().all(|&o| o == 1.0));
}

#[test]
fn test_rejects_empty_grid() {
    assert!(matches!(
        IWaveSurface::new(0, 10, 2),
        Err(SurfaceError::InvalidDimensions { width: 0, height: 10 })
    ));
    assert!(matches!(
        IWaveSurface::new(10, 0, 2),
        Err(SurfaceError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        IWaveSurface::new(usize::MAX, 2, 0),
        Err(SurfaceError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_index_and_invalid_marker() {
    let surface = IWaveSurface::new(50, 40, 2).unwrap();
    assert_eq!(surface.index(0, 0), Some(0));
    assert_eq!(surface.index(3, 2), Some(3 + 2 * 50));
    assert_eq!(surface.index(49, 39), Some(1999));
    assert_eq!(surface.index(50, 0), None);
    assert_eq!(surface.index(0, 40), None);
    assert_eq!(surface.index(-1, 5), None);
}

#[test]
fn test_reflected_index_stays_in_grid() {
    let surface = IWaveSurface::new(5, 4, 2).unwrap();
    assert_eq!(surface.reflected_index(-1, 0), 1);
    assert_eq!(surface.reflected_index(5, 0), 4);
    assert_eq!(surface.reflected_index(0, -2), 2 * 5);
    assert_eq!(surface.reflected_index(0, 4), 3 * 5);
    for y in -12..12 {
        for x in -12..12 {
            assert!(surface.reflected_index(x, y) < 20);
        }
    }
}

#[test]
fn test_out_of_range_reads_return_sentinels() {
    let surface = IWaveSurface::new(8, 8, 1).unwrap();
    assert_eq!(surface.height_at(-1, 0), 0.5);
    assert_eq!(surface.height_at(8, 3), 0.5);
    assert_eq!(surface.height_at(3, 100), 0.5);
    assert_eq!(surface.obstruction_at(0, -1), 1.0);
    assert_eq!(surface.obstruction_at(8, 8), 1.0);
    assert_eq!(surface.height_at(3, 3), 0.0);
}

#[test]
fn test_surface_step_through_trait() {
    fn drive(sim: &mut impl SurfaceSimulation) {
        sim.place_source(5, 5, 2.0, 1.0);
        sim.sim_frame(1.0 / 30.0);
    }

    let mut surface = IWaveSurface::new(10, 10, 1).unwrap();
    drive(&mut surface);
    assert!(surface.height_at(5, 5) > 0.0);
    assert_eq!(SurfaceSimulation::width(&surface), 10);
}
