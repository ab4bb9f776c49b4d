use itswave::{SurfaceConfig, SurfaceError};
use std::fs;

#[test]
fn test_default_config_matches_reference_setup() {
    let config = SurfaceConfig::default();
    assert_eq!((config.width, config.height), (160, 90));
    assert_eq!(config.kernel_radius, 6);
    assert_eq!(config.acceleration, 20.0);
    assert_eq!(config.damping, 1.0);
    assert!((config.max_frame_delta() - 1.0 / 30.0).abs() < 1e-7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_uses_defaults() {
    let config: SurfaceConfig =
        serde_json::from_str(r#"{ "width": 32, "height": 24, "kernel_radius": 2 }"#).unwrap();
    assert_eq!(config.width, 32);
    assert_eq!(config.height, 24);
    assert_eq!(config.target_fps, 30);

    let surface = config.build_surface().unwrap();
    assert_eq!(surface.width(), 32);
    assert_eq!(surface.kernel().radius(), 2);
    assert_eq!(surface.acceleration, 20.0);
}

#[test]
fn test_negative_kernel_radius_is_rejected() {
    let config: SurfaceConfig = serde_json::from_str(r#"{ "kernel_radius": -3 }"#).unwrap();
    assert!(matches!(
        config.validate(),
        Err(SurfaceError::NegativeKernelRadius(-3))
    ));
    assert!(matches!(
        config.build_surface(),
        Err(SurfaceError::NegativeKernelRadius(-3))
    ));
}

#[test]
fn test_zero_dimensions_are_rejected() {
    let config = SurfaceConfig {
        width: 0,
        ..SurfaceConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(SurfaceError::InvalidDimensions { .. })
    ));
    assert!(config.build_surface().is_err());
}

#[test]
fn test_non_positive_cell_size_is_rejected() {
    for cell_size in [0.0, -4.0, f32::NAN, f32::INFINITY] {
        let config = SurfaceConfig {
            cell_size,
            ..SurfaceConfig::default()
        };
        assert!(
            matches!(config.validate(), Err(SurfaceError::InvalidCellSize(_))),
            "cell size {} accepted",
            cell_size
        );
    }

    let config = SurfaceConfig {
        cell_size: 0.5,
        ..SurfaceConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_unstable_coefficients_fail_validation() {
    let config = SurfaceConfig {
        acceleration: 500.0,
        ..SurfaceConfig::default()
    };
    assert!(matches!(config.validate(), Err(SurfaceError::Unstable { .. })));

    // Still buildable: the bound is a caller contract
    let surface = SurfaceConfig {
        width: 8,
        height: 8,
        kernel_radius: 1,
        ..config
    }
    .build_surface()
    .unwrap();
    assert_eq!(surface.acceleration, 500.0);
}

#[test]
fn test_config_save_and_load() {
    let dir = std::env::temp_dir().join("itswave_config_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("surface.json");

    let config = SurfaceConfig {
        width: 64,
        damping: 3.5,
        target_fps: 60,
        ..SurfaceConfig::default()
    };
    config.save(&path).unwrap();
    let loaded = SurfaceConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("itswave_does_not_exist.json");
    assert!(matches!(SurfaceConfig::load(&path), Err(SurfaceError::Io(_))));
}
