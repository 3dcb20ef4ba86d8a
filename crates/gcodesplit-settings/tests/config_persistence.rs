use gcodesplit_settings::{Config, SettingsError, SettingsPersistence};
use tempfile::tempdir;

fn customized() -> Config {
    let mut config = Config::default();
    config.split.origin_x = 150.0;
    config.split.angle_degrees = 12.5;
    config.split.z_clearance = 8.0;
    config.render.curve_section = 0.5;
    config.output.block_markers = true;
    config.output.peck_depths = vec![-1.0, -2.0, -3.0];
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"peck_depths\""));
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "split: {}").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::LoadError(_))
    ));
    assert!(matches!(
        Config::default().save_to_file(&path),
        Err(SettingsError::SaveError(_))
    ));
}

#[test]
fn test_invalid_file_contents() {
    let dir = tempdir().unwrap();

    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[split\norigin_x = ").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));

    let path = dir.path().join("negative.toml");
    std::fs::write(&path, "[render]\nsteps_per_degree = -1.0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
}

#[test]
fn test_persistence_creates_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("gcodesplit").join("config.toml");

    let mut persistence = SettingsPersistence::open(&path).unwrap();
    assert_eq!(persistence.config(), &Config::default());
    persistence.config_mut().split.z_clearance = 12.0;
    persistence.save().unwrap();

    let reopened = SettingsPersistence::open(&path).unwrap();
    assert_eq!(reopened.config().split.z_clearance, 12.0);
    assert_eq!(reopened.path(), path.as_path());
}
