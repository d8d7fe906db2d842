use std::fs;

use geodesic_explorer::config::{ConfigError, ExplorerConfig, load_config, load_or_default};
use geodesic_explorer::types::{EnergyMode, ParticleKind, RadialSign, Variant};

#[test]
fn defaults_match_built_in_controls() {
    let config = load_or_default(None::<&str>).expect("defaults");
    assert_eq!(config, ExplorerConfig::default());
    assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.backend.timeout_secs, None);
    assert_eq!(config.render.max_points, 7000);
    assert!(config.parameters(Variant::Standard).auto_range);
    assert!(!config.parameters(Variant::Noncommutative).auto_range);
}

#[test]
fn toml_config_overrides_selected_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("explorer.toml");
    fs::write(
        &path,
        r#"
[backend]
base_url = "http://sim.internal:9000"
timeout_secs = 2.5

[render]
max_points = 3000

[standard]
particle = "photon"
energy = 0.3
energy_mode = "raw"
turns = 12

[noncommutative]
theta = 0.5
radial_sign = "out"
"#,
    )
    .expect("write toml");

    let config = load_config(&path).expect("load");
    assert_eq!(config.backend.base_url, "http://sim.internal:9000");
    assert_eq!(config.backend.timeout_secs, Some(2.5));
    assert_eq!(config.render.max_points, 3000);
    assert_eq!(config.render.padding, 0.08);

    let standard = &config.standard;
    assert_eq!(standard.particle, ParticleKind::Photon);
    assert_eq!(standard.energy_mode, EnergyMode::Raw);
    assert_eq!(standard.turns, 12);
    assert_eq!(standard.angular_momentum, 4.2);

    let nc = &config.noncommutative;
    assert_eq!(nc.theta, 0.5);
    assert_eq!(nc.radial_sign, RadialSign::Out);
}

#[test]
fn yaml_config_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("explorer.yaml");
    fs::write(
        &path,
        "backend:\n  base_url: http://localhost:8123\nstandard:\n  mass: 2.0\n  angular_momentum: 8.4\n",
    )
    .expect("write yaml");

    let config = load_config(&path).expect("load");
    assert_eq!(config.backend.base_url, "http://localhost:8123");
    assert_eq!(config.standard.mass, 2.0);
    assert_eq!(config.standard.angular_momentum, 8.4);
    assert_eq!(config.noncommutative.mass, 1.0);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");

    let path = dir.path().join("zero.toml");
    fs::write(&path, "[render]\nmax_points = 0\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

    let path = dir.path().join("timeout.toml");
    fs::write(&path, "[backend]\ntimeout_secs = 0.0\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

    let path = dir.path().join("url.yaml");
    fs::write(&path, "backend:\n  base_url: \"\"\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_files_report_parse_errors() {
    let dir = tempfile::tempdir().expect("tempdir");

    let path = dir.path().join("broken.toml");
    fs::write(&path, "[standard\nmass = ").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));

    let path = dir.path().join("broken.yaml");
    fs::write(&path, "standard:\n  particle: tachyon\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(load_config(&missing), Err(ConfigError::Io(_))));
}
