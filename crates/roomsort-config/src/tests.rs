//! Tests for solver configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "fast_assert"
        progress_interval = 5000

        [layout]
        hallway_width = 7
        door_columns = [2, 4]
        weights = [1, 10]

        [termination]
        seconds_spent_limit = 30
        step_count_limit = 200
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FastAssert);
    assert_eq!(config.progress_interval, Some(5000));
    assert_eq!(config.step_limit(), Some(200));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));

    let layout = config.layout.unwrap();
    let topology = layout.topology().unwrap().unwrap();
    assert_eq!(topology.room_count(), 2);
    assert_eq!(topology.corridor_len(), 5);
    assert_eq!(layout.weights().unwrap().unwrap().as_slice(), &[1, 10]);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        termination:
          minutes_spent_limit: 2
        layout:
          weights: [1, 5, 25]
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(120)));
    let layout = config.layout.unwrap();
    assert!(layout.topology().unwrap().is_none());
    assert_eq!(layout.weights().unwrap().unwrap().len(), 3);
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::NonAsserted);
    assert!(!config.environment_mode.is_asserted());
    assert!(config.layout.is_none());
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.step_limit(), None);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_termination_seconds(60)
        .with_step_count_limit(1_000);

    assert!(config.environment_mode.is_fully_asserted());
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.step_limit(), Some(1_000));
}

#[test]
fn test_layout_requires_width_and_doors() {
    let layout = LayoutConfig {
        door_columns: Some(vec![2, 4]),
        ..Default::default()
    };
    assert!(matches!(layout.topology(), Err(ConfigError::Invalid(_))));

    let layout = LayoutConfig {
        hallway_width: Some(5),
        door_columns: Some(vec![4, 2]),
        ..Default::default()
    };
    assert!(matches!(layout.topology(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_weight_rejected() {
    let layout = LayoutConfig {
        weights: Some(vec![1, 0]),
        ..Default::default()
    };
    assert!(matches!(layout.weights(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_huge_weight_rejected() {
    let config = SolverConfig::from_toml_str(&format!(
        "[layout]\nweights = [{}, 1]\n",
        u64::MAX / 2
    ))
    .unwrap();
    let layout = config.layout.unwrap();
    assert!(matches!(layout.weights(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[termination]\nstep_count_limit = 42").unwrap();

    let config = SolverConfig::load(file.path()).unwrap();
    assert_eq!(config.step_limit(), Some(42));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SolverConfig::load("/nonexistent/roomsort.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bad_toml_is_reported() {
    let err = SolverConfig::from_toml_str("environment_mode = \"loud\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}
