//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use horde3d_demos::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("h3d_config_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("H3D_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("H3D_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("H3D_ENGINE__SHADOW_MAP_SIZE", "1024");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.engine.shadow_map_size, 1024);
    std::env::remove_var("H3D_ENGINE__SHADOW_MAP_SIZE");
}

#[test]
#[serial]
fn test_shipped_defaults_match_code_defaults() {
    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.width, defaults.window.width);
    assert_eq!(config.engine.content_dir, defaults.engine.content_dir);
    assert_eq!(config.camera.start_position, defaults.camera.start_position);
    assert_eq!(config.knight.anim_fps, defaults.knight.anim_fps);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = scratch_dir("user");
    fs::write(dir.join("default.toml"), "[window]\nwidth = 800\nheight = 600\n").unwrap();
    fs::write(dir.join("user.toml"), "[window]\nwidth = 1920\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.width, 1920);
    assert_eq!(config.window.height, 600);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("/nonexistent/h3d/config").unwrap();
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.input.mouse_sensitivity, 0.3);
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    let dir = scratch_dir("invalid");
    fs::write(dir.join("default.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = scratch_dir("invalid");
    fs::write(dir.join("default.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

    let (config, error) = AppConfig::load_or_default_from(&dir);
    assert!(error.is_some());
    assert_eq!(config.window.width, AppConfig::default().window.width);

    let (_, error) = AppConfig::load_or_default_from(dir.join("missing"));
    assert!(error.is_none());

    fs::remove_dir_all(&dir).unwrap();
}
