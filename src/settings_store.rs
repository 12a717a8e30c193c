//! Read-only access to the overlay's configuration file. The overlay never
//! writes this file; users edit it by hand.

use crate::settings::WhiteboardSettings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "whiteboard_settings.json";

/// Overrides the location of the settings file when set.
pub const SETTINGS_PATH_ENV: &str = "WHITEBOARD_SETTINGS";

pub fn settings_path_in(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE_NAME)
}

/// Loads from `$WHITEBOARD_SETTINGS`, or from the working directory.
pub fn load() -> Result<WhiteboardSettings> {
    let path = match std::env::var_os(SETTINGS_PATH_ENV) {
        Some(path) => PathBuf::from(path),
        None => {
            let cwd = std::env::current_dir().context("resolve working directory")?;
            settings_path_in(&cwd)
        }
    };
    load_from_path(&path)
}

/// A missing or blank file yields the defaults. Values outside their valid
/// range are clamped before the settings are returned.
pub fn load_from_path(path: &Path) -> Result<WhiteboardSettings> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no whiteboard settings; using defaults");
            return Ok(WhiteboardSettings::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("read whiteboard settings {}", path.display()))
        }
    };
    parse_settings(&content)
        .with_context(|| format!("parse whiteboard settings {}", path.display()))
}

fn parse_settings(content: &str) -> Result<WhiteboardSettings> {
    if content.trim().is_empty() {
        return Ok(WhiteboardSettings::default());
    }
    let mut settings: WhiteboardSettings = serde_json::from_str(content)?;
    settings.sanitize();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::model::DrawColor;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load_from_path(&settings_path_in(dir.path())).expect("load");
        assert_eq!(loaded, WhiteboardSettings::default());
    }

    #[test]
    fn blank_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = settings_path_in(dir.path());
        std::fs::write(&path, "  \n").expect("write blank");
        assert_eq!(load_from_path(&path).expect("load"), WhiteboardSettings::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = settings_path_in(dir.path());
        std::fs::write(
            &path,
            r#"{ "initial_color": { "r": 0.0, "g": 0.5, "b": 1.0, "a": 1.0 }, "background_enabled": true }"#,
        )
        .expect("write partial");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded.initial_color, DrawColor::rgba(0.0, 0.5, 1.0, 1.0));
        assert!(loaded.background_enabled);
        assert_eq!(loaded.initial_thickness, 3.0);
        assert_eq!(loaded.snap_angle_degrees, 15.0);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = settings_path_in(dir.path());
        std::fs::write(
            &path,
            r#"{ "initial_thickness": 99.0, "background_opacity": 3.0, "snap_angle_degrees": -5.0 }"#,
        )
        .expect("write settings");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded.initial_thickness, loaded.max_thickness);
        assert_eq!(loaded.background_opacity, 1.0);
        assert_eq!(loaded.snap_angle_degrees, 15.0);
    }

    #[test]
    fn malformed_file_reports_path_in_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = settings_path_in(dir.path());
        std::fs::write(&path, "{ not json").expect("write malformed");

        let err = load_from_path(&path).expect_err("malformed settings must fail");
        assert!(format!("{err:#}").contains(SETTINGS_FILE_NAME));
    }
}
