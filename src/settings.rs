use crate::draw::geometry::{SnapAngle, DEFAULT_SNAP_ANGLE_DEG};
use crate::draw::model::DrawColor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardSettings {
    /// Pen colour when the overlay starts. Strokes drawn before any colour
    /// change replay with this colour.
    #[serde(default = "default_initial_color")]
    pub initial_color: DrawColor,
    /// Pen thickness when the overlay starts.
    #[serde(default = "default_initial_thickness")]
    pub initial_thickness: f32,
    /// Lower bound of the thickness slider.
    #[serde(default = "default_min_thickness")]
    pub min_thickness: f32,
    /// Upper bound of the thickness slider.
    #[serde(default = "default_max_thickness")]
    pub max_thickness: f32,
    /// Dim the desktop behind the drawing.
    #[serde(default)]
    pub background_enabled: bool,
    /// Opacity of the black dimming layer, `0.0..=1.0`.
    #[serde(default = "default_background_opacity")]
    pub background_opacity: f32,
    /// Straight-line snap increment in degrees.
    #[serde(default = "default_snap_angle_degrees")]
    pub snap_angle_degrees: f64,
    /// Open the settings panel on start.
    #[serde(default)]
    pub menu_open: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that receives a copy of the log output.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_initial_color() -> DrawColor {
    DrawColor::RED
}

fn default_initial_thickness() -> f32 {
    3.0
}

fn default_min_thickness() -> f32 {
    1.0
}

fn default_max_thickness() -> f32 {
    10.0
}

fn default_background_opacity() -> f32 {
    0.4
}

fn default_snap_angle_degrees() -> f64 {
    DEFAULT_SNAP_ANGLE_DEG
}

impl Default for WhiteboardSettings {
    fn default() -> Self {
        Self {
            initial_color: default_initial_color(),
            initial_thickness: default_initial_thickness(),
            min_thickness: default_min_thickness(),
            max_thickness: default_max_thickness(),
            background_enabled: false,
            background_opacity: default_background_opacity(),
            snap_angle_degrees: default_snap_angle_degrees(),
            menu_open: false,
            debug_logging: false,
            log_file: None,
        }
    }
}

impl WhiteboardSettings {
    pub fn snap_angle(&self) -> SnapAngle {
        SnapAngle::from_degrees(self.snap_angle_degrees).unwrap_or_default()
    }

    pub fn clamp_thickness(&self, thickness: f32) -> f32 {
        if thickness.is_nan() {
            return self.min_thickness;
        }
        thickness.clamp(self.min_thickness, self.max_thickness)
    }

    /// Pulls every value back into its valid range. Returns `true` if anything
    /// had to change.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();

        let range_valid = self.min_thickness.is_finite()
            && self.max_thickness.is_finite()
            && self.min_thickness > 0.0
            && self.min_thickness <= self.max_thickness;
        if !range_valid {
            self.min_thickness = default_min_thickness();
            self.max_thickness = default_max_thickness();
        }

        self.initial_thickness = self.clamp_thickness(self.initial_thickness);
        self.initial_color = self.initial_color.clamped();

        self.background_opacity = if self.background_opacity.is_nan() {
            default_background_opacity()
        } else {
            self.background_opacity.clamp(0.0, 1.0)
        };

        if SnapAngle::from_degrees(self.snap_angle_degrees).is_none() {
            self.snap_angle_degrees = default_snap_angle_degrees();
        }

        let changed = *self != before;
        if changed {
            tracing::warn!("whiteboard settings contained out-of-range values; clamped");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::WhiteboardSettings;
    use crate::draw::model::DrawColor;

    #[test]
    fn serde_roundtrip_whiteboard_settings() {
        let settings = WhiteboardSettings::default();
        let json = serde_json::to_string(&settings).expect("serialize settings");
        let decoded: WhiteboardSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let decoded: WhiteboardSettings =
            serde_json::from_value(serde_json::json!({ "background_enabled": true }))
                .expect("deserialize partial settings");
        assert!(decoded.background_enabled);
        assert_eq!(decoded.initial_color, DrawColor::RED);
        assert_eq!(decoded.initial_thickness, 3.0);
        assert_eq!(decoded.background_opacity, 0.4);
        assert_eq!(decoded.snap_angle_degrees, 15.0);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut settings = WhiteboardSettings {
            initial_thickness: 40.0,
            background_opacity: 1.5,
            snap_angle_degrees: 0.0,
            initial_color: DrawColor::rgba(2.0, -1.0, 0.5, 1.0),
            ..WhiteboardSettings::default()
        };

        assert!(settings.sanitize());
        assert_eq!(settings.initial_thickness, 10.0);
        assert_eq!(settings.background_opacity, 1.0);
        assert_eq!(settings.snap_angle_degrees, 15.0);
        assert_eq!(settings.initial_color, DrawColor::rgba(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn sanitize_restores_inverted_thickness_range() {
        let mut settings = WhiteboardSettings {
            min_thickness: 8.0,
            max_thickness: 2.0,
            ..WhiteboardSettings::default()
        };
        assert!(settings.sanitize());
        assert_eq!(settings.min_thickness, 1.0);
        assert_eq!(settings.max_thickness, 10.0);
    }

    #[test]
    fn sanitize_leaves_defaults_untouched() {
        let mut settings = WhiteboardSettings::default();
        assert!(!settings.sanitize());
    }
}
