use crate::draw::input::StyleRequest;
use crate::draw::model::DrawColor;
use crate::settings::WhiteboardSettings;

/// Values shown in the settings panel. Colour and thickness are the style the
/// user asked for; the session fences them into the stroke buffer on the next
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    color: DrawColor,
    thickness: f32,
    pub background_enabled: bool,
    pub background_opacity: f32,
    pub menu_open: bool,
    min_thickness: f32,
    max_thickness: f32,
}

impl PanelState {
    pub fn from_settings(settings: &WhiteboardSettings) -> Self {
        Self {
            color: settings.initial_color,
            thickness: settings.initial_thickness,
            background_enabled: settings.background_enabled,
            background_opacity: settings.background_opacity,
            menu_open: settings.menu_open,
            min_thickness: settings.min_thickness,
            max_thickness: settings.max_thickness,
        }
    }

    pub fn color(&self) -> DrawColor {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn apply_request(&mut self, request: StyleRequest) {
        self.color = request.color.clamped();
        self.thickness = if request.thickness.is_nan() {
            self.min_thickness
        } else {
            request.thickness.clamp(self.min_thickness, self.max_thickness)
        };
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn set_background_opacity(&mut self, opacity: f32) {
        if !opacity.is_nan() {
            self.background_opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Opacity of the dimming layer, if one should be drawn.
    pub fn background_dim(&self) -> Option<f32> {
        self.background_enabled.then_some(self.background_opacity)
    }

    /// Puts back the style recorded in an installed snapshot.
    pub(crate) fn restore_style(&mut self, color: DrawColor, thickness: f32) {
        self.color = color;
        self.thickness = thickness;
    }
}
