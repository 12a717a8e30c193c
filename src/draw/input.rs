use crate::draw::geometry::Point;
use crate::draw::model::DrawColor;

/// Style values pushed by the settings panel when the user edits them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRequest {
    pub color: DrawColor,
    pub thickness: f32,
}

/// Everything the platform layer polled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub pointer: Point,
    pub primary_down: bool,
    pub secondary_down: bool,
    pub undo_pressed: bool,
    pub redo_pressed: bool,
    pub snap_held: bool,
    /// The settings UI owns the pointer this frame.
    pub pointer_captured: bool,
    pub toggle_menu: bool,
    pub exit_requested: bool,
    pub style: Option<StyleRequest>,
}

impl FrameInput {
    pub fn at(pointer: impl Into<Point>) -> Self {
        Self {
            pointer: pointer.into(),
            ..Self::default()
        }
    }

    pub fn with_primary(mut self) -> Self {
        self.primary_down = true;
        self
    }

    pub fn with_secondary(mut self) -> Self {
        self.secondary_down = true;
        self
    }

    pub fn with_snap(mut self) -> Self {
        self.snap_held = true;
        self
    }

    pub fn with_undo(mut self) -> Self {
        self.undo_pressed = true;
        self
    }

    pub fn with_redo(mut self) -> Self {
        self.redo_pressed = true;
        self
    }

    pub fn with_style(mut self, color: DrawColor, thickness: f32) -> Self {
        self.style = Some(StyleRequest { color, thickness });
        self
    }
}

/// One-shot trigger: reports a press once and stays quiet until the trigger
/// has been observed released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeLatch {
    held: bool,
}

impl EdgeLatch {
    pub fn observe(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }
}
