#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    FreehandDrawing,
    StraightLineDrawing,
}

impl SessionMode {
    pub fn is_drawing(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Freehand and straight-line drawing never hand over to each other directly;
/// each has to finish back in `Idle` first.
pub fn can_transition(from: SessionMode, to: SessionMode) -> bool {
    matches!(
        (from, to),
        (SessionMode::Idle, SessionMode::FreehandDrawing)
            | (SessionMode::Idle, SessionMode::StraightLineDrawing)
            | (SessionMode::FreehandDrawing, SessionMode::Idle)
            | (SessionMode::StraightLineDrawing, SessionMode::Idle)
    ) || from == to
}
