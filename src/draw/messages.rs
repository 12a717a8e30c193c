use crate::draw::input::FrameInput;
use crate::draw::render::FrameOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    UserRequest,
    CaptureDisconnected,
    RenderDisconnected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureToSession {
    Frame(FrameInput),
    SetBackground { enabled: bool, opacity: f32 },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionToRender {
    Frame(FrameOutput),
    Exited { reason: ExitReason },
}
