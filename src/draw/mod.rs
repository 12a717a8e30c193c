pub mod controller;
pub mod geometry;
pub mod history;
pub mod input;
pub mod messages;
pub mod model;
pub mod panel;
pub mod render;
pub mod session;
pub mod state;

pub use controller::{spawn_session, SessionController, SessionHandles};
pub use geometry::{snap, snap_to, Point, SnapAngle};
pub use history::{DrawHistory, HistoryStep, Snapshot};
pub use input::{FrameInput, StyleRequest};
pub use model::{DrawColor, PackedColor, StrokeBuffer, StrokeElement, StyleMap};
pub use render::{FrameOutput, Segment};
pub use session::{DrawingSession, SessionEvent};
