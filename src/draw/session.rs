use crate::draw::geometry::{snap_to, Point, SnapAngle};
use crate::draw::history::{DrawHistory, HistoryStep, Snapshot};
use crate::draw::input::{EdgeLatch, FrameInput};
use crate::draw::model::StrokeBuffer;
use crate::draw::panel::PanelState;
use crate::draw::render::{derive_segments, FrameOutput, ResolvedStyle, Segment};
use crate::draw::state::{can_transition, SessionMode};
use crate::settings::WhiteboardSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Committed { place: usize },
    /// A stroke without any drawable segment was dropped instead of committed.
    StrokeDiscarded,
    Undone(HistoryStep),
    Redone(HistoryStep),
    ExitRequested,
}

/// Owns the live stroke buffer, the history and the panel values, and turns
/// one [`FrameInput`] per frame into one [`FrameOutput`].
#[derive(Debug, Clone)]
pub struct DrawingSession {
    live: StrokeBuffer,
    history: DrawHistory,
    panel: PanelState,
    mode: SessionMode,
    line_start: Option<Point>,
    stroke_start: usize,
    undo_latch: EdgeLatch,
    redo_latch: EdgeLatch,
    base_style: ResolvedStyle,
    snap_angle: SnapAngle,
}

impl DrawingSession {
    pub fn new(settings: &WhiteboardSettings) -> Self {
        let mut settings = settings.clone();
        settings.sanitize();

        let initial = Snapshot::empty(settings.initial_color, settings.initial_thickness);
        Self {
            live: initial.to_live(),
            history: DrawHistory::new(initial),
            panel: PanelState::from_settings(&settings),
            mode: SessionMode::Idle,
            line_start: None,
            stroke_start: 0,
            undo_latch: EdgeLatch::default(),
            redo_latch: EdgeLatch::default(),
            base_style: ResolvedStyle {
                color: settings.initial_color.pack(),
                thickness: settings.initial_thickness,
            },
            snap_angle: settings.snap_angle(),
        }
    }

    pub fn live(&self) -> &StrokeBuffer {
        &self.live
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelState {
        &mut self.panel
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn line_start(&self) -> Option<Point> {
        self.line_start
    }

    pub fn frame(&mut self, input: &FrameInput) -> FrameOutput {
        let mut events = Vec::new();
        if input.exit_requested {
            events.push(SessionEvent::ExitRequested);
        }
        if input.toggle_menu {
            self.panel.toggle_menu();
        }
        if let Some(request) = input.style {
            self.panel.apply_request(request);
        }
        self.apply_panel_style();

        let undo_fired = self.undo_latch.observe(input.undo_pressed);
        let redo_fired = self.redo_latch.observe(input.redo_pressed);
        if !input.pointer_captured {
            self.handle_pointer(input, undo_fired, redo_fired, &mut events);
        }

        FrameOutput {
            segments: self.segments(),
            preview: self.preview(input),
            history_len: self.history.len(),
            history_place: self.history.place(),
            background_dim: self.panel.background_dim(),
            menu_open: self.panel.menu_open,
            events,
        }
    }

    /// Segments of the live buffer, without any preview.
    pub fn segments(&self) -> Vec<Segment> {
        derive_segments(&self.live, self.base_style)
    }

    pub fn undo(&mut self) -> HistoryStep {
        let (step, snapshot) = self.history.undo();
        let snapshot = snapshot.clone();
        self.install(&snapshot);
        tracing::debug!(place = self.history.place(), ?step, "undo");
        step
    }

    pub fn redo(&mut self) -> HistoryStep {
        let (step, snapshot) = self.history.redo();
        let snapshot = snapshot.clone();
        self.install(&snapshot);
        tracing::debug!(place = self.history.place(), ?step, "redo");
        step
    }

    fn apply_panel_style(&mut self) {
        self.live.set_color_change(self.panel.color());
        self.live.set_thickness_change(self.panel.thickness());
    }

    fn handle_pointer(
        &mut self,
        input: &FrameInput,
        undo_fired: bool,
        redo_fired: bool,
        events: &mut Vec<SessionEvent>,
    ) {
        if input.primary_down && self.mode != SessionMode::StraightLineDrawing {
            if self.mode == SessionMode::Idle {
                self.set_mode(SessionMode::FreehandDrawing);
                self.stroke_start = self.live.len();
            }
            self.live.append_point(input.pointer);
            return;
        }

        if self.mode == SessionMode::FreehandDrawing {
            self.set_mode(SessionMode::Idle);
            self.finish_freehand(events);
            return;
        }

        let line_active = self.mode == SessionMode::StraightLineDrawing;
        if redo_fired && !line_active {
            events.push(SessionEvent::Redone(self.redo()));
        } else if undo_fired && !line_active {
            events.push(SessionEvent::Undone(self.undo()));
        } else if input.secondary_down {
            if !line_active {
                self.set_mode(SessionMode::StraightLineDrawing);
                self.line_start = Some(input.pointer);
            }
        } else if line_active {
            self.set_mode(SessionMode::Idle);
            if let Some(start) = self.line_start.take() {
                let end = self.line_end(start, input);
                self.finish_straight_line(start, end, events);
            }
        }
    }

    fn finish_freehand(&mut self, events: &mut Vec<SessionEvent>) {
        if self.live.segment_count_from(self.stroke_start) == 0 {
            self.live.truncate(self.stroke_start);
            tracing::debug!("discarded freehand stroke without segments");
            events.push(SessionEvent::StrokeDiscarded);
            return;
        }
        self.live.break_stroke();
        self.commit(events);
    }

    fn finish_straight_line(&mut self, start: Point, end: Point, events: &mut Vec<SessionEvent>) {
        if start == end {
            tracing::debug!("discarded zero-length straight line");
            events.push(SessionEvent::StrokeDiscarded);
            return;
        }
        self.live.push_point(start);
        self.live.push_point(end);
        self.live.break_stroke();
        self.commit(events);
    }

    fn commit(&mut self, events: &mut Vec<SessionEvent>) {
        self.history.commit(Snapshot::capture(&self.live));
        events.push(SessionEvent::Committed {
            place: self.history.place(),
        });
    }

    /// Replaces the live buffer and the panel style with the snapshot's.
    fn install(&mut self, snapshot: &Snapshot) {
        self.live = snapshot.to_live();
        self.panel.restore_style(snapshot.color(), snapshot.thickness());
    }

    fn line_end(&self, start: Point, input: &FrameInput) -> Point {
        if input.snap_held {
            snap_to(start, input.pointer, self.snap_angle)
        } else {
            input.pointer
        }
    }

    fn preview(&self, input: &FrameInput) -> Option<Segment> {
        if self.mode != SessionMode::StraightLineDrawing {
            return None;
        }
        let start = self.line_start?;
        Some(Segment {
            a: start,
            b: self.line_end(start, input),
            color: self.live.active_color().pack(),
            thickness: self.live.active_thickness(),
        })
    }

    fn set_mode(&mut self, next: SessionMode) {
        debug_assert!(
            can_transition(self.mode, next),
            "invalid session transition {:?} -> {next:?}",
            self.mode
        );
        self.mode = next;
    }
}
