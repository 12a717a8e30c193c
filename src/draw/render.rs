use crate::draw::geometry::Point;
use crate::draw::model::{PackedColor, StrokeBuffer, StrokeElement};
use crate::draw::session::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub color: PackedColor,
    pub thickness: f32,
}

/// One line for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub color: PackedColor,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    pub segments: Vec<Segment>,
    /// Uncommitted straight line following the pointer.
    pub preview: Option<Segment>,
    pub history_len: usize,
    pub history_place: usize,
    pub background_dim: Option<f32>,
    pub menu_open: bool,
    pub events: Vec<SessionEvent>,
}

impl FrameOutput {
    pub fn exit_requested(&self) -> bool {
        self.events.contains(&SessionEvent::ExitRequested)
    }

    /// Committed segments followed by the preview, in draw order.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().chain(self.preview.iter())
    }
}

/// Replays `buffer` from `base`, switching style at every fenced break and
/// emitting a segment for each pair of adjacent points.
pub fn derive_segments(buffer: &StrokeBuffer, base: ResolvedStyle) -> Vec<Segment> {
    let mut style = base;
    let mut segments = Vec::new();
    let mut previous: Option<Point> = None;

    for (index, element) in buffer.elements().iter().enumerate() {
        match *element {
            StrokeElement::Break => {
                if let Some(color) = buffer.styles().color_at(index) {
                    style.color = color;
                }
                if let Some(thickness) = buffer.styles().thickness_at(index) {
                    style.thickness = thickness;
                }
                previous = None;
            }
            StrokeElement::Point(point) => {
                if let Some(a) = previous {
                    segments.push(Segment {
                        a,
                        b: point,
                        color: style.color,
                        thickness: style.thickness,
                    });
                }
                previous = Some(point);
            }
        }
    }

    segments
}
