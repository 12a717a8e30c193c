use crate::draw::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colour as edited in the settings panel, four components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DrawColor {
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn has_nan(self) -> bool {
        [self.r, self.g, self.b, self.a].iter().any(|c| c.is_nan())
    }

    pub fn clamped(self) -> Self {
        let channel = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self::rgba(channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// Lossy quantization to 8 bits per channel.
    pub fn pack(self) -> PackedColor {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        PackedColor::rgba(
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        )
    }
}

impl Default for DrawColor {
    fn default() -> Self {
        Self::RED
    }
}

/// 32-bit colour laid out as `A << 24 | B << 16 | G << 8 | R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [
            self.0 as u8,
            (self.0 >> 8) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 24) as u8,
        ]
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrokeElement {
    Point(Point),
    Break,
}

impl StrokeElement {
    pub fn point(self) -> Option<Point> {
        match self {
            Self::Point(point) => Some(point),
            Self::Break => None,
        }
    }

    pub fn is_break(self) -> bool {
        matches!(self, Self::Break)
    }
}

/// Index-addressed style changes. Every key is the index of a `Break` in the
/// owning [`StrokeBuffer`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMap {
    colors: BTreeMap<usize, PackedColor>,
    thicknesses: BTreeMap<usize, f32>,
}

impl StyleMap {
    /// Zero colours are treated as absent.
    pub fn color_at(&self, index: usize) -> Option<PackedColor> {
        self.colors
            .get(&index)
            .copied()
            .filter(|color| !color.is_zero())
    }

    /// Non-positive thicknesses are treated as absent.
    pub fn thickness_at(&self, index: usize) -> Option<f32> {
        self.thicknesses
            .get(&index)
            .copied()
            .filter(|thickness| *thickness > 0.0)
    }

    pub fn color_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.colors.keys().copied()
    }

    pub fn thickness_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.thicknesses.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.thicknesses.is_empty()
    }

    fn last_index(&self) -> Option<usize> {
        let color = self.colors.keys().next_back().copied();
        let thickness = self.thicknesses.keys().next_back().copied();
        color.max(thickness)
    }
}

/// Ordered pen points with fenced style changes, plus the style that will be
/// applied to points appended next.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuffer {
    elements: Vec<StrokeElement>,
    styles: StyleMap,
    active_color: DrawColor,
    active_thickness: f32,
}

impl StrokeBuffer {
    pub fn new(active_color: DrawColor, active_thickness: f32) -> Self {
        Self {
            elements: Vec::new(),
            styles: StyleMap::default(),
            active_color,
            active_thickness,
        }
    }

    pub fn elements(&self) -> &[StrokeElement] {
        &self.elements
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn active_color(&self) -> DrawColor {
        self.active_color
    }

    pub fn active_thickness(&self) -> f32 {
        self.active_thickness
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of the first element after the most recent break.
    pub fn stroke_start(&self) -> usize {
        self.elements
            .iter()
            .rposition(|element| element.is_break())
            .map_or(0, |index| index + 1)
    }

    pub fn current_stroke(&self) -> &[StrokeElement] {
        &self.elements[self.stroke_start()..]
    }

    /// Appends `point` unless the current stroke already contains it. Returns
    /// whether the point was stored.
    pub fn append_point(&mut self, point: Point) -> bool {
        let duplicate = self
            .current_stroke()
            .iter()
            .any(|element| element.point() == Some(point));
        if duplicate {
            return false;
        }
        self.elements.push(StrokeElement::Point(point));
        true
    }

    /// Appends without duplicate suppression, used for straight-line endpoints.
    pub(crate) fn push_point(&mut self, point: Point) {
        self.elements.push(StrokeElement::Point(point));
    }

    pub fn break_stroke(&mut self) {
        self.elements.push(StrokeElement::Break);
    }

    /// Colours with a NaN channel are rejected.
    pub fn set_color_change(&mut self, color: DrawColor) -> bool {
        if color == self.active_color || color.has_nan() {
            return false;
        }
        let index = self.elements.len();
        self.styles.colors.insert(index, color.pack());
        self.elements.push(StrokeElement::Break);
        self.active_color = color;
        tracing::trace!(index, ?color, "fenced colour change");
        true
    }

    /// Non-finite thicknesses are rejected.
    pub fn set_thickness_change(&mut self, thickness: f32) -> bool {
        if thickness == self.active_thickness || !thickness.is_finite() {
            return false;
        }
        let index = self.elements.len();
        self.styles.thicknesses.insert(index, thickness);
        self.elements.push(StrokeElement::Break);
        self.active_thickness = thickness;
        tracing::trace!(index, thickness, "fenced thickness change");
        true
    }

    /// Drops elements at or after `len`. Style fences are never removed, so the
    /// cut moves forward past the last one when needed.
    pub fn truncate(&mut self, len: usize) {
        let floor = self.styles.last_index().map_or(0, |index| index + 1);
        self.elements.truncate(len.max(floor));
    }

    /// Number of drawable segments among the elements starting at `start`.
    pub fn segment_count_from(&self, start: usize) -> usize {
        self.elements
            .get(start..)
            .unwrap_or_default()
            .windows(2)
            .filter(|pair| !pair[0].is_break() && !pair[1].is_break())
            .count()
    }

    /// True when every style entry sits on a break.
    pub fn style_entries_are_fenced(&self) -> bool {
        let fenced = |index: usize| {
            self.elements
                .get(index)
                .is_some_and(|element| element.is_break())
        };
        self.styles.color_indices().all(fenced) && self.styles.thickness_indices().all(fenced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> StrokeBuffer {
        StrokeBuffer::new(DrawColor::RED, 3.0)
    }

    #[test]
    fn packing_rounds_each_channel() {
        let packed = DrawColor::rgba(1.0, 0.5, 0.0, 1.0).pack();
        assert_eq!(packed.to_rgba_array(), [255, 128, 0, 255]);
        assert_eq!(packed, PackedColor::rgba(255, 128, 0, 255));
        assert_eq!(PackedColor::rgba(255, 0, 0, 255).0, 0xFF00_00FF);
    }

    #[test]
    fn duplicate_point_in_current_stroke_is_suppressed() {
        let mut buffer = buffer();
        assert!(buffer.append_point(Point::new(1.0, 1.0)));
        assert!(!buffer.append_point(Point::new(1.0, 1.0)));
        assert_eq!(buffer.len(), 1);

        assert!(buffer.append_point(Point::new(2.0, 2.0)));
        assert!(!buffer.append_point(Point::new(1.0, 1.0)));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn duplicate_scan_stops_at_last_break() {
        let mut buffer = buffer();
        buffer.append_point(Point::new(1.0, 1.0));
        buffer.break_stroke();
        assert!(buffer.append_point(Point::new(1.0, 1.0)));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.stroke_start(), 2);
    }

    #[test]
    fn unchanged_style_requests_are_ignored() {
        let mut buffer = buffer();
        assert!(!buffer.set_color_change(DrawColor::RED));
        assert!(!buffer.set_thickness_change(3.0));
        assert!(buffer.is_empty());
        assert!(buffer.styles().is_empty());
    }

    #[test]
    fn style_changes_are_fenced_by_breaks() {
        let mut buffer = buffer();
        buffer.append_point(Point::new(0.0, 0.0));
        assert!(buffer.set_color_change(DrawColor::rgba(0.0, 0.0, 1.0, 1.0)));
        assert!(buffer.set_thickness_change(6.0));

        assert_eq!(buffer.len(), 3);
        assert_eq!(
            buffer.styles().color_at(1),
            Some(PackedColor::rgba(0, 0, 255, 255))
        );
        assert_eq!(buffer.styles().thickness_at(2), Some(6.0));
        assert!(buffer.style_entries_are_fenced());
        assert_eq!(buffer.active_thickness(), 6.0);
    }

    #[test]
    fn zero_valued_entries_read_as_no_change() {
        let mut buffer = buffer();
        buffer.set_color_change(DrawColor::rgba(0.0, 0.0, 0.0, 0.0));
        buffer.set_thickness_change(0.0);
        assert_eq!(buffer.styles().color_at(0), None);
        assert_eq!(buffer.styles().thickness_at(1), None);
    }

    #[test]
    fn truncate_never_removes_a_style_fence() {
        let mut buffer = buffer();
        buffer.append_point(Point::new(0.0, 0.0));
        buffer.break_stroke();
        buffer.set_thickness_change(5.0);
        buffer.append_point(Point::new(1.0, 0.0));

        buffer.truncate(2);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.styles().thickness_at(2), Some(5.0));
        assert!(buffer.style_entries_are_fenced());

        buffer.truncate(1);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn segment_count_skips_pairs_touching_a_break() {
        let mut buffer = buffer();
        buffer.append_point(Point::new(0.0, 0.0));
        buffer.append_point(Point::new(1.0, 0.0));
        buffer.break_stroke();
        buffer.append_point(Point::new(2.0, 0.0));
        assert_eq!(buffer.segment_count_from(0), 1);
        assert_eq!(buffer.segment_count_from(2), 0);
        assert_eq!(buffer.segment_count_from(10), 0);
    }

    #[test]
    fn non_finite_style_requests_add_no_fence() {
        let mut buffer = buffer();
        for _ in 0..10 {
            assert!(!buffer.set_thickness_change(f32::NAN));
            assert!(!buffer.set_thickness_change(f32::INFINITY));
            assert!(!buffer.set_color_change(DrawColor::rgba(f32::NAN, 0.0, 0.0, 1.0)));
        }
        assert!(buffer.is_empty());
        assert!(buffer.styles().is_empty());
        assert_eq!(buffer.active_thickness(), 3.0);
        assert_eq!(buffer.active_color(), DrawColor::RED);
    }
}
