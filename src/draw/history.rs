use crate::draw::model::{DrawColor, StrokeBuffer};

/// Immutable copy of the live stroke buffer taken when a stroke completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    buffer: StrokeBuffer,
}

impl Snapshot {
    pub fn capture(buffer: &StrokeBuffer) -> Self {
        Self {
            buffer: buffer.clone(),
        }
    }

    pub fn empty(color: DrawColor, thickness: f32) -> Self {
        Self {
            buffer: StrokeBuffer::new(color, thickness),
        }
    }

    pub fn buffer(&self) -> &StrokeBuffer {
        &self.buffer
    }

    pub fn color(&self) -> DrawColor {
        self.buffer.active_color()
    }

    pub fn thickness(&self) -> f32 {
        self.buffer.active_thickness()
    }

    pub fn to_live(&self) -> StrokeBuffer {
        self.buffer.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Moved,
    AtBound,
}

/// Linear snapshot history. Index 0 always holds the initial empty snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawHistory {
    snapshots: Vec<Snapshot>,
    place: usize,
}

impl DrawHistory {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            place: 0,
        }
    }

    /// Appends `snapshot` after the cursor, discarding any redo branch first.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let pruned = self.snapshots.len() - 1 - self.place;
        self.snapshots.truncate(self.place + 1);
        self.snapshots.push(snapshot);
        self.place = self.snapshots.len() - 1;
        tracing::debug!(place = self.place, pruned, "committed history snapshot");
    }

    pub fn undo(&mut self) -> (HistoryStep, &Snapshot) {
        let step = if self.place > 0 {
            self.place -= 1;
            HistoryStep::Moved
        } else {
            HistoryStep::AtBound
        };
        (step, &self.snapshots[self.place])
    }

    pub fn redo(&mut self) -> (HistoryStep, &Snapshot) {
        let step = if self.place + 1 < self.snapshots.len() {
            self.place += 1;
            HistoryStep::Moved
        } else {
            HistoryStep::AtBound
        };
        (step, &self.snapshots[self.place])
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.place]
    }

    pub fn place(&self) -> usize {
        self.place
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.place > 0
    }

    pub fn can_redo(&self) -> bool {
        self.place + 1 < self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
