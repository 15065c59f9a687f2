use crate::surface::RasterSurface;

/// An immutable full copy of the raster buffer at one point in history.
///
/// Owned exclusively by the history stack; the buffer is a deep copy so a
/// snapshot never aliases the live surface across later mutations.
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Snapshot {
    fn capture(surface: &RasterSurface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            data: surface.data().to_vec(),
        }
    }

    fn restore_onto(&self, surface: &mut RasterSurface) {
        surface.restore(self.width, self.height, &self.data);
    }
}

/// Snapshot-based undo/redo stack over the raster surface.
///
/// Invariant: once the stack is non-empty the cursor is a valid index into
/// it; capturing after one or more undos prunes the redo branch.
pub struct HistoryStack {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    /// Oldest snapshots are dropped past this depth; None means unbounded.
    max_depth: Option<usize>,
}

impl HistoryStack {
    /// Unbounded history.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            max_depth: None,
        }
    }

    /// History that keeps at most `max_depth` snapshots, dropping the
    /// oldest when the cap is exceeded.
    pub fn with_capacity(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            max_depth: Some(max_depth.max(1)),
        }
    }

    /// Copy the current surface into a new snapshot after the cursor,
    /// discarding any redo branch.
    ///
    /// Call exactly once per committed user edit (initial clear, shape
    /// commit, crop apply, resize, pasted image) and never per drag frame.
    pub fn capture(&mut self, surface: &RasterSurface) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(Snapshot::capture(surface));
        self.cursor = self.snapshots.len() - 1;
        if let Some(cap) = self.max_depth {
            while self.snapshots.len() > cap {
                self.snapshots.remove(0);
                self.cursor -= 1;
            }
        }
        log::debug!(
            "captured state {} ({}x{})",
            self.cursor,
            surface.width(),
            surface.height()
        );
    }

    /// Step the cursor back and restore that snapshot onto the surface,
    /// replacing its dimensions if they differ. No-op at the earliest entry.
    pub fn undo(&mut self, surface: &mut RasterSurface) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.snapshots[self.cursor].restore_onto(surface);
        log::debug!("undo to state {}", self.cursor);
        true
    }

    /// Step the cursor forward and restore. No-op at the latest entry.
    pub fn redo(&mut self, surface: &mut RasterSurface) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.snapshots[self.cursor].restore_onto(surface);
        log::debug!("redo to state {}", self.cursor);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Current position within the snapshot sequence. Together with
    /// [`len`](Self::len) this identifies the visible surface state, which
    /// the shell uses as a cheap revision counter for texture re-uploads.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}
