/// Cell-by-cell navigation over a result set
///
/// Tracks which cell the grid window shows and whether the Previous/Next
/// buttons are live. The cursor always stays inside `[0, len - 1]`.

/// Where the cursor sits relative to the ends of the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No results
    Empty,
    /// Exactly one result
    Singleton,
    /// First of several
    AtStart,
    Middle,
    /// Last of several
    AtEnd,
}

impl NavState {
    pub fn can_previous(self) -> bool {
        matches!(self, NavState::Middle | NavState::AtEnd)
    }

    pub fn can_next(self) -> bool {
        matches!(self, NavState::AtStart | NavState::Middle)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    cursor: usize,
    len: usize,
}

impl Navigator {
    /// Start over at the first cell of a fresh result set
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Current cell, or `None` when there is nothing to show
    pub fn cursor(&self) -> Option<usize> {
        (self.len > 0).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn state(&self) -> NavState {
        match self.len {
            0 => NavState::Empty,
            1 => NavState::Singleton,
            _ if self.cursor == 0 => NavState::AtStart,
            n if self.cursor == n - 1 => NavState::AtEnd,
            _ => NavState::Middle,
        }
    }

    /// Step forward; returns false (and stays put) at the last cell
    pub fn next(&mut self) -> bool {
        if self.state().can_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Step back; returns false (and stays put) at the first cell
    pub fn previous(&mut self) -> bool {
        if self.state().can_previous() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }
}
