/// Page ordinals visited before the current one, most recent last.
///
/// Session-scoped and unbounded. Only forward moves push, only a retreat pops
/// and only a reset clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    visited: Vec<usize>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ordinal: usize) {
        self.visited.push(ordinal);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.visited.pop()
    }

    pub fn peek(&self) -> Option<usize> {
        self.visited.last().copied()
    }

    pub fn clear(&mut self) {
        self.visited.clear();
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// The visited ordinals, oldest first.
    pub fn as_slice(&self) -> &[usize] {
        &self.visited
    }
}
