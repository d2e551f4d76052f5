/// The stack of lookahead frames used for speculative consumption.
///
/// Each frame is an offset into the buffered, not yet consumed input. While
/// any frame is active, consuming input only moves the innermost frame forward;
/// nothing is discarded until the outermost frame commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookStack {
    frames: Vec<usize>,
}

impl LookStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if at least one frame is active.
    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns the number of active frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the effective offset: the innermost frame, or 0.
    pub fn offset(&self) -> usize {
        self.frames.last().copied().unwrap_or(0)
    }

    /// Pushes a frame seeded at the current effective offset.
    pub fn enter(&mut self) {
        let seed = self.offset();
        self.frames.push(seed);
    }

    /// Moves the innermost frame forward.
    ///
    /// Returns false if no frame is active, in which case the caller must
    /// consume physically.
    pub fn advance(&mut self, count: usize) -> bool {
        match self.frames.last_mut() {
            Some(top) => {
                *top += count;
                true
            }
            None => false,
        }
    }

    /// Pops the innermost frame and merges it into its parent.
    ///
    /// Returns the offset to consume physically when the popped frame was the
    /// outermost one.
    pub fn commit(&mut self) -> Option<usize> {
        let offset = self.frames.pop()?;
        match self.frames.last_mut() {
            Some(parent) => {
                *parent = offset;
                None
            }
            None => Some(offset),
        }
    }

    /// Pops the innermost frame, discarding its progress.
    pub fn revert(&mut self) {
        self.frames.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_seeds_from_parent() {
        let mut stack = LookStack::new();
        assert_eq!(stack.offset(), 0);
        stack.enter();
        stack.advance(3);
        stack.enter();
        assert_eq!(stack.offset(), 3);
        stack.advance(2);
        assert_eq!(stack.offset(), 5);
    }

    #[test]
    fn test_commit_merges_into_parent() {
        let mut stack = LookStack::new();
        stack.enter();
        stack.advance(1);
        stack.enter();
        stack.advance(4);
        assert_eq!(stack.commit(), None);
        assert_eq!(stack.offset(), 5);
        assert_eq!(stack.commit(), Some(5));
        assert!(!stack.is_active());
    }

    #[test]
    fn test_revert_drops_progress() {
        let mut stack = LookStack::new();
        stack.enter();
        stack.advance(2);
        stack.enter();
        stack.advance(7);
        stack.revert();
        assert_eq!(stack.offset(), 2);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_advance_without_frame() {
        let mut stack = LookStack::new();
        assert!(!stack.advance(1));
        assert_eq!(stack.commit(), None);
    }
}
