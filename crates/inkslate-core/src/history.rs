//! Undo/redo history of canvas snapshots.

use std::collections::VecDeque;

/// Two stacks of snapshots: committed states and undone states.
///
/// After [`History::new`] or [`History::reset`] the undo stack always holds
/// at least one snapshot, the baseline. Its top is the current state.
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Oldest at the front, current state at the back.
    undo_stack: VecDeque<T>,
    /// Most recently undone state at the back.
    redo_stack: Vec<T>,
    /// Maximum length of the undo stack (at least 1).
    max_depth: usize,
}

impl<T> History<T> {
    /// Create a history whose only entry is `baseline`.
    pub fn new(baseline: T, max_depth: usize) -> Self {
        let mut undo_stack = VecDeque::new();
        undo_stack.push_back(baseline);
        Self {
            undo_stack,
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Push a new state and invalidate everything that could be redone.
    pub fn commit(&mut self, snapshot: T) {
        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();

        // Limit undo history size
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
            log::debug!("Undo history full, dropped oldest snapshot");
        }
    }

    /// Step back one state and return the new current state.
    /// Returns `None` when only the baseline remains.
    pub fn undo(&mut self) -> Option<&T> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let undone = self.undo_stack.pop_back()?;
        self.redo_stack.push(undone);
        self.undo_stack.back()
    }

    /// Re-apply the most recently undone state and return it.
    pub fn redo(&mut self) -> Option<&T> {
        let state = self.redo_stack.pop()?;
        self.undo_stack.push_back(state);
        self.undo_stack.back()
    }

    /// Drop both stacks and start over from `baseline`.
    pub fn reset(&mut self, baseline: T) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push_back(baseline);
    }

    /// The current (most recently committed) state.
    pub fn current(&self) -> &T {
        // Never empty: every constructor and mutator keeps the baseline.
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of states on the undo stack, including the current one.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
