use std::{
    collections::{VecDeque, vec_deque},
    num::NonZero,
};

/// A bounded, linear log of reversible operations with a cursor.
///
/// `applied` counts the entries at the front of the log that are currently in
/// effect; entries after it form the redo branch, which is discarded by the
/// next [`push`](Self::push).
#[derive(Debug, Clone)]
pub(crate) struct UndoRedoStack<T> {
    stack: VecDeque<T>,
    capacity: NonZero<usize>,
    applied: usize,
}

impl<T> UndoRedoStack<T> {
    #[must_use]
    pub(crate) fn new(capacity: NonZero<usize>) -> Self {
        Self {
            stack: VecDeque::new(),
            capacity,
            applied: 0,
        }
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> NonZero<usize> {
        self.capacity
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    /// Index of the last applied entry, or `None` when nothing can be undone.
    #[must_use]
    pub(crate) fn pointer(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    #[must_use]
    pub(crate) fn entries(&self) -> vec_deque::Iter<'_, T> {
        self.stack.iter()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.stack.truncate(self.applied);

        if self.stack.len() == self.capacity.get() {
            self.stack.pop_front();
        }

        self.stack.push_back(item);
        self.applied = self.stack.len();
    }

    #[must_use]
    pub(crate) fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Steps the cursor back and returns the entry to revert.
    pub(crate) fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.applied -= 1;
        self.stack.get(self.applied)
    }

    #[must_use]
    pub(crate) fn can_redo(&self) -> bool {
        self.applied < self.stack.len()
    }

    /// Steps the cursor forward and returns the entry to re-apply.
    pub(crate) fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.applied += 1;
        self.stack.get(self.applied - 1)
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
        self.applied = 0;
    }
}
