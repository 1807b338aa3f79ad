use super::{Op, TextOperation};

impl TextOperation {
    /// Position of the first edited character: the leading retain, if any.
    fn start_index(&self) -> usize {
        match self.ops.first() {
            Some(&Op::Retain(count)) => count,
            _ => 0,
        }
    }

    /// The single editing step of a simple operation: one op, or one
    /// non-retain op padded by retains. `None` for anything richer.
    fn simple_op(&self) -> Option<&Op> {
        match self.ops.as_slice() {
            [only] => Some(only),
            [Op::Retain(_), second] => Some(second),
            [first, Op::Retain(_)] => Some(first),
            [Op::Retain(_), middle, Op::Retain(_)] => Some(middle),
            _ => None,
        }
    }

    /// Whether this operation and one made right after it form a single
    /// burst of editing and belong to the same undo step.
    ///
    /// That is the case for continuous typing (each insert starts where
    /// the previous one ended) and for runs of the backspace or delete
    /// key. Richer edits, and edits at unrelated positions, get their own
    /// undo steps. Callers typically add their own criteria on top, such
    /// as the time elapsed between the two operations.
    #[must_use]
    pub fn should_be_composed_with(&self, other: &TextOperation) -> bool {
        if self.is_noop() || other.is_noop() {
            return true;
        }

        let (Some(simple_self), Some(simple_other)) = (self.simple_op(), other.simple_op()) else {
            return false;
        };
        let (start_self, start_other) = (self.start_index(), other.start_index());

        match (simple_self, simple_other) {
            // Typing forward: the second insert begins where the first
            // one ended.
            (Op::Insert(text), Op::Insert(_)) => start_self + text.chars().count() == start_other,

            (&Op::Delete(_), &Op::Delete(deleted_other)) => {
                // Backspace runs walk backwards; the delete key stays put.
                start_other + deleted_other == start_self || start_self == start_other
            }

            _ => false,
        }
    }

    /// The mirror of [`should_be_composed_with`] for inverted operations,
    /// used when grouping an undo stack:
    /// `a.should_be_composed_with(&b)` equals
    /// `b_inverted.should_be_composed_with_inverted(&a_inverted)`.
    ///
    /// [`should_be_composed_with`]: TextOperation::should_be_composed_with
    #[must_use]
    pub fn should_be_composed_with_inverted(&self, other: &TextOperation) -> bool {
        if self.is_noop() || other.is_noop() {
            return true;
        }

        let (Some(simple_self), Some(simple_other)) = (self.simple_op(), other.simple_op()) else {
            return false;
        };
        let (start_self, start_other) = (self.start_index(), other.start_index());

        match (simple_self, simple_other) {
            // Undone delete-key runs produce inserts at one position.
            (Op::Insert(text), Op::Insert(_)) => {
                start_self + text.chars().count() == start_other || start_self == start_other
            }

            // Undone typing produces deletes walking backwards.
            (&Op::Delete(_), &Op::Delete(deleted_other)) => {
                start_other + deleted_other == start_self
            }

            _ => false,
        }
    }
}
