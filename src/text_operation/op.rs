use core::fmt::{self, Display};

/// One step of a [`TextOperation`](crate::TextOperation).
///
/// A step either consumes source characters (`Retain`, `Delete`) or
/// produces output characters (`Retain`, `Insert`). Steps stored inside a
/// `TextOperation` are never empty: the builders drop zero-length spans
/// before they reach the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Advance over the next `n` characters of the source, copying them to
    /// the output.
    Retain(usize),

    /// Emit a string into the output without consuming the source.
    Insert(String),

    /// Advance over the next `n` characters of the source, discarding them.
    Delete(usize),
}

impl Op {
    #[must_use]
    pub fn is_retain(&self) -> bool {
        matches!(self, Op::Retain(_))
    }

    #[must_use]
    pub fn is_insert(&self) -> bool {
        matches!(self, Op::Insert(_))
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self, Op::Delete(_))
    }

    /// The number of characters this step covers. Always greater than zero
    /// for steps stored in an operation.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Op::Retain(count) | Op::Delete(count) => *count,
            Op::Insert(text) => text.chars().count(),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Retain(count) => write!(f, "retain {count}"),
            Op::Insert(text) => write!(f, "insert '{text}'"),
            Op::Delete(count) => write!(f, "delete {count}"),
        }
    }
}
