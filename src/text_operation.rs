use core::fmt::{self, Display};

mod compose;
mod error;
mod len;
mod op;
mod transform;
mod transport;
mod undo;

pub use error::OperationError;
pub use len::OpLength;
pub use op::Op;

use crate::utils::string_builder::StringBuilder;

/// A single self-contained edit of a plain-text document, described as a
/// sequence of [`Op`] steps walked from the start of the document to its
/// end.
///
/// Operations are built incrementally with the fluent [`retain`],
/// [`insert`] and [`delete`] builders and are treated as values from then
/// on: [`apply`] produces the edited string, [`invert`] the operation that
/// undoes it, [`compose`] collapses two consecutive operations into one,
/// and [`transform`] reconciles two concurrent operations so that both
/// sites converge on the same document.
///
/// The builders keep the sequence in a canonical form: adjacent steps of
/// the same kind are merged, and an insert next to a delete always comes
/// first. Two operations with the same effect therefore compare equal.
///
/// All length arithmetic is measured in Unicode scalar values (`char`s),
/// never bytes, so operations are safe to use with any UTF-8 text.
///
/// ```
/// use converge_text::TextOperation;
///
/// let mut operation = TextOperation::new();
/// operation.retain(1).delete(1).retain(1).insert("d");
/// assert_eq!(operation.apply("abc")?, "acd");
/// # Ok::<(), converge_text::OperationError>(())
/// ```
///
/// [`retain`]: TextOperation::retain
/// [`insert`]: TextOperation::insert
/// [`delete`]: TextOperation::delete
/// [`apply`]: TextOperation::apply
/// [`invert`]: TextOperation::invert
/// [`compose`]: TextOperation::compose
/// [`transform`]: TextOperation::transform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextOperation {
    ops: Vec<Op>,
    base_length: usize,
    target_length: usize,
}

impl TextOperation {
    /// Create an empty operation. It applies to the empty string and is a
    /// noop.
    #[must_use]
    pub fn new() -> TextOperation {
        TextOperation {
            ops: Vec::new(),
            base_length: 0,
            target_length: 0,
        }
    }

    /// The canonical sequence of steps making up this operation.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Length of any string this operation can be applied to.
    #[must_use]
    pub fn base_length(&self) -> usize {
        self.base_length
    }

    /// Length of the string [`apply`](TextOperation::apply) produces.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Whether applying this operation leaves every document unchanged:
    /// it is empty or consists of a single retain.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.ops.as_slice(), [] | [Op::Retain(_)])
    }

    /// Skip over the next `count` characters of the document, copying them
    /// to the output unchanged.
    pub fn retain(&mut self, count: usize) -> &mut TextOperation {
        if count == 0 {
            return self;
        }

        self.base_length += count;
        self.target_length += count;

        if let Some(Op::Retain(last)) = self.ops.last_mut() {
            *last += count;
        } else {
            self.ops.push(Op::Retain(count));
        }

        self
    }

    /// Insert `text` at the current position.
    ///
    /// Adjacent inserts are merged, and an insert next to a delete always
    /// ends up in front of it, so equal effects have equal representations.
    pub fn insert(&mut self, text: &str) -> &mut TextOperation {
        if text.is_empty() {
            return self;
        }

        self.target_length += text.chars().count();

        match self.ops.as_mut_slice() {
            [.., Op::Insert(last)] => last.push_str(text),
            [.., Op::Insert(previous), Op::Delete(_)] => previous.push_str(text),
            [.., last @ Op::Delete(_)] => {
                let trailing_delete = std::mem::replace(last, Op::Insert(text.to_owned()));
                self.ops.push(trailing_delete);
            }
            _ => self.ops.push(Op::Insert(text.to_owned())),
        }

        self
    }

    /// Delete the next characters of the document. The span can be given
    /// as a character count (negative counts use their magnitude) or as
    /// the deleted string itself.
    pub fn delete(&mut self, span: impl OpLength) -> &mut TextOperation {
        let count = span.length();
        if count == 0 {
            return self;
        }

        self.base_length += count;

        if let Some(Op::Delete(last)) = self.ops.last_mut() {
            *last += count;
        } else {
            self.ops.push(Op::Delete(count));
        }

        self
    }

    /// Run this operation against `text` and return the edited string.
    ///
    /// `text` must be exactly [`base_length`](TextOperation::base_length)
    /// characters long; the result is
    /// [`target_length`](TextOperation::target_length) characters long.
    pub fn apply(&self, text: &str) -> Result<String, OperationError> {
        let string_length = text.chars().count();
        if string_length != self.base_length {
            return Err(OperationError::BaseLengthMismatch {
                base_length: self.base_length,
                string_length,
            });
        }

        let mut builder = StringBuilder::new(text, self.target_length);
        let mut position = 0;

        for op in &self.ops {
            match op {
                Op::Retain(count) => {
                    if position + count > string_length {
                        return Err(OperationError::RetainPastEnd {
                            position,
                            count: *count,
                            string_length,
                        });
                    }

                    builder.retain(*count);
                    position += count;
                }
                Op::Insert(inserted) => builder.insert(inserted),
                Op::Delete(count) => {
                    builder.delete(*count);
                    position += count;
                }
            }
        }

        if position != string_length {
            return Err(OperationError::IncompleteApplication {
                consumed: position,
                string_length,
            });
        }

        Ok(builder.build())
    }

    /// Compute the operation that undoes this one: applying the result to
    /// the output of [`apply`](TextOperation::apply) restores `text`.
    ///
    /// `text` must be the document this operation applies to, since the
    /// inverse has to remember the characters the operation deleted.
    pub fn invert(&self, text: &str) -> Result<TextOperation, OperationError> {
        let string_length = text.chars().count();
        if string_length != self.base_length {
            return Err(OperationError::BaseLengthMismatch {
                base_length: self.base_length,
                string_length,
            });
        }

        let mut source = text.chars();
        let mut inverse = TextOperation::new();

        for op in &self.ops {
            match op {
                Op::Retain(count) => {
                    inverse.retain(*count);
                    source.by_ref().nth(count - 1);
                }
                Op::Insert(inserted) => {
                    inverse.delete(inserted.as_str());
                }
                Op::Delete(count) => {
                    let deleted: String = source.by_ref().take(*count).collect();
                    inverse.insert(&deleted);
                }
            }
        }

        Ok(inverse)
    }
}

impl Display for TextOperation {
    /// Renders the diagnostic form, e.g. `retain 2, insert 'lorem', delete 5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, op) in self.ops.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{op}")?;
        }

        Ok(())
    }
}
