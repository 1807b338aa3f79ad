use std::cmp::Ordering;

use super::{Op, OperationError, TextOperation};
use crate::utils::split_at_char::split_at_char;

impl TextOperation {
    /// Combine this operation with one made against its output, producing
    /// a single operation with the same effect:
    /// `a.compose(&b)?.apply(text) == b.apply(&a.apply(text)?)`.
    ///
    /// The second operation must consume exactly the string this one
    /// produces, i.e. `self.target_length() == second.base_length()`.
    ///
    /// ```
    /// use converge_text::TextOperation;
    ///
    /// let mut first = TextOperation::new();
    /// first.retain(1).insert("123").delete(1).retain(1);
    ///
    /// let mut second = TextOperation::new();
    /// second.retain(2).insert("$").delete(1).retain(2);
    ///
    /// let composed = first.compose(&second)?;
    /// assert_eq!(composed.apply("abc")?, "a1$3c");
    /// # Ok::<(), converge_text::OperationError>(())
    /// ```
    pub fn compose(&self, second: &TextOperation) -> Result<TextOperation, OperationError> {
        if self.target_length != second.base_length {
            return Err(OperationError::ComposeLengthMismatch {
                target_length: self.target_length,
                base_length: second.base_length,
            });
        }

        let mut first_ops = self.ops.iter().cloned();
        let mut second_ops = second.ops.iter().cloned();
        let mut first_op = first_ops.next();
        let mut second_op = second_ops.next();

        let mut composed = TextOperation::new();

        // Pair up the two streams, splitting whichever current op is
        // longer so that both cursors move through the intermediate
        // string in lockstep.
        loop {
            match (first_op.take(), second_op.take()) {
                (None, None) => break,

                // A deletion in the first operation covers characters the
                // second operation never saw.
                (Some(Op::Delete(count)), second_current) => {
                    composed.delete(count);
                    first_op = first_ops.next();
                    second_op = second_current;
                }

                // An insertion in the second operation has no preimage in
                // the first.
                (first_current, Some(Op::Insert(text))) => {
                    composed.insert(&text);
                    first_op = first_current;
                    second_op = second_ops.next();
                }

                (None, Some(_)) => return Err(OperationError::FirstOperationTooShort),
                (Some(_), None) => return Err(OperationError::FirstOperationTooLong),

                (Some(Op::Retain(first_count)), Some(Op::Retain(second_count))) => {
                    composed.retain(first_count.min(second_count));
                    match first_count.cmp(&second_count) {
                        Ordering::Greater => {
                            first_op = Some(Op::Retain(first_count - second_count));
                            second_op = second_ops.next();
                        }
                        Ordering::Equal => {
                            first_op = first_ops.next();
                            second_op = second_ops.next();
                        }
                        Ordering::Less => {
                            first_op = first_ops.next();
                            second_op = Some(Op::Retain(second_count - first_count));
                        }
                    }
                }

                // The second operation deletes characters the first one
                // inserted; they cancel and never reach the output.
                (Some(Op::Insert(text)), Some(Op::Delete(second_count))) => {
                    let inserted = text.chars().count();
                    match inserted.cmp(&second_count) {
                        Ordering::Greater => {
                            let (_, kept) = split_at_char(&text, second_count);
                            first_op = Some(Op::Insert(kept.to_owned()));
                            second_op = second_ops.next();
                        }
                        Ordering::Equal => {
                            first_op = first_ops.next();
                            second_op = second_ops.next();
                        }
                        Ordering::Less => {
                            first_op = first_ops.next();
                            second_op = Some(Op::Delete(second_count - inserted));
                        }
                    }
                }

                (Some(Op::Insert(text)), Some(Op::Retain(second_count))) => {
                    let inserted = text.chars().count();
                    match inserted.cmp(&second_count) {
                        Ordering::Greater => {
                            let (kept, rest) = split_at_char(&text, second_count);
                            composed.insert(kept);
                            first_op = Some(Op::Insert(rest.to_owned()));
                            second_op = second_ops.next();
                        }
                        Ordering::Equal => {
                            composed.insert(&text);
                            first_op = first_ops.next();
                            second_op = second_ops.next();
                        }
                        Ordering::Less => {
                            composed.insert(&text);
                            first_op = first_ops.next();
                            second_op = Some(Op::Retain(second_count - inserted));
                        }
                    }
                }

                (Some(Op::Retain(first_count)), Some(Op::Delete(second_count))) => {
                    composed.delete(first_count.min(second_count));
                    match first_count.cmp(&second_count) {
                        Ordering::Greater => {
                            first_op = Some(Op::Retain(first_count - second_count));
                            second_op = second_ops.next();
                        }
                        Ordering::Equal => {
                            first_op = first_ops.next();
                            second_op = second_ops.next();
                        }
                        Ordering::Less => {
                            first_op = first_ops.next();
                            second_op = Some(Op::Delete(second_count - first_count));
                        }
                    }
                }
            }
        }

        Ok(composed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_compose_matches_applying_in_sequence() {
        let base = "abc";

        let mut first = TextOperation::new();
        first.retain(1).insert("123").delete(1).retain(1);
        let intermediate = first.apply(base).unwrap();
        assert_eq!(intermediate, "a123c");

        let mut second = TextOperation::new();
        second
            .retain(2)
            .insert("$$$")
            .delete(1)
            .retain(1)
            .insert("###")
            .retain(1);
        let full = second.apply(&intermediate).unwrap();
        assert_eq!(full, "a1$$$3###c");

        let composed = first.compose(&second).unwrap();
        assert_eq!(composed.apply(base).unwrap(), full);
    }

    #[test]
    fn test_compose_keeps_the_canonical_form() {
        let mut first = TextOperation::new();
        first.retain(1).insert("1").delete(1).retain(1);

        let mut second = TextOperation::new();
        second.retain(1).delete(1).insert("#").retain(1);

        let composed = first.compose(&second).unwrap();
        assert_eq!(
            composed.ops(),
            [
                Op::Retain(1),
                Op::Insert("#".to_owned()),
                Op::Delete(1),
                Op::Retain(1)
            ]
        );
    }

    #[test]
    fn test_insert_followed_by_delete_cancels_out() {
        let mut first = TextOperation::new();
        first.insert("abc");

        let mut second = TextOperation::new();
        second.delete(3);

        let composed = first.compose(&second).unwrap();
        assert!(composed.is_noop());
        assert_eq!(composed.base_length(), 0);
        assert_eq!(composed.target_length(), 0);
    }

    #[test]
    fn test_the_empty_operation_is_the_identity() {
        let identity = TextOperation::new();
        assert_eq!(identity.compose(&identity).unwrap(), identity);

        let mut operation = TextOperation::new();
        operation.insert("ab");

        let mut retain_all = TextOperation::new();
        retain_all.retain(2);

        assert_eq!(identity.compose(&operation).unwrap(), operation);
        assert_eq!(operation.compose(&retain_all).unwrap(), operation);
    }

    #[test]
    fn test_compose_rejects_non_consecutive_operations() {
        let mut first = TextOperation::new();
        first.insert("abc");

        let mut second = TextOperation::new();
        second.retain(2);

        assert_eq!(
            first.compose(&second).unwrap_err(),
            OperationError::ComposeLengthMismatch {
                target_length: 3,
                base_length: 2,
            }
        );
    }
}
