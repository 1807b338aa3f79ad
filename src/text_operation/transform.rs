use std::cmp::Ordering;

use super::{Op, OperationError, TextOperation};

impl TextOperation {
    /// Reconcile two concurrent operations made against the same document.
    ///
    /// Returns the pair `(self', other')` such that applying `self` then
    /// `other'` yields the same document as applying `other` then `self'`.
    /// When both sides insert at the same position, `self`'s insertion
    /// comes first in the merged document.
    ///
    /// ```
    /// use converge_text::TextOperation;
    ///
    /// let mut left = TextOperation::new();
    /// left.retain(1).insert("x").retain(2);
    ///
    /// let mut right = TextOperation::new();
    /// right.retain(2).delete(1);
    ///
    /// let (left_prime, right_prime) = left.transform(&right)?;
    /// assert_eq!(right_prime.apply(&left.apply("abc")?)?, "axb");
    /// assert_eq!(left_prime.apply(&right.apply("abc")?)?, "axb");
    /// # Ok::<(), converge_text::OperationError>(())
    /// ```
    pub fn transform(
        &self,
        other: &TextOperation,
    ) -> Result<(TextOperation, TextOperation), OperationError> {
        if self.base_length != other.base_length {
            return Err(OperationError::TransformLengthMismatch {
                left: self.base_length,
                right: other.base_length,
            });
        }

        let mut left_ops = self.ops.iter().cloned();
        let mut right_ops = other.ops.iter().cloned();
        let mut left_op = left_ops.next();
        let mut right_op = right_ops.next();

        let mut left_prime = TextOperation::new();
        let mut right_prime = TextOperation::new();

        // Walk both op streams while keeping the two cursors into the
        // shared source string at the same position.
        loop {
            match (left_op.take(), right_op.take()) {
                (None, None) => break,

                // Insertions consume no source; the other side only has to
                // step over the new characters. The left side wins ties.
                (Some(Op::Insert(text)), right_current) => {
                    right_prime.retain(text.chars().count());
                    left_prime.insert(&text);
                    left_op = left_ops.next();
                    right_op = right_current;
                }

                (left_current, Some(Op::Insert(text))) => {
                    left_prime.retain(text.chars().count());
                    right_prime.insert(&text);
                    left_op = left_current;
                    right_op = right_ops.next();
                }

                (None, Some(_)) => return Err(OperationError::FirstOperationTooShort),
                (Some(_), None) => return Err(OperationError::FirstOperationTooLong),

                (Some(Op::Retain(left_count)), Some(Op::Retain(right_count))) => {
                    let advanced = left_count.min(right_count);
                    left_prime.retain(advanced);
                    right_prime.retain(advanced);
                    match left_count.cmp(&right_count) {
                        Ordering::Greater => {
                            left_op = Some(Op::Retain(left_count - right_count));
                            right_op = right_ops.next();
                        }
                        Ordering::Equal => {
                            left_op = left_ops.next();
                            right_op = right_ops.next();
                        }
                        Ordering::Less => {
                            left_op = left_ops.next();
                            right_op = Some(Op::Retain(right_count - left_count));
                        }
                    }
                }

                // Both sides deleted the same source range; the characters
                // are already gone for everyone.
                (Some(Op::Delete(left_count)), Some(Op::Delete(right_count))) => {
                    match left_count.cmp(&right_count) {
                        Ordering::Greater => {
                            left_op = Some(Op::Delete(left_count - right_count));
                            right_op = right_ops.next();
                        }
                        Ordering::Equal => {
                            left_op = left_ops.next();
                            right_op = right_ops.next();
                        }
                        Ordering::Less => {
                            left_op = left_ops.next();
                            right_op = Some(Op::Delete(right_count - left_count));
                        }
                    }
                }

                (Some(Op::Delete(left_count)), Some(Op::Retain(right_count))) => {
                    left_prime.delete(left_count.min(right_count));
                    match left_count.cmp(&right_count) {
                        Ordering::Greater => {
                            left_op = Some(Op::Delete(left_count - right_count));
                            right_op = right_ops.next();
                        }
                        Ordering::Equal => {
                            left_op = left_ops.next();
                            right_op = right_ops.next();
                        }
                        Ordering::Less => {
                            left_op = left_ops.next();
                            right_op = Some(Op::Retain(right_count - left_count));
                        }
                    }
                }

                (Some(Op::Retain(left_count)), Some(Op::Delete(right_count))) => {
                    right_prime.delete(left_count.min(right_count));
                    match left_count.cmp(&right_count) {
                        Ordering::Greater => {
                            left_op = Some(Op::Retain(left_count - right_count));
                            right_op = right_ops.next();
                        }
                        Ordering::Equal => {
                            left_op = left_ops.next();
                            right_op = right_ops.next();
                        }
                        Ordering::Less => {
                            left_op = left_ops.next();
                            right_op = Some(Op::Delete(right_count - left_count));
                        }
                    }
                }
            }
        }

        Ok((left_prime, right_prime))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_converges(base: &str, left: &TextOperation, right: &TextOperation) -> String {
        let (left_prime, right_prime) = left.transform(right).unwrap();

        let left_first = right_prime.apply(&left.apply(base).unwrap()).unwrap();
        let right_first = left_prime.apply(&right.apply(base).unwrap()).unwrap();
        assert_eq!(left_first, right_first);

        left_first
    }

    #[test]
    fn test_concurrent_inserts_keep_the_left_side_first() {
        let mut left = TextOperation::new();
        left.retain(1).insert("x").retain(1);

        let mut right = TextOperation::new();
        right.retain(1).insert("y").retain(1);

        assert_eq!(assert_converges("ab", &left, &right), "axyb");
    }

    #[test]
    fn test_overlapping_deletes_remove_the_union() {
        let mut left = TextOperation::new();
        left.delete(3).retain(2);

        let mut right = TextOperation::new();
        right.retain(1).delete(3).retain(1);

        assert_eq!(assert_converges("abcde", &left, &right), "e");
    }

    #[test]
    fn test_insert_into_a_concurrently_deleted_range_survives() {
        let mut left = TextOperation::new();
        left.retain(2).insert("x").retain(2);

        let mut right = TextOperation::new();
        right.retain(1).delete(2).retain(1);

        assert_eq!(assert_converges("abcd", &left, &right), "axd");
    }

    #[test]
    fn test_transformed_pair_composes_to_the_same_operation() {
        let mut left = TextOperation::new();
        left.retain(2).insert("x").delete(1).retain(2);

        let mut right = TextOperation::new();
        right.delete(1).retain(3).insert("y").retain(1);

        let (left_prime, right_prime) = left.transform(&right).unwrap();
        assert_eq!(
            left.compose(&right_prime).unwrap(),
            right.compose(&left_prime).unwrap()
        );
    }

    #[test]
    fn test_transform_rejects_different_base_lengths() {
        let mut left = TextOperation::new();
        left.retain(3);

        let mut right = TextOperation::new();
        right.retain(4);

        assert_eq!(
            left.transform(&right).unwrap_err(),
            OperationError::TransformLengthMismatch { left: 3, right: 4 }
        );
    }
}
