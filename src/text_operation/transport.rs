use core::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Op, OperationError, TextOperation};

impl TextOperation {
    /// Flatten into the wire form: a positive integer retains, a negative
    /// integer deletes, a string inserts.
    ///
    /// The round-trip through [`from_sequence`](TextOperation::from_sequence)
    /// reproduces the operation exactly.
    #[must_use]
    pub fn to_sequence(&self) -> Vec<Value> {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Retain(count) => Value::from(*count),
                Op::Insert(text) => Value::from(text.as_str()),
                Op::Delete(count) => Value::from(-(i64::try_from(*count).unwrap_or(i64::MAX))),
            })
            .collect()
    }

    /// Rebuild an operation from its wire form.
    ///
    /// Every element must be a positive integer (retain), a negative
    /// integer (delete of the magnitude) or a non-empty string (insert);
    /// anything else is rejected.
    pub fn from_sequence(sequence: &[Value]) -> Result<TextOperation, OperationError> {
        let mut operation = TextOperation::new();
        for element in sequence {
            operation.push_wire_element(element)?;
        }

        Ok(operation)
    }

    fn push_wire_element(&mut self, element: &Value) -> Result<(), OperationError> {
        match element {
            Value::Number(number) => match number.as_i64() {
                Some(count) if count > 0 => {
                    self.retain(usize::try_from(count).unwrap_or(usize::MAX));
                }
                Some(count) if count < 0 => {
                    self.delete(count);
                }
                _ => {
                    return Err(OperationError::UnknownOperation {
                        element: element.to_string(),
                    });
                }
            },
            Value::String(text) if !text.is_empty() => {
                self.insert(text);
            }
            _ => {
                return Err(OperationError::UnknownOperation {
                    element: element.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Serialize for TextOperation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut sequence = serializer.serialize_seq(Some(self.ops.len()))?;
        for op in &self.ops {
            match op {
                Op::Retain(count) => sequence.serialize_element(count)?,
                Op::Insert(text) => sequence.serialize_element(text)?,
                Op::Delete(count) => {
                    sequence.serialize_element(&-(i64::try_from(*count).unwrap_or(i64::MAX)))?;
                }
            }
        }

        sequence.end()
    }
}

impl<'de> Deserialize<'de> for TextOperation {
    fn deserialize<D>(deserializer: D) -> Result<TextOperation, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SequenceVisitor;

        impl<'de> Visitor<'de> for SequenceVisitor {
            type Value = TextOperation;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of integers and non-empty strings")
            }

            fn visit_seq<A>(self, mut sequence: A) -> Result<TextOperation, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut operation = TextOperation::new();
                while let Some(element) = sequence.next_element::<Value>()? {
                    operation
                        .push_wire_element(&element)
                        .map_err(de::Error::custom)?;
                }

                Ok(operation)
            }
        }

        deserializer.deserialize_seq(SequenceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_from_sequence() {
        let operation =
            TextOperation::from_sequence(&[json!(2), json!(-1), json!(-1), json!("cde")]).unwrap();

        assert_eq!(
            operation.ops(),
            [Op::Retain(2), Op::Insert("cde".to_owned()), Op::Delete(2)]
        );
        assert_eq!(operation.base_length(), 4);
        assert_eq!(operation.target_length(), 5);
    }

    #[test_case(json!({"insert": "x"}) ; "structured value")]
    #[test_case(json!(null) ; "absent element")]
    #[test_case(json!(0) ; "zero span")]
    #[test_case(json!(1.5) ; "fractional number")]
    #[test_case(json!("") ; "empty string")]
    #[test_case(json!([1]) ; "nested sequence")]
    fn test_from_sequence_rejects(element: Value) {
        let error =
            TextOperation::from_sequence(&[json!(2), json!(-1), json!(-1), json!("cde"), element])
                .unwrap_err();

        assert!(matches!(error, OperationError::UnknownOperation { .. }));
        assert!(error.to_string().starts_with("unknown operation: "));
    }

    #[test]
    fn test_sequence_round_trip() {
        let mut operation = TextOperation::new();
        operation.retain(5).insert("abcxyz").delete(2);

        assert_eq!(
            operation.to_sequence(),
            [json!(5), json!("abcxyz"), json!(-2)]
        );
        assert_eq!(
            TextOperation::from_sequence(&operation.to_sequence()).unwrap(),
            operation
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let mut operation = TextOperation::new();
        operation.retain(5).insert("abcxyz").delete(2);

        let encoded = serde_json::to_string(&operation).unwrap();
        insta::assert_snapshot!(encoded, @r#"[5,"abcxyz",-2]"#);

        assert_eq!(
            serde_json::from_str::<TextOperation>(&encoded).unwrap(),
            operation
        );
    }

    #[test]
    fn test_deserializing_rejects_junk_elements() {
        assert!(serde_json::from_str::<TextOperation>(r#"[2, true]"#).is_err());
        assert!(serde_json::from_str::<TextOperation>(r#"[2, 0]"#).is_err());
        assert!(serde_json::from_str::<TextOperation>(r#""not a sequence""#).is_err());
    }

    #[test]
    fn test_empty_sequence_is_the_empty_operation() {
        assert_eq!(
            TextOperation::from_sequence(&[]).unwrap(),
            TextOperation::new()
        );
    }
}
