use thiserror::Error;

/// Failure modes of the operation algebra.
///
/// Every function returns the first violation it encounters; inputs are
/// never partially modified on the way to an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The string an operation is applied to must be exactly as long as
    /// the operation's base length.
    #[error(
        "base length must equal string length: the operation covers {base_length} characters \
         but the string has {string_length}"
    )]
    BaseLengthMismatch {
        base_length: usize,
        string_length: usize,
    },

    /// A retain reached past the end of the string being operated on.
    #[error(
        "retain past end: cannot keep {count} characters at position {position} of a \
         {string_length}-character string"
    )]
    RetainPastEnd {
        position: usize,
        count: usize,
        string_length: usize,
    },

    /// The operation ended before consuming the whole string.
    #[error("didn't operate on the whole string: stopped after {consumed} of {string_length} characters")]
    IncompleteApplication {
        consumed: usize,
        string_length: usize,
    },

    /// Two operations can only be composed when the second picks up
    /// exactly where the first left off.
    #[error(
        "operations are not consecutive: the first produces {target_length} characters but the \
         second consumes {base_length}"
    )]
    ComposeLengthMismatch {
        target_length: usize,
        base_length: usize,
    },

    /// While pairing up two op streams, the first one ran out early.
    #[error("the first operation is too short for the second")]
    FirstOperationTooShort,

    /// While pairing up two op streams, the first one kept going after the
    /// second was exhausted.
    #[error("the first operation is too long for the second")]
    FirstOperationTooLong,

    /// Two operations can only be transformed when they edit the same
    /// document, i.e. share a base length.
    #[error("operations are not concurrent: their base lengths are {left} and {right}")]
    TransformLengthMismatch { left: usize, right: usize },

    /// A wire-form element was neither a positive integer (retain), a
    /// negative integer (delete) nor a non-empty string (insert).
    #[error("unknown operation: {element}")]
    UnknownOperation { element: String },
}
