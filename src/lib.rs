//! An operational-transformation engine for plain text.
//!
//! The crate revolves around one value type, [`TextOperation`]: a single,
//! self-contained edit of a text document, described as a sequence of
//! retain/insert/delete steps. On top of it sit the four functions that
//! make OT-based collaborative editing work: [`TextOperation::apply`],
//! [`TextOperation::invert`], [`TextOperation::compose`] and
//! [`TextOperation::transform`].
//!
//! ```
//! use converge_text::TextOperation;
//!
//! let mut ours = TextOperation::new();
//! ours.retain(5).insert(", friend");
//!
//! let mut theirs = TextOperation::new();
//! theirs.delete(5).insert("Howdy");
//!
//! // Both edits started from "hello"; transform reconciles them.
//! let (ours_prime, theirs_prime) = ours.transform(&theirs)?;
//! assert_eq!(
//!     theirs_prime.apply(&ours.apply("hello")?)?,
//!     ours_prime.apply(&theirs.apply("hello")?)?,
//! );
//! # Ok::<(), converge_text::OperationError>(())
//! ```

mod text_operation;
mod utils;

pub use text_operation::{Op, OpLength, OperationError, TextOperation};
