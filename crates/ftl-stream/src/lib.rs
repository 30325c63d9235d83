//! Character and lexical streams for the Fluent (FTL) syntax.
//!
//! [`CharStream`] is a two-cursor view over the source text that reports
//! `\r\n` as a single `\n`. [`FluentStream`] adds the Fluent-specific
//! lookahead predicates the parser is built from.

mod span;
pub use span::Span;

mod error;
pub use error::ParseErrorKind;

mod char_stream;
pub use char_stream::{CharStream, Checkpoint};

mod fluent_stream;
pub use fluent_stream::{CommentLevel, EOL, FluentStream};
