//! Syntax tree for Fluent (FTL) localization resources.
//!
//! The tree is produced by `ftl-parse` and turned back into text by
//! `ftl-format`. Nodes remember the byte span they were parsed from; use
//! [`StripSpans`] to compare trees independently of layout.

mod ast;
mod diagnostic;
pub mod visit;

pub use ast::*;
pub use ftl_stream::{ParseErrorKind, Span};
pub use visit::{StripSpans, Visitor};

#[cfg(test)]
mod tests;
