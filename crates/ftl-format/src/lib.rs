//! Serializer for Fluent (FTL) localization resources.
//!
//! Turns a [`Resource`](ftl_ast::Resource) back into FTL text. The output is
//! canonical: patterns that span several lines or contain a select
//! expression start on their own line, every nesting level adds four spaces
//! of indentation, and standalone comments are separated by blank lines.
//!
//! ```
//! use ftl_format::{SerializeOptions, serialize};
//!
//! let resource = ftl_parse::parse("hello = Hello, { $name }!\n");
//! assert_eq!(
//!     serialize(&resource, &SerializeOptions::default()),
//!     "hello = Hello, { $name }!\n"
//! );
//! ```

mod options;
mod serializer;

pub use options::SerializeOptions;
pub use serializer::{serialize, serialize_expression};
