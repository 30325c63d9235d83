//! Error-recovering parser for Fluent (FTL) localization resources.
//!
//! ```
//! let resource = ftl_parse::parse("hello = Hello, { $name }!\n");
//! assert_eq!(resource.body.len(), 1);
//! ```

pub use ftl_ast::{Entry, ParseErrorKind, Resource, Span};

mod options;
pub use options::ParserOptions;

mod parser;
pub use parser::FluentParser;

pub mod walk;
pub use walk::{Walk, WalkItem, walk};

/// Parse `source` with default options.
pub fn parse(source: &str) -> Resource {
    FluentParser::new().parse(source)
}

/// Parse the first message or term in `source` with default options.
pub fn parse_entry(source: &str) -> Entry {
    FluentParser::new().parse_entry(source)
}
