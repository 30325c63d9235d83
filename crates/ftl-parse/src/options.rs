//! Parser configuration.

/// Options for [`FluentParser`](crate::FluentParser).
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Record byte spans on every node (default: true).
    pub with_spans: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { with_spans: true }
    }
}

impl ParserOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether nodes record their source spans.
    pub fn with_spans(mut self, with_spans: bool) -> Self {
        self.with_spans = with_spans;
        self
    }
}
