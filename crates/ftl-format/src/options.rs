//! Serialization options.

/// Options for FTL serialization.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Write junk entries back out verbatim (default: false)
    pub with_junk: bool,
}

impl SerializeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep junk entries in the output.
    pub fn with_junk(mut self, with_junk: bool) -> Self {
        self.with_junk = with_junk;
        self
    }
}
