//! Two-cursor character stream with CRLF normalization.

/// A saved peek position, see [`CharStream::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// A cursor over the source text.
///
/// `index` is the committed byte position. `peek_offset` is a speculative
/// byte offset relative to `index`: lookahead moves only the peek offset,
/// and is then either committed with [`skip_to_peek`](Self::skip_to_peek)
/// or dropped with [`reset_peek`](Self::reset_peek).
///
/// A `\r\n` pair is always reported as a single `\n` and stepped over as
/// one character. Out-of-range positions read as `None` (end of input).
#[derive(Debug, Clone)]
pub struct CharStream<'src> {
    source: &'src str,
    index: usize,
    peek_offset: usize,
}

impl<'src> CharStream<'src> {
    /// Create a stream positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            index: 0,
            peek_offset: 0,
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Committed byte position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Speculative byte offset relative to [`index`](Self::index).
    #[inline]
    pub fn peek_offset(&self) -> usize {
        self.peek_offset
    }

    /// Whether the committed position is at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Whether the committed position is the first column of a line.
    pub fn at_line_start(&self) -> bool {
        self.index == 0 || self.source.as_bytes().get(self.index - 1) == Some(&b'\n')
    }

    #[inline]
    fn is_crlf(&self, offset: usize) -> bool {
        let bytes = self.source.as_bytes();
        bytes.get(offset) == Some(&b'\r') && bytes.get(offset + 1) == Some(&b'\n')
    }

    /// Byte width of the logical character at `offset`.
    #[inline]
    fn width_at(&self, offset: usize) -> usize {
        if self.is_crlf(offset) {
            return 2;
        }
        self.source
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8)
    }

    /// The logical character at an absolute byte offset.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if self.is_crlf(offset) {
            return Some('\n');
        }
        self.source.get(offset..)?.chars().next()
    }

    /// Character at the committed position.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.char_at(self.index)
    }

    /// Character at the peek position.
    #[inline]
    pub fn current_peek(&self) -> Option<char> {
        self.char_at(self.index + self.peek_offset)
    }

    /// Commit one character forward and drop any peek progress.
    ///
    /// Returns the new current character.
    pub fn next(&mut self) -> Option<char> {
        self.peek_offset = 0;
        self.index += self.width_at(self.index);
        self.current_char()
    }

    /// Move the peek position one character forward.
    ///
    /// Returns the new peeked character.
    pub fn peek(&mut self) -> Option<char> {
        self.peek_offset += self.width_at(self.index + self.peek_offset);
        self.current_peek()
    }

    /// Set the peek offset back to `offset` (relative to the index).
    #[inline]
    pub fn reset_peek(&mut self, offset: usize) {
        self.peek_offset = offset;
    }

    /// Commit the peek position.
    #[inline]
    pub fn skip_to_peek(&mut self) {
        self.index += self.peek_offset;
        self.peek_offset = 0;
    }

    /// Save the current peek offset.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.peek_offset)
    }

    /// Return the peek position to a saved checkpoint.
    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.peek_offset = checkpoint.0;
    }

    /// Move the committed position directly. Used by error recovery only.
    pub(crate) fn rewind_to(&mut self, index: usize) {
        self.index = index.min(self.source.len());
        self.peek_offset = 0;
    }

    /// Source text between two byte offsets, clamped to the input.
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        let end = end.min(self.source.len());
        &self.source[start.min(end)..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_eof() {
        let mut cs = CharStream::new("ab");
        assert_eq!(cs.current_char(), Some('a'));
        assert_eq!(cs.next(), Some('b'));
        assert_eq!(cs.next(), None);
        assert!(cs.is_eof());
        // Advancing at the end never moves past the input.
        assert_eq!(cs.next(), None);
        assert_eq!(cs.index(), 2);
        assert_eq!(cs.char_at(100), None);
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let mut cs = CharStream::new("a\r\nb");
        assert_eq!(cs.next(), Some('\n'));
        assert_eq!(cs.index(), 1);
        assert_eq!(cs.next(), Some('b'));
        assert_eq!(cs.index(), 3);
        assert!(cs.at_line_start());
    }

    #[test]
    fn test_peek_then_reset_or_commit() {
        let mut cs = CharStream::new("abc");
        assert_eq!(cs.peek(), Some('b'));
        assert_eq!(cs.peek(), Some('c'));
        assert_eq!(cs.current_char(), Some('a'));
        assert_eq!(cs.current_peek(), Some('c'));

        cs.reset_peek(0);
        assert_eq!(cs.current_peek(), Some('a'));

        cs.peek();
        cs.skip_to_peek();
        assert_eq!(cs.index(), 1);
        assert_eq!(cs.peek_offset(), 0);
        assert_eq!(cs.current_char(), Some('b'));
    }

    #[test]
    fn test_peek_over_crlf_and_multibyte() {
        let mut cs = CharStream::new("é\r\nx");
        assert_eq!(cs.peek(), Some('\n'));
        assert_eq!(cs.peek_offset(), 2);
        assert_eq!(cs.peek(), Some('x'));
        assert_eq!(cs.peek_offset(), 4);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut cs = CharStream::new("abcd");
        cs.peek();
        let cp = cs.checkpoint();
        cs.peek();
        cs.peek();
        assert_eq!(cs.current_peek(), Some('d'));
        cs.restore(cp);
        assert_eq!(cs.current_peek(), Some('b'));
    }

    #[test]
    fn test_slice_is_clamped() {
        let cs = CharStream::new("hello");
        assert_eq!(cs.slice(1, 3), "el");
        assert_eq!(cs.slice(3, 99), "lo");
        assert_eq!(cs.slice(9, 99), "");
    }
}
