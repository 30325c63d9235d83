//! Fluent lexical predicates layered on [`CharStream`].

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::{CharStream, ParseErrorKind};

/// The logical line end. `\r\n` is reported as this too.
pub const EOL: char = '\n';

/// Characters that end a pattern when they start a continuation line.
const SPECIAL_LINE_START_CHARS: [char; 4] = ['}', '.', '[', '*'];

/// Which comment prefix [`FluentStream::is_next_line_comment`] looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentLevel {
    /// One to three `#`.
    Any,
    /// `#`
    Comment,
    /// `##`
    GroupComment,
    /// `###`
    ResourceComment,
}

impl CommentLevel {
    /// Level for a line starting with `hashes` `#` characters.
    pub fn from_hashes(hashes: usize) -> Option<Self> {
        match hashes {
            1 => Some(CommentLevel::Comment),
            2 => Some(CommentLevel::GroupComment),
            3 => Some(CommentLevel::ResourceComment),
            _ => None,
        }
    }

    /// Maximum number of `#` this level consumes.
    pub fn hashes(self) -> usize {
        match self {
            CommentLevel::Comment => 1,
            CommentLevel::GroupComment => 2,
            CommentLevel::Any | CommentLevel::ResourceComment => 3,
        }
    }
}

/// A [`CharStream`] with Fluent-specific lookahead.
///
/// Every predicate that answers `false` leaves the committed position where
/// it was. Predicates documented as committing move the index only when
/// they answer `true`.
#[derive(Debug, Clone)]
pub struct FluentStream<'src> {
    chars: CharStream<'src>,
}

impl<'src> Deref for FluentStream<'src> {
    type Target = CharStream<'src>;

    fn deref(&self) -> &Self::Target {
        &self.chars
    }
}

impl DerefMut for FluentStream<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.chars
    }
}

impl<'src> FluentStream<'src> {
    /// Create a stream over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: CharStream::new(source),
        }
    }

    /// Skip spaces (not tabs, not line ends). Returns how many were skipped.
    pub fn skip_blank_inline(&mut self) -> usize {
        let start = self.index();
        while self.current_char() == Some(' ') {
            self.next();
        }
        self.index() - start
    }

    /// Peek over spaces. Returns how many were peeked.
    pub fn peek_blank_inline(&mut self) -> usize {
        let start = self.peek_offset();
        while self.current_peek() == Some(' ') {
            self.peek();
        }
        self.peek_offset() - start
    }

    /// Skip whole blank lines. Returns the number of lines skipped.
    ///
    /// Stops at the start of the first line that has content.
    pub fn skip_blank_block(&mut self) -> usize {
        let mut line_count = 0;
        loop {
            self.peek_blank_inline();
            if self.current_peek() == Some(EOL) {
                self.skip_to_peek();
                self.next();
                line_count += 1;
            } else {
                self.reset_peek(0);
                return line_count;
            }
        }
    }

    /// Peek over whole blank lines. Returns the number of lines peeked.
    ///
    /// Leaves the peek position at the start of the first line with content.
    pub fn peek_blank_block(&mut self) -> usize {
        let mut line_count = 0;
        loop {
            let line_start = self.peek_offset();
            self.peek_blank_inline();
            if self.current_peek() == Some(EOL) {
                self.peek();
                line_count += 1;
            } else {
                self.reset_peek(line_start);
                return line_count;
            }
        }
    }

    /// Skip any mix of spaces and line ends.
    pub fn skip_blank(&mut self) {
        while matches!(self.current_char(), Some(' ' | EOL)) {
            self.next();
        }
    }

    /// Peek over any mix of spaces and line ends.
    pub fn peek_blank(&mut self) {
        while matches!(self.current_peek(), Some(' ' | EOL)) {
            self.peek();
        }
    }

    /// Consume `ch` or fail with `E0003`.
    pub fn expect_char(&mut self, ch: char) -> Result<(), ParseErrorKind> {
        if self.current_char() == Some(ch) {
            self.next();
            return Ok(());
        }
        Err(ParseErrorKind::ExpectedToken(ch))
    }

    /// Consume a line end. The end of input counts as one.
    pub fn expect_line_end(&mut self) -> Result<(), ParseErrorKind> {
        match self.current_char() {
            None => Ok(()),
            Some(EOL) => {
                self.next();
                Ok(())
            }
            // SYMBOL FOR NEWLINE
            Some(_) => Err(ParseErrorKind::ExpectedToken('\u{2424}')),
        }
    }

    /// Consume and return the current char if it satisfies `f`.
    pub fn take_char(&mut self, f: impl FnOnce(char) -> bool) -> Option<char> {
        let ch = self.current_char()?;
        if f(ch) {
            self.next();
            return Some(ch);
        }
        None
    }

    /// Identifiers start with an ASCII letter.
    pub fn is_char_id_start(ch: Option<char>) -> bool {
        matches!(ch, Some(c) if c.is_ascii_alphabetic())
    }

    /// Whether the peeked char starts an identifier.
    pub fn is_identifier_start(&self) -> bool {
        Self::is_char_id_start(self.current_peek())
    }

    /// A digit, or `-` followed by a digit. Never commits.
    pub fn is_number_start(&mut self) -> bool {
        let ch = if self.current_char() == Some('-') {
            self.peek()
        } else {
            self.current_char()
        };
        self.reset_peek(0);
        matches!(ch, Some(c) if c.is_ascii_digit())
    }

    /// Whether `ch` may begin a continuation line of a pattern.
    pub fn is_char_pattern_continuation(ch: Option<char>) -> bool {
        matches!(ch, Some(c) if !SPECIAL_LINE_START_CHARS.contains(&c))
    }

    /// Whether a value follows, inline or on a following line.
    ///
    /// For an inline value the spaces before it are committed. For a value
    /// on a following line the blank lines are committed and the cursor is
    /// left at the start of the value's first line, so that its indentation
    /// can be measured.
    pub fn is_value_start(&mut self) -> bool {
        self.peek_blank_inline();
        let ch = self.current_peek();
        if ch.is_some() && ch != Some(EOL) {
            self.skip_to_peek();
            return true;
        }
        self.is_next_line_value(true)
    }

    /// Whether the line end at the peek position is followed by a line
    /// continuing the current value.
    ///
    /// Blank lines are skipped first. A line starting with `{` always
    /// continues; any other line must be indented and must not start with
    /// one of `}`, `.`, `[`, `*`. With `skip` the cursor commits to the
    /// start of that line, otherwise the peek is reset.
    pub fn is_next_line_value(&mut self, skip: bool) -> bool {
        if self.current_peek() != Some(EOL) {
            self.reset_peek(0);
            return false;
        }

        self.peek_blank_block();
        let line_start = self.peek_offset();
        let indent = self.peek_blank_inline();

        if self.current_peek() != Some('{')
            && (indent == 0 || !Self::is_char_pattern_continuation(self.current_peek()))
        {
            self.reset_peek(0);
            return false;
        }

        if skip {
            self.reset_peek(line_start);
            self.skip_to_peek();
        } else {
            self.reset_peek(0);
        }
        true
    }

    /// Whether the next line starts with a `//` comment. Never commits.
    pub fn is_next_line_zero_four_comment(&mut self) -> bool {
        if self.current_peek() != Some(EOL) {
            return false;
        }
        let first = self.peek();
        let second = self.peek();
        self.reset_peek(0);
        first == Some('/') && second == Some('/')
    }

    /// Whether the next line is a comment of the given level. Never commits.
    pub fn is_next_line_comment(&mut self, level: CommentLevel) -> bool {
        if self.current_peek() != Some(EOL) {
            return false;
        }

        let mut hashes = 0;
        while hashes < level.hashes() {
            let checkpoint = self.checkpoint();
            if self.peek() != Some('#') {
                self.restore(checkpoint);
                break;
            }
            hashes += 1;
        }

        let matched = match level {
            CommentLevel::Any => hashes > 0,
            _ => hashes == level.hashes(),
        };

        // The first char after #, ## or ###.
        let next = self.peek();
        self.reset_peek(0);
        matched && matches!(next, Some(' ' | EOL))
    }

    /// Whether the next non-blank line starts a variant. Never commits.
    ///
    /// `[[` is the legacy section marker and does not start a variant.
    pub fn is_next_line_variant_start(&mut self) -> bool {
        if self.current_peek() != Some(EOL) {
            return false;
        }

        self.peek_blank();

        if self.current_peek() == Some('*') {
            self.peek();
        }

        let result = self.current_peek() == Some('[') && self.peek() != Some('[');
        self.reset_peek(0);
        result
    }

    /// Whether the next non-blank content is `.`. Commits when it is.
    pub fn is_next_line_attribute_start(&mut self) -> bool {
        self.peek_blank();

        if self.current_peek() == Some('.') {
            self.skip_to_peek();
            return true;
        }

        self.reset_peek(0);
        false
    }

    /// Move to the start of the next line that looks like an entry.
    ///
    /// If a line end lies between `junk_start` and the cursor, scanning
    /// restarts from it, so that a line which merely continued the broken
    /// entry can still be recognized as the next entry.
    pub fn skip_to_next_entry_start(&mut self, junk_start: usize) {
        let index = self.index();
        if let Some(last_newline) = self.source()[..index].rfind(EOL) {
            if junk_start < last_newline {
                self.chars.rewind_to(last_newline);
            }
        }

        while let Some(ch) = self.current_char() {
            // Only the beginnings of lines are interesting.
            if ch != EOL {
                self.next();
                continue;
            }

            let first = self.next();
            if Self::is_char_id_start(first) || matches!(first, Some('-' | '#')) {
                break;
            }

            // Syntax 0.4 compatibility
            let peek = self.peek();
            self.reset_peek(0);
            if matches!((first, peek), (Some('/'), Some('/')) | (Some('['), Some('['))) {
                break;
            }
        }

        trace!(junk_start, resume = self.index(), "skipped to next entry start");
    }

    /// Consume an identifier start char or fail with `E0004`.
    pub fn take_id_start(&mut self) -> Result<char, ParseErrorKind> {
        match self.current_char() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.next();
                Ok(ch)
            }
            _ => Err(ParseErrorKind::ExpectedCharRange("a-zA-Z".to_string())),
        }
    }

    /// Consume an identifier continuation char.
    pub fn take_id_char(&mut self) -> Option<char> {
        self.take_char(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    /// Consume an ASCII digit.
    pub fn take_digit(&mut self) -> Option<char> {
        self.take_char(|c| c.is_ascii_digit())
    }

    /// Consume an ASCII hex digit.
    pub fn take_hex_digit(&mut self) -> Option<char> {
        self.take_char(|c| c.is_ascii_hexdigit())
    }
}
