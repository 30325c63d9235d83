//! Entry-level parser for FTL resources.

use ftl_ast::{
    Annotation, Attribute, Comment, Entry, Junk, Message, ParseErrorKind, Resource, Span, Term,
};
use ftl_stream::{CommentLevel, EOL, FluentStream};
use tracing::{debug, trace};

use crate::ParserOptions;

mod pattern;

/// Parser for FTL source text.
///
/// Parsing never fails: every entry that cannot be parsed becomes a
/// [`Junk`] entry carrying an [`Annotation`] with the error, and parsing
/// resumes at the next line that looks like the start of an entry.
#[derive(Debug, Clone, Default)]
pub struct FluentParser {
    options: ParserOptions,
}

impl FluentParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse a whole resource.
    pub fn parse(&self, source: &str) -> Resource {
        EntryParser::new(source, self.options.with_spans).parse()
    }

    /// Parse the first message or term in `source`.
    ///
    /// Leading comments are skipped. A comment that fails to parse is
    /// returned as junk.
    pub fn parse_entry(&self, source: &str) -> Entry {
        EntryParser::new(source, self.options.with_spans).parse_entry()
    }
}

/// State for a single parse.
struct EntryParser<'src> {
    ps: FluentStream<'src>,
    with_spans: bool,
    /// Set when the last comment used the `//` syntax.
    last_comment_zero_four_syntax: bool,
}

impl<'src> EntryParser<'src> {
    fn new(source: &'src str, with_spans: bool) -> Self {
        Self {
            ps: FluentStream::new(source),
            with_spans,
            last_comment_zero_four_syntax: false,
        }
    }

    /// Span from `start` to the current position, if spans are enabled.
    fn span(&self, start: usize) -> Option<Span> {
        self.span_between(start, self.ps.index())
    }

    fn span_between(&self, start: usize, end: usize) -> Option<Span> {
        self.with_spans.then(|| Span::from(start..end))
    }

    fn parse(mut self) -> Resource {
        self.ps.skip_blank_block();

        let mut body = Vec::new();
        let mut last_comment: Option<Comment> = None;

        while !self.ps.is_eof() {
            let entry = self.get_entry_or_junk();
            let blank_lines = self.ps.skip_blank_block();

            // A comment directly above the next entry is held back until we
            // know whether that entry is a message or term it can attach to.
            let mut entry = match entry {
                Entry::Comment(comment) if blank_lines == 0 && !self.ps.is_eof() => {
                    last_comment = Some(comment);
                    continue;
                }
                entry => entry,
            };

            if let Some(comment) = last_comment.take() {
                match &mut entry {
                    Entry::Message(Message { comment: slot, span, .. })
                    | Entry::Term(Term { comment: slot, span, .. }) => {
                        if let (Some(span), Some(comment_span)) = (span.as_mut(), comment.span) {
                            *span = comment_span.extend(*span);
                        }
                        *slot = Some(comment);
                    }
                    _ => body.push(Entry::Comment(comment)),
                }
            }

            let entry = match entry {
                Entry::Comment(comment)
                    if self.last_comment_zero_four_syntax && body.is_empty() =>
                {
                    Entry::ResourceComment(comment)
                }
                entry => entry,
            };
            body.push(entry);
            self.last_comment_zero_four_syntax = false;
        }

        Resource {
            body,
            span: self.span_between(0, self.ps.index()),
        }
    }

    fn parse_entry(mut self) -> Entry {
        self.ps.skip_blank_block();

        while self.ps.current_char() == Some('#') {
            let skipped = self.get_entry_or_junk();
            if let Entry::Junk(_) = skipped {
                return skipped;
            }
            self.ps.skip_blank_block();
        }

        self.get_entry_or_junk()
    }

    fn get_entry_or_junk(&mut self) -> Entry {
        let entry_start = self.ps.index();

        let kind = match self
            .get_entry()
            .and_then(|entry| self.ps.expect_line_end().map(|()| entry))
        {
            Ok(entry) => return entry,
            Err(kind) => kind,
        };

        let error_index = self.ps.index();
        self.ps.skip_to_next_entry_start(entry_start);
        let next_entry_start = self.ps.index();
        // The annotation must point inside the junk.
        let error_index = error_index.min(next_entry_start);

        debug!(
            code = kind.code(),
            offset = error_index,
            junk_start = entry_start,
            junk_end = next_entry_start,
            "entry became junk"
        );

        Entry::Junk(Junk {
            content: self.ps.slice(entry_start, next_entry_start).to_string(),
            annotations: vec![Annotation::new(
                kind,
                Some(Span::point(error_index as u32)),
            )],
            span: self.span_between(entry_start, next_entry_start),
        })
    }

    fn get_entry(&mut self) -> Result<Entry, ParseErrorKind> {
        trace!(offset = self.ps.index(), ch = ?self.ps.current_char(), "entry");

        match self.ps.current_char() {
            Some('#') => self.get_comment(),
            Some('/') => self.get_zero_four_style_comment(),
            Some('[') => self.get_group_comment_from_section(),
            Some('-') => self.get_term(),
            _ if self.ps.is_identifier_start() => self.get_message(),
            _ => Err(ParseErrorKind::ExpectedEntry),
        }
    }

    /// Consume the rest of the line and return it.
    fn take_line(&mut self) -> &'src str {
        let start = self.ps.index();
        while !matches!(self.ps.current_char(), None | Some(EOL)) {
            self.ps.next();
        }
        self.ps.slice(start, self.ps.index())
    }

    fn get_comment(&mut self) -> Result<Entry, ParseErrorKind> {
        let start = self.ps.index();
        let mut level: Option<CommentLevel> = None;
        let mut content = String::new();

        loop {
            let max_hashes = level.map_or(3, CommentLevel::hashes);
            let mut hashes = 0;
            while hashes < max_hashes && self.ps.current_char() == Some('#') {
                self.ps.next();
                hashes += 1;
            }

            // The first line decides the level.
            let line_level = match level {
                Some(level) => level,
                None => {
                    let first = CommentLevel::from_hashes(hashes)
                        .ok_or(ParseErrorKind::ExpectedToken('#'))?;
                    level = Some(first);
                    first
                }
            };

            // A bare `#` must end its line; end of input is not enough.
            if self.ps.current_char() != Some(EOL) {
                self.ps.expect_char(' ')?;
                content.push_str(self.take_line());
            }

            if self.ps.is_next_line_comment(line_level) {
                content.push(EOL);
                self.ps.next();
            } else {
                break;
            }
        }

        let comment = Comment {
            content,
            span: self.span(start),
        };
        Ok(match level {
            Some(CommentLevel::GroupComment) => Entry::GroupComment(comment),
            Some(CommentLevel::ResourceComment) => Entry::ResourceComment(comment),
            _ => Entry::Comment(comment),
        })
    }

    /// `// comment` lines from syntax 0.4.
    fn get_zero_four_style_comment(&mut self) -> Result<Entry, ParseErrorKind> {
        let start = self.ps.index();
        let mut content = String::new();

        loop {
            self.ps.expect_char('/')?;
            self.ps.expect_char('/')?;
            self.ps.take_char(|c| c == ' ');
            content.push_str(self.take_line());

            if !self.ps.is_next_line_zero_four_comment() {
                break;
            }
            content.push(EOL);
            self.ps.next();
        }

        // A comment directly above a section header becomes a group comment.
        let is_section = self.ps.peek() == Some('[') && self.ps.peek() == Some('[');
        self.ps.reset_peek(0);
        if is_section {
            self.ps.next();
            let name = self.get_section_name()?;
            if !name.is_empty() {
                content.push(EOL);
                content.push_str(&name);
            }
            return Ok(Entry::GroupComment(Comment {
                content,
                span: self.span(start),
            }));
        }

        self.last_comment_zero_four_syntax = true;
        Ok(Entry::Comment(Comment {
            content,
            span: self.span(start),
        }))
    }

    /// `[[ Section ]]` from syntax 0.4, read as a group comment.
    fn get_group_comment_from_section(&mut self) -> Result<Entry, ParseErrorKind> {
        let start = self.ps.index();
        let content = self.get_section_name()?;
        Ok(Entry::GroupComment(Comment {
            content,
            span: self.span(start),
        }))
    }

    fn get_section_name(&mut self) -> Result<String, ParseErrorKind> {
        self.ps.expect_char('[')?;
        self.ps.expect_char('[')?;
        self.ps.skip_blank_inline();

        let name_start = self.ps.index();
        while !matches!(self.ps.current_char(), None | Some(']' | EOL)) {
            self.ps.next();
        }
        let name = self.ps.slice(name_start, self.ps.index()).trim_end().to_string();

        self.ps.expect_char(']')?;
        self.ps.expect_char(']')?;
        Ok(name)
    }

    fn get_message(&mut self) -> Result<Entry, ParseErrorKind> {
        let start = self.ps.index();
        let id = self.get_identifier()?;
        self.ps.skip_blank_inline();

        // Syntax 0.4 allowed leaving out `=` before attributes.
        let mut value = None;
        if self.ps.current_char() == Some('=') {
            self.ps.next();
            if self.ps.is_value_start() {
                value = Some(self.get_pattern()?);
            }
        }

        let attributes = self.get_attributes()?;

        if value.is_none() && attributes.is_empty() {
            return Err(ParseErrorKind::ExpectedMessageField(id.name));
        }

        Ok(Entry::Message(Message {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start),
        }))
    }

    fn get_term(&mut self) -> Result<Entry, ParseErrorKind> {
        let start = self.ps.index();
        let id = self.get_term_identifier()?;
        self.ps.skip_blank_inline();
        self.ps.expect_char('=')?;

        if !self.ps.is_value_start() {
            return Err(ParseErrorKind::ExpectedTermField(id.name));
        }
        let value = self.get_value()?;
        let attributes = self.get_attributes()?;

        Ok(Entry::Term(Term {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start),
        }))
    }

    fn get_attributes(&mut self) -> Result<Vec<Attribute>, ParseErrorKind> {
        let mut attributes = Vec::new();
        while self.ps.is_next_line_attribute_start() {
            attributes.push(self.get_attribute()?);
        }
        Ok(attributes)
    }

    fn get_attribute(&mut self) -> Result<Attribute, ParseErrorKind> {
        let start = self.ps.index();
        self.ps.expect_char('.')?;
        let id = self.get_identifier()?;
        self.ps.skip_blank_inline();
        self.ps.expect_char('=')?;

        if !self.ps.is_value_start() {
            return Err(ParseErrorKind::MissingValue);
        }
        let value = self.get_pattern()?;

        Ok(Attribute {
            id,
            value,
            span: self.span(start),
        })
    }
}
