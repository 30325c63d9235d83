//! Walk a parsed resource together with the whitespace between entries.
//!
//! Every byte of the source is covered by exactly one [`WalkItem`] when the
//! resource was parsed with spans enabled. Junk is split into its leading
//! whitespace, the junk text itself, and its trailing whitespace.

use std::collections::VecDeque;

use ftl_ast::{Comment, Entry, Junk, Message, Resource, Span, Term};

/// One piece of the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkItem<'a> {
    /// Blank text between entries.
    Whitespace { span: Span },
    Message { message: &'a Message, span: Span },
    Term { term: &'a Term, span: Span },
    /// A comment of any level, with the entry it came from.
    Comment {
        entry: &'a Entry,
        comment: &'a Comment,
        span: Span,
    },
    /// Junk with surrounding whitespace removed from its span.
    Junk { junk: &'a Junk, span: Span },
}

impl<'a> WalkItem<'a> {
    pub fn span(&self) -> Span {
        match *self {
            WalkItem::Whitespace { span }
            | WalkItem::Message { span, .. }
            | WalkItem::Term { span, .. }
            | WalkItem::Comment { span, .. }
            | WalkItem::Junk { span, .. } => span,
        }
    }

    /// The source text this item covers.
    pub fn all<'s>(&self, source: &'s str) -> &'s str {
        self.span().slice(source)
    }

    /// The value text: the pattern source of a message or term, the content
    /// of a comment, or the text itself for whitespace and junk.
    ///
    /// `None` for a message that only has attributes.
    pub fn val<'s>(&'s self, source: &'s str) -> Option<&'s str> {
        match *self {
            WalkItem::Message { message, .. } => {
                let value = message.value.as_ref()?;
                Some(value.span?.slice(source))
            }
            WalkItem::Term { term, .. } => {
                let span = match &term.value {
                    ftl_ast::Value::Pattern(pattern) => pattern.span,
                    ftl_ast::Value::VariantList(list) => list.span,
                };
                Some(span?.slice(source))
            }
            WalkItem::Comment { comment, .. } => Some(&comment.content),
            WalkItem::Whitespace { span } | WalkItem::Junk { span, .. } => Some(span.slice(source)),
        }
    }

    /// Messages, terms and junk.
    pub fn is_localizable(&self) -> bool {
        matches!(
            self,
            WalkItem::Message { .. } | WalkItem::Term { .. } | WalkItem::Junk { .. }
        )
    }
}

/// Iterator returned by [`walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    source: &'a str,
    entries: std::slice::Iter<'a, Entry>,
    pending: VecDeque<WalkItem<'a>>,
    last_end: u32,
    finished: bool,
}

/// Walk `resource`, which must have been parsed from `source` with spans.
///
/// Entries without a span are treated as empty at the end of the previous
/// entry.
pub fn walk<'a>(source: &'a str, resource: &'a Resource) -> Walk<'a> {
    Walk {
        source,
        entries: resource.body.iter(),
        pending: VecDeque::new(),
        last_end: 0,
        finished: false,
    }
}

impl<'a> Walk<'a> {
    /// Only the items that carry translatable content.
    pub fn localizable_only(self) -> impl Iterator<Item = WalkItem<'a>> {
        self.filter(WalkItem::is_localizable)
    }

    fn whitespace(&mut self, start: u32, end: u32) {
        if start < end {
            self.pending.push_back(WalkItem::Whitespace {
                span: Span::new(start, end),
            });
        }
    }

    fn queue_entry(&mut self, entry: &'a Entry) {
        let span = entry
            .span()
            .unwrap_or_else(|| Span::point(self.last_end));
        self.whitespace(self.last_end, span.start);

        match entry {
            Entry::Message(message) => self.pending.push_back(WalkItem::Message { message, span }),
            Entry::Term(term) => self.pending.push_back(WalkItem::Term { term, span }),
            Entry::Comment(comment)
            | Entry::GroupComment(comment)
            | Entry::ResourceComment(comment) => self.pending.push_back(WalkItem::Comment {
                entry,
                comment,
                span,
            }),
            Entry::Junk(junk) => {
                let text = span.slice(self.source);
                let leading = text.len() - text.trim_start_matches(is_blank).len();
                let trailing = text.len() - text.trim_end_matches(is_blank).len();
                let start = span.start + leading as u32;
                let end = span.end.saturating_sub(trailing as u32).max(start);

                self.whitespace(span.start, start);
                self.pending.push_back(WalkItem::Junk {
                    junk,
                    span: Span::new(start, end),
                });
                self.whitespace(end, span.end);
            }
        }

        self.last_end = span.end;
    }
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.finished {
                return None;
            }
            match self.entries.next() {
                Some(entry) => self.queue_entry(entry),
                None => {
                    self.finished = true;
                    self.whitespace(self.last_end, self.source.len() as u32);
                }
            }
        }
    }
}
