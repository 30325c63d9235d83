//! Node types for parsed FTL resources.
//!
//! Every node carries `span: Option<Span>`: the byte range it was parsed
//! from, or `None` when it was built by hand (or parsed with spans off).

use std::fmt;

use ftl_stream::{ParseErrorKind, Span};

/// A parsed FTL file: an ordered list of entries.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    /// Entries in source order.
    pub body: Vec<Entry>,
    /// Source span (the whole input).
    pub span: Option<Span>,
}

/// A top-level entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Entry {
    Message(Message),
    Term(Term),
    /// `#` comment not attached to a message or term.
    Comment(Comment),
    /// `##` comment.
    GroupComment(Comment),
    /// `###` comment.
    ResourceComment(Comment),
    /// Source text that failed to parse.
    Junk(Junk),
}

impl Entry {
    /// Source span of the entry.
    pub fn span(&self) -> Option<Span> {
        match self {
            Entry::Message(message) => message.span,
            Entry::Term(term) => term.span,
            Entry::Comment(comment)
            | Entry::GroupComment(comment)
            | Entry::ResourceComment(comment) => comment.span,
            Entry::Junk(junk) => junk.span,
        }
    }

    /// The entry's identifier, for messages and terms.
    pub fn id(&self) -> Option<&Identifier> {
        match self {
            Entry::Message(message) => Some(&message.id),
            Entry::Term(term) => Some(&term.id),
            _ => None,
        }
    }
}

/// `id = value` with optional attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub id: Identifier,
    /// `None` only when the message has attributes.
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    /// A `#` comment directly above the message.
    pub comment: Option<Comment>,
    pub span: Option<Span>,
}

/// `-id = value` with optional attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Includes the leading `-`.
    pub id: Identifier,
    pub value: Value,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    pub span: Option<Span>,
}

/// The value of a term or variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Value {
    Pattern(Pattern),
    /// `{ *[a] A [b] B }`, only valid on terms.
    VariantList(VariantList),
}

impl Value {
    /// The pattern, if this value is one.
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(pattern) => Some(pattern),
            Value::VariantList(_) => None,
        }
    }
}

/// A brace-delimited list of variants used as a term value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantList {
    pub variants: Vec<Variant>,
    pub span: Option<Span>,
}

/// `.id = pattern`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
    pub span: Option<Span>,
}

/// Text and placeables.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
    pub span: Option<Span>,
}

impl Pattern {
    /// A pattern with a single text element.
    pub fn text(value: impl Into<String>) -> Self {
        Pattern {
            elements: vec![PatternElement::TextElement(TextElement::new(value))],
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum PatternElement {
    TextElement(TextElement),
    Placeable(Placeable),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextElement {
    pub value: String,
    pub span: Option<Span>,
}

impl TextElement {
    pub fn new(value: impl Into<String>) -> Self {
        TextElement {
            value: value.into(),
            span: None,
        }
    }
}

/// `{ expression }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeable {
    pub expression: Box<Expression>,
    pub span: Option<Span>,
}

impl Placeable {
    pub fn new(expression: Expression) -> Self {
        Placeable {
            expression: Box::new(expression),
            span: None,
        }
    }

    /// Whether the placeable holds a select expression.
    pub fn is_select(&self) -> bool {
        matches!(*self.expression, Expression::SelectExpression(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Expression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    MessageReference(MessageReference),
    TermReference(TermReference),
    VariableReference(VariableReference),
    AttributeExpression(AttributeExpression),
    VariantExpression(VariantExpression),
    CallExpression(CallExpression),
    SelectExpression(SelectExpression),
    Placeable(Placeable),
}

impl Expression {
    pub fn span(&self) -> Option<Span> {
        match self {
            Expression::StringLiteral(e) => e.span,
            Expression::NumberLiteral(e) => e.span,
            Expression::MessageReference(e) => e.span,
            Expression::TermReference(e) => e.span,
            Expression::VariableReference(e) => e.span,
            Expression::AttributeExpression(e) => e.span,
            Expression::VariantExpression(e) => e.span,
            Expression::CallExpression(e) => e.span,
            Expression::SelectExpression(e) => e.span,
            Expression::Placeable(e) => e.span,
        }
    }
}

/// A quoted string. `raw` keeps escapes as written, `value` is decoded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringLiteral {
    pub raw: String,
    pub value: String,
    pub span: Option<Span>,
}

impl StringLiteral {
    /// Build a literal from decoded text, escaping `\` and `"`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let mut raw = String::with_capacity(value.len());
        for ch in value.chars() {
            if matches!(ch, '\\' | '"') {
                raw.push('\\');
            }
            raw.push(ch);
        }
        StringLiteral {
            raw,
            value,
            span: None,
        }
    }
}

/// A number as written in the source, e.g. `-3.14`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberLiteral {
    pub value: String,
    pub span: Option<Span>,
}

impl NumberLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        NumberLiteral {
            value: value.into(),
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageReference {
    pub id: Identifier,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermReference {
    /// Includes the leading `-`.
    pub id: Identifier,
    pub span: Option<Span>,
}

/// `$name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableReference {
    /// Without the `$`.
    pub id: Identifier,
    pub span: Option<Span>,
}

/// `msg.attr` or `-term.attr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeExpression {
    pub reference: Box<Expression>,
    pub name: Identifier,
    pub span: Option<Span>,
}

/// `-term[key]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantExpression {
    pub reference: TermReference,
    pub key: VariantKey,
    pub span: Option<Span>,
}

/// `FUNC(positional, name: literal)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression {
    pub callee: Function,
    pub positional: Vec<Expression>,
    /// In source order. Duplicate names are kept.
    pub named: Vec<NamedArgument>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Literal,
    pub span: Option<Span>,
}

/// The value of a named argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Literal {
    String(StringLiteral),
    Number(NumberLiteral),
}

/// `selector -> variants`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectExpression {
    pub selector: Box<Expression>,
    pub variants: Vec<Variant>,
    pub span: Option<Span>,
}

/// `[key] value`, or `*[key] value` for the default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub key: VariantKey,
    pub value: Value,
    pub default: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Identifier(id) => f.write_str(&id.name),
            VariantKey::NumberLiteral(number) => f.write_str(&number.value),
        }
    }
}

/// Comment text with the `#` prefixes removed, lines joined with `\n`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub content: String,
    pub span: Option<Span>,
}

impl Comment {
    pub fn new(content: impl Into<String>) -> Self {
        Comment {
            content: content.into(),
            span: None,
        }
    }
}

/// Unparseable source text and the error that stopped it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junk {
    pub content: String,
    pub annotations: Vec<Annotation>,
    pub span: Option<Span>,
}

/// A parse error attached to a [`Junk`] entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub kind: ParseErrorKind,
    /// Zero-width, at the offset where parsing failed.
    pub span: Option<Span>,
}

impl Annotation {
    pub fn new(kind: ParseErrorKind, span: Option<Span>) -> Self {
        Annotation { kind, span }
    }

    /// Stable error code, e.g. `E0003`.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn args(&self) -> Vec<String> {
        self.kind.args()
    }

    /// English description of the error.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at offset {}", span.start)?;
        }
        Ok(())
    }
}

impl std::error::Error for Annotation {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub name: String,
    pub span: Option<Span>,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            name: name.into(),
            span: None,
        }
    }
}

/// Callee of a [`CallExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    pub span: Option<Span>,
}
