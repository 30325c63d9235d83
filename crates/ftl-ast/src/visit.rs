//! Tree traversal, span stripping, word counts and loose equality.

use crate::ast::*;

/// Read-only traversal of a resource.
///
/// Every method defaults to recursing into the node's children through the
/// matching `walk_*` function; override the ones you care about.
pub trait Visitor {
    fn visit_resource(&mut self, resource: &Resource) {
        walk_resource(self, resource);
    }

    fn visit_entry(&mut self, entry: &Entry) {
        walk_entry(self, entry);
    }

    fn visit_message(&mut self, message: &Message) {
        walk_message(self, message);
    }

    fn visit_term(&mut self, term: &Term) {
        walk_term(self, term);
    }

    fn visit_attribute(&mut self, attribute: &Attribute) {
        self.visit_pattern(&attribute.value);
    }

    fn visit_value(&mut self, value: &Value) {
        walk_value(self, value);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_text_element(&mut self, _text: &TextElement) {}

    fn visit_placeable(&mut self, placeable: &Placeable) {
        self.visit_expression(&placeable.expression);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_variant(&mut self, variant: &Variant) {
        self.visit_value(&variant.value);
    }

    fn visit_comment(&mut self, _comment: &Comment) {}

    fn visit_junk(&mut self, _junk: &Junk) {}
}

pub fn walk_resource<V: Visitor + ?Sized>(visitor: &mut V, resource: &Resource) {
    for entry in &resource.body {
        visitor.visit_entry(entry);
    }
}

pub fn walk_entry<V: Visitor + ?Sized>(visitor: &mut V, entry: &Entry) {
    match entry {
        Entry::Message(message) => visitor.visit_message(message),
        Entry::Term(term) => visitor.visit_term(term),
        Entry::Comment(comment)
        | Entry::GroupComment(comment)
        | Entry::ResourceComment(comment) => visitor.visit_comment(comment),
        Entry::Junk(junk) => visitor.visit_junk(junk),
    }
}

pub fn walk_message<V: Visitor + ?Sized>(visitor: &mut V, message: &Message) {
    if let Some(comment) = &message.comment {
        visitor.visit_comment(comment);
    }
    if let Some(value) = &message.value {
        visitor.visit_pattern(value);
    }
    for attribute in &message.attributes {
        visitor.visit_attribute(attribute);
    }
}

pub fn walk_term<V: Visitor + ?Sized>(visitor: &mut V, term: &Term) {
    if let Some(comment) = &term.comment {
        visitor.visit_comment(comment);
    }
    visitor.visit_value(&term.value);
    for attribute in &term.attributes {
        visitor.visit_attribute(attribute);
    }
}

pub fn walk_value<V: Visitor + ?Sized>(visitor: &mut V, value: &Value) {
    match value {
        Value::Pattern(pattern) => visitor.visit_pattern(pattern),
        Value::VariantList(list) => {
            for variant in &list.variants {
                visitor.visit_variant(variant);
            }
        }
    }
}

pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    for element in &pattern.elements {
        match element {
            PatternElement::TextElement(text) => visitor.visit_text_element(text),
            PatternElement::Placeable(placeable) => visitor.visit_placeable(placeable),
        }
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    match expression {
        Expression::AttributeExpression(attr) => visitor.visit_expression(&attr.reference),
        Expression::CallExpression(call) => {
            for arg in &call.positional {
                visitor.visit_expression(arg);
            }
        }
        Expression::SelectExpression(select) => {
            visitor.visit_expression(&select.selector);
            for variant in &select.variants {
                visitor.visit_variant(variant);
            }
        }
        Expression::Placeable(placeable) => visitor.visit_placeable(placeable),
        Expression::StringLiteral(_)
        | Expression::NumberLiteral(_)
        | Expression::MessageReference(_)
        | Expression::TermReference(_)
        | Expression::VariableReference(_)
        | Expression::VariantExpression(_) => {}
    }
}

#[derive(Default)]
struct WordCounter {
    words: usize,
}

impl Visitor for WordCounter {
    fn visit_text_element(&mut self, text: &TextElement) {
        self.words += text.value.split_whitespace().count();
    }
}

impl Message {
    /// Number of whitespace-separated words in the value and attributes.
    ///
    /// Every variant of a select expression is counted.
    pub fn count_words(&self) -> usize {
        let mut counter = WordCounter::default();
        counter.visit_message(self);
        counter.words
    }
}

impl Term {
    /// Number of words in the value. Attributes are not translated text.
    pub fn count_words(&self) -> usize {
        let mut counter = WordCounter::default();
        counter.visit_value(&self.value);
        counter.words
    }
}

impl Entry {
    /// Structural equality ignoring spans and attached comments.
    ///
    /// Term attributes are ignored as well.
    pub fn equals(&self, other: &Entry) -> bool {
        normalized(self) == normalized(other)
    }
}

fn normalized(entry: &Entry) -> Entry {
    let mut entry = entry.clone();
    entry.strip_spans();
    match &mut entry {
        Entry::Message(message) => message.comment = None,
        Entry::Term(term) => {
            term.comment = None;
            term.attributes.clear();
        }
        _ => {}
    }
    entry
}

/// Clear every span in a subtree.
pub trait StripSpans {
    fn strip_spans(&mut self);
}

impl<T: StripSpans> StripSpans for Option<T> {
    fn strip_spans(&mut self) {
        if let Some(inner) = self {
            inner.strip_spans();
        }
    }
}

impl<T: StripSpans> StripSpans for Vec<T> {
    fn strip_spans(&mut self) {
        for item in self {
            item.strip_spans();
        }
    }
}

impl<T: StripSpans + ?Sized> StripSpans for Box<T> {
    fn strip_spans(&mut self) {
        (**self).strip_spans();
    }
}

/// Nodes whose only nested data is their own span.
macro_rules! strip_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StripSpans for $ty {
                fn strip_spans(&mut self) {
                    self.span = None;
                }
            }
        )*
    };
}

strip_leaf!(
    TextElement,
    StringLiteral,
    NumberLiteral,
    Identifier,
    Function,
    Comment,
    Annotation,
);

impl StripSpans for Resource {
    fn strip_spans(&mut self) {
        self.span = None;
        self.body.strip_spans();
    }
}

impl StripSpans for Entry {
    fn strip_spans(&mut self) {
        match self {
            Entry::Message(message) => message.strip_spans(),
            Entry::Term(term) => term.strip_spans(),
            Entry::Comment(comment)
            | Entry::GroupComment(comment)
            | Entry::ResourceComment(comment) => comment.strip_spans(),
            Entry::Junk(junk) => junk.strip_spans(),
        }
    }
}

impl StripSpans for Message {
    fn strip_spans(&mut self) {
        self.span = None;
        self.id.strip_spans();
        self.value.strip_spans();
        self.attributes.strip_spans();
        self.comment.strip_spans();
    }
}

impl StripSpans for Term {
    fn strip_spans(&mut self) {
        self.span = None;
        self.id.strip_spans();
        self.value.strip_spans();
        self.attributes.strip_spans();
        self.comment.strip_spans();
    }
}

impl StripSpans for Junk {
    fn strip_spans(&mut self) {
        self.span = None;
        self.annotations.strip_spans();
    }
}

impl StripSpans for Value {
    fn strip_spans(&mut self) {
        match self {
            Value::Pattern(pattern) => pattern.strip_spans(),
            Value::VariantList(list) => {
                list.span = None;
                list.variants.strip_spans();
            }
        }
    }
}

impl StripSpans for Attribute {
    fn strip_spans(&mut self) {
        self.span = None;
        self.id.strip_spans();
        self.value.strip_spans();
    }
}

impl StripSpans for Pattern {
    fn strip_spans(&mut self) {
        self.span = None;
        for element in &mut self.elements {
            match element {
                PatternElement::TextElement(text) => text.strip_spans(),
                PatternElement::Placeable(placeable) => placeable.strip_spans(),
            }
        }
    }
}

impl StripSpans for Placeable {
    fn strip_spans(&mut self) {
        self.span = None;
        self.expression.strip_spans();
    }
}

impl StripSpans for Expression {
    fn strip_spans(&mut self) {
        match self {
            Expression::StringLiteral(e) => e.strip_spans(),
            Expression::NumberLiteral(e) => e.strip_spans(),
            Expression::MessageReference(e) => {
                e.span = None;
                e.id.strip_spans();
            }
            Expression::TermReference(e) => e.strip_spans(),
            Expression::VariableReference(e) => {
                e.span = None;
                e.id.strip_spans();
            }
            Expression::AttributeExpression(e) => {
                e.span = None;
                e.reference.strip_spans();
                e.name.strip_spans();
            }
            Expression::VariantExpression(e) => {
                e.span = None;
                e.reference.strip_spans();
                e.key.strip_spans();
            }
            Expression::CallExpression(e) => {
                e.span = None;
                e.callee.strip_spans();
                e.positional.strip_spans();
                for arg in &mut e.named {
                    arg.span = None;
                    arg.name.strip_spans();
                    match &mut arg.value {
                        Literal::String(s) => s.strip_spans(),
                        Literal::Number(n) => n.strip_spans(),
                    }
                }
            }
            Expression::SelectExpression(e) => {
                e.span = None;
                e.selector.strip_spans();
                e.variants.strip_spans();
            }
            Expression::Placeable(e) => e.strip_spans(),
        }
    }
}

impl StripSpans for TermReference {
    fn strip_spans(&mut self) {
        self.span = None;
        self.id.strip_spans();
    }
}

impl StripSpans for Variant {
    fn strip_spans(&mut self) {
        self.span = None;
        self.key.strip_spans();
        self.value.strip_spans();
    }
}

impl StripSpans for VariantKey {
    fn strip_spans(&mut self) {
        match self {
            VariantKey::Identifier(id) => id.strip_spans(),
            VariantKey::NumberLiteral(number) => number.strip_spans(),
        }
    }
}
