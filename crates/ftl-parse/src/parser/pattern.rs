//! Patterns, placeables and expressions.

use ftl_ast::{
    AttributeExpression, CallExpression, Expression, Function, Identifier, Literal,
    MessageReference, NamedArgument, NumberLiteral, ParseErrorKind, Pattern, PatternElement,
    Placeable, SelectExpression, StringLiteral, TermReference, TextElement, Value, Variant,
    VariantExpression, VariantKey, VariantList, VariableReference,
};
use ftl_stream::EOL;

use super::EntryParser;

type Result<T> = std::result::Result<T, ParseErrorKind>;

/// A pattern element before indentation is resolved.
enum PatternPiece {
    Text(TextElement),
    Placeable(Placeable),
    /// Line ends, blank lines and indentation between two lines.
    Indent {
        value: String,
        start: usize,
        end: usize,
    },
}

enum CallArgument {
    Positional(Expression),
    Named(NamedArgument),
}

/// Function names must match `[A-Z][A-Z_?-]*`.
fn is_valid_callee(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('A'..='Z'))
        && chars.all(|c| matches!(c, 'A'..='Z' | '_' | '?' | '-'))
}

impl<'src> EntryParser<'src> {
    /// Parse a pattern at the current position.
    ///
    /// At the start of a line the pattern is a block and the indentation
    /// of its first line takes part in dedenting.
    pub(super) fn get_pattern(&mut self) -> Result<Pattern> {
        let mut pieces = Vec::new();
        let mut common_indent = usize::MAX;

        if self.ps.at_line_start() {
            let blank_start = self.ps.index();
            let first_indent = self.ps.skip_blank_inline();
            pieces.push(PatternPiece::Indent {
                value: " ".repeat(first_indent),
                start: blank_start,
                end: self.ps.index(),
            });
            common_indent = first_indent;
        }

        let start = self.ps.index();

        while let Some(ch) = self.ps.current_char() {
            if ch == EOL {
                if !self.ps.is_next_line_value(false) {
                    break;
                }
                let blank_start = self.ps.index();
                let lines = self.ps.skip_blank_block();
                let indent = self.ps.skip_blank_inline();
                common_indent = common_indent.min(indent);

                let mut value = "\n".repeat(lines);
                value.push_str(&" ".repeat(indent));
                pieces.push(PatternPiece::Indent {
                    value,
                    start: blank_start,
                    end: self.ps.index(),
                });
                continue;
            }

            let piece = if ch == '{' {
                PatternPiece::Placeable(self.get_placeable()?)
            } else {
                PatternPiece::Text(self.get_text_element())
            };
            pieces.push(piece);
        }

        Ok(Pattern {
            elements: self.dedent(pieces, common_indent),
            span: self.span(start),
        })
    }

    /// Remove the common indentation, merge adjacent text and trim the end.
    fn dedent(&self, pieces: Vec<PatternPiece>, common_indent: usize) -> Vec<PatternElement> {
        let mut elements: Vec<PatternElement> = Vec::with_capacity(pieces.len());

        for piece in pieces {
            let (value, span) = match piece {
                PatternPiece::Placeable(placeable) => {
                    elements.push(PatternElement::Placeable(placeable));
                    continue;
                }
                PatternPiece::Text(text) => (text.value, text.span),
                PatternPiece::Indent {
                    mut value,
                    start,
                    end,
                } => {
                    value.truncate(value.len().saturating_sub(common_indent));
                    if value.is_empty() {
                        continue;
                    }
                    (value, self.span_between(start, end))
                }
            };

            if let Some(PatternElement::TextElement(prev)) = elements.last_mut() {
                prev.value.push_str(&value);
                if let (Some(prev_span), Some(span)) = (prev.span, span) {
                    prev.span = Some(prev_span.extend(span));
                }
                continue;
            }
            elements.push(PatternElement::TextElement(TextElement { value, span }));
        }

        if let Some(PatternElement::TextElement(last)) = elements.last_mut() {
            let trimmed = last.value.trim_end_matches([' ', '\n']).len();
            last.value.truncate(trimmed);
            if last.value.is_empty() {
                elements.pop();
            }
        }

        elements
    }

    fn get_text_element(&mut self) -> TextElement {
        let start = self.ps.index();
        while !matches!(self.ps.current_char(), None | Some('{' | EOL)) {
            self.ps.next();
        }
        TextElement {
            value: self.ps.slice(start, self.ps.index()).to_string(),
            span: self.span(start),
        }
    }

    /// A pattern, or for terms and variants a `{ [a] A *[b] B }` list.
    pub(super) fn get_value(&mut self) -> Result<Value> {
        if self.ps.at_line_start() {
            self.ps.peek_blank_inline();
        }
        if self.ps.current_peek() == Some('{') {
            self.ps.peek();
            self.ps.peek_blank_inline();
            if self.ps.is_next_line_variant_start() {
                return self.get_variant_list().map(Value::VariantList);
            }
        }
        self.ps.reset_peek(0);
        self.get_pattern().map(Value::Pattern)
    }

    fn get_variant_list(&mut self) -> Result<VariantList> {
        self.ps.skip_blank_inline();
        let start = self.ps.index();
        self.ps.expect_char('{')?;
        self.ps.skip_blank_inline();
        self.ps.expect_line_end()?;
        self.ps.skip_blank();
        let variants = self.get_variants()?;
        self.ps.expect_line_end()?;
        self.ps.skip_blank();
        self.ps.expect_char('}')?;

        Ok(VariantList {
            variants,
            span: self.span(start),
        })
    }

    fn get_variants(&mut self) -> Result<Vec<Variant>> {
        let mut variants = Vec::new();
        loop {
            variants.push(self.get_variant()?);
            if !self.ps.is_next_line_variant_start() {
                break;
            }
            self.ps.skip_blank();
        }
        Ok(variants)
    }

    fn get_variant(&mut self) -> Result<Variant> {
        let start = self.ps.index();
        let default = self.ps.current_char() == Some('*');
        if default {
            self.ps.next();
        }

        self.ps.expect_char('[')?;
        self.ps.skip_blank();
        let key = self.get_variant_key()?;
        self.ps.skip_blank();
        self.ps.expect_char(']')?;

        if !self.ps.is_value_start() {
            return Err(ParseErrorKind::MissingValue);
        }
        let value = self.get_value()?;

        Ok(Variant {
            key,
            value,
            default,
            span: self.span(start),
        })
    }

    fn get_variant_key(&mut self) -> Result<VariantKey> {
        match self.ps.current_char() {
            None => Err(ParseErrorKind::MissingVariantKey),
            Some(ch) if ch.is_ascii_digit() || ch == '-' => {
                self.get_number().map(VariantKey::NumberLiteral)
            }
            Some(_) => self.get_identifier().map(VariantKey::Identifier),
        }
    }

    fn get_placeable(&mut self) -> Result<Placeable> {
        let start = self.ps.index();
        self.ps.expect_char('{')?;
        let expression = self.get_expression()?;
        self.ps.expect_char('}')?;

        Ok(Placeable {
            expression: Box::new(expression),
            span: self.span(start),
        })
    }

    fn get_expression(&mut self) -> Result<Expression> {
        self.ps.skip_blank();
        let start = self.ps.index();
        let selector = self.get_selector_expression()?;
        self.ps.skip_blank();

        if self.ps.current_char() != Some('-') {
            return Ok(selector);
        }
        if self.ps.peek() != Some('>') {
            self.ps.reset_peek(0);
            return Ok(selector);
        }

        self.ps.next();
        self.ps.next();
        self.ps.skip_blank_inline();
        self.ps.expect_line_end()?;
        self.ps.skip_blank();

        if !matches!(self.ps.current_char(), Some('*' | '[')) {
            return Err(ParseErrorKind::MissingVariants);
        }
        let variants = self.get_variants()?;
        let end = self.ps.index();
        self.ps.skip_blank();

        if variants
            .iter()
            .any(|variant| matches!(variant.value, Value::VariantList(_)))
        {
            return Err(ParseErrorKind::VariantListInSelectExpression);
        }

        Ok(Expression::SelectExpression(SelectExpression {
            selector: Box::new(selector),
            variants,
            span: self.span_between(start, end),
        }))
    }

    fn get_selector_expression(&mut self) -> Result<Expression> {
        if self.ps.current_char() == Some('{') {
            return self.get_placeable().map(Expression::Placeable);
        }

        let start = self.ps.index();
        let literal = self.get_literal()?;

        let reference_id = match &literal {
            Expression::MessageReference(reference) => &reference.id,
            Expression::TermReference(reference) => &reference.id,
            _ => return Ok(literal),
        };

        match self.ps.current_char() {
            Some('.') => {
                self.ps.next();
                let name = self.get_identifier()?;
                Ok(Expression::AttributeExpression(AttributeExpression {
                    reference: Box::new(literal),
                    name,
                    span: self.span(start),
                }))
            }
            Some('[') => {
                self.ps.next();
                let Expression::TermReference(reference) = literal else {
                    return Err(ParseErrorKind::ForbiddenVariantAccessor);
                };
                let key = self.get_variant_key()?;
                self.ps.expect_char(']')?;
                Ok(Expression::VariantExpression(VariantExpression {
                    reference,
                    key,
                    span: self.span(start),
                }))
            }
            Some('(') => {
                self.ps.next();
                if !is_valid_callee(&reference_id.name) {
                    return Err(ParseErrorKind::ForbiddenCallee);
                }
                let callee = Function {
                    name: reference_id.name.clone(),
                    span: literal.span(),
                };
                let (positional, named) = self.get_call_args()?;
                self.ps.expect_char(')')?;
                Ok(Expression::CallExpression(CallExpression {
                    callee,
                    positional,
                    named,
                    span: self.span(start),
                }))
            }
            _ => Ok(literal),
        }
    }

    fn get_call_args(&mut self) -> Result<(Vec<Expression>, Vec<NamedArgument>)> {
        let mut positional = Vec::new();
        let mut named = Vec::new();

        self.ps.skip_blank();
        while self.ps.current_char() != Some(')') {
            match self.get_call_arg()? {
                CallArgument::Named(argument) => named.push(argument),
                CallArgument::Positional(_) if !named.is_empty() => {
                    return Err(ParseErrorKind::PositionalArgumentFollowsNamed);
                }
                CallArgument::Positional(expression) => positional.push(expression),
            }

            self.ps.skip_blank();
            if self.ps.current_char() != Some(',') {
                break;
            }
            self.ps.next();
            self.ps.skip_blank();
        }

        Ok((positional, named))
    }

    fn get_call_arg(&mut self) -> Result<CallArgument> {
        let start = self.ps.index();
        let expression = self.get_selector_expression()?;
        self.ps.skip_blank();

        if self.ps.current_char() != Some(':') {
            return Ok(CallArgument::Positional(expression));
        }

        let Expression::MessageReference(reference) = expression else {
            return Err(ParseErrorKind::ForbiddenKey);
        };

        self.ps.next();
        self.ps.skip_blank();

        let value = if self.ps.is_number_start() {
            Literal::Number(self.get_number()?)
        } else if self.ps.current_char() == Some('"') {
            Literal::String(self.get_string()?)
        } else {
            return Err(ParseErrorKind::MissingValue);
        };

        Ok(CallArgument::Named(NamedArgument {
            name: reference.id,
            value,
            span: self.span(start),
        }))
    }

    fn get_literal(&mut self) -> Result<Expression> {
        let start = self.ps.index();
        match self.ps.current_char() {
            None => Err(ParseErrorKind::MissingLiteral),
            Some('$') => {
                self.ps.next();
                let id = self.get_identifier()?;
                Ok(Expression::VariableReference(VariableReference {
                    id,
                    span: self.span(start),
                }))
            }
            Some(_) if self.ps.is_identifier_start() => {
                let id = self.get_identifier()?;
                Ok(Expression::MessageReference(MessageReference {
                    id,
                    span: self.span(start),
                }))
            }
            Some(_) if self.ps.is_number_start() => {
                self.get_number().map(Expression::NumberLiteral)
            }
            Some('-') => {
                let id = self.get_term_identifier()?;
                Ok(Expression::TermReference(TermReference {
                    id,
                    span: self.span(start),
                }))
            }
            Some('"') => self.get_string().map(Expression::StringLiteral),
            Some(_) => Err(ParseErrorKind::MissingLiteral),
        }
    }

    pub(super) fn get_identifier(&mut self) -> Result<Identifier> {
        let start = self.ps.index();
        let mut name = String::new();
        name.push(self.ps.take_id_start()?);
        while let Some(ch) = self.ps.take_id_char() {
            name.push(ch);
        }

        Ok(Identifier {
            name,
            span: self.span(start),
        })
    }

    /// `-name`, keeping the dash in the identifier.
    pub(super) fn get_term_identifier(&mut self) -> Result<Identifier> {
        let start = self.ps.index();
        self.ps.expect_char('-')?;
        let id = self.get_identifier()?;

        Ok(Identifier {
            name: format!("-{}", id.name),
            span: self.span(start),
        })
    }

    fn get_number(&mut self) -> Result<NumberLiteral> {
        let start = self.ps.index();
        let mut value = String::new();

        if self.ps.current_char() == Some('-') {
            value.push('-');
            self.ps.next();
        }
        self.get_digits(&mut value)?;

        if self.ps.current_char() == Some('.') {
            value.push('.');
            self.ps.next();
            self.get_digits(&mut value)?;
        }

        Ok(NumberLiteral {
            value,
            span: self.span(start),
        })
    }

    fn get_digits(&mut self, value: &mut String) -> Result<()> {
        let before = value.len();
        while let Some(ch) = self.ps.take_digit() {
            value.push(ch);
        }
        if value.len() == before {
            return Err(ParseErrorKind::ExpectedCharRange("0-9".to_string()));
        }
        Ok(())
    }

    fn get_string(&mut self) -> Result<StringLiteral> {
        let start = self.ps.index();
        self.ps.expect_char('"')?;

        let raw_start = self.ps.index();
        let mut value = String::new();
        while let Some(ch) = self.ps.take_char(|c| c != '"' && c != EOL) {
            if ch == '\\' {
                self.get_escape_sequence(&mut value)?;
            } else {
                value.push(ch);
            }
        }
        let raw = self.ps.slice(raw_start, self.ps.index()).to_string();

        if self.ps.current_char() == Some(EOL) {
            return Err(ParseErrorKind::UnterminatedStringExpression);
        }
        self.ps.expect_char('"')?;

        Ok(StringLiteral {
            raw,
            value,
            span: self.span(start),
        })
    }

    /// Decode the escape after a `\` into `value`.
    fn get_escape_sequence(&mut self, value: &mut String) -> Result<()> {
        match self.ps.current_char() {
            Some(ch @ ('\\' | '"')) => {
                self.ps.next();
                value.push(ch);
                Ok(())
            }
            Some('u') => self.get_unicode_escape_sequence('u', 4, value),
            Some('U') => self.get_unicode_escape_sequence('U', 6, value),
            Some(ch) => Err(ParseErrorKind::UnknownEscapeSequence(ch)),
            None => Err(ParseErrorKind::ExpectedToken('"')),
        }
    }

    fn get_unicode_escape_sequence(
        &mut self,
        marker: char,
        digits: usize,
        value: &mut String,
    ) -> Result<()> {
        self.ps.expect_char(marker)?;

        let mut sequence = String::with_capacity(digits);
        for _ in 0..digits {
            match self.ps.take_hex_digit() {
                Some(ch) => sequence.push(ch),
                None => {
                    let mut invalid = format!("\\{}{}", marker, sequence);
                    if let Some(ch) = self.ps.current_char() {
                        invalid.push(ch);
                    }
                    return Err(ParseErrorKind::InvalidUnicodeEscapeSequence(invalid));
                }
            }
        }

        let decoded = u32::from_str_radix(&sequence, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        value.push(decoded);
        Ok(())
    }
}
