//! AST to FTL text.

use ftl_ast::{
    Attribute, CallExpression, Comment, Entry, Expression, Identifier, Literal, NamedArgument,
    Pattern, PatternElement, Placeable, Resource, SelectExpression, Value, Variant, VariantList,
};

use crate::SerializeOptions;

/// Serialize a whole resource.
///
/// Junk entries are dropped unless [`SerializeOptions::with_junk`] is set.
pub fn serialize(resource: &Resource, options: &SerializeOptions) -> String {
    let mut serializer = Serializer::new(options);
    for entry in &resource.body {
        serializer.write_entry(entry);
    }
    serializer.finish()
}

/// Serialize a single expression, without the surrounding braces.
pub fn serialize_expression(expression: &Expression) -> String {
    match expression {
        Expression::StringLiteral(literal) => format!("\"{}\"", literal.raw),
        Expression::NumberLiteral(literal) => literal.value.clone(),
        Expression::MessageReference(reference) => reference.id.name.clone(),
        Expression::TermReference(reference) => reference.id.name.clone(),
        Expression::VariableReference(reference) => format!("${}", reference.id.name),
        Expression::AttributeExpression(expr) => {
            format!("{}.{}", serialize_expression(&expr.reference), expr.name.name)
        }
        Expression::VariantExpression(expr) => {
            format!("{}[{}]", expr.reference.id.name, expr.key)
        }
        Expression::CallExpression(call) => call_expression(call),
        Expression::SelectExpression(select) => select_expression(select),
        Expression::Placeable(placeable) => placeable_text(placeable),
    }
}

struct Serializer<'a> {
    out: String,
    options: &'a SerializeOptions,
    /// Whether anything has been written yet.
    has_entries: bool,
}

impl<'a> Serializer<'a> {
    fn new(options: &'a SerializeOptions) -> Self {
        Self {
            out: String::new(),
            options,
            has_entries: false,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn write_entry(&mut self, entry: &Entry) {
        let text = match entry {
            Entry::Message(message) => entry_text(
                message.comment.as_ref(),
                &message.id,
                message.value.as_ref().map(pattern),
                &message.attributes,
            ),
            Entry::Term(term) => entry_text(
                term.comment.as_ref(),
                &term.id,
                Some(value(&term.value)),
                &term.attributes,
            ),
            Entry::Comment(comment) => self.comment_entry(comment, "#"),
            Entry::GroupComment(comment) => self.comment_entry(comment, "##"),
            Entry::ResourceComment(comment) => self.comment_entry(comment, "###"),
            Entry::Junk(junk) if self.options.with_junk => junk.content.clone(),
            Entry::Junk(_junk) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(len = _junk.content.len(), "skipping junk");
                return;
            }
        };

        self.out.push_str(&text);
        self.has_entries = true;
    }

    /// Standalone comments are followed by a blank line, and preceded by one
    /// unless they open the output.
    fn comment_entry(&self, comment: &Comment, prefix: &str) -> String {
        let text = comment_text(comment, prefix);
        if self.has_entries {
            format!("\n{}\n", text)
        } else {
            format!("{}\n", text)
        }
    }
}

/// Add four spaces after every line break that is followed by more text.
fn indent(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for (i, line) in content.split_inclusive('\n').enumerate() {
        if i > 0 {
            out.push_str("    ");
        }
        out.push_str(line);
    }
    out
}

fn comment_text(comment: &Comment, prefix: &str) -> String {
    let mut out = comment
        .content
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                prefix.to_string()
            } else {
                format!("{} {}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Messages and terms share one layout.
fn entry_text(
    comment: Option<&Comment>,
    id: &Identifier,
    value: Option<String>,
    attributes: &[Attribute],
) -> String {
    let mut out = String::new();
    if let Some(comment) = comment {
        out.push_str(&comment_text(comment, "#"));
    }
    out.push_str(&id.name);
    out.push_str(" =");
    if let Some(value) = value {
        out.push_str(&value);
    }
    for attr in attributes {
        out.push_str(&format!("\n    .{} ={}", attr.id.name, indent(&pattern(&attr.value))));
    }
    out.push('\n');
    out
}

fn value(value: &Value) -> String {
    match value {
        Value::Pattern(p) => pattern(p),
        Value::VariantList(list) => variant_list(list),
    }
}

fn pattern(pattern: &Pattern) -> String {
    let content: String = pattern.elements.iter().map(element).collect();
    let start_on_new_line = pattern.elements.iter().any(|element| match element {
        PatternElement::TextElement(text) => text.value.contains('\n'),
        PatternElement::Placeable(placeable) => placeable.is_select(),
    });

    if start_on_new_line {
        format!("\n    {}", indent(&content))
    } else {
        format!(" {}", content)
    }
}

fn element(element: &PatternElement) -> String {
    match element {
        PatternElement::TextElement(text) => text.value.clone(),
        PatternElement::Placeable(placeable) => placeable_text(placeable),
    }
}

fn placeable_text(placeable: &Placeable) -> String {
    match placeable.expression.as_ref() {
        Expression::Placeable(inner) => format!("{{{}}}", placeable_text(inner)),
        // The select expression ends with its own line break.
        Expression::SelectExpression(select) => format!("{{ {}}}", select_expression(select)),
        expression => format!("{{ {} }}", serialize_expression(expression)),
    }
}

fn variant_list(list: &VariantList) -> String {
    let content: String = list.variants.iter().map(variant).collect();
    format!("\n    {{{}\n    }}", indent(&content))
}

fn variant(variant: &Variant) -> String {
    let marker = if variant.default { "   *" } else { "    " };
    format!("\n{}[{}]{}", marker, variant.key, indent(&value(&variant.value)))
}

fn select_expression(select: &SelectExpression) -> String {
    let mut out = format!("{} ->", serialize_expression(&select.selector));
    for v in &select.variants {
        out.push_str(&variant(v));
    }
    out.push('\n');
    out
}

fn call_expression(call: &CallExpression) -> String {
    let positional = call
        .positional
        .iter()
        .map(serialize_expression)
        .collect::<Vec<_>>()
        .join(", ");
    let named = call
        .named
        .iter()
        .map(named_argument)
        .collect::<Vec<_>>()
        .join(", ");

    let args = match (positional.is_empty(), named.is_empty()) {
        (false, false) => format!("{}, {}", positional, named),
        (true, _) => named,
        (false, true) => positional,
    };
    format!("{}({})", call.callee.name, args)
}

fn named_argument(argument: &NamedArgument) -> String {
    let value = match &argument.value {
        Literal::String(literal) => format!("\"{}\"", literal.raw),
        Literal::Number(literal) => literal.value.clone(),
    };
    format!("{}: {}", argument.name.name, value)
}

#[cfg(test)]
mod tests;
