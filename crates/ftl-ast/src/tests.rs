use super::*;

fn variable(name: &str) -> Expression {
    Expression::VariableReference(VariableReference {
        id: Identifier::new(name),
        span: None,
    })
}

fn variant(key: &str, text: &str, default: bool) -> Variant {
    Variant {
        key: VariantKey::Identifier(Identifier::new(key)),
        value: Value::Pattern(Pattern::text(text)),
        default,
        span: None,
    }
}

fn message(id: &str, pattern: Pattern) -> Message {
    Message {
        id: Identifier::new(id),
        value: Some(pattern),
        attributes: Vec::new(),
        comment: None,
        span: None,
    }
}

#[test]
fn test_string_literal_escapes_raw() {
    let literal = StringLiteral::new(r#"say "hi" \o/"#);
    assert_eq!(literal.raw, r#"say \"hi\" \\o/"#);
    assert_eq!(literal.value, r#"say "hi" \o/"#);
}

#[test]
fn test_annotation_accessors() {
    let annotation = Annotation::new(ParseErrorKind::ExpectedToken('='), Some(Span::point(4)));
    assert_eq!(annotation.code(), "E0003");
    assert_eq!(annotation.args(), vec!["=".to_string()]);
    assert_eq!(annotation.message(), "Expected token: \"=\"");
    assert_eq!(
        annotation.to_string(),
        "E0003: Expected token: \"=\" at offset 4"
    );
}

#[test]
fn test_count_words_counts_every_variant() {
    // One { $arg ->
    //    *[x] Two three
    //     [y] Four
    // } five.
    let select = Expression::SelectExpression(SelectExpression {
        selector: Box::new(variable("arg")),
        variants: vec![variant("x", "Two three", true), variant("y", "Four", false)],
        span: None,
    });
    let pattern = Pattern {
        elements: vec![
            PatternElement::TextElement(TextElement::new("One ")),
            PatternElement::Placeable(Placeable::new(select)),
            PatternElement::TextElement(TextElement::new(" five.")),
        ],
        span: None,
    };
    let message = message("msg", pattern);
    assert_eq!(message.count_words(), 5);
}

#[test]
fn test_count_words_includes_message_attributes() {
    let mut message = message("msg", Pattern::text("Hello world"));
    message.attributes.push(Attribute {
        id: Identifier::new("title"),
        value: Pattern::text("Greeting"),
        span: None,
    });
    message.comment = Some(Comment::new("not counted at all"));
    assert_eq!(message.count_words(), 3);
}

#[test]
fn test_term_count_words_skips_attributes() {
    let term = Term {
        id: Identifier::new("-brand"),
        value: Value::Pattern(Pattern::text("Firefox Browser")),
        attributes: vec![Attribute {
            id: Identifier::new("gender"),
            value: Pattern::text("masculine"),
            span: None,
        }],
        comment: None,
        span: None,
    };
    assert_eq!(term.count_words(), 2);
}

#[test]
fn test_equals_ignores_spans_and_comments() {
    let mut left = message("msg", Pattern::text("Hello"));
    left.span = Some(Span::new(0, 11));
    left.id.span = Some(Span::new(0, 3));
    left.comment = Some(Comment::new("A comment"));

    let right = message("msg", Pattern::text("Hello"));
    assert!(Entry::Message(left.clone()).equals(&Entry::Message(right.clone())));
    assert_ne!(left, right);

    let other = message("msg", Pattern::text("Goodbye"));
    assert!(!Entry::Message(left).equals(&Entry::Message(other)));
}

#[test]
fn test_term_equals_ignores_attributes() {
    let term = |attributes: Vec<Attribute>| {
        Entry::Term(Term {
            id: Identifier::new("-brand"),
            value: Value::Pattern(Pattern::text("Firefox")),
            attributes,
            comment: None,
            span: None,
        })
    };
    let with_attribute = term(vec![Attribute {
        id: Identifier::new("gender"),
        value: Pattern::text("masculine"),
        span: None,
    }]);
    assert!(with_attribute.equals(&term(Vec::new())));
}

#[test]
fn test_strip_spans_clears_nested_spans() {
    let mut placeable = Placeable::new(variable("arg"));
    placeable.span = Some(Span::new(6, 14));
    if let Expression::VariableReference(reference) = placeable.expression.as_mut() {
        reference.span = Some(Span::new(8, 12));
        reference.id.span = Some(Span::new(9, 12));
    }
    let mut resource = Resource {
        body: vec![Entry::Message(message(
            "msg",
            Pattern {
                elements: vec![PatternElement::Placeable(placeable)],
                span: Some(Span::new(6, 14)),
            },
        ))],
        span: Some(Span::new(0, 14)),
    };

    resource.strip_spans();

    let expected = Resource {
        body: vec![Entry::Message(message(
            "msg",
            Pattern {
                elements: vec![PatternElement::Placeable(Placeable::new(variable("arg")))],
                span: None,
            },
        ))],
        span: None,
    };
    assert_eq!(resource, expected);
}

#[test]
fn test_visitor_sees_nested_placeables() {
    #[derive(Default)]
    struct Variables(Vec<String>);

    impl Visitor for Variables {
        fn visit_expression(&mut self, expression: &Expression) {
            if let Expression::VariableReference(reference) = expression {
                self.0.push(reference.id.name.clone());
            }
            visit::walk_expression(self, expression);
        }
    }

    let nested = Expression::Placeable(Placeable::new(variable("inner")));
    let select = Expression::SelectExpression(SelectExpression {
        selector: Box::new(variable("count")),
        variants: vec![Variant {
            key: VariantKey::NumberLiteral(NumberLiteral::new("1")),
            value: Value::Pattern(Pattern {
                elements: vec![PatternElement::Placeable(Placeable::new(nested))],
                span: None,
            }),
            default: true,
            span: None,
        }],
        span: None,
    });
    let resource = Resource {
        body: vec![Entry::Message(message(
            "msg",
            Pattern {
                elements: vec![PatternElement::Placeable(Placeable::new(select))],
                span: None,
            },
        ))],
        span: None,
    };

    let mut variables = Variables::default();
    variables.visit_resource(&resource);
    assert_eq!(variables.0, vec!["count", "inner"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_tags_entries_by_type() {
    let entry = Entry::Comment(Comment::new("hello"));
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["type"], "Comment");
    assert_eq!(json["content"], "hello");

    let back: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(back, entry);
}
