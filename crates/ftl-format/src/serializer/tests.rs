use super::*;
use ftl_ast::{
    Message, PatternElement, StringLiteral, Term, TextElement, VariableReference,
};

fn format(source: &str) -> String {
    let resource = ftl_parse::parse(source);
    serialize(&resource, &SerializeOptions::default())
}

/// The only placeable expression of the first message.
fn expression(source: &str) -> Expression {
    let resource = ftl_parse::parse(source);
    let Some(Entry::Message(message)) = resource.body.into_iter().next() else {
        panic!("expected a message in {:?}", source);
    };
    let value = message.value.expect("message has a value");
    value
        .elements
        .into_iter()
        .find_map(|element| match element {
            PatternElement::Placeable(placeable) => Some(*placeable.expression),
            PatternElement::TextElement(_) => None,
        })
        .expect("pattern has a placeable")
}

#[test]
fn test_simple_message() {
    assert_eq!(format("foo = Foo\n"), "foo = Foo\n");
    assert_eq!(format("foo = Foo"), "foo = Foo\n");
}

#[test]
fn test_term() {
    assert_eq!(format("-brand = Firefox\n"), "-brand = Firefox\n");
}

#[test]
fn test_message_with_attributes() {
    assert_eq!(
        format("foo = Foo\n    .attr = Foo Attr\n    .title = Title\n"),
        "foo = Foo\n    .attr = Foo Attr\n    .title = Title\n"
    );
}

#[test]
fn test_attribute_without_value() {
    assert_eq!(
        format("foo\n    .attr = Foo Attr\n"),
        "foo =\n    .attr = Foo Attr\n"
    );
}

#[test]
fn test_multiline_pattern() {
    assert_eq!(format("foo =\n    Foo\n    Bar\n"), "foo =\n    Foo\n    Bar\n");
    assert_eq!(format("foo = Foo\n    Bar\n"), "foo =\n    Foo\n    Bar\n");
    assert_eq!(
        format("foo =\n    Foo\n        Indented\n"),
        "foo =\n    Foo\n        Indented\n"
    );
}

#[test]
fn test_multiline_attribute() {
    assert_eq!(
        format("foo\n    .attr =\n        Foo\n        Bar\n"),
        "foo =\n    .attr =\n        Foo\n        Bar\n"
    );
}

#[test]
fn test_select_expression() {
    let output = format("foo = { $sel ->\n   *[a] A\n    [b] B\n}\n");
    insta::assert_snapshot!(output, @r"
    foo =
        { $sel ->
           *[a] A
            [b] B
        }
    ");
}

#[test]
fn test_select_between_text() {
    let source = "foo =\n    Foo { $sel ->\n       *[a] A\n    } Bar\n";
    assert_eq!(format(source), source);
}

#[test]
fn test_multiline_variant() {
    let source =
        "foo =\n    { $sel ->\n       *[a]\n            AAA\n            BBB\n    }\n";
    assert_eq!(format(source), source);
}

#[test]
fn test_nested_select() {
    let source = "foo =\n    { $a ->\n       *[a]\n            { $b ->\n               *[b] B\n            }\n    }\n";
    assert_eq!(format(source), source);
}

#[test]
fn test_variant_list() {
    let source = "-term =\n    {\n       *[a] A\n        [b] B\n    }\n";
    assert_eq!(format(source), source);
    assert_eq!(format("-term = {\n   *[a] A\n    [b] B\n}\n"), source);
}

#[test]
fn test_comments() {
    let output = format("# Standalone\n\n# Attached\nfoo = Foo\n\n## Group\n\n### Resource\n");
    insta::assert_snapshot!(output, @r"
    # Standalone

    # Attached
    foo = Foo

    ## Group


    ### Resource
    ");
    assert_eq!(
        output,
        "# Standalone\n\n# Attached\nfoo = Foo\n\n## Group\n\n\n### Resource\n\n"
    );
}

#[test]
fn test_multiline_comment() {
    assert_eq!(format("# a\n#\n# b\n"), "# a\n#\n# b\n\n");
}

#[test]
fn test_empty_group_comment() {
    let resource = Resource {
        body: vec![Entry::GroupComment(Comment::new(""))],
        span: None,
    };
    assert_eq!(serialize(&resource, &SerializeOptions::new()), "##\n\n");
    assert_eq!(format("foo = Foo\n\n##\n"), "foo = Foo\n\n##\n\n");
}

#[test]
fn test_junk() {
    let source = "foo = Foo\nbar\nbaz = Baz\n";
    let resource = ftl_parse::parse(source);
    assert_eq!(
        serialize(&resource, &SerializeOptions::default()),
        "foo = Foo\nbaz = Baz\n"
    );
    assert_eq!(
        serialize(&resource, &SerializeOptions::new().with_junk(true)),
        source
    );
}

#[test]
fn test_only_junk_does_not_count_as_entry() {
    let resource = ftl_parse::parse("broken\n# Comment\n\n");
    assert_eq!(
        serialize(&resource, &SerializeOptions::default()),
        "# Comment\n\n"
    );
}

#[test]
fn test_placeables() {
    assert_eq!(format("foo = Foo { $num } bar\n"), "foo = Foo { $num } bar\n");
    assert_eq!(format("foo = {$num}\n"), "foo = { $num }\n");
    assert_eq!(format("foo = { { $num } }\n"), "foo = {{ $num }}\n");
    assert_eq!(format("foo = { -term }\n"), "foo = { -term }\n");
}

#[test]
fn test_string_literal_keeps_escapes() {
    let source = r#"foo = { "A \\ \"" }"#;
    assert_eq!(format(source), format!("{}\n", source));
}

#[test]
fn test_serialize_expression() {
    let cases = [
        ("foo = { $num }", "$num"),
        ("foo = { bar }", "bar"),
        ("foo = { 3.14 }", "3.14"),
        ("foo = { bar.attr }", "bar.attr"),
        ("foo = { -term.attr }", "-term.attr"),
        ("foo = { -term[gen] }", "-term[gen]"),
        ("foo = { { $num } }", "{ $num }"),
        ("foo = { BUILTIN() }", "BUILTIN()"),
        ("foo = { F(1, \"a\\\"b\") }", "F(1, \"a\\\"b\")"),
        ("foo = { F(a: \"x\") }", "F(a: \"x\")"),
        (
            "foo = { NUMBER($num, minimumFractionDigits: 2) }",
            "NUMBER($num, minimumFractionDigits: 2)",
        ),
        (
            "foo = { $num ->\n   *[other] Other\n}",
            "$num ->\n   *[other] Other\n",
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(serialize_expression(&expression(source)), expected, "{}", source);
    }
}

#[test]
fn test_serialize_built_tree() {
    let hello = Message {
        id: Identifier::new("hello"),
        value: Some(Pattern {
            elements: vec![
                PatternElement::TextElement(TextElement::new("Hello, ")),
                PatternElement::Placeable(Placeable::new(Expression::VariableReference(
                    VariableReference {
                        id: Identifier::new("name"),
                        span: None,
                    },
                ))),
            ],
            span: None,
        }),
        attributes: Vec::new(),
        comment: Some(Comment::new("Greeting")),
        span: None,
    };
    let quote = Term {
        id: Identifier::new("-quote"),
        value: Value::Pattern(Pattern {
            elements: vec![PatternElement::Placeable(Placeable::new(
                Expression::StringLiteral(StringLiteral::new("say \"hi\"")),
            ))],
            span: None,
        }),
        attributes: vec![Attribute {
            id: Identifier::new("kind"),
            value: Pattern::text("short"),
            span: None,
        }],
        comment: None,
        span: None,
    };
    let resource = Resource {
        body: vec![Entry::Message(hello), Entry::Term(quote)],
        span: None,
    };

    assert_eq!(
        serialize(&resource, &SerializeOptions::default()),
        "# Greeting\nhello = Hello, { $name }\n-quote = { \"say \\\"hi\\\"\" }\n    .kind = short\n"
    );
}

#[test]
fn test_serialize_is_idempotent_on_fixture() {
    let source = "\
### Resource comment

# Attached
key = Value
    .title = { $count ->
        [one] One item
       *[other] { $count } items
    }

-brand = {
   *[nominative] Firefox
    [genitive] Firefoxa
}

## Group
multi =
    First line
      second line
";
    let once = format(source);
    let twice = format(&once);
    assert_eq!(once, twice);
}

mod proptests {
    use super::*;
    use ftl_ast::StripSpans;
    use proptest::prelude::*;

    fn identifier() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
    }

    /// A word of text that cannot be mistaken for syntax.
    fn word() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z][a-zA-Z0-9,.!']{0,8}").unwrap()
    }

    fn placeable() -> impl Strategy<Value = String> {
        prop_oneof![
            identifier().prop_map(|id| format!("{{ ${} }}", id)),
            identifier().prop_map(|id| format!("{{ {} }}", id)),
            identifier().prop_map(|id| format!("{{ -{} }}", id)),
            (identifier(), identifier()).prop_map(|(id, attr)| format!("{{ {}.{} }}", id, attr)),
            (0u32..10_000).prop_map(|n| format!("{{ {} }}", n)),
            prop::string::string_regex("[a-z ]{0,6}")
                .unwrap()
                .prop_map(|s| format!("{{ \"{}\" }}", s)),
            identifier().prop_map(|id| format!("{{ NUMBER(${}, style: \"percent\") }}", id)),
        ]
    }

    /// One line of words and placeables.
    fn line() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![3 => word(), 1 => placeable()], 1..5)
            .prop_map(|parts| parts.join(" "))
    }

    /// A pattern starting after `= `, possibly continued on indented lines.
    fn inline_pattern() -> impl Strategy<Value = String> {
        prop::collection::vec(line(), 1..3).prop_map(|lines| lines.join("\n    "))
    }

    fn select_pattern() -> impl Strategy<Value = String> {
        (identifier(), prop::collection::vec(line(), 1..4)).prop_map(|(selector, lines)| {
            let last = lines.len() - 1;
            let variants: Vec<_> = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let marker = if i == last { "   *" } else { "    " };
                    format!("{}[key{}] {}", marker, i, line)
                })
                .collect();
            format!("{{ ${} ->\n{}\n}}", selector, variants.join("\n"))
        })
    }

    fn pattern() -> impl Strategy<Value = String> {
        prop_oneof![4 => inline_pattern(), 1 => select_pattern()]
    }

    fn comment_text() -> impl Strategy<Value = String> {
        prop::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
    }

    fn attributes() -> impl Strategy<Value = String> {
        prop::collection::vec((identifier(), inline_pattern()), 0..3).prop_map(|attrs| {
            attrs
                .into_iter()
                .map(|(id, value)| format!("    .{} = {}\n", id, value))
                .collect()
        })
    }

    fn message() -> impl Strategy<Value = String> {
        (
            prop::option::of(comment_text()),
            identifier(),
            pattern(),
            attributes(),
        )
            .prop_map(|(comment, id, value, attrs)| {
                let comment = comment.map(|c| format!("# {}\n", c)).unwrap_or_default();
                format!("{}{} = {}\n{}", comment, id, value, attrs)
            })
    }

    fn term() -> impl Strategy<Value = String> {
        (identifier(), pattern(), attributes())
            .prop_map(|(id, value, attrs)| format!("-{} = {}\n{}", id, value, attrs))
    }

    fn entry() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => message(),
            2 => term(),
            1 => comment_text().prop_map(|c| format!("# {}\n\n", c)),
            1 => comment_text().prop_map(|c| format!("## {}\n\n", c)),
        ]
    }

    fn resource() -> impl Strategy<Value = String> {
        prop::collection::vec(entry(), 1..6).prop_map(|entries| entries.concat())
    }

    fn parse_stripped(source: &str) -> Resource {
        let mut resource = ftl_parse::parse(source);
        resource.strip_spans();
        resource
    }

    fn has_junk(resource: &Resource) -> bool {
        resource
            .body
            .iter()
            .any(|entry| matches!(entry, Entry::Junk(_)))
    }

    proptest! {
        /// Serializing must preserve the parsed tree
        #[test]
        fn serialize_preserves_semantics(input in resource()) {
            let tree1 = parse_stripped(&input);
            prop_assert!(!has_junk(&tree1), "Generated input has junk:\n{}", input);

            let serialized = serialize(&tree1, &SerializeOptions::default());
            let tree2 = parse_stripped(&serialized);

            prop_assert_eq!(
                tree1,
                tree2,
                "Serializing changed semantics!\nInput:\n{}\nSerialized:\n{}",
                input,
                serialized
            );
        }

        /// Serializing a parsed serialization gives the same text
        #[test]
        fn serialize_is_idempotent(input in resource()) {
            let once = serialize(&ftl_parse::parse(&input), &SerializeOptions::default());
            let twice = serialize(&ftl_parse::parse(&once), &SerializeOptions::default());

            prop_assert_eq!(
                &once,
                &twice,
                "Serializing is not idempotent!\nInput:\n{}\nOnce:\n{}\nTwice:\n{}",
                input,
                &once,
                &twice
            );
        }
    }
}
