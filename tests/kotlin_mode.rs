//! End-to-end tests over real Kotlin parses
//!
//! These go through the tree-sitter grammar, so they check that the rule,
//! indentation and outline tables agree with the node kinds it produces.

use std::collections::HashSet;

use ktmode::indent::kotlin_rules;
use ktmode::outline::OutlineKind;
use ktmode::syntax::{highlight_id_for_name, kotlin, Span};
use ktmode::{KotlinMode, ModeConfig, SymbolContext, SyntaxHighlights, SyntaxTree};

const SAMPLE: &str = r#"package com.example

// Greets people
class Foo {
    fun bar(name: String) {
        println("Hello ${name}!")
    }
}
"#;

fn parse(mode: &mut KotlinMode, source: &str) -> SyntaxTree {
    mode.parse(source).expect("Kotlin grammar should be available")
}

fn spans_tagged(spans: &[Span], tag: &str) -> Vec<Span> {
    let id = highlight_id_for_name(tag).unwrap();
    spans.iter().copied().filter(|s| s.highlight == id).collect()
}

fn offset_of(source: &str, needle: &str) -> usize {
    source.find(needle).unwrap()
}

// ========================================================================
// Highlighting
// ========================================================================

#[test]
fn test_comment_is_highlighted() {
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, SAMPLE);
    let spans = mode.highlight(&tree, 0..SAMPLE.len());

    let start = offset_of(SAMPLE, "// Greets");
    let comments = spans_tagged(&spans, "comment");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].start, start);
    assert_eq!(&SAMPLE[comments[0].range()], "// Greets people");
}

#[test]
fn test_string_is_carved_around_interpolation() {
    let mut mode = KotlinMode::default();
    mode.set_features(vec!["string".to_string()]);
    let tree = parse(&mut mode, SAMPLE);
    let spans = mode.highlight(&tree, 0..SAMPLE.len());

    let strings = spans_tagged(&spans, "string");
    let texts: Vec<_> = strings.iter().map(|s| &SAMPLE[s.range()]).collect();
    assert_eq!(texts, vec!["\"Hello ", "!\""]);

    let embedded = spans_tagged(&spans, "embedded");
    assert_eq!(embedded.len(), 1);
    assert_eq!(&SAMPLE[embedded[0].range()], "name");
}

#[test]
fn test_spans_are_disjoint_and_sorted() {
    let mut mode = KotlinMode::default();
    let features = mode.rules().features_for_level(4);
    mode.set_features(features);
    let tree = parse(&mut mode, SAMPLE);
    let spans = mode.highlight(&tree, 0..SAMPLE.len());

    assert!(!spans.is_empty());
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_definitions_and_keywords() {
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, SAMPLE);
    let spans = mode.highlight(&tree, 0..SAMPLE.len());

    let types: Vec<_> = spans_tagged(&spans, "type")
        .iter()
        .map(|s| &SAMPLE[s.range()])
        .collect();
    assert!(types.contains(&"Foo"));

    let functions: Vec<_> = spans_tagged(&spans, "function")
        .iter()
        .map(|s| &SAMPLE[s.range()])
        .collect();
    assert!(functions.contains(&"bar"));

    let keywords: Vec<_> = spans_tagged(&spans, "keyword")
        .iter()
        .map(|s| &SAMPLE[s.range()])
        .collect();
    assert!(keywords.contains(&"class"));
    assert!(keywords.contains(&"fun"));
}

#[test]
fn test_null_is_builtin_constant() {
    let source = "val x: String? = null\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);
    let spans = mode.highlight(&tree, 0..source.len());

    let start = offset_of(source, "null");
    let null = spans.iter().find(|s| s.start == start).unwrap();
    assert_eq!(&source[null.range()], "null");
    assert_eq!(null.highlight, highlight_id_for_name("constant.builtin").unwrap());
}

#[test]
fn test_angle_brackets_depend_on_context() {
    let source = "val xs: List<Int> = emptyList()\nval b = 1 < 2\n";
    let mut mode = KotlinMode::default();
    let features = mode.rules().features_for_level(4);
    mode.set_features(features);
    let tree = parse(&mut mode, source);
    let spans = mode.highlight(&tree, 0..source.len());
    let tag_at = |offset: usize| {
        spans
            .iter()
            .find(|s| s.start <= offset && offset < s.end)
            .map(|s| s.highlight)
    };

    assert_eq!(
        tag_at(offset_of(source, "<Int")),
        highlight_id_for_name("punctuation.bracket")
    );
    assert_eq!(
        tag_at(offset_of(source, ">")),
        highlight_id_for_name("punctuation.bracket")
    );
    assert_eq!(tag_at(offset_of(source, "< 2")), highlight_id_for_name("operator"));
}

#[test]
fn test_range_limited_highlighting() {
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, SAMPLE);
    let start = offset_of(SAMPLE, "class Foo");
    let end = start + "class Foo".len();
    let spans = mode.highlight(&tree, start..end);

    assert!(spans.iter().all(|s| s.start >= start && s.end <= end));
    assert!(spans_tagged(&spans, "comment").is_empty());
}

#[test]
fn test_per_line_highlights_for_renderer() {
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, SAMPLE);
    let spans = mode.highlight(&tree, 0..SAMPLE.len());
    let lines = SyntaxHighlights::from_spans(&tree, &spans, ktmode::syntax::LanguageId::Kotlin);

    // `// Greets people` is line 2
    let comment = highlight_id_for_name("comment").unwrap();
    assert_eq!(lines.get_line(2).and_then(|l| l.highlight_at(0)), Some(comment));
    assert!(lines.get_line_tokens(1).is_empty());
}

// ========================================================================
// Indentation
// ========================================================================

#[test]
fn test_indentation_inside_method() {
    let source = "class Foo {\n    fun bar() {\n        baz()\n    }\n}\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);

    assert_eq!(mode.indent_line(&tree, 0), 0);
    assert_eq!(mode.indent_line(&tree, 1), 4);
    assert_eq!(mode.indent_line(&tree, 2), 8);
    assert_eq!(mode.indent_line(&tree, 3), 4);
    assert_eq!(mode.indent_line(&tree, 4), 0);
}

#[test]
fn test_indentation_fixes_badly_indented_lines() {
    let source = "class Foo {\nfun bar() {\nbaz()\n}\n}\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);

    // Anchors come from the existing text: the method line is at 0
    assert_eq!(mode.indent_line(&tree, 1), 4);
    assert_eq!(mode.indent_line(&tree, 2), 4);
    assert_eq!(mode.indent_line(&tree, 3), 0);
}

#[test]
fn test_blank_line_in_class_body() {
    let source = "class Foo {\n\n}\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);
    assert_eq!(mode.indent_line(&tree, 1), 4);
}

#[test]
fn test_indent_offset_comes_from_config() {
    let source = "class Foo {\n    fun bar() {\n        baz()\n    }\n}\n";
    let mut mode = KotlinMode::new(ModeConfig {
        indent_offset: 2,
        ..ModeConfig::default()
    });
    let tree = parse(&mut mode, source);
    assert_eq!(mode.indent_line(&tree, 1), 2);
    // The function line itself sits at 4 in the text
    assert_eq!(mode.indent_line(&tree, 2), 6);
}

#[test]
fn test_indentation_is_deterministic() {
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, SAMPLE);
    for line in 0..tree.line_count() {
        assert_eq!(mode.indent_line(&tree, line), mode.indent_line(&tree, line));
    }
}

// ========================================================================
// Outline and test targets
// ========================================================================

#[test]
fn test_outline_class_and_method() {
    let mut mode = KotlinMode::default();
    let outline = mode.outline_source(SAMPLE);
    let groups = outline.grouped();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "Class");
    assert_eq!(groups[0].entries.len(), 1);
    assert_eq!(groups[0].entries[0].name, "Foo");
    assert_eq!(groups[0].entries[0].line, 3);

    assert_eq!(groups[1].category, "Function");
    assert_eq!(groups[1].entries.len(), 1);
    let bar = &groups[1].entries[0];
    assert_eq!(bar.kind, OutlineKind::Function);
    assert_eq!(bar.name, "bar");
    assert_eq!(bar.qualified_name.to_string(), "Foo.bar");
    assert_eq!((bar.line, bar.column), (4, 4));
}

#[test]
fn test_outline_objects_and_document_order() {
    let source = "object Registry {\n    fun register() {}\n}\n\nfun a() {}\nfun b() {}\n";
    let mut mode = KotlinMode::default();
    let entries = mode.outline_source(source).entries();
    let names: Vec<_> = entries
        .iter()
        .map(|e| (e.kind, e.qualified_name.to_string()))
        .collect();
    assert_eq!(
        names,
        vec![
            (OutlineKind::Object, "Registry".to_string()),
            (OutlineKind::Function, "Registry.register".to_string()),
            (OutlineKind::Function, "a".to_string()),
            (OutlineKind::Function, "b".to_string()),
        ]
    );
}

#[test]
fn test_symbol_context_for_test_function() {
    let source =
        "package demo.app\n\nclass FooTest {\n    fun works() {\n        check(true)\n    }\n}\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);
    let context: SymbolContext = mode.symbol_context(&tree, offset_of(source, "check"));

    assert_eq!(context.function_target().unwrap(), "demo.app.FooTest.works");
    assert_eq!(context.class_target().unwrap(), "demo.app.FooTest");
}

#[test]
fn test_symbol_context_outside_function() {
    let source = "class FooTest {\n    val x = 1\n}\n";
    let mut mode = KotlinMode::default();
    let tree = parse(&mut mode, source);
    let context = mode.symbol_context(&tree, offset_of(source, "val"));

    assert_eq!(context.class.as_deref(), Some("FooTest"));
    assert_eq!(context.function, None);
    assert_eq!(
        context.function_target(),
        Err(ktmode::TestTargetError::MissingPackage)
    );
}

// ========================================================================
// Grammar coverage
// ========================================================================

fn grammar_kinds() -> HashSet<String> {
    let types: Vec<serde_json::Value> =
        serde_json::from_str(tree_sitter_kotlin_codanna::NODE_TYPES).unwrap();
    types
        .iter()
        .filter_map(|t| t["type"].as_str())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_tables_only_name_grammar_kinds() {
    let known = grammar_kinds();
    let rules = kotlin::rule_set();
    let indent_rules = kotlin_rules();

    let mut named: Vec<&str> = Vec::new();
    for group in rules.groups() {
        for rule in &group.rules {
            named.extend(rule.predicate.node_kinds());
            if let Some(special) = rule.carve {
                named.extend(special.iter().copied());
            }
        }
    }
    named.extend(indent_rules.iter().filter_map(|r| r.matcher.kind()));

    let unknown: Vec<_> = named
        .into_iter()
        .filter(|kind| *kind != "ERROR" && !known.contains(*kind))
        .collect();
    assert!(unknown.is_empty(), "kinds the grammar never produces: {:?}", unknown);
}
