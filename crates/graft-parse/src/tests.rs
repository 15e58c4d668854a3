use expect_test::expect;
use graft_syntax::SyntaxKind::{self, *};
use graft_syntax::SyntaxNode;
use proptest::prelude::*;

use crate::parse;

fn kinds_in(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.descendants().map(|node| node.kind()).collect()
}

fn error_messages(text: &str) -> Vec<String> {
    parse(text).errors().iter().map(|error| error.message().to_owned()).collect()
}

fn method_body(stmts: &str) -> String {
    format!("class C {{\n    void M()\n    {{\n        {stmts}\n    }}\n}}\n")
}

#[test]
fn field_declaration() {
    let parse = parse("class C { int x = 1; }");
    expect![[r#"
        COMPILATION_UNIT@0..22
          CLASS_DECL@0..22
            CLASS_KW@0..5 "class"
            NAME@6..7 "C"
            L_BRACE@8..9 "{"
            FIELD_DECL@10..21
              TYPE_REF@10..14
                NAME@10..13 "int"
              VARIABLE_DECLARATOR@14..19
                NAME@14..15 "x"
                EQ@16..17 "="
                LITERAL@18..19
                  INT_NUMBER@18..19 "1"
              SEMICOLON@19..20 ";"
            R_BRACE@21..22 "}"
          EOF@22..22 ""
    "#]]
    .assert_eq(&parse.syntax().debug_dump());
    assert!(parse.errors().is_empty());
}

#[test]
fn missing_close_paren() {
    let text = method_body("if (x > 0 { }");
    let parse = parse(&text);
    assert_eq!(parse.syntax().to_string(), text);
    assert_eq!(error_messages(&text), vec!["expected `)`"]);

    let missing: Vec<_> = parse
        .syntax()
        .descendant_tokens()
        .filter(|token| token.is_missing())
        .map(|token| token.kind())
        .collect();
    assert_eq!(missing, vec![R_PAREN]);
}

#[test]
fn member_kinds() {
    let text = "\
public class Service
{
    private readonly object _gate = new object();
    public Service() { }
    public static int Count(List<int> items, int[] extra) { return 0; }
    struct Inner { }
}
";
    let parse = parse(text);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let kinds = kinds_in(&parse.syntax());
    assert_eq!(kinds.iter().filter(|&&kind| kind == METHOD_DECL).count(), 2);
    assert!(kinds.contains(&FIELD_DECL));
    assert!(kinds.contains(&OBJECT_CREATION));
    assert!(kinds.contains(&STRUCT_DECL));
}

#[test]
fn expression_body_is_not_a_member() {
    // `=>` method bodies are outside the grammar; the parser recovers.
    let text = "class C { int M() => 0; }";
    let parse = parse(text);
    assert_eq!(parse.syntax().to_string(), text);
    assert!(!parse.errors().is_empty());
}

#[test]
fn linq_chain() {
    let text = method_body("var foos = items.Where(x => x is Foo).Cast<Foo>();");
    let parse = parse(&text);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let kinds = kinds_in(&parse.syntax());
    for kind in [LOCAL_DECL, LAMBDA_EXPR, IS_EXPR, GENERIC_NAME, TYPE_ARG_LIST] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn comparison_is_not_generic() {
    let text = method_body("var b = a < c && d > e;");
    let parse = parse(&text);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let kinds = kinds_in(&parse.syntax());
    assert!(!kinds.contains(&GENERIC_NAME));
    assert_eq!(kinds.iter().filter(|&&kind| kind == BINARY_EXPR).count(), 3);
}

#[test]
fn precedence() {
    let text = method_body("return !a || b && c == d ? x.Count() > 0 : y;");
    let parse = parse(&text);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let conditional = parse
        .syntax()
        .descendants()
        .find(|node| node.kind() == CONDITIONAL_EXPR)
        .unwrap();
    let condition = conditional.children().next().unwrap();
    assert_eq!(condition.text_trimmed(), "!a || b && c == d");
    let or_rhs = condition.children().nth(1).unwrap();
    assert_eq!(or_rhs.text_trimmed(), "b && c == d");
}

#[test]
fn statements() {
    let text = method_body(
        "lock (this) { count = count + 1; }\n        if (done) return; else { Reset(); }\n        List<int> xs = null;",
    );
    let parse = parse(&text);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let kinds = kinds_in(&parse.syntax());
    for kind in [LOCK_STMT, THIS_EXPR, ASSIGN_EXPR, IF_STMT, ELSE_CLAUSE, RETURN_STMT, LOCAL_DECL]
    {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn trivia_stays_with_tokens() {
    let text = "class C\n{\n    // leading\n    int x; // trailing\n}\n";
    let parse = parse(text);
    let field = parse.syntax().descendants().find(|node| node.kind() == FIELD_DECL).unwrap();
    let first = field.first_token().unwrap();
    assert_eq!(first.green().leading().text(), "    // leading\n    ");
    let last = field.last_token().unwrap();
    assert_eq!(last.green().trailing().text(), " // trailing\n");
}

#[test]
fn garbage_is_reported() {
    let text = "using System; ) class C { ; }";
    let parse = parse(text);
    assert_eq!(parse.syntax().to_string(), text);
    assert!(error_messages(text).contains(&"expected a type declaration".to_owned()));
}

proptest! {
    #[test]
    fn parse_is_lossless(text in "\\PC{0,80}") {
        prop_assert_eq!(parse(&text).syntax().to_string(), text);
    }

    #[test]
    fn truncated_source_is_lossless(cut in 0usize..160) {
        let source = method_body(
            "var n = items.Where(x => x != null).Count() > 0 ? a : !b; lock (this) { }",
        );
        let cut =
            (0..=cut.min(source.len())).rev().find(|&i| source.is_char_boundary(i)).unwrap_or(0);
        let text = &source[..cut];
        prop_assert_eq!(parse(text).syntax().to_string(), text);
    }
}
