use std::fmt::Write as _;
use std::sync::Arc;

use expect_test::{Expect, expect};
use graft_analysis::FixtureResolver;
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, BinaryExpr, NameRef, ParenExpr};
use graft_syntax::{SyntaxNode, SyntaxSet, SyntaxTree, make};
use proptest::prelude::*;

use super::*;

struct Rename;

impl Pattern for Rename {
    fn id(&self) -> PatternId {
        PatternId("rename")
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([NAME_REF])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let name = NameRef::cast(node.clone())?.name()?;
        (name.text_trimmed() == "x").then(|| Match::new(self.id(), node.clone()))
    }
}

struct ToY;

impl RewriteBuilder for ToY {
    fn id(&self) -> BuilderId {
        BuilderId("to-y")
    }

    fn pattern(&self) -> PatternId {
        PatternId("rename")
    }

    fn title(&self, _: &Match) -> String {
        "Rename to y".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        Some(Rewrite::new().replace(m.anchor().clone(), make::name_ref("y")))
    }
}

struct Decline;

impl RewriteBuilder for Decline {
    fn id(&self) -> BuilderId {
        BuilderId("decline")
    }

    fn pattern(&self) -> PatternId {
        PatternId("rename")
    }

    fn title(&self, _: &Match) -> String {
        "Never applies".to_owned()
    }

    fn build(&self, _: &Match, _: &Context<'_>) -> Option<Rewrite> {
        None
    }
}

struct Sums;

impl Pattern for Sums {
    fn id(&self) -> PatternId {
        PatternId("sums")
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([BINARY_EXPR])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let binary = BinaryExpr::cast(node.clone())?;
        (binary.op_kind()? == PLUS).then(|| Match::new(self.id(), node.clone()))
    }
}

struct Parens;

impl Pattern for Parens {
    fn id(&self) -> PatternId {
        PatternId("parens")
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([PAREN_EXPR])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let inner = ParenExpr::cast(node.clone())?.expr()?;
        Some(Match::new(self.id(), node.clone()).capture("inner", inner))
    }
}

struct Unparen;

impl RewriteBuilder for Unparen {
    fn id(&self) -> BuilderId {
        BuilderId("unparen")
    }

    fn pattern(&self) -> PatternId {
        PatternId("parens")
    }

    fn title(&self, _: &Match) -> String {
        "Remove parentheses".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let inner = m.node("inner")?;
        Some(Rewrite::new().replace(m.anchor().clone(), inner.green().clone()))
    }
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_pattern(Arc::new(Sums));
    registry.register_pattern(Arc::new(Rename));
    registry.register_pattern(Arc::new(Parens));
    registry.register_builder(Arc::new(ToY));
    registry.register_builder(Arc::new(Decline));
    registry.register_builder(Arc::new(Unparen));
    registry
}

fn engine(config: EngineConfig) -> Engine {
    Engine::new(registry(), config)
}

fn tree(text: &str) -> SyntaxTree {
    graft_parse::parse(text).into_tree()
}

fn render(matches: &[Match]) -> String {
    let mut out = String::new();
    for m in matches {
        let anchor = m.anchor();
        writeln!(out, "{} {:?} {}", m.pattern(), anchor.trimmed_range(), anchor.text_trimmed())
            .unwrap();
    }
    out
}

fn check_pass(text: &str, expect: Expect) {
    let outcome = engine(EngineConfig::default()).run_pass(
        &tree(text),
        &FixtureResolver,
        &Cancellation::new(),
    );
    assert!(outcome.completed);
    expect.assert_eq(&render(&outcome.matches));
}

fn find(engine: &Engine, tree: &SyntaxTree, pattern: &str) -> Match {
    let outcome = engine.run_pass(tree, &FixtureResolver, &Cancellation::new());
    outcome.matches.into_iter().find(|m| m.pattern().as_str() == pattern).unwrap()
}

#[test]
fn matches_are_innermost_first_on_ties() {
    check_pass(
        "class C { int v = a + b + c; int w = x; }",
        expect![[r#"
            sums 18..23 a + b
            sums 18..27 a + b + c
            rename 37..38 x
        "#]],
    );
}

#[test]
fn comments_suppress_matches() {
    check_pass(
        "class C { int v = x /* keep */; int w = x; }",
        expect![[r#"
            rename 40..41 x
        "#]],
    );
}

#[test]
fn missing_tokens_suppress_matches() {
    check_pass(
        "class C { int v = (x; int w = x; }",
        expect![[r#"
            rename 30..31 x
        "#]],
    );
}

#[test]
fn rewrites_are_gated_again() {
    let engine = engine(EngineConfig::default());
    let resolver = FixtureResolver;

    let unsafe_tree = tree("class C { int v = x /* keep */; }");
    let x = unsafe_tree.root().descendants().find(|node| node.kind() == NAME_REF).unwrap();
    let m = Match::new(PatternId("rename"), x);
    assert_eq!(
        engine.apply_rewrite(&unsafe_tree, &m, BuilderId("to-y"), &resolver).unwrap_err(),
        EngineError::UnsafeRegion { range: m.safety_span() }
    );

    let broken = tree("class C { int v = (x; }");
    let paren = broken.root().descendants().find(|node| node.kind() == PAREN_EXPR).unwrap();
    let m = Parens.find(&paren, &Context { resolver: &resolver, config: engine.config() }).unwrap();
    assert_eq!(
        engine.apply_rewrite(&broken, &m, BuilderId("unparen"), &resolver).unwrap_err(),
        EngineError::MissingSyntax { range: m.safety_span() }
    );
}

#[test]
fn builders_are_chosen_by_the_caller() {
    let engine = engine(EngineConfig::default());
    let before = tree("class C {\n    int v = (x);\n}\n");

    let m = find(&engine, &before, "rename");
    assert_eq!(engine.diagnostic(&m).message(), "Rename to y");
    assert_eq!(
        engine.apply_rewrite(&before, &m, BuilderId("decline"), &FixtureResolver).unwrap_err(),
        EngineError::BuilderDeclined { builder: BuilderId("decline") }
    );
    assert_eq!(
        engine.apply_rewrite(&before, &m, BuilderId("unparen"), &FixtureResolver).unwrap_err(),
        EngineError::UnknownBuilder {
            pattern: PatternId("rename"),
            builder: BuilderId("unparen"),
        }
    );

    let after = engine.apply_rewrite(&before, &m, BuilderId("to-y"), &FixtureResolver).unwrap();
    assert_eq!(after.to_string(), "class C {\n    int v = (y);\n}\n");

    let m = find(&engine, &after, "parens");
    let after = engine.apply_rewrite(&after, &m, BuilderId("unparen"), &FixtureResolver).unwrap();
    assert_eq!(after.to_string(), "class C {\n    int v = y;\n}\n");
}

#[test]
fn diagnostics_cover_the_highlight() {
    let engine = engine(EngineConfig::default());
    let tree = tree("class C { int v = x; }");
    let m = find(&engine, &tree, "rename");
    assert_eq!(engine.diagnostic(&m).range(), m.anchor().trimmed_range());

    let start = graft_syntax::TextRange::empty(m.anchor().trimmed_range().start());
    let m = m.capture(HIGHLIGHT, start);
    assert_eq!(engine.diagnostic(&m).range(), start);
}

#[test]
fn document_rejects_stale_matches() {
    let engine = engine(EngineConfig::default());
    let document = Document::new(tree("class C { int v = x; int w = x; }"));
    let first = document.tree();

    let outcome = engine.run_pass(&first, &FixtureResolver, &Cancellation::new());
    assert_eq!(outcome.matches.len(), 2);

    document.apply(&engine, &outcome.matches[0], BuilderId("to-y"), &FixtureResolver).unwrap();
    assert_eq!(document.tree().to_string(), "class C { int v = y; int w = x; }");

    // The second match still points into the first version.
    let stale = &outcome.matches[1];
    let error = document.apply(&engine, stale, BuilderId("to-y"), &FixtureResolver).unwrap_err();
    assert_eq!(error, EngineError::StaleMatch);
    assert_eq!(document.tree().to_string(), "class C { int v = y; int w = x; }");
    assert_eq!(first.to_string(), "class C { int v = x; int w = x; }");

    let current = document.tree();
    let m = find(&engine, &current, "rename");
    let rewritten = document.apply(&engine, &m, BuilderId("to-y"), &FixtureResolver).unwrap();
    assert!(rewritten.ptr_eq(&document.tree()));
    assert_eq!(rewritten.to_string(), "class C { int v = y; int w = y; }");
}

#[test]
fn cancelled_pass_is_partial() {
    let engine = engine(EngineConfig::default());
    let tree = tree("class C { int v = x; }");
    let cancel = Cancellation::new();
    cancel.cancel();

    let outcome = engine.run_pass(&tree, &FixtureResolver, &cancel);
    assert!(!outcome.completed);
    assert!(outcome.matches.is_empty());

    let mut lazy = engine.matches(&tree, &FixtureResolver, &cancel);
    assert_eq!(lazy.next(), None);
    assert!(!lazy.completed());

    // Collecting candidates stops as soon as the signal is seen.
    let (candidates, interrupted) = engine.candidates(&tree.root(), &cancel);
    assert!(candidates.is_empty());
    assert!(interrupted);
    let (candidates, interrupted) = engine.candidates(&tree.root(), &Cancellation::new());
    assert!(!candidates.is_empty());
    assert!(!interrupted);
}

#[test]
fn lazy_pass_can_stop_early() {
    let engine = engine(EngineConfig::default());
    let tree = tree("class C { int v = x; int w = x + x; }");
    let cancel = Cancellation::new();

    let mut lazy = engine.matches(&tree, &FixtureResolver, &cancel);
    let first = lazy.next().unwrap();
    assert_eq!(first.anchor().text_trimmed(), "x");
    cancel.cancel();
    let rest: Vec<Match> = lazy.by_ref().collect();
    assert!(rest.len() < 3);
    assert!(!lazy.completed());
}

fn fields(names: &[String]) -> String {
    let mut text = String::from("class C\n{\n");
    for (i, name) in names.iter().enumerate() {
        writeln!(text, "    int f{i} = {name} + (x + {name});").unwrap();
    }
    text.push_str("}\n");
    text
}

#[test]
fn parallel_sequential_and_lazy_passes_agree() {
    let names: Vec<String> = (0..200).map(|i| format!("n{i}")).collect();
    let tree = tree(&fields(&names));
    let cancel = Cancellation::new();

    let parallel = EngineConfig { parallel_threshold: 0, ..EngineConfig::default() };
    let sequential = EngineConfig { parallel: false, ..EngineConfig::default() };

    let a = engine(parallel).run_pass(&tree, &FixtureResolver, &cancel);
    let b = engine(sequential.clone()).run_pass(&tree, &FixtureResolver, &cancel);
    let engine = engine(sequential);
    let lazy = engine.matches(&tree, &FixtureResolver, &cancel);
    let c: Vec<Match> = lazy.collect();

    assert_eq!(a.matches.len(), 200 * 4);
    assert_eq!(a.matches, b.matches);
    assert_eq!(a.matches, c);
}

proptest! {
    #[test]
    fn passes_are_deterministic(names in prop::collection::vec("[a-z]{1,3}", 0..20)) {
        let tree = tree(&fields(&names));
        let engine = engine(EngineConfig { parallel_threshold: 0, ..EngineConfig::default() });
        let cancel = Cancellation::new();

        let first = engine.run_pass(&tree, &FixtureResolver, &cancel);
        let second = engine.run_pass(&tree, &FixtureResolver, &cancel);
        let lazy: Vec<Match> = engine.matches(&tree, &FixtureResolver, &cancel).collect();
        prop_assert!(first.completed);
        prop_assert_eq!(&first.matches, &second.matches);
        prop_assert_eq!(&first.matches, &lazy);
    }
}
