//! `"a" + "b"` is `"ab"`, or a verbatim literal when the parts hold line
//! breaks.

use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, BinaryExpr, Literal, LiteralKind};
use graft_syntax::{SyntaxNode, SyntaxSet, make};

pub const MERGE_STRING_LITERALS: PatternId = PatternId("merge-string-literals");
pub const MERGE: BuilderId = BuilderId("merge");
pub const MERGE_MULTILINE: BuilderId = BuilderId("merge-multiline");

pub struct MergeStringLiterals;

/// Leaves of a left-nested `+` chain, if every leaf is a string literal.
fn literal_chain(node: &SyntaxNode) -> Option<Vec<SyntaxNode>> {
    let mut parts = Vec::new();
    let mut current = node.clone();
    loop {
        match BinaryExpr::cast(current.clone()) {
            Some(binary) if binary.op_kind() == Some(PLUS) => {
                let rhs = binary.rhs().filter(is_string)?;
                parts.push(rhs);
                current = binary.lhs()?;
            }
            _ if is_string(&current) => {
                parts.push(current);
                break;
            }
            _ => return None,
        }
    }
    parts.reverse();
    (parts.len() >= 2).then_some(parts)
}

fn is_string(node: &SyntaxNode) -> bool {
    contents(node).is_some()
}

/// Text between the quotes of a terminated string literal.
fn contents(node: &SyntaxNode) -> Option<String> {
    let literal = Literal::cast(node.clone())?;
    if literal.kind()? != LiteralKind::String {
        return None;
    }
    let token = literal.token()?;
    let inner = token.text_trimmed().strip_prefix('"')?;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return (i + 1 == inner.len()).then(|| inner[..i].to_owned()),
            _ => {}
        }
    }
    None
}

impl Pattern for MergeStringLiterals {
    fn id(&self) -> PatternId {
        MERGE_STRING_LITERALS
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([BINARY_EXPR])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let parts = literal_chain(node)?;
        // Only the longest chain is reported.
        let extends = node.parent().and_then(BinaryExpr::cast).is_some_and(|parent| {
            parent.op_kind() == Some(PLUS)
                && parent.lhs().as_ref() == Some(node)
                && parent.rhs().is_some_and(|rhs| is_string(&rhs))
        });
        if extends {
            return None;
        }
        Some(Match::new(self.id(), node.clone()).capture("parts", parts))
    }
}

pub struct Merge;

impl RewriteBuilder for Merge {
    fn id(&self) -> BuilderId {
        MERGE
    }

    fn pattern(&self) -> PatternId {
        MERGE_STRING_LITERALS
    }

    fn title(&self, _: &Match) -> String {
        "Merge string literals".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let mut merged = String::from("\"");
        for part in m.nodes("parts") {
            merged.push_str(&contents(part)?);
        }
        merged.push('"');
        Some(Rewrite::new().replace(m.anchor().clone(), make::literal_string(&merged)))
    }
}

/// Verbatim form of a regular literal's contents, with `\n` escapes written
/// as line breaks. `None` if an escape has no verbatim spelling.
fn verbatim(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push_str("\"\""),
            _ => return None,
        }
    }
    Some(out)
}

pub struct MergeMultiline;

impl RewriteBuilder for MergeMultiline {
    fn id(&self) -> BuilderId {
        MERGE_MULTILINE
    }

    fn pattern(&self) -> PatternId {
        MERGE_STRING_LITERALS
    }

    fn title(&self, _: &Match) -> String {
        "Merge string literals into a multiline literal".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let mut escaped = String::new();
        for part in m.nodes("parts") {
            escaped.push_str(&contents(part)?);
        }
        let text = verbatim(&escaped)?;
        if !text.contains('\n') {
            return None;
        }
        let literal = make::literal_string(&format!("@\"{text}\""));
        Some(Rewrite::new().replace(m.anchor().clone(), literal))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn chain(expr: &str) -> Option<Vec<String>> {
        let text = format!("class C {{ string s = {expr}; }}");
        let root = graft_parse::parse(&text).syntax();
        let top = root.descendants().find(|node| node.kind() == BINARY_EXPR)?;
        literal_chain(&top).map(|parts| parts.iter().map(SyntaxNode::text_trimmed).collect())
    }

    #[test]
    fn chains() {
        let parts = chain(r#""a" + "b" + "c""#).unwrap();
        assert_eq!(parts, [r#""a""#, r#""b""#, r#""c""#]);
        assert_eq!(chain(r#""a" + x"#), None);
        assert_eq!(chain(r#""a" + ("b" + "c")"#), None);
        assert_eq!(chain(r#""a" - "b""#), None);
    }

    #[test]
    fn only_terminated_literals() {
        let root = graft_parse::parse("class C { string s = \"a\\\"b\" + \"c\\\\\"; }").syntax();
        let literals: Vec<_> = root.descendants().filter(|node| node.kind() == LITERAL).collect();
        assert_eq!(contents(&literals[0]).as_deref(), Some(r#"a\"b"#));
        assert_eq!(contents(&literals[1]).as_deref(), Some(r"c\\"));

        let root = graft_parse::parse("class C { string s = \"open\n; }").syntax();
        let open = root.descendants().find(|node| node.kind() == LITERAL).unwrap();
        assert_eq!(contents(&open), None);
    }

    #[test]
    fn verbatim_spelling() {
        assert_eq!(verbatim(r"line\nnext").as_deref(), Some("line\nnext"));
        assert_eq!(verbatim(r#"say \"hi\"\t\\"#).as_deref(), Some("say \"\"hi\"\"\t\\"));
        assert_eq!(verbatim(r"\u0041"), None);
        assert_eq!(verbatim(r"trailing\"), None);
    }

    proptest! {
        #[test]
        fn chains_concatenate(parts in proptest::collection::vec("[a-z ]{0,4}", 2..6)) {
            let expr: Vec<String> = parts.iter().map(|part| format!("\"{part}\"")).collect();
            let text = format!("class C {{ string s = {}; }}", expr.join(" + "));
            let root = graft_parse::parse(&text).syntax();
            let top = root.descendants().find(|node| node.kind() == BINARY_EXPR).unwrap();

            let chain = literal_chain(&top).unwrap();
            prop_assert_eq!(chain.len(), parts.len());
            let merged: String = chain.iter().filter_map(contents).collect();
            prop_assert_eq!(merged, parts.concat());
        }
    }
}
