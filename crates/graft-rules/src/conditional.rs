//! `cond ? a : b` where a branch is a boolean literal.

use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, ConditionalExpr, Literal};
use graft_syntax::{GreenNode, SyntaxNode, SyntaxSet, make};

pub const SIMPLIFY_CONDITIONAL: PatternId = PatternId("simplify-conditional");
pub const SIMPLIFY: BuilderId = BuilderId("simplify");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    True,
    False,
    Other,
}

impl Branch {
    fn of(node: &SyntaxNode) -> Self {
        match Literal::cast(node.clone()).and_then(|lit| lit.as_bool()) {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Other,
        }
    }
}

/// The boolean expression equivalent to `cond ? when_true : when_false`.
///
/// Literal/literal pairs collapse first, then a single literal reduces to
/// the condition or its negation, then the general form.
pub fn simplify(cond: &GreenNode, when_true: &GreenNode, when_false: &GreenNode) -> GreenNode {
    let branch = |node: &GreenNode| match node.children() {
        [child] if node.kind() == LITERAL => match child.kind() {
            TRUE_KW => Branch::True,
            FALSE_KW => Branch::False,
            _ => Branch::Other,
        },
        _ => Branch::Other,
    };
    let not = make::logical_not;

    match (branch(when_true), branch(when_false)) {
        (Branch::True, Branch::True) => make::literal_bool(true),
        (Branch::False, Branch::False) => make::literal_bool(false),
        (Branch::True, Branch::False) => cond.trimmed(),
        (Branch::False, Branch::True) => not(cond),
        (Branch::True, Branch::Other) => make::logical_or(cond, when_false),
        (Branch::False, Branch::Other) => make::logical_and(&not(cond), when_false),
        (Branch::Other, Branch::True) => make::logical_or(&not(cond), when_true),
        (Branch::Other, Branch::False) => make::logical_and(cond, when_true),
        (Branch::Other, Branch::Other) => make::logical_or(
            &make::logical_and(cond, when_true),
            &make::logical_and(&not(cond), when_false),
        ),
    }
}

pub struct SimplifyConditional;

impl Pattern for SimplifyConditional {
    fn id(&self) -> PatternId {
        SIMPLIFY_CONDITIONAL
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([CONDITIONAL_EXPR])
    }

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match> {
        let conditional = ConditionalExpr::cast(node.clone())?;
        let cond = conditional.condition()?;
        let when_true = conditional.when_true()?;
        let when_false = conditional.when_false()?;

        let branches = [Branch::of(&when_true), Branch::of(&when_false)];
        if branches == [Branch::Other; 2] {
            return None;
        }
        // A non-literal branch must be a plain `bool`, or `||`/`&&` would not
        // type check.
        for (branch, expr) in branches.into_iter().zip([&when_true, &when_false]) {
            if branch == Branch::Other {
                let ty = cx.resolver.resolve_type(expr)?;
                if ty.is_error() || ty.name() != "bool" {
                    return None;
                }
            }
        }

        Some(
            Match::new(self.id(), node.clone())
                .capture("cond", cond)
                .capture("when_true", when_true)
                .capture("when_false", when_false),
        )
    }
}

pub struct Simplify;

impl RewriteBuilder for Simplify {
    fn id(&self) -> BuilderId {
        SIMPLIFY
    }

    fn pattern(&self) -> PatternId {
        SIMPLIFY_CONDITIONAL
    }

    fn title(&self, _: &Match) -> String {
        "Simplify conditional expression".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let replacement = simplify(
            m.node("cond")?.green(),
            m.node("when_true")?.green(),
            m.node("when_false")?.green(),
        );
        Some(Rewrite::new().replace(m.anchor().clone(), replacement))
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn nine_cases() {
        let operands = [
            ("true", make::literal_bool(true)),
            ("false", make::literal_bool(false)),
            ("x", make::name_ref("x")),
            ("y", make::name_ref("y")),
        ];
        let cond = make::name_ref("c");

        let mut actual = String::new();
        for (t_text, t) in &operands[..3] {
            for (f_text, f) in [&operands[0], &operands[1], &operands[3]] {
                let result = simplify(&cond, t, f);
                actual.push_str(&format!("c ? {t_text} : {f_text} => {result}\n"));
            }
        }
        expect![[r#"
            c ? true : true => true
            c ? true : false => c
            c ? true : y => c || y
            c ? false : true => !c
            c ? false : false => false
            c ? false : y => !c && y
            c ? x : true => !c || x
            c ? x : false => c && x
            c ? x : y => c && x || !c && y
        "#]]
        .assert_eq(&actual);
    }

    #[test]
    fn operands_are_parenthesized() {
        let cond = make::logical_or(&make::name_ref("a"), &make::name_ref("b"));
        let other = make::logical_or(&make::name_ref("x"), &make::name_ref("y"));
        let f = make::literal_bool(false);
        assert_eq!(simplify(&cond, &other, &f).to_string(), "(a || b) && (x || y)");
        assert_eq!(simplify(&cond, &f, &other).to_string(), "!(a || b) && (x || y)");
    }
}
