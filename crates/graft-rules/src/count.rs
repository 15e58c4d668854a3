//! `Count()` on a collection that already knows its size.

use graft_engine::{
    BuilderId, Context, HIGHLIGHT, Match, Pattern, PatternId, Rewrite, RewriteBuilder,
};
use graft_resolve::{ENUMERABLE, MethodShape, TypeHandle};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, BinaryExpr, Invocation, Literal, MemberAccess};
use graft_syntax::{GreenNode, SyntaxNode, SyntaxSet, TextRange, make};

pub const COUNT_TO_PROPERTY: PatternId = PatternId("count-to-property");
pub const USE_PROPERTY: BuilderId = BuilderId("use-property");
pub const COUNT_TO_ANY: PatternId = PatternId("count-to-any");
pub const USE_ANY: BuilderId = BuilderId("use-any");

const SIZE_PROPERTIES: [&str; 2] = ["Length", "Count"];

/// A call to the parameterless `Count` extension and the type of its receiver.
fn parameterless_count(node: &SyntaxNode, cx: &Context<'_>) -> Option<(MemberAccess, TypeHandle)> {
    let call = Invocation::cast(node.clone())?;
    let access = call.member_access()?;
    if access.name()?.text_trimmed() != "Count" || call.args().next().is_some() {
        return None;
    }
    let method = cx.resolver.resolve_method(node)?;
    if !method.is_library_method(ENUMERABLE, "Count", MethodShape::Parameterless) {
        return None;
    }
    let receiver = cx.resolver.resolve_type(&access.receiver()?)?;
    (!receiver.is_error()).then_some((access, receiver))
}

fn size_property(ty: &TypeHandle) -> Option<&'static str> {
    if ty.is_sequence() {
        return None;
    }
    SIZE_PROPERTIES.into_iter().find(|property| ty.has_property(property))
}

/// `access` with its member name replaced by `name`, keeping the trivia of
/// every token.
fn renamed(access: &MemberAccess, name: &str) -> Option<GreenNode> {
    let old = access.name()?;
    let name_node = access.name_node()?;
    let new = GreenNode::new(NAME_REF, [old.green().with_text(name).into()]);
    Some(access.syntax().green().replace_child(name_node.index(), new.into()))
}

pub struct CountToProperty;

impl Pattern for CountToProperty {
    fn id(&self) -> PatternId {
        COUNT_TO_PROPERTY
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([INVOCATION])
    }

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match> {
        let (access, receiver) = parameterless_count(node, cx)?;
        size_property(&receiver)?;
        let name = access.name()?;
        let span = TextRange::new(name.trimmed_range().start(), node.trimmed_range().end());
        Some(
            Match::new(self.id(), node.clone())
                .capture("access", access.syntax().clone())
                .capture(HIGHLIGHT, span)
                .with_safety_span(span),
        )
    }
}

pub struct UseProperty;

impl RewriteBuilder for UseProperty {
    fn id(&self) -> BuilderId {
        USE_PROPERTY
    }

    fn pattern(&self) -> PatternId {
        COUNT_TO_PROPERTY
    }

    fn title(&self, _: &Match) -> String {
        "Use the size property instead of `Count()`".to_owned()
    }

    fn build(&self, m: &Match, cx: &Context<'_>) -> Option<Rewrite> {
        let access = MemberAccess::cast(m.node("access")?.clone())?;
        let receiver = cx.resolver.resolve_type(&access.receiver()?)?;
        let property = size_property(&receiver)?;
        Some(Rewrite::new().replace(m.anchor().clone(), renamed(&access, property)?))
    }
}

/// Comparisons of `Count()` with zero that only ask whether anything exists.
pub struct CountToAny;

impl CountToAny {
    /// The `Count()` call and whether the comparison asks for emptiness.
    fn comparison(binary: &BinaryExpr) -> Option<(SyntaxNode, bool)> {
        let (lhs, rhs) = (binary.lhs()?, binary.rhs()?);
        let is_zero =
            |node: &SyntaxNode| Literal::cast(node.clone()).is_some_and(|lit| lit.is_zero());
        match binary.op_kind()? {
            EQ_EQ if is_zero(&rhs) => Some((lhs, true)),
            EQ_EQ if is_zero(&lhs) => Some((rhs, true)),
            GT if is_zero(&rhs) => Some((lhs, false)),
            LT if is_zero(&lhs) => Some((rhs, false)),
            _ => None,
        }
    }
}

impl Pattern for CountToAny {
    fn id(&self) -> PatternId {
        COUNT_TO_ANY
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([BINARY_EXPR])
    }

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match> {
        let binary = BinaryExpr::cast(node.clone())?;
        let (call, _) = Self::comparison(&binary)?;
        let (access, receiver) = parameterless_count(&call, cx)?;
        if size_property(&receiver).is_some() {
            return None;
        }
        Some(
            Match::new(self.id(), node.clone())
                .capture("call", call)
                .capture("access", access.syntax().clone()),
        )
    }
}

pub struct UseAny;

impl RewriteBuilder for UseAny {
    fn id(&self) -> BuilderId {
        USE_ANY
    }

    fn pattern(&self) -> PatternId {
        COUNT_TO_ANY
    }

    fn title(&self, _: &Match) -> String {
        "Use `Any()` instead of comparing `Count()` with zero".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let (_, negate) = CountToAny::comparison(&BinaryExpr::cast(m.anchor().clone())?)?;
        let call = m.node("call")?;
        let access = MemberAccess::cast(m.node("access")?.clone())?;

        let any =
            call.green().replace_child(access.syntax().index(), renamed(&access, "Any")?.into());
        let replacement = if negate { make::logical_not(&any) } else { any.trimmed() };
        Some(Rewrite::new().replace(m.anchor().clone(), replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_with_zero() {
        let cases = [
            ("x.Count() == 0", Some(true)),
            ("0 == x.Count()", Some(true)),
            ("x.Count() > 0", Some(false)),
            ("0 < x.Count()", Some(false)),
            ("x.Count() < 0", None),
            ("x.Count() != 0", None),
            ("x.Count() == 1", None),
        ];
        for (expr, expected) in cases {
            let text = format!("class C {{ bool b = {expr}; }}");
            let root = graft_parse::parse(&text).syntax();
            let binary = root.descendants().find_map(BinaryExpr::cast).unwrap();
            let actual = CountToAny::comparison(&binary);
            assert_eq!(actual.as_ref().map(|&(_, negate)| negate), expected, "{expr}");
            if let Some((call, _)) = actual {
                assert_eq!(call.text_trimmed(), "x.Count()");
            }
        }
    }
}
