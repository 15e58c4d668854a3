//! `xs.Where(x => x is T).Cast<T>()` is `xs.OfType<T>()`.

use graft_engine::unwrap::unwrap_expr;
use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_resolve::{ENUMERABLE, MethodShape};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, Invocation, IsExpr, LambdaExpr, NameRef};
use graft_syntax::{SyntaxNode, SyntaxSet, make};

pub const WHERE_CAST_TO_OFTYPE: PatternId = PatternId("where-cast-to-oftype");
pub const USE_OFTYPE: BuilderId = BuilderId("use-oftype");

pub struct WhereCastToOfType;

impl WhereCastToOfType {
    /// The type tested by `lambda` when it is `p => p is T`, seen through
    /// the bounded unwrap set.
    fn tested_type(lambda: &SyntaxNode, depth: usize) -> Option<SyntaxNode> {
        let params = LambdaExpr::cast(lambda.clone())?.params();
        let [param] = params.as_slice() else { return None };
        let param = param.name()?;

        let test = IsExpr::cast(unwrap_expr(lambda, depth))?;
        let subject = NameRef::cast(unwrap_expr(&test.expr()?, depth))?;
        if subject.name()?.text_trimmed() != param.text_trimmed() {
            return None;
        }
        Some(test.ty()?.syntax().clone())
    }
}

impl Pattern for WhereCastToOfType {
    fn id(&self) -> PatternId {
        WHERE_CAST_TO_OFTYPE
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([INVOCATION])
    }

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match> {
        let cast = Invocation::cast(node.clone())?;
        let cast_access = cast.member_access()?;
        let cast_name = cast_access.generic_name()?;
        if cast_name.name()?.text_trimmed() != "Cast" {
            return None;
        }
        let mut type_args = cast_name.type_args()?.types();
        let cast_type = type_args.next()?;
        if type_args.next().is_some() {
            return None;
        }

        let filter = Invocation::cast(cast_access.receiver()?)?;
        let filter_access = filter.member_access()?;
        if filter_access.name()?.text_trimmed() != "Where" {
            return None;
        }
        let mut args = filter.args();
        let (Some(lambda), None) = (args.next(), args.next()) else { return None };
        let tested = Self::tested_type(&lambda, cx.config.unwrap_depth)?;

        let resolver = cx.resolver;
        let is_linq = |call: &Invocation, name: &str, shape: MethodShape| {
            resolver
                .resolve_method(call.syntax())
                .is_some_and(|method| method.is_library_method(ENUMERABLE, name, shape))
        };
        if !is_linq(&filter, "Where", MethodShape::Predicate)
            || !is_linq(&cast, "Cast", MethodShape::Parameterless)
        {
            return None;
        }
        let tested_ty = resolver.resolve_type(&tested)?;
        let cast_ty = resolver.resolve_type(cast_type.syntax())?;
        if !resolver.types_equal(&tested_ty, &cast_ty) {
            return None;
        }

        Some(
            Match::new(self.id(), node.clone())
                .capture("source", filter_access.receiver()?)
                .capture("type", cast_type.syntax().clone()),
        )
    }
}

pub struct UseOfType;

impl RewriteBuilder for UseOfType {
    fn id(&self) -> BuilderId {
        USE_OFTYPE
    }

    fn pattern(&self) -> PatternId {
        WHERE_CAST_TO_OFTYPE
    }

    fn title(&self, m: &Match) -> String {
        let ty = m.node("type").map(SyntaxNode::text_trimmed).unwrap_or_default();
        format!("Use `OfType<{ty}>()`")
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let source = m.node("source")?.green();
        let ty = m.node("type")?.green();
        let callee = make::member_access(source, make::generic_name("OfType", &[ty.clone()]));
        Some(Rewrite::new().replace(m.anchor().clone(), make::invocation(&callee, &[])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tested(lambda: &str, depth: usize) -> Option<String> {
        let text = format!("class C {{ object f = {lambda}; }}");
        let root = graft_parse::parse(&text).syntax();
        let lambda = root.descendants().find(|node| node.kind() == LAMBDA_EXPR).unwrap();
        WhereCastToOfType::tested_type(&lambda, depth).map(|ty| ty.text_trimmed())
    }

    #[test]
    fn predicate_spellings() {
        assert_eq!(tested("x => x is Foo", 4).as_deref(), Some("Foo"));
        assert_eq!(tested("(x) => (x is Foo)", 4).as_deref(), Some("Foo"));
        assert_eq!(tested("x => { return (x) is Foo; }", 4).as_deref(), Some("Foo"));
        assert_eq!(tested("x => ((((x is Foo))))", 2), None);
        assert_eq!(tested("x => y is Foo", 4), None);
        assert_eq!(tested("(x, y) => x is Foo", 4), None);
    }
}
