//! `lock (this)` locks on an object outside code can also lock on; lock on a
//! dedicated private field instead.

use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_resolve::unique_name;
use graft_syntax::SyntaxKind::{self, *};
use graft_syntax::ast::{AstNode as _, LockStmt, MethodDecl};
use graft_syntax::{GreenNode, GreenTrivia, SyntaxNode, SyntaxSet, TriviaPieceKind, make};

pub const LOCK_ON_THIS: PatternId = PatternId("lock-field");
pub const INTRODUCE_LOCK_FIELD: BuilderId = BuilderId("introduce-lock-field");

const LOCK_FIELD_NAME: &str = "_lockObject";

pub struct LockOnThis;

impl Pattern for LockOnThis {
    fn id(&self) -> PatternId {
        LOCK_ON_THIS
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([LOCK_STMT])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let target = LockStmt::cast(node.clone())?.expr()?;
        if target.kind() != THIS_EXPR {
            return None;
        }
        let method = node.ancestors().find(|ancestor| ancestor.kind() == METHOD_DECL)?;
        let owner = method.parent().filter(|parent| parent.kind().is_type_decl())?;
        Some(
            Match::new(self.id(), node.clone())
                .capture("target", target.clone())
                .capture("member", method)
                .capture("owner", owner)
                .with_safety_span(target.trimmed_range()),
        )
    }
}

pub struct IntroduceLockField;

impl IntroduceLockField {
    fn field(name: &str, is_static: bool, member: &SyntaxNode) -> GreenNode {
        let modifiers: &[SyntaxKind] = if is_static {
            &[PRIVATE_KW, STATIC_KW, READONLY_KW]
        } else {
            &[PRIVATE_KW, READONLY_KW]
        };
        let object = make::type_ref("object");
        let field =
            make::field_decl(modifiers, &object, name, Some(&make::object_creation(&object)));

        // Lay the field out like the member it follows: on its own line with
        // the same indentation, or on the same line if the member shares one.
        let ends_line = member.last_token().is_some_and(|token| {
            token.trailing_trivia().any(|trivia| trivia.kind == TriviaPieceKind::Newline)
        });
        if !ends_line {
            return field.with_trailing_trivia(GreenTrivia::whitespace(" "));
        }
        let indent = member
            .first_token()
            .map(|token| indentation(token.green().leading().text()).to_owned())
            .unwrap_or_default();
        let leading =
            if indent.is_empty() { GreenTrivia::empty() } else { GreenTrivia::whitespace(&indent) };
        field
            .with_leading_trivia(leading)
            .with_trailing_trivia(GreenTrivia::single(TriviaPieceKind::Newline, "\n"))
    }
}

/// The whitespace after the last line break of `leading`.
pub(crate) fn indentation(leading: &str) -> &str {
    let line = leading.rsplit('\n').next().unwrap_or_default();
    if line.chars().all(|c| c == ' ' || c == '\t') { line } else { "" }
}

impl RewriteBuilder for IntroduceLockField {
    fn id(&self) -> BuilderId {
        INTRODUCE_LOCK_FIELD
    }

    fn pattern(&self) -> PatternId {
        LOCK_ON_THIS
    }

    fn title(&self, _: &Match) -> String {
        "Lock on a private field".to_owned()
    }

    fn build(&self, m: &Match, cx: &Context<'_>) -> Option<Rewrite> {
        let target = m.node("target")?;
        let member = m.node("member")?;
        let is_static = MethodDecl::cast(member.clone())?.has_modifier(STATIC_KW);

        let name = unique_name(LOCK_FIELD_NAME, m.anchor(), cx.resolver, cx.config.suffix_start);
        tracing::trace!(%name, is_static, "introducing lock field");
        Rewrite::new()
            .replace(target.clone(), make::name_ref(&name))
            .insert_after(member, Self::field(&name, is_static, member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_of_leading_trivia() {
        assert_eq!(indentation(""), "");
        assert_eq!(indentation("    "), "    ");
        assert_eq!(indentation("\n\n\t"), "\t");
        assert_eq!(indentation("// note\n  "), "  ");
        assert_eq!(indentation("/* a */ "), "");
    }
}
