//! Empty type bodies are written as `{` and `}` on consecutive lines.

use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, TypeDecl};
use graft_syntax::{GreenTrivia, NodeOrToken, SyntaxNode, SyntaxSet, SyntaxToken, TriviaPieceKind};

use crate::lock_field::indentation;

pub const FORMAT_EMPTY_BRACES: PatternId = PatternId("format-empty-braces");
pub const FORMAT_BRACES: BuilderId = BuilderId("format-braces");

pub struct FormatEmptyBraces;

impl FormatEmptyBraces {
    fn braces(decl: &TypeDecl) -> Option<(SyntaxToken, SyntaxToken)> {
        let (l_brace, r_brace) = (decl.l_brace()?, decl.r_brace()?);
        if l_brace.is_missing() || r_brace.is_missing() || decl.members().next().is_some() {
            return None;
        }
        // Stray tokens between the braces are error nodes, not members.
        let adjacent = l_brace.next_token().is_some_and(|next| next == r_brace);
        adjacent.then_some((l_brace, r_brace))
    }

    /// Indentation of the line the declaration starts on.
    fn indent(decl: &TypeDecl) -> String {
        decl.syntax()
            .first_token()
            .map(|token| indentation(token.green().leading().text()).to_owned())
            .unwrap_or_default()
    }
}

impl Pattern for FormatEmptyBraces {
    fn id(&self) -> PatternId {
        FORMAT_EMPTY_BRACES
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([CLASS_DECL, STRUCT_DECL, INTERFACE_DECL])
    }

    fn find(&self, node: &SyntaxNode, _: &Context<'_>) -> Option<Match> {
        let decl = TypeDecl::cast(node.clone())?;
        let (l_brace, r_brace) = Self::braces(&decl)?;
        let between = [l_brace.green().trailing(), r_brace.green().leading()].map(|t| t.text());
        if between.concat() == format!("\n{}", Self::indent(&decl)) {
            return None;
        }
        let span = l_brace.trimmed_range().cover(r_brace.trimmed_range());
        Some(
            Match::new(self.id(), node.clone())
                .capture("l_brace", l_brace)
                .capture("r_brace", r_brace)
                .with_safety_span(span),
        )
    }
}

pub struct FormatBraces;

impl RewriteBuilder for FormatBraces {
    fn id(&self) -> BuilderId {
        FORMAT_BRACES
    }

    fn pattern(&self) -> PatternId {
        FORMAT_EMPTY_BRACES
    }

    fn title(&self, _: &Match) -> String {
        "Put empty braces on consecutive lines".to_owned()
    }

    fn build(&self, m: &Match, _: &Context<'_>) -> Option<Rewrite> {
        let decl = TypeDecl::cast(m.anchor().clone())?;
        let l_brace = m.token("l_brace")?;
        let r_brace = m.token("r_brace")?;

        let indent = Self::indent_trivia(&FormatEmptyBraces::indent(&decl));
        let newline = GreenTrivia::single(TriviaPieceKind::Newline, "\n");
        Some(
            Rewrite::new()
                .replace_verbatim(
                    l_brace.clone(),
                    NodeOrToken::Token(l_brace.green().with_trailing(newline)),
                )
                .replace_verbatim(
                    r_brace.clone(),
                    NodeOrToken::Token(r_brace.green().with_leading(indent)),
                ),
        )
    }
}

impl FormatBraces {
    fn indent_trivia(indent: &str) -> GreenTrivia {
        if indent.is_empty() { GreenTrivia::empty() } else { GreenTrivia::whitespace(indent) }
    }
}
