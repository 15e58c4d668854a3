//! Private fields are named `_camelCase`.

use graft_engine::{BuilderId, Context, Match, Pattern, PatternId, Rewrite, RewriteBuilder};
use graft_resolve::{FxHashSet, has_camel_case_form, to_camel_case, unique_name_in};
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{AstNode as _, FieldDecl, NameRef};
use graft_syntax::{NodeOrToken, SyntaxNode, SyntaxSet};

pub const FIELD_CAMEL_CASE: PatternId = PatternId("field-camel-case");
pub const RENAME_FIELD: BuilderId = BuilderId("rename-field");

const PREFIX: &str = "_";

pub struct FieldCamelCase;

impl Pattern for FieldCamelCase {
    fn id(&self) -> PatternId {
        FIELD_CAMEL_CASE
    }

    fn kinds(&self) -> SyntaxSet {
        SyntaxSet::new([FIELD_DECL])
    }

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match> {
        let field = FieldDecl::cast(node.clone())?;
        if !field.has_modifier(PRIVATE_KW) {
            return None;
        }
        let name = field.declarator()?.name()?;
        if name.is_missing() || has_camel_case_form(name.text_trimmed(), PREFIX) {
            return None;
        }
        cx.resolver.declared_symbol(node)?;
        Some(
            Match::new(self.id(), node.clone())
                .capture("name", name.clone())
                .with_safety_span(name.trimmed_range()),
        )
    }
}

pub struct RenameField;

impl RewriteBuilder for RenameField {
    fn id(&self) -> BuilderId {
        RENAME_FIELD
    }

    fn pattern(&self) -> PatternId {
        FIELD_CAMEL_CASE
    }

    fn title(&self, m: &Match) -> String {
        let name = m.token("name").map(|name| name.text_trimmed()).unwrap_or_default();
        format!("Rename `{name}` to `{}`", to_camel_case(name, PREFIX))
    }

    fn build(&self, m: &Match, cx: &Context<'_>) -> Option<Rewrite> {
        let name = m.token("name")?;
        let old = name.text_trimmed();
        let symbol = cx.resolver.declared_symbol(m.anchor())?;

        // A same-named reference that cannot be resolved might bind to the
        // field; renaming around it could leave it dangling.
        let mut references = Vec::new();
        let same_name = m.anchor().root().descendants().filter(|node| {
            NameRef::cast(node.clone())
                .and_then(|name_ref| name_ref.name())
                .is_some_and(|token| token.text_trimmed() == old)
        });
        for node in same_name {
            match cx.resolver.referenced_symbol(&node) {
                Some(referenced) if referenced == symbol => references.push(node),
                Some(_) => {}
                None => {
                    tracing::trace!(range = ?node.trimmed_range(), "unresolved reference");
                    return None;
                }
            }
        }

        // The new name must not be shadowed at any use site, nor clash with a
        // member where the field is declared.
        let mut taken: FxHashSet<String> = cx.resolver.visible_names(m.anchor());
        for reference in &references {
            taken.extend(cx.resolver.visible_names(reference));
        }
        taken.remove(old);
        let new = unique_name_in(&to_camel_case(old, PREFIX), &taken, cx.config.suffix_start);

        let mut rewrite = Rewrite::new().replace_verbatim(
            name.clone(),
            NodeOrToken::Token(name.green().with_text(&new)),
        );
        for reference in references {
            let token = NameRef::cast(reference)?.name()?;
            let renamed = token.green().with_text(&new);
            rewrite = rewrite.replace_verbatim(token, NodeOrToken::Token(renamed));
        }
        Some(rewrite)
    }
}
