//! Rewrites as data: a builder describes edits, and [`apply_edits`] turns
//! them into a new tree by path copy.

use std::fmt;

use graft_syntax::{GreenElement, SyntaxElement, SyntaxNode, SyntaxTree, TextRange};

use crate::{Context, EngineError, Match, PatternId};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuilderId(pub &'static str);

impl BuilderId {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuilderId({})", self.0)
    }
}

/// One way of rewriting the matches of a pattern.
pub trait RewriteBuilder: Send + Sync {
    fn id(&self) -> BuilderId;

    fn pattern(&self) -> PatternId;

    /// Human-readable description of the rewrite for `m`.
    fn title(&self, m: &Match) -> String;

    /// `None` declines the match.
    fn build(&self, m: &Match, cx: &Context<'_>) -> Option<Rewrite>;
}

/// How the outer trivia of a replaced element is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaMode {
    /// The target's leading and trailing trivia move onto the replacement,
    /// on each side where the replacement has none of its own.
    Carry,
    /// The replacement is spliced in exactly as built.
    Verbatim,
}

#[derive(Debug, Clone)]
pub enum Edit {
    Replace { target: SyntaxElement, with: GreenElement, trivia: TriviaMode },
    /// Inserts `element` as child number `index` of `parent`.
    Insert { parent: SyntaxNode, index: usize, element: GreenElement },
}

/// A batch of edits applied together or not at all.
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    edits: Vec<Edit>,
}

impl Rewrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(self, target: impl Into<SyntaxElement>, with: impl Into<GreenElement>) -> Self {
        self.push(Edit::Replace {
            target: target.into(),
            with: with.into(),
            trivia: TriviaMode::Carry,
        })
    }

    pub fn replace_verbatim(
        self,
        target: impl Into<SyntaxElement>,
        with: impl Into<GreenElement>,
    ) -> Self {
        self.push(Edit::Replace {
            target: target.into(),
            with: with.into(),
            trivia: TriviaMode::Verbatim,
        })
    }

    pub fn insert(
        self,
        parent: &SyntaxNode,
        index: usize,
        element: impl Into<GreenElement>,
    ) -> Self {
        self.push(Edit::Insert { parent: parent.clone(), index, element: element.into() })
    }

    /// Inserts `element` right after `sibling`; `None` if `sibling` is the root.
    pub fn insert_after(
        self,
        sibling: &SyntaxNode,
        element: impl Into<GreenElement>,
    ) -> Option<Self> {
        let parent = sibling.parent()?;
        Some(self.insert(&parent, sibling.index() + 1, element))
    }

    pub fn push(mut self, edit: Edit) -> Self {
        self.edits.push(edit);
        self
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

struct PendingReplace {
    path: Vec<usize>,
    range: TextRange,
    with: GreenElement,
}

struct PendingInsert {
    /// Parent path followed by the insertion index.
    key: Vec<usize>,
    seq: usize,
    element: GreenElement,
}

/// Applies every edit of `rewrite` to `tree`, or none of them.
///
/// Replacements are applied first, on the original paths. Insertions follow
/// in descending path order, so no insertion shifts the path of one still
/// pending; insertions at the same position end up in the order given.
pub fn apply_edits(tree: &SyntaxTree, rewrite: &Rewrite) -> Result<SyntaxTree, EngineError> {
    let mut replaces = Vec::new();
    let mut inserts = Vec::new();

    for (seq, edit) in rewrite.edits().iter().enumerate() {
        match edit {
            Edit::Replace { target, with, trivia } => {
                if !target.root().green().ptr_eq(tree.green()) {
                    return Err(EngineError::InvalidTarget);
                }
                let with = match trivia {
                    TriviaMode::Carry => carry_trivia(target, with),
                    TriviaMode::Verbatim => with.clone(),
                };
                replaces.push(PendingReplace {
                    path: target.index_path(),
                    range: target.text_range(),
                    with,
                });
            }
            Edit::Insert { parent, index, element } => {
                if !parent.root().green().ptr_eq(tree.green())
                    || *index > parent.green().children().len()
                {
                    return Err(EngineError::InvalidTarget);
                }
                let mut key = parent.index_path();
                if let Some(replace) = replaces_prefix(&rewrite.edits()[..], &key) {
                    return Err(EngineError::OverlappingEdits { range: replace });
                }
                key.push(*index);
                inserts.push(PendingInsert { key, seq, element: element.clone() });
            }
        }
    }

    replaces.sort_by(|a, b| a.path.cmp(&b.path));
    for pair in replaces.windows(2) {
        if pair[1].path.starts_with(&pair[0].path) {
            return Err(EngineError::OverlappingEdits { range: pair[1].range });
        }
    }

    let mut green = tree.green().clone();
    for replace in replaces {
        green = if replace.path.is_empty() {
            replace.with.into_node().ok_or(EngineError::InvalidTarget)?
        } else {
            green.replace_at_path(&replace.path, replace.with).ok_or(EngineError::InvalidTarget)?
        };
    }

    inserts.sort_by(|a, b| b.key.cmp(&a.key).then(b.seq.cmp(&a.seq)));
    for insert in inserts {
        let Some((&index, parent)) = insert.key.split_last() else {
            return Err(EngineError::InvalidTarget);
        };
        green = green
            .insert_at_path(parent, index, insert.element)
            .ok_or(EngineError::InvalidTarget)?;
    }

    Ok(SyntaxTree::new(green))
}

/// Range of a replacement whose target contains the node at `parent_path`.
fn replaces_prefix(edits: &[Edit], parent_path: &[usize]) -> Option<TextRange> {
    edits.iter().find_map(|edit| match edit {
        Edit::Replace { target, .. } if parent_path.starts_with(&target.index_path()) => {
            Some(target.text_range())
        }
        _ => None,
    })
}

fn carry_trivia(target: &SyntaxElement, with: &GreenElement) -> GreenElement {
    let mut with = with.clone();
    if with.leading_trivia().is_empty() {
        if let Some(first) = target.first_token() {
            with = with.with_leading_trivia(first.green().leading().clone());
        }
    }
    if with.trailing_trivia().is_empty() {
        if let Some(last) = target.last_token() {
            with = with.with_trailing_trivia(last.green().trailing().clone());
        }
    }
    with
}

#[cfg(test)]
mod tests {
    use graft_syntax::SyntaxKind::*;
    use graft_syntax::{NodeOrToken, make};

    use super::*;

    fn tree(text: &str) -> SyntaxTree {
        graft_parse::parse(text).into_tree()
    }

    fn name_refs(tree: &SyntaxTree) -> Vec<SyntaxNode> {
        tree.root().descendants().filter(|node| node.kind() == NAME_REF).collect()
    }

    #[test]
    fn replacement_carries_boundary_trivia() {
        let before = tree("class C {\n    int x =   a  ;\n}\n");
        let a = name_refs(&before).remove(0);
        let after = apply_edits(&before, &Rewrite::new().replace(a, make::name_ref("b"))).unwrap();
        assert_eq!(after.to_string(), "class C {\n    int x =   b  ;\n}\n");
    }

    #[test]
    fn own_trivia_wins_over_carried() {
        let before = tree("class C { int x = a; }");
        let a = name_refs(&before).remove(0);
        let with =
            make::name_ref("b").with_trailing_trivia(graft_syntax::GreenTrivia::whitespace(" "));
        let after = apply_edits(&before, &Rewrite::new().replace(a, with)).unwrap();
        assert_eq!(after.to_string(), "class C { int x = b ; }");
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let before = tree("class C {\n    int x = a;\n    int y = b;\n}\n");
        let a = name_refs(&before).remove(0);
        let after = apply_edits(&before, &Rewrite::new().replace(a, make::name_ref("c"))).unwrap();

        let fields = |tree: &SyntaxTree| -> Vec<SyntaxNode> {
            tree.root().descendants().filter(|node| node.kind() == FIELD_DECL).collect()
        };
        let (old, new) = (fields(&before), fields(&after));
        assert!(!old[0].green().ptr_eq(new[0].green()));
        assert!(old[1].green().ptr_eq(new[1].green()));
    }

    #[test]
    fn inserts_at_one_position_keep_their_order() {
        let before = tree("class C {\n    int x = 1;\n}\n");
        let field = before.root().descendants().find(|node| node.kind() == FIELD_DECL).unwrap();
        let line = |name: &str| {
            let decl = make::field_decl(&[], &make::type_ref("int"), name, None);
            decl.with_leading_trivia(graft_syntax::GreenTrivia::whitespace("    "))
                .with_trailing_trivia(graft_syntax::GreenTrivia::single(
                    graft_syntax::TriviaPieceKind::Newline,
                    "\n",
                ))
        };
        let rewrite = Rewrite::new()
            .insert_after(&field, line("y"))
            .and_then(|rewrite| rewrite.insert_after(&field, line("z")))
            .unwrap();
        let after = apply_edits(&before, &rewrite).unwrap();
        expect_test::expect![[r#"
            class C {
                int x = 1;
                int y;
                int z;
            }
        "#]]
        .assert_eq(&after.to_string());
    }

    #[test]
    fn nested_replacements_overlap() {
        let before = tree("class C { int x = a + b; }");
        let binary = before.root().descendants().find(|node| node.kind() == BINARY_EXPR).unwrap();
        let a = name_refs(&before).remove(0);
        let rewrite = Rewrite::new()
            .replace(binary.clone(), make::name_ref("c"))
            .replace(a, make::name_ref("d"));
        assert_eq!(
            apply_edits(&before, &rewrite).unwrap_err(),
            EngineError::OverlappingEdits { range: name_refs(&before)[0].text_range() }
        );
    }

    #[test]
    fn foreign_targets_are_rejected() {
        let before = tree("class C { int x = a; }");
        let other = tree("class C { int x = a; }");
        let a = name_refs(&other).remove(0);
        let rewrite = Rewrite::new().replace(a, make::name_ref("b"));
        assert_eq!(apply_edits(&before, &rewrite).unwrap_err(), EngineError::InvalidTarget);
    }

    #[test]
    fn token_replacement() {
        let before = tree("class C { int x = a; }");
        let token = before
            .root()
            .descendant_tokens()
            .find(|token| token.text_trimmed() == "x")
            .unwrap();
        let rewrite = Rewrite::new().replace(token, NodeOrToken::Token(make::name("renamed")));
        let after = apply_edits(&before, &rewrite).unwrap();
        assert_eq!(after.to_string(), "class C { int renamed = a; }");
    }
}
