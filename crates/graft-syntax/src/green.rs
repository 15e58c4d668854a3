//! Persistent, position-independent tree storage.
//!
//! Green nodes know their kind, children and length but nothing about where
//! they sit in a file. They are shared through `triomphe::Arc`, so an edit
//! rebuilds only the nodes on the path from the root to the changed element;
//! every other subtree is reused as-is by the new root.

use std::fmt;

use text_size::{TextLen as _, TextSize};
use triomphe::Arc;

use crate::{NodeOrToken, SyntaxKind, TriviaPiece, TriviaPieceKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.is_missing(),
            NodeOrToken::Token(token) => token.is_missing(),
        }
    }

    /// Whether both elements are the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeOrToken::Node(a), NodeOrToken::Node(b)) => a.ptr_eq(b),
            (NodeOrToken::Token(a), NodeOrToken::Token(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn leading_trivia(&self) -> GreenTrivia {
        match self {
            NodeOrToken::Node(node) => {
                node.first_token().map(GreenToken::leading).cloned().unwrap_or_default()
            }
            NodeOrToken::Token(token) => token.leading().clone(),
        }
    }

    pub fn trailing_trivia(&self) -> GreenTrivia {
        match self {
            NodeOrToken::Node(node) => {
                node.last_token().map(GreenToken::trailing).cloned().unwrap_or_default()
            }
            NodeOrToken::Token(token) => token.trailing().clone(),
        }
    }

    pub fn with_leading_trivia(&self, trivia: GreenTrivia) -> Self {
        match self {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.with_leading_trivia(trivia)),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.with_leading(trivia)),
        }
    }

    pub fn with_trailing_trivia(&self, trivia: GreenTrivia) -> Self {
        match self {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.with_trailing_trivia(trivia)),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.with_trailing(trivia)),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(PartialEq, Eq)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    missing: bool,
    children: Box<[GreenElement]>,
}

#[derive(Clone, Copy)]
enum Edge {
    First,
    Last,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let text_len = children.iter().map(GreenElement::text_len).sum();
        let missing = children.iter().all(GreenElement::is_missing);
        Self(Arc::new(GreenNodeData { kind, text_len, missing, children }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Length including the trivia of every token below.
    pub fn text_len(&self) -> TextSize {
        self.0.text_len
    }

    /// True when every token below was synthesized by error recovery.
    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        std::ptr::from_ref::<GreenNodeData>(&*self.0) as usize
    }

    pub fn first_token(&self) -> Option<&GreenToken> {
        self.children().iter().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        self.children().iter().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Returns a copy of this node with the child at `index` replaced. The
    /// other children are shared with `self`.
    pub fn replace_child(&self, index: usize, new_child: GreenElement) -> Self {
        let children = self
            .children()
            .iter()
            .enumerate()
            .map(|(i, child)| if i == index { new_child.clone() } else { child.clone() });
        Self::new(self.kind(), children)
    }

    pub fn insert_child(&self, index: usize, new_child: GreenElement) -> Self {
        let mut children = self.children().to_vec();
        children.insert(index, new_child);
        Self::new(self.kind(), children)
    }

    /// Path-copy replacement: rebuilds the ancestors along `path` (child
    /// indices from this node downwards) and splices `new_element` in at its end.
    ///
    /// Returns `None` if the path does not lead to an element.
    pub fn replace_at_path(&self, path: &[usize], new_element: GreenElement) -> Option<Self> {
        let (&index, rest) = path.split_first()?;
        let child = self.children().get(index)?;
        if rest.is_empty() {
            return Some(self.replace_child(index, new_element));
        }
        let NodeOrToken::Node(child) = child else { return None };
        let new_child = child.replace_at_path(rest, new_element)?;
        Some(self.replace_child(index, new_child.into()))
    }

    /// Path-copy insertion of `new_element` as child `index` of the node at
    /// `parent_path`.
    pub fn insert_at_path(
        &self,
        parent_path: &[usize],
        index: usize,
        new_element: GreenElement,
    ) -> Option<Self> {
        let Some((&head, rest)) = parent_path.split_first() else {
            return (index <= self.children().len()).then(|| self.insert_child(index, new_element));
        };
        let NodeOrToken::Node(child) = self.children().get(head)? else { return None };
        let new_child = child.insert_at_path(rest, index, new_element)?;
        Some(self.replace_child(head, new_child.into()))
    }

    pub fn with_leading_trivia(&self, trivia: GreenTrivia) -> Self {
        self.map_edge_token(Edge::First, &mut |token| token.with_leading(trivia.clone()))
            .unwrap_or_else(|| self.clone())
    }

    pub fn with_trailing_trivia(&self, trivia: GreenTrivia) -> Self {
        self.map_edge_token(Edge::Last, &mut |token| token.with_trailing(trivia.clone()))
            .unwrap_or_else(|| self.clone())
    }

    /// Drops the outer trivia, keeping everything between the first and last
    /// token intact.
    pub fn trimmed(&self) -> Self {
        self.with_leading_trivia(GreenTrivia::empty()).with_trailing_trivia(GreenTrivia::empty())
    }

    fn map_edge_token<F>(&self, edge: Edge, f: &mut F) -> Option<Self>
    where
        F: FnMut(&GreenToken) -> GreenToken,
    {
        let len = self.children().len();
        for step in 0..len {
            let index = match edge {
                Edge::First => step,
                Edge::Last => len - 1 - step,
            };
            let replaced = match &self.children()[index] {
                NodeOrToken::Token(token) => NodeOrToken::Token(f(token)),
                NodeOrToken::Node(node) => match node.map_edge_token(edge, f) {
                    Some(node) => NodeOrToken::Node(node),
                    None => continue,
                },
            };
            return Some(self.replace_child(index, replaced));
        }
        None
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("text_len", &self.text_len())
            .field("children", &self.children().len())
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(PartialEq, Eq)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    missing: bool,
}

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self::with_trivia(GreenTrivia::empty(), kind, text, GreenTrivia::empty())
    }

    pub fn with_trivia(
        leading: GreenTrivia,
        kind: SyntaxKind,
        text: &str,
        trailing: GreenTrivia,
    ) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading,
            trailing,
            missing: false,
        }))
    }

    /// A zero-width placeholder for a token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: "".into(),
            leading: GreenTrivia::empty(),
            trailing: GreenTrivia::empty(),
            missing: true,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// The token text without trivia.
    pub fn text_trimmed(&self) -> &str {
        &self.0.text
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.0.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.0.trailing
    }

    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    pub fn text_len(&self) -> TextSize {
        self.leading().len() + self.0.text.text_len() + self.trailing().len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn with_leading(&self, leading: GreenTrivia) -> Self {
        Self(Arc::new(GreenTokenData {
            kind: self.kind(),
            text: self.0.text.clone(),
            leading,
            trailing: self.trailing().clone(),
            missing: self.is_missing(),
        }))
    }

    pub fn with_trailing(&self, trailing: GreenTrivia) -> Self {
        Self(Arc::new(GreenTokenData {
            kind: self.kind(),
            text: self.0.text.clone(),
            leading: self.leading().clone(),
            trailing,
            missing: self.is_missing(),
        }))
    }

    /// Same kind and trivia, different text.
    pub fn with_text(&self, text: &str) -> Self {
        Self::with_trivia(self.leading().clone(), self.kind(), text, self.trailing().clone())
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.leading().text())?;
        f.write_str(self.text_trimmed())?;
        f.write_str(self.trailing().text())
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text_trimmed())
            .field("leading", self.leading())
            .field("trailing", self.trailing())
            .finish()
    }
}

/// The trivia on one side of a token. Owns its text so that it can be moved
/// onto another token without consulting the source file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GreenTrivia {
    ptr: Option<Arc<TriviaData>>,
}

#[derive(PartialEq, Eq)]
struct TriviaData {
    text: Box<str>,
    pieces: Box<[TriviaPiece]>,
}

impl GreenTrivia {
    /// Builds trivia from `text`, which must be exactly the concatenation of
    /// `pieces`.
    pub fn new(text: &str, pieces: &[TriviaPiece]) -> Self {
        debug_assert_eq!(
            pieces.iter().map(|piece| piece.len).sum::<TextSize>(),
            text.text_len(),
            "trivia pieces must cover the text"
        );
        if pieces.is_empty() {
            return Self::empty();
        }
        Self { ptr: Some(Arc::new(TriviaData { text: text.into(), pieces: pieces.into() })) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn single(kind: TriviaPieceKind, text: &str) -> Self {
        Self::new(text, &[TriviaPiece::new(kind, text.text_len())])
    }

    pub fn whitespace(text: &str) -> Self {
        Self::single(TriviaPieceKind::Whitespace, text)
    }

    pub fn len(&self) -> TextSize {
        self.text().text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn text(&self) -> &str {
        match &self.ptr {
            None => "",
            Some(ptr) => &ptr.text,
        }
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.pieces,
        }
    }

    /// Pieces paired with their text.
    pub fn iter(&self) -> impl Iterator<Item = (TriviaPiece, &str)> + '_ {
        let text = self.text();
        let mut start = 0usize;
        self.pieces().iter().map(move |&piece| {
            let end = start + usize::from(piece.len);
            let piece_text = &text[start..end];
            start = end;
            (piece, piece_text)
        })
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(piece, text)| (piece.kind, text))).finish()
    }
}
