//! Public syntax tree API: positioned, parent-linked cursors over green nodes.

use std::fmt;
use std::hash::{Hash, Hasher};

use text_size::{TextRange, TextSize};
use triomphe::Arc;

use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::{Significance, SyntaxKind, TriviaPieceKind};

/// An immutable syntax tree for one version of a source text.
///
/// Cloning is cheap; clones share all nodes.
#[derive(Clone)]
pub struct SyntaxTree {
    green: GreenNode,
}

impl SyntaxTree {
    pub fn new(green: GreenNode) -> Self {
        Self { green }
    }

    /// Returns the root syntax node.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Whether both trees are the same version, not merely equal text.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.green.ptr_eq(&other.green)
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.green.text_len())
            .finish_non_exhaustive()
    }
}

/// Node handle: a green node plus its position in one particular tree.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

struct NodeData {
    parent: Option<SyntaxNode>,
    index: u32,
    offset: TextSize,
    green: GreenNode,
}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self(Arc::new(NodeData { parent: None, index: 0, offset: TextSize::new(0), green }))
    }

    fn new_child(parent: &Self, index: usize, offset: TextSize, green: GreenNode) -> Self {
        Self(Arc::new(NodeData {
            parent: Some(parent.clone()),
            index: index as u32,
            offset,
            green,
        }))
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// Returns the text range covered by this node, trivia included.
    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.0.offset, self.0.green.text_len())
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn trimmed_range(&self) -> TextRange {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.trimmed_range().start(), last.trimmed_range().end())
            }
            _ => TextRange::empty(self.0.offset),
        }
    }

    /// Returns the source text excluding the outer trivia.
    pub fn text_trimmed(&self) -> String {
        let text = self.to_string();
        let range = self.trimmed_range() - self.0.offset;
        text[range].to_owned()
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.0.green.is_missing()
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Position among the parent's children, tokens included.
    #[inline]
    pub fn index(&self) -> usize {
        self.0.index as usize
    }

    /// Returns an iterator of ancestors starting from this node.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), Self::parent)
    }

    pub fn root(&self) -> Self {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// Number of ancestors above this node.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Child indices leading from the root to this node.
    pub fn index_path(&self) -> Vec<usize> {
        let mut path: Vec<usize> = self
            .ancestors()
            .take_while(|node| node.parent().is_some())
            .map(|n| n.index())
            .collect();
        path.reverse();
        path
    }

    /// Iterates children including tokens.
    pub fn children_with_tokens(&self) -> SyntaxElementChildren {
        SyntaxElementChildren { parent: self.clone(), next_index: 0, offset: self.0.offset }
    }

    /// Iterates child nodes, skipping tokens.
    pub fn children(&self) -> impl Iterator<Item = Self> + use<> {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    pub fn child_at(&self, index: usize) -> Option<SyntaxElement> {
        self.children_with_tokens().nth(index)
    }

    /// Returns the first token spanned by this node.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.children_with_tokens().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Returns the last token spanned by this node.
    pub fn last_token(&self) -> Option<SyntaxToken> {
        let children: Vec<_> = self.children_with_tokens().collect();
        children.into_iter().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        self.parent()?.child_at(self.index() + 1)
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        let index = self.index().checked_sub(1)?;
        self.parent()?.child_at(index)
    }

    /// Returns a preorder iterator over nodes.
    pub fn preorder(&self) -> Preorder {
        Preorder { inner: PreorderWithTokens::new(self.clone()) }
    }

    /// Returns a preorder iterator over nodes and tokens.
    pub fn preorder_with_tokens(&self) -> PreorderWithTokens {
        PreorderWithTokens::new(self.clone())
    }

    /// This node and every node below it, in preorder.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<> {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn descendant_tokens(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEventWithTokens::Token(token) => Some(token),
            _ => None,
        })
    }

    /// Returns the smallest element that fully covers `range`.
    pub fn covering_element(&self, range: TextRange) -> SyntaxElement {
        let mut node = self.clone();
        'descend: loop {
            for child in node.children_with_tokens() {
                if !child.text_range().contains_range(range) {
                    continue;
                }
                match child {
                    NodeOrToken::Node(child) => {
                        node = child;
                        continue 'descend;
                    }
                    NodeOrToken::Token(token) => return NodeOrToken::Token(token),
                }
            }
            return NodeOrToken::Node(node);
        }
    }

    /// Rebuilds the tree with this node swapped for `replacement` and returns
    /// the new root. Nodes off the path to this node are shared.
    pub fn replace_with(&self, replacement: GreenNode) -> GreenNode {
        match self.parent() {
            None => replacement,
            Some(parent) => {
                parent.replace_with(parent.green().replace_child(self.index(), replacement.into()))
            }
        }
    }

    /// Indented `KIND@range` dump, one element per line.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    out.push_str(&format!("{:indent$}{node:?}\n", "", indent = depth * 2));
                    depth += 1;
                }
                WalkEventWithTokens::LeaveNode(_) => depth -= 1,
                WalkEventWithTokens::Token(token) => {
                    out.push_str(&format!("{:indent$}{token:?}\n", "", indent = depth * 2));
                }
            }
        }
        out
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.green.ptr_eq(&other.0.green) && self.0.offset == other.0.offset
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.green.addr().hash(state);
        self.0.offset.hash(state);
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Token handle: a green token plus its position in one particular tree.
#[derive(Clone)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: u32,
    offset: TextSize,
    green: GreenToken,
}

impl SyntaxToken {
    /// Returns this token's kind.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    /// Returns the token text range including attached trivia.
    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    /// Returns the token text range excluding trivia.
    pub fn trimmed_range(&self) -> TextRange {
        let start = self.offset + self.green.leading().len();
        TextRange::at(start, TextSize::of(self.green.text_trimmed()))
    }

    /// Returns the token text excluding trivia.
    #[inline]
    pub fn text_trimmed(&self) -> &str {
        self.green.text_trimmed()
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Iterates over leading trivia.
    pub fn leading_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'_>> {
        trivia_at(self.green.leading(), self.offset)
    }

    /// Iterates over trailing trivia.
    pub fn trailing_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'_>> {
        let start = self.trimmed_range().end();
        trivia_at(self.green.trailing(), start)
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        self.parent.child_at(self.index() + 1)
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        self.parent.child_at(self.index().checked_sub(1)?)
    }

    /// Returns the next token in the tree if any.
    pub fn next_token(&self) -> Option<Self> {
        let mut element: SyntaxElement = NodeOrToken::Token(self.clone());
        loop {
            match element.next_sibling_or_token() {
                Some(NodeOrToken::Token(token)) => return Some(token),
                Some(NodeOrToken::Node(node)) => {
                    if let Some(token) = node.first_token() {
                        return Some(token);
                    }
                    element = NodeOrToken::Node(node);
                }
                None => element = NodeOrToken::Node(element.parent()?),
            }
        }
    }

    /// Returns the previous token in the tree if any.
    pub fn prev_token(&self) -> Option<Self> {
        let mut element: SyntaxElement = NodeOrToken::Token(self.clone());
        loop {
            match element.prev_sibling_or_token() {
                Some(NodeOrToken::Token(token)) => return Some(token),
                Some(NodeOrToken::Node(node)) => {
                    if let Some(token) = node.last_token() {
                        return Some(token);
                    }
                    element = NodeOrToken::Node(node);
                }
                None => element = NodeOrToken::Node(element.parent()?),
            }
        }
    }

    /// Rebuilds the tree with this token swapped for `replacement` and returns
    /// the new root.
    pub fn replace_with(&self, replacement: GreenToken) -> GreenNode {
        let parent = self.parent.green().replace_child(self.index(), replacement.into());
        self.parent.replace_with(parent)
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.trimmed_range(), self.text_trimmed())?;
        if self.is_missing() {
            f.write_str(" (missing)")?;
        }
        Ok(())
    }
}

/// One positioned trivia piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntaxTrivia<'a> {
    pub kind: TriviaPieceKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl SyntaxTrivia<'_> {
    pub fn significance(&self) -> Significance {
        self.kind.significance()
    }
}

fn trivia_at(
    trivia: &crate::GreenTrivia,
    start: TextSize,
) -> impl Iterator<Item = SyntaxTrivia<'_>> {
    let mut offset = start;
    trivia.iter().map(move |(piece, text)| {
        let range = TextRange::at(offset, piece.len);
        offset += piece.len;
        SyntaxTrivia { kind: piece.kind, text, range }
    })
}

/// Node or token element inside the tree.
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        NodeOrToken::Token(token)
    }
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn trimmed_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.trimmed_range(),
            NodeOrToken::Token(token) => token.trimmed_range(),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            NodeOrToken::Node(node) => node.index(),
            NodeOrToken::Token(token) => token.index(),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.is_missing(),
            NodeOrToken::Token(token) => token.is_missing(),
        }
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        match self {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token.clone()),
        }
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        match self {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token.clone()),
        }
    }

    pub fn green(&self) -> GreenElement {
        match self {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.green().clone()),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.green().clone()),
        }
    }

    /// Child indices leading from the root to this element.
    pub fn index_path(&self) -> Vec<usize> {
        match self {
            NodeOrToken::Node(node) => node.index_path(),
            NodeOrToken::Token(token) => {
                let mut path = token.parent.index_path();
                path.push(token.index());
                path
            }
        }
    }

    /// The root of the tree this element belongs to.
    pub fn root(&self) -> SyntaxNode {
        match self {
            NodeOrToken::Node(node) => node.root(),
            NodeOrToken::Token(token) => token.parent.root(),
        }
    }

    pub fn next_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.next_sibling_or_token(),
            NodeOrToken::Token(token) => token.next_sibling_or_token(),
        }
    }

    pub fn prev_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.prev_sibling_or_token(),
            NodeOrToken::Token(token) => token.prev_sibling_or_token(),
        }
    }
}

/// Iterator over the children of a node, tokens included.
#[derive(Clone)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    next_index: usize,
    offset: TextSize,
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        let green = self.parent.green().children().get(index)?.clone();
        let offset = self.offset;
        self.next_index += 1;
        self.offset += green.text_len();

        Some(match green {
            NodeOrToken::Node(green) => {
                NodeOrToken::Node(SyntaxNode::new_child(&self.parent, index, offset, green))
            }
            NodeOrToken::Token(green) => NodeOrToken::Token(SyntaxToken {
                parent: self.parent.clone(),
                index: index as u32,
                offset,
                green,
            }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.parent.green().children().len() - self.next_index;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SyntaxElementChildren {}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder {
    inner: PreorderWithTokens,
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Debug)]
pub enum WalkEvent {
    Enter(SyntaxNode),
    Leave(SyntaxNode),
}

/// Preorder traversal over nodes and tokens.
#[derive(Clone)]
pub struct PreorderWithTokens {
    stack: Vec<(SyntaxNode, SyntaxElementChildren)>,
    root: Option<SyntaxNode>,
}

impl PreorderWithTokens {
    fn new(start: SyntaxNode) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEventWithTokens;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root.clone(), root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child.clone(), child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Debug)]
pub enum WalkEventWithTokens {
    EnterNode(SyntaxNode),
    LeaveNode(SyntaxNode),
    Token(SyntaxToken),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenTrivia, TriviaPiece};

    fn token(kind: SyntaxKind, text: &str, trailing: &str) -> GreenElement {
        let trailing = if trailing.is_empty() {
            GreenTrivia::empty()
        } else {
            GreenTrivia::whitespace(trailing)
        };
        GreenToken::with_trivia(GreenTrivia::empty(), kind, text, trailing).into()
    }

    /// `a + b // c` as a binary expression.
    fn sample() -> SyntaxTree {
        let comment = GreenTrivia::new(
            " // c",
            &[
                TriviaPiece::new(TriviaPieceKind::Whitespace, 1.into()),
                TriviaPiece::new(TriviaPieceKind::SingleLineComment, 4.into()),
            ],
        );
        let b = GreenToken::with_trivia(GreenTrivia::empty(), NAME, "b", comment);
        let expr = GreenNode::new(
            BINARY_EXPR,
            [
                GreenNode::new(NAME_REF, [token(NAME, "a", " ")]).into(),
                token(PLUS, "+", " "),
                GreenNode::new(NAME_REF, [b.into()]).into(),
            ],
        );
        SyntaxTree::new(GreenNode::new(EXPR_STMT, [expr.into(), token(SEMICOLON, ";", "")]))
    }

    #[test]
    fn dump() {
        let tree = sample();
        expect![[r#"
            EXPR_STMT@0..11
              BINARY_EXPR@0..10
                NAME_REF@0..2
                  NAME@0..1 "a"
                PLUS@2..3 "+"
                NAME_REF@4..10
                  NAME@4..5 "b"
              SEMICOLON@10..11 ";"
        "#]]
        .assert_eq(&tree.root().debug_dump());
        assert_eq!(tree.to_string(), "a + b // c;");
    }

    #[test]
    fn ranges_and_trivia() {
        let root = sample().root();
        let binary = root.children().next().unwrap();
        assert_eq!(binary.trimmed_range(), TextRange::new(0.into(), 5.into()));
        assert_eq!(binary.text_trimmed(), "a + b");

        let b = binary.last_token().unwrap();
        let trailing: Vec<_> = b.trailing_trivia().map(|t| (t.kind, t.text, t.range)).collect();
        assert_eq!(
            trailing,
            vec![
                (TriviaPieceKind::Whitespace, " ", TextRange::new(5.into(), 6.into())),
                (TriviaPieceKind::SingleLineComment, "// c", TextRange::new(6.into(), 10.into())),
            ]
        );
    }

    #[test]
    fn token_navigation() {
        let root = sample().root();
        let first = root.first_token().unwrap();
        let texts: Vec<_> = std::iter::successors(Some(first), SyntaxToken::next_token)
            .map(|t| t.text_trimmed().to_owned())
            .collect();
        assert_eq!(texts, ["a", "+", "b", ";"]);

        let last = root.last_token().unwrap();
        assert_eq!(last.prev_token().unwrap().text_trimmed(), "b");
    }

    #[test]
    fn replace_with_shares_untouched_subtrees() {
        let tree = sample();
        let root = tree.root();
        let binary = root.children().next().unwrap();
        let lhs = binary.children().next().unwrap();
        let rhs = binary.children().nth(1).unwrap();

        let new_lhs = GreenNode::new(NAME_REF, [token(NAME, "x", " ")]);
        let new_root = SyntaxTree::new(lhs.replace_with(new_lhs));

        assert_eq!(new_root.to_string(), "x + b // c;");
        let new_binary = new_root.root().children().next().unwrap();
        let new_rhs = new_binary.children().nth(1).unwrap();
        assert!(new_rhs.green().ptr_eq(rhs.green()));
        assert!(!new_binary.green().ptr_eq(binary.green()));
        assert_eq!(rhs.index_path(), vec![0, 2]);
    }

    #[test]
    fn covering_element() {
        let root = sample().root();
        let element = root.covering_element(TextRange::new(4.into(), 5.into()));
        assert_eq!(element.kind(), NAME);
    }
}
