use std::fmt;

use graft_resolve::SemanticResolver;
use graft_syntax::{SyntaxElement, SyntaxNode, SyntaxSet, SyntaxToken, SyntaxTree, TextRange};
use indexmap::IndexMap;

use crate::EngineConfig;

/// Stable identity of a pattern, used for registration and dispatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(pub &'static str);

impl PatternId {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternId({})", self.0)
    }
}

/// Everything a pattern or builder may consult besides the tree itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub resolver: &'a dyn SemanticResolver,
    pub config: &'a EngineConfig,
}

/// A structural and semantic predicate over one node.
///
/// `find` is called only for nodes whose kind is in `kinds()`. It must be
/// pure: no side effects, and `None` whenever a fact cannot be established.
pub trait Pattern: Send + Sync {
    fn id(&self) -> PatternId;

    fn kinds(&self) -> SyntaxSet;

    fn find(&self, node: &SyntaxNode, cx: &Context<'_>) -> Option<Match>;
}

/// Capture naming the part of a match that its diagnostic points at.
pub const HIGHLIGHT: &str = "highlight";

/// A bound piece of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Node(SyntaxNode),
    Token(SyntaxToken),
    Nodes(Vec<SyntaxNode>),
    Span(TextRange),
}

impl Capture {
    /// Trimmed range of the capture; `None` for an empty node list.
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Node(node) => Some(node.trimmed_range()),
            Self::Token(token) => Some(token.trimmed_range()),
            Self::Nodes(nodes) => {
                let first = nodes.first()?.trimmed_range();
                let last = nodes.last()?.trimmed_range();
                Some(first.cover(last))
            }
            Self::Span(span) => Some(*span),
        }
    }
}

impl From<SyntaxNode> for Capture {
    fn from(node: SyntaxNode) -> Self {
        Self::Node(node)
    }
}

impl From<SyntaxToken> for Capture {
    fn from(token: SyntaxToken) -> Self {
        Self::Token(token)
    }
}

impl From<Vec<SyntaxNode>> for Capture {
    fn from(nodes: Vec<SyntaxNode>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<TextRange> for Capture {
    fn from(span: TextRange) -> Self {
        Self::Span(span)
    }
}

impl From<SyntaxElement> for Capture {
    fn from(element: SyntaxElement) -> Self {
        match element {
            SyntaxElement::Node(node) => Self::Node(node),
            SyntaxElement::Token(token) => Self::Token(token),
        }
    }
}

/// A rewritable region found by a pattern.
///
/// Matches hold red nodes of the tree they were found in; they are only
/// meaningful against that exact tree version.
#[derive(Debug, Clone)]
pub struct Match {
    pattern: PatternId,
    anchor: SyntaxNode,
    captures: IndexMap<&'static str, Capture>,
    safety_span: TextRange,
}

impl Match {
    /// A match on `anchor` whose safety span defaults to the anchor's own
    /// trimmed range.
    pub fn new(pattern: PatternId, anchor: SyntaxNode) -> Self {
        let safety_span = anchor.trimmed_range();
        Self { pattern, anchor, captures: IndexMap::new(), safety_span }
    }

    pub fn capture(mut self, name: &'static str, capture: impl Into<Capture>) -> Self {
        self.captures.insert(name, capture.into());
        self
    }

    pub fn with_safety_span(mut self, span: TextRange) -> Self {
        self.safety_span = span;
        self
    }

    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub fn anchor(&self) -> &SyntaxNode {
        &self.anchor
    }

    pub fn captures(&self) -> &IndexMap<&'static str, Capture> {
        &self.captures
    }

    pub fn safety_span(&self) -> TextRange {
        self.safety_span
    }

    pub fn node(&self, name: &str) -> Option<&SyntaxNode> {
        match self.captures.get(name)? {
            Capture::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn token(&self, name: &str) -> Option<&SyntaxToken> {
        match self.captures.get(name)? {
            Capture::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Range covered by any kind of capture.
    pub fn span(&self, name: &str) -> Option<TextRange> {
        self.captures.get(name)?.range()
    }

    pub fn nodes(&self, name: &str) -> &[SyntaxNode] {
        match self.captures.get(name) {
            Some(Capture::Nodes(nodes)) => nodes,
            _ => &[],
        }
    }

    /// Whether this match was computed on `tree`, not merely on equal text.
    pub fn is_from(&self, tree: &SyntaxTree) -> bool {
        self.anchor.root().green().ptr_eq(tree.green())
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.anchor == other.anchor
            && self.safety_span == other.safety_span
            && self.captures == other.captures
    }
}

impl Eq for Match {}
