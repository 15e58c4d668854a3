//! Lossless, persistent syntax trees with attached trivia.
//!
//! Green nodes are immutable and shared between tree versions; red
//! [`SyntaxNode`]s add parent pointers and absolute offsets on demand.
//! Replacing a node rebuilds only its ancestors, so every other subtree of an
//! edited tree is reference-identical to the one it came from.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod green;
/// Constructors for replacement subtrees.
pub mod make;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing green trees.
pub use builder::Builder;
/// Position-independent, shared tree storage.
pub use green::{GreenElement, GreenNode, GreenToken, GreenTrivia};
/// Primary syntax tree API types and adapters.
pub use syntax::{
    NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement, SyntaxElementChildren, SyntaxNode,
    SyntaxToken, SyntaxTree, SyntaxTrivia, WalkEvent, WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens and their classification.
pub use trivia::{Significance, TriviaPiece, TriviaPieceKind, classify};
/// Re-exported span types.
pub use text_size::{TextRange, TextSize};
