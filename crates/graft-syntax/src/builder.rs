//! Incremental builder for green trees.

use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::{NodeOrToken, SyntaxKind};

const DEFAULT_TREE_DEPTH: usize = 64;
const DEFAULT_CHILDREN_LEN: usize = 256;

/// Builds a green tree from a stream of start/token/finish events.
pub struct Builder {
    opened: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.opened.push((kind, self.children.len()));
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let Some((kind, first_child)) = self.opened.pop() else {
            panic!("`finish_node` without a matching `start_node`");
        };
        let node = GreenNode::new(kind, self.children.drain(first_child..));
        self.children.push(node.into());
    }

    /// Adds a token, with its trivia, to the current node.
    pub fn token(&mut self, token: GreenToken) {
        self.children.push(token.into());
    }

    /// Finishes building and returns the root.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.opened.is_empty(), "unfinished nodes: {:?}", self.opened);
        let root = self.children.pop();
        assert!(self.children.is_empty(), "a tree has exactly one root");
        match root {
            Some(NodeOrToken::Node(root)) => root,
            _ => panic!("the root must be a node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn nested_nodes() {
        let mut builder = Builder::new();
        builder.start_node(PAREN_EXPR);
        builder.token(GreenToken::new(L_PAREN, "("));
        builder.start_node(NAME_REF);
        builder.token(GreenToken::new(NAME, "x"));
        builder.finish_node();
        builder.token(GreenToken::new(R_PAREN, ")"));
        builder.finish_node();

        let root = builder.finish();
        assert_eq!(root.kind(), PAREN_EXPR);
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.to_string(), "(x)");
    }

    #[test]
    #[should_panic(expected = "unfinished nodes")]
    fn unfinished() {
        let mut builder = Builder::new();
        builder.start_node(BLOCK);
        builder.finish();
    }
}
