//! Error-tolerant parser producing lossless syntax trees.
//!
//! Every input, well-formed or not, yields a tree whose text equals the input.
//! Tokens the grammar required but the input lacked appear as zero-width
//! missing tokens, and each recovery is reported as a [`Diagnostic`].

use graft_errors::Diagnostic;
use graft_syntax::{SyntaxNode, SyntaxTree};

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.tree.root()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }
}

pub fn parse(text: &str) -> Parse {
    let mut parser = parser::Parser::new(text);
    grammar::items::compilation_unit(&mut parser);
    let (green, errors) = parser.finish();
    tracing::debug!(len = text.len(), errors = errors.len(), "parsed compilation unit");
    Parse { tree: SyntaxTree::new(green), errors }
}
