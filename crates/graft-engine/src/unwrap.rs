//! Bounded look-through used by patterns that accept equivalent spellings of
//! the same expression.

use graft_syntax::SyntaxKind::*;
use graft_syntax::SyntaxNode;
use graft_syntax::ast::{AstNode as _, Block, LambdaBody, LambdaExpr, ParenExpr, ReturnStmt};

/// Strips parentheses, lambda bodies, single-`return` blocks and `return`
/// statements, at most `depth` layers deep.
///
/// `(x => { return (a); })` unwraps to `a` with a depth of 4.
pub fn unwrap_expr(node: &SyntaxNode, depth: usize) -> SyntaxNode {
    let mut current = node.clone();
    for _ in 0..depth {
        match step(&current) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

fn step(node: &SyntaxNode) -> Option<SyntaxNode> {
    match node.kind() {
        PAREN_EXPR => ParenExpr::cast(node.clone())?.expr(),
        LAMBDA_EXPR => match LambdaExpr::cast(node.clone())?.body()? {
            LambdaBody::Expr(expr) => Some(expr),
            LambdaBody::Block(block) => sole_return(&block),
        },
        BLOCK => sole_return(&Block::cast(node.clone())?),
        RETURN_STMT => ReturnStmt::cast(node.clone())?.expr(),
        _ => None,
    }
}

/// The returned expression of a block consisting of exactly `return e;`.
pub fn sole_return(block: &Block) -> Option<SyntaxNode> {
    let mut statements = block.statements();
    let first = statements.next()?;
    if statements.next().is_some() {
        return None;
    }
    ReturnStmt::cast(first)?.expr()
}
