//! The gate every match passes before a rewrite is offered or applied.

use graft_syntax::{NodeOrToken, Significance, SyntaxNode, SyntaxToken, TextRange};

/// True when every trivia piece attached to a token intersecting `span` is
/// whitespace or a line break.
///
/// Only the covering subtree of `span` and its zero-width neighbours are
/// visited. A span outside `root` is never safe.
pub fn is_safe(root: &SyntaxNode, span: TextRange) -> bool {
    let Some(tokens) = tokens_in(root, span) else {
        return false;
    };
    tokens.iter().all(|token| {
        token
            .leading_trivia()
            .chain(token.trailing_trivia())
            .all(|trivia| trivia.significance() == Significance::Insignificant)
    })
}

/// True when error recovery synthesized any token intersecting `span`, or
/// when `span` lies outside `root`.
pub fn contains_missing(root: &SyntaxNode, span: TextRange) -> bool {
    tokens_in(root, span).is_none_or(|tokens| tokens.iter().any(SyntaxToken::is_missing))
}

fn tokens_in(root: &SyntaxNode, span: TextRange) -> Option<Vec<SyntaxToken>> {
    if !root.text_range().contains_range(span) {
        return None;
    }
    let candidates: Vec<SyntaxToken> = match root.covering_element(span) {
        NodeOrToken::Node(node) => node.descendant_tokens().collect(),
        NodeOrToken::Token(token) => vec![token],
    };
    let (Some(first), Some(last)) = (candidates.first().cloned(), candidates.last().cloned())
    else {
        return Some(Vec::new());
    };

    // Empty tokens at the edges of the span may sit outside the covering
    // element.
    let mut before = Vec::new();
    let mut cursor = first.prev_token();
    while let Some(token) = cursor.filter(|token| token.trimmed_range().end() >= span.start()) {
        cursor = token.prev_token();
        before.push(token);
    }
    let mut after = Vec::new();
    let mut cursor = last.next_token();
    while let Some(token) = cursor.filter(|token| token.trimmed_range().start() <= span.end()) {
        cursor = token.next_token();
        after.push(token);
    }

    let tokens = before.into_iter().rev().chain(candidates).chain(after);
    Some(tokens.filter(|token| intersects(token.trimmed_range(), span)).collect())
}

fn intersects(token: TextRange, span: TextRange) -> bool {
    if token.is_empty() {
        return span.contains_inclusive(token.start());
    }
    if span.is_empty() {
        return token.contains_inclusive(span.start());
    }
    token.start() < span.end() && span.start() < token.end()
}
