use graft_syntax::SyntaxKind::{self, *};

use crate::parser::Parser;

pub(crate) mod exprs;
pub(crate) mod items;
mod stmts;
mod types;

/// Parses `bra (item (delim item)*)? ket`, reporting stray delimiters.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            p.error_and_bump(unexpected_delim_message);
            continue;
        }

        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            break;
        }
    }

    p.expect(ket);
}

fn modifiers(p: &mut Parser<'_>) {
    while p.peek_kind().is_modifier() {
        p.advance();
    }
}
