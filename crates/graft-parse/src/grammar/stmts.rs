use graft_syntax::SyntaxKind::*;

use super::{exprs, types};
use crate::parser::Parser;

pub(crate) fn block(p: &mut Parser<'_>) {
    if !p.at(L_BRACE) {
        p.error("expected a block");
        return;
    }

    let m = p.start();
    p.advance();

    while !matches!(p.peek_kind(), R_BRACE | EOF) {
        stmt(p);
    }

    p.expect(R_BRACE);
    m.complete(p, BLOCK);
}

pub(crate) fn variable_declarator(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(NAME);
    if p.eat(EQ) {
        exprs::expr_or_error(p);
    }
    m.complete(p, VARIABLE_DECLARATOR);
}

fn stmt(p: &mut Parser<'_>) {
    match p.peek_kind() {
        L_BRACE => block(p),
        RETURN_KW => {
            let m = p.start();
            p.advance();
            if !p.at(SEMICOLON) {
                exprs::expr_or_error(p);
            }
            p.expect(SEMICOLON);
            m.complete(p, RETURN_STMT);
        }
        IF_KW => {
            let m = p.start();
            p.advance();
            condition(p);
            embedded_stmt(p);
            if p.at(ELSE_KW) {
                let else_clause = p.start();
                p.advance();
                embedded_stmt(p);
                else_clause.complete(p, ELSE_CLAUSE);
            }
            m.complete(p, IF_STMT);
        }
        LOCK_KW => {
            let m = p.start();
            p.advance();
            condition(p);
            embedded_stmt(p);
            m.complete(p, LOCK_STMT);
        }
        VAR_KW => {
            let m = p.start();
            p.advance();
            variable_declarator(p);
            p.expect(SEMICOLON);
            m.complete(p, LOCAL_DECL);
        }
        NAME if p.type_end(0).is_some_and(|end| p.nth(end) == NAME) => {
            let m = p.start();
            types::type_ref(p);
            variable_declarator(p);
            p.expect(SEMICOLON);
            m.complete(p, LOCAL_DECL);
        }
        SEMICOLON => {
            let m = p.start();
            p.advance();
            m.complete(p, EXPR_STMT);
        }
        _ => match exprs::expr(p) {
            Some(lhs) => {
                let m = lhs.precede(p);
                p.expect(SEMICOLON);
                m.complete(p, EXPR_STMT);
            }
            None => p.error_and_bump("expected a statement"),
        },
    }
}

/// `( expr )` after `if` or `lock`.
fn condition(p: &mut Parser<'_>) {
    p.expect(L_PAREN);
    exprs::expr_or_error(p);
    p.expect(R_PAREN);
}

fn embedded_stmt(p: &mut Parser<'_>) {
    if matches!(p.peek_kind(), R_BRACE | EOF) {
        p.error("expected a statement");
    } else {
        stmt(p);
    }
}
