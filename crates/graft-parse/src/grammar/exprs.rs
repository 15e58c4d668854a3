use graft_syntax::SyntaxKind::*;
use graft_syntax::SyntaxSet;

use super::{delimited, items, stmts, types};
use crate::parser::{CompletedMarker, Parser};

/// Tokens that end an expression without being part of it.
const EXPR_RECOVERY: SyntaxSet =
    SyntaxSet::new([R_BRACE, R_PAREN, R_BRACKET, SEMICOLON, COMMA, COLON, EOF]);

/// Tokens that may follow `Name<...>` when it is a generic name rather than
/// a comparison.
const GENERIC_FOLLOW: SyntaxSet = SyntaxSet::new([
    L_PAREN, R_PAREN, R_BRACKET, R_BRACE, DOT, COMMA, SEMICOLON, COLON, QUESTION, EQ_EQ, BANG_EQ,
    EOF,
]);

pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if at_lambda(p) {
        return Some(lambda(p));
    }

    let lhs = conditional_expr(p)?;
    if !p.at(EQ) {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    expr_or_error(p);
    Some(m.complete(p, ASSIGN_EXPR))
}

pub(crate) fn expr_or_error(p: &mut Parser<'_>) {
    if expr(p).is_none() {
        p.error("expected an expression");
    }
}

fn conditional_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let condition = binary_expr(p, 0)?;
    if !p.at(QUESTION) {
        return Some(condition);
    }

    let m = condition.precede(p);
    p.advance();
    expr_or_error(p);
    p.expect(COLON);
    expr_or_error(p);
    Some(m.complete(p, CONDITIONAL_EXPR))
}

fn binary_expr(p: &mut Parser<'_>, min_precedence: u8) -> Option<CompletedMarker> {
    let mut lhs = prefix_expr(p)?;

    loop {
        let op = p.peek_kind();
        let Some(precedence) = op.infix_precedence() else { break };
        if precedence <= min_precedence {
            break;
        }

        let m = lhs.precede(p);
        p.advance();

        if op == IS_KW {
            types::type_ref(p);
            lhs = m.complete(p, IS_EXPR);
            continue;
        }

        if binary_expr(p, precedence).is_none() {
            p.error("expected an expression");
        }
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn prefix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        BANG | MINUS => {
            let m = p.start();
            p.advance();
            if prefix_expr(p).is_none() {
                p.error("expected an expression");
            }
            Some(m.complete(p, PREFIX_EXPR))
        }
        _ => postfix_expr(p),
    }
}

fn postfix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary_expr(p)?;

    loop {
        match p.peek_kind() {
            DOT => {
                let m = lhs.precede(p);
                p.advance();
                member_name(p);
                lhs = m.complete(p, MEMBER_ACCESS);
            }
            L_PAREN => {
                let m = lhs.precede(p);
                arg_list(p);
                lhs = m.complete(p, INVOCATION);
            }
            _ => break,
        }
    }

    Some(lhs)
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        INT_NUMBER | STRING | TRUE_KW | FALSE_KW | NULL_KW => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, LITERAL))
        }
        THIS_KW => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, THIS_EXPR))
        }
        NAME if at_generic_name(p) => Some(generic_name(p)),
        NAME => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, NAME_REF))
        }
        L_PAREN => {
            let m = p.start();
            p.advance();
            expr_or_error(p);
            p.expect(R_PAREN);
            Some(m.complete(p, PAREN_EXPR))
        }
        NEW_KW => {
            let m = p.start();
            p.advance();
            types::type_ref(p);
            if p.at(L_PAREN) {
                arg_list(p);
            } else {
                p.error("expected an argument list");
            }
            Some(m.complete(p, OBJECT_CREATION))
        }
        kind if EXPR_RECOVERY.contains(kind) => None,
        _ => {
            let m = p.start();
            p.error("expected an expression");
            p.advance();
            Some(m.complete(p, ERROR))
        }
    }
}

fn member_name(p: &mut Parser<'_>) {
    if at_generic_name(p) {
        generic_name(p);
    } else {
        let m = p.start();
        p.expect(NAME);
        m.complete(p, NAME_REF);
    }
}

fn at_generic_name(p: &Parser<'_>) -> bool {
    p.at(NAME)
        && p.nth(1) == LT
        && p.type_end(0).is_some_and(|end| GENERIC_FOLLOW.contains(p.nth(end)))
}

fn generic_name(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    types::type_arg_list(p);
    m.complete(p, GENERIC_NAME)
}

fn arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, L_PAREN, R_PAREN, COMMA, "expected an argument", |p| expr(p).is_some());
    m.complete(p, ARG_LIST);
}

fn at_lambda(p: &Parser<'_>) -> bool {
    match p.peek_kind() {
        NAME => p.nth(1) == FAT_ARROW,
        L_PAREN => {
            let mut n = 1;
            loop {
                match p.nth(n) {
                    R_PAREN => return p.nth(n + 1) == FAT_ARROW,
                    NAME | COMMA | LT | GT | L_BRACKET | R_BRACKET => n += 1,
                    _ => return false,
                }
            }
        }
        _ => false,
    }
}

fn lambda(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.at(NAME) {
        let param = p.start();
        p.advance();
        param.complete(p, PARAM);
    } else {
        items::param_list(p);
    }

    p.expect(FAT_ARROW);
    if p.at(L_BRACE) {
        stmts::block(p);
    } else {
        expr_or_error(p);
    }
    m.complete(p, LAMBDA_EXPR)
}
