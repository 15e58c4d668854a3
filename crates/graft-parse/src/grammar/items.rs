use graft_syntax::SyntaxKind::*;

use super::{delimited, modifiers, stmts, types};
use crate::parser::{Marker, Parser};

pub(crate) fn compilation_unit(p: &mut Parser<'_>) {
    let m = p.start();

    while !p.at(EOF) {
        let item = p.start();
        modifiers(p);
        if matches!(p.peek_kind(), CLASS_KW | STRUCT_KW | INTERFACE_KW) {
            type_decl(p, item);
        } else {
            p.error("expected a type declaration");
            if !p.at(EOF) {
                p.advance();
            }
            item.complete(p, ERROR);
        }
    }

    p.expect(EOF);
    m.complete(p, COMPILATION_UNIT);
}

/// Continues a declaration whose modifiers are already inside `m`.
fn type_decl(p: &mut Parser<'_>, m: Marker) {
    let kind = match p.peek_kind() {
        CLASS_KW => CLASS_DECL,
        STRUCT_KW => STRUCT_DECL,
        _ => INTERFACE_DECL,
    };
    p.advance();
    p.expect(NAME);
    p.expect(L_BRACE);

    while !p.at(R_BRACE) && !p.at(EOF) {
        member(p);
    }

    p.expect(R_BRACE);
    m.complete(p, kind);
}

fn member(p: &mut Parser<'_>) {
    let m = p.start();
    modifiers(p);

    match p.peek_kind() {
        CLASS_KW | STRUCT_KW | INTERFACE_KW => type_decl(p, m),
        // Constructor: no return type.
        NAME if p.nth(1) == L_PAREN => {
            p.advance();
            method_rest(p, m);
        }
        NAME => {
            let is_method = p
                .type_end(0)
                .is_some_and(|end| p.nth(end) == NAME && p.nth(end + 1) == L_PAREN);
            types::type_ref(p);
            if is_method {
                p.advance();
                method_rest(p, m);
            } else {
                stmts::variable_declarator(p);
                p.expect(SEMICOLON);
                m.complete(p, FIELD_DECL);
            }
        }
        R_BRACE | EOF => {
            p.error("expected a member");
            m.complete(p, ERROR);
        }
        _ => {
            p.error("expected a member");
            p.advance();
            m.complete(p, ERROR);
        }
    }
}

fn method_rest(p: &mut Parser<'_>, m: Marker) {
    param_list(p);
    if p.at(L_BRACE) {
        stmts::block(p);
    } else {
        p.expect(SEMICOLON);
    }
    m.complete(p, METHOD_DECL);
}

pub(crate) fn param_list(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(L_PAREN) {
        delimited(p, L_PAREN, R_PAREN, COMMA, "expected a parameter", |p| {
            if p.at(NAME) {
                param(p);
                true
            } else {
                p.error("expected a parameter");
                false
            }
        });
    } else {
        p.expect(L_PAREN);
        p.expect(R_PAREN);
    }
    m.complete(p, PARAM_LIST);
}

/// `Type name`, or just `name` for untyped lambda parameters.
pub(crate) fn param(p: &mut Parser<'_>) {
    let m = p.start();
    if p.type_end(0).is_some_and(|end| p.nth(end) == NAME) {
        types::type_ref(p);
    }
    p.expect(NAME);
    m.complete(p, PARAM);
}
