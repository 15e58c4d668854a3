use graft_syntax::SyntaxKind::*;

use super::delimited;
use crate::parser::Parser;

pub(crate) fn type_ref(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(NAME);

    if p.at(LT) {
        type_arg_list(p);
    }

    while p.at(L_BRACKET) {
        p.advance();
        p.expect(R_BRACKET);
    }

    m.complete(p, TYPE_REF);
}

pub(crate) fn type_arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LT, GT, COMMA, "expected a type argument", |p| {
        if p.at(NAME) {
            type_ref(p);
            true
        } else {
            p.error("expected a type argument");
            false
        }
    });
    m.complete(p, TYPE_ARG_LIST);
}
