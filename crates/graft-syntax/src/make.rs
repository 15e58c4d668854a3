//! Constructors for replacement subtrees.
//!
//! Every constructor produces the same shape the parser would produce for the
//! printed text, and places single spaces between tokens where the canonical
//! layout wants them. Outer trivia is left empty: the rewrite engine carries
//! the original boundary trivia over.

use crate::SyntaxKind::{self, *};
use crate::green::{GreenElement, GreenNode, GreenToken, GreenTrivia};

const PREFIX_PRECEDENCE: u8 = 8;
const PRIMARY_PRECEDENCE: u8 = 9;

fn space() -> GreenTrivia {
    GreenTrivia::whitespace(" ")
}

/// A punctuation or keyword token without trivia.
///
/// # Panics
///
/// If `kind` has no fixed text.
#[track_caller]
pub fn token(kind: SyntaxKind) -> GreenToken {
    match kind.static_text() {
        Some(text) => GreenToken::new(kind, text),
        None => panic!("{kind:?} has no fixed text"),
    }
}

fn spaced(kind: SyntaxKind) -> GreenToken {
    token(kind).with_leading(space()).with_trailing(space())
}

fn trailing_space(kind: SyntaxKind) -> GreenToken {
    token(kind).with_trailing(space())
}

pub fn name(text: &str) -> GreenToken {
    GreenToken::new(NAME, text)
}

pub fn name_ref(text: &str) -> GreenNode {
    GreenNode::new(NAME_REF, [name(text).into()])
}

pub fn literal_bool(value: bool) -> GreenNode {
    let kind = if value { TRUE_KW } else { FALSE_KW };
    GreenNode::new(LITERAL, [token(kind).into()])
}

/// A string literal; `quoted` includes the quotes.
pub fn literal_string(quoted: &str) -> GreenNode {
    GreenNode::new(LITERAL, [GreenToken::new(STRING, quoted).into()])
}

pub fn type_ref(text: &str) -> GreenNode {
    GreenNode::new(TYPE_REF, [name(text).into()])
}

pub fn paren(expr: &GreenNode) -> GreenNode {
    GreenNode::new(
        PAREN_EXPR,
        [token(L_PAREN).into(), expr.trimmed().into(), token(R_PAREN).into()],
    )
}

/// Binding strength of an expression node as a whole.
pub fn precedence(expr: &GreenNode) -> u8 {
    match expr.kind() {
        LAMBDA_EXPR | ASSIGN_EXPR => 0,
        CONDITIONAL_EXPR => 1,
        BINARY_EXPR => expr
            .children()
            .iter()
            .find_map(|child| child.as_token()?.kind().infix_precedence())
            .unwrap_or(PRIMARY_PRECEDENCE),
        IS_EXPR => 5,
        PREFIX_EXPR => PREFIX_PRECEDENCE,
        _ => PRIMARY_PRECEDENCE,
    }
}

/// Wraps `expr` in parentheses if it binds looser than `min`.
pub fn parenthesize_below(expr: &GreenNode, min: u8) -> GreenNode {
    if precedence(expr) < min { paren(expr) } else { expr.trimmed() }
}

pub fn prefix(op: SyntaxKind, operand: &GreenNode) -> GreenNode {
    let operand = parenthesize_below(operand, PREFIX_PRECEDENCE);
    GreenNode::new(PREFIX_EXPR, [token(op).into(), operand.into()])
}

/// `lhs op rhs`, parenthesizing operands that would otherwise re-associate.
///
/// # Panics
///
/// If `op` is not an infix operator.
#[track_caller]
pub fn binary(lhs: &GreenNode, op: SyntaxKind, rhs: &GreenNode) -> GreenNode {
    let Some(op_precedence) = op.infix_precedence() else {
        panic!("{op:?} is not an infix operator");
    };
    let lhs = parenthesize_below(lhs, op_precedence);
    // `&&` and `||` are associative, so an equal-precedence right operand
    // needs no parentheses.
    let rhs_min = if matches!(op, AMP_AMP | PIPE_PIPE) { op_precedence } else { op_precedence + 1 };
    let rhs = parenthesize_below(rhs, rhs_min);
    GreenNode::new(BINARY_EXPR, [lhs.into(), spaced(op).into(), rhs.into()])
}

pub fn logical_and(lhs: &GreenNode, rhs: &GreenNode) -> GreenNode {
    binary(lhs, AMP_AMP, rhs)
}

pub fn logical_or(lhs: &GreenNode, rhs: &GreenNode) -> GreenNode {
    binary(lhs, PIPE_PIPE, rhs)
}

pub fn logical_not(operand: &GreenNode) -> GreenNode {
    prefix(BANG, operand)
}

pub fn type_arg_list(types: &[GreenNode]) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![token(LT).into()];
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            children.push(trailing_space(COMMA).into());
        }
        children.push(ty.trimmed().into());
    }
    children.push(token(GT).into());
    GreenNode::new(TYPE_ARG_LIST, children)
}

pub fn generic_name(text: &str, types: &[GreenNode]) -> GreenNode {
    GreenNode::new(GENERIC_NAME, [name(text).into(), type_arg_list(types).into()])
}

/// `receiver.member`, where `member` is a `NAME_REF` or `GENERIC_NAME`.
pub fn member_access(receiver: &GreenNode, member: GreenNode) -> GreenNode {
    let receiver = parenthesize_below(receiver, PRIMARY_PRECEDENCE);
    GreenNode::new(MEMBER_ACCESS, [receiver.into(), token(DOT).into(), member.into()])
}

pub fn arg_list(args: &[GreenNode]) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![token(L_PAREN).into()];
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            children.push(trailing_space(COMMA).into());
        }
        children.push(arg.trimmed().into());
    }
    children.push(token(R_PAREN).into());
    GreenNode::new(ARG_LIST, children)
}

pub fn invocation(callee: &GreenNode, args: &[GreenNode]) -> GreenNode {
    GreenNode::new(INVOCATION, [callee.trimmed().into(), arg_list(args).into()])
}

/// `new T()`.
pub fn object_creation(ty: &GreenNode) -> GreenNode {
    GreenNode::new(
        OBJECT_CREATION,
        [trailing_space(NEW_KW).into(), ty.trimmed().into(), arg_list(&[]).into()],
    )
}

/// `modifiers T name = initializer;` on a single line.
pub fn field_decl(
    modifiers: &[SyntaxKind],
    ty: &GreenNode,
    field_name: &str,
    initializer: Option<&GreenNode>,
) -> GreenNode {
    let mut children: Vec<GreenElement> =
        modifiers.iter().map(|&kind| trailing_space(kind).into()).collect();
    children.push(ty.trimmed().with_trailing_trivia(space()).into());

    let mut declarator: Vec<GreenElement> = vec![name(field_name).into()];
    if let Some(initializer) = initializer {
        declarator.push(spaced(EQ).into());
        declarator.push(initializer.trimmed().into());
    }
    children.push(GreenNode::new(VARIABLE_DECLARATOR, declarator).into());
    children.push(token(SEMICOLON).into());
    GreenNode::new(FIELD_DECL, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_spacing_and_parens() {
        let a = name_ref("a");
        let b = name_ref("b");
        let c = name_ref("c");

        let or = logical_or(&a, &b);
        assert_eq!(or.to_string(), "a || b");

        let and = logical_and(&or, &c);
        assert_eq!(and.to_string(), "(a || b) && c");

        let chained = logical_or(&a, &logical_or(&b, &c));
        assert_eq!(chained.to_string(), "a || b || c");

        let not = logical_not(&and);
        assert_eq!(not.to_string(), "!((a || b) && c)");
        assert_eq!(logical_not(&a).to_string(), "!a");
    }

    #[test]
    fn non_associative_rhs() {
        let a = name_ref("a");
        let b = name_ref("b");
        let c = name_ref("c");
        let diff = binary(&a, MINUS, &binary(&b, MINUS, &c));
        assert_eq!(diff.to_string(), "a - (b - c)");
    }

    #[test]
    fn declarations() {
        let creation = object_creation(&type_ref("object"));
        let field = field_decl(
            &[PRIVATE_KW, READONLY_KW],
            &type_ref("object"),
            "_lockObject",
            Some(&creation),
        );
        assert_eq!(field.to_string(), "private readonly object _lockObject = new object();");
    }

    #[test]
    fn member_calls() {
        let receiver = name_ref("items");
        let call = invocation(
            &member_access(&receiver, generic_name("OfType", &[type_ref("Foo")])),
            &[],
        );
        assert_eq!(call.to_string(), "items.OfType<Foo>()");
    }
}
