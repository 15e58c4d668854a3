//! A reference [`SemanticResolver`] over fixture-language trees.
//!
//! It knows the declarations in the tree it is asked about plus a small
//! catalog of collection types and LINQ-style extension methods. Anything
//! else resolves to `None` or to an error type.

mod catalog;
mod scope;

use graft_resolve::{FxHashSet, MethodHandle, SemanticResolver, SymbolHandle, TypeHandle};
use graft_syntax::SyntaxKind::*;
use graft_syntax::SyntaxNode;
use graft_syntax::ast::{
    AstNode as _, BinaryExpr, ConditionalExpr, Invocation, Literal, LiteralKind, MemberAccess,
    MethodDecl, NameRef, ParenExpr, PrefixExpr, TypeDecl, TypeRef,
};

use catalog::{find_type, linq_method, primitive, string_type, type_of_decl, type_of_ref};
use scope::{Declaration, containing, declarations, lookup};

/// Stateless: every query walks the tree from the node it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResolver;

impl SemanticResolver for FixtureResolver {
    fn resolve_type(&self, expr: &SyntaxNode) -> Option<TypeHandle> {
        type_of_expr(expr)
    }

    fn resolve_method(&self, invocation: &SyntaxNode) -> Option<MethodHandle> {
        let method = method_of(invocation);
        if method.is_none() {
            tracing::trace!(?invocation, "unresolved invocation");
        }
        method
    }

    fn visible_names(&self, position: &SyntaxNode) -> FxHashSet<String> {
        declarations(position)
            .iter()
            .filter_map(Declaration::name)
            .filter(|name| !name.is_missing())
            .map(|name| name.text_trimmed().to_owned())
            .collect()
    }

    fn declared_symbol(&self, declaration: &SyntaxNode) -> Option<SymbolHandle> {
        Declaration::from_node(declaration)?.symbol()
    }

    fn referenced_symbol(&self, name_ref: &SyntaxNode) -> Option<SymbolHandle> {
        let name = NameRef::cast(name_ref.clone())?.name()?;
        match member_receiver(name_ref) {
            Some(receiver) => member_declaration(&receiver, name.text_trimmed())?.symbol(),
            None => lookup(name.text_trimmed(), name_ref)?.symbol(),
        }
    }
}

/// The receiver when `name_ref` is the member name in `receiver.name`.
fn member_receiver(name_ref: &SyntaxNode) -> Option<SyntaxNode> {
    let access = MemberAccess::cast(name_ref.parent()?)?;
    let receiver = access.receiver()?;
    (receiver != *name_ref).then_some(receiver)
}

/// The field or method `name` on the declared type of `receiver`.
fn member_declaration(receiver: &SyntaxNode, name: &str) -> Option<Declaration> {
    let decl = match receiver.kind() {
        THIS_EXPR => containing::<TypeDecl>(receiver)?,
        _ => find_type(type_of_expr(receiver)?.name(), receiver)?,
    };
    decl.members()
        .filter_map(|member| Declaration::from_node(&member))
        .find(|member| member.name().is_some_and(|token| token.text_trimmed() == name))
}

fn type_of_expr(expr: &SyntaxNode) -> Option<TypeHandle> {
    match expr.kind() {
        LITERAL => match Literal::cast(expr.clone())?.kind()? {
            LiteralKind::Int => Some(primitive("int")),
            LiteralKind::Bool(_) => Some(primitive("bool")),
            LiteralKind::String => Some(string_type()),
            LiteralKind::Null => None,
        },
        THIS_EXPR => Some(type_of_decl(&containing::<TypeDecl>(expr)?)),
        NAME_REF => {
            let name = NameRef::cast(expr.clone())?.name()?;
            let declaration = match member_receiver(expr) {
                Some(receiver) => member_declaration(&receiver, name.text_trimmed())?,
                None => lookup(name.text_trimmed(), expr)?,
            };
            type_of_declaration(&declaration)
        }
        PAREN_EXPR => type_of_expr(&ParenExpr::cast(expr.clone())?.expr()?),
        MEMBER_ACCESS => {
            let access = MemberAccess::cast(expr.clone())?;
            let receiver = type_of_expr(&access.receiver()?)?;
            let name = access.name()?;
            if receiver.has_property(name.text_trimmed()) {
                return Some(primitive("int"));
            }
            type_of_expr(&access.name_node()?)
        }
        INVOCATION => method_of(expr)?.return_type().cloned(),
        OBJECT_CREATION => type_of_ref(&expr.children().find_map(TypeRef::cast)?),
        BINARY_EXPR => {
            let binary = BinaryExpr::cast(expr.clone())?;
            match binary.op_kind()? {
                PLUS | MINUS | STAR | SLASH => type_of_expr(&binary.lhs()?),
                _ => Some(primitive("bool")),
            }
        }
        PREFIX_EXPR => {
            let prefix = PrefixExpr::cast(expr.clone())?;
            match prefix.op()?.kind() {
                BANG => Some(primitive("bool")),
                _ => type_of_expr(&prefix.operand()?),
            }
        }
        IS_EXPR => Some(primitive("bool")),
        CONDITIONAL_EXPR => type_of_expr(&ConditionalExpr::cast(expr.clone())?.when_true()?),
        ASSIGN_EXPR => type_of_expr(&expr.children().next()?),
        TYPE_REF => type_of_ref(&TypeRef::cast(expr.clone())?),
        _ => None,
    }
}

fn type_of_declaration(declaration: &Declaration) -> Option<TypeHandle> {
    match declaration {
        Declaration::Local(local) => match local.ty() {
            Some(ty) => type_of_ref(&ty),
            None => type_of_expr(&local.declarator()?.initializer()?),
        },
        Declaration::Param(param) => type_of_ref(&param.ty()?),
        Declaration::Field(field) => type_of_ref(&field.ty()?),
        Declaration::Method(_) => None,
        Declaration::Type(ty) => Some(type_of_decl(ty)),
    }
}

fn method_of(invocation: &SyntaxNode) -> Option<MethodHandle> {
    let call = Invocation::cast(invocation.clone())?;
    let args: Vec<SyntaxNode> = call.args().collect();
    let callee = call.callee()?;

    match callee.kind() {
        MEMBER_ACCESS => {
            let access = MemberAccess::cast(callee)?;
            let name = access.name().filter(|name| !name.is_missing())?;
            let receiver = type_of_expr(&access.receiver()?)?;
            if receiver.is_error() {
                return None;
            }

            let type_args = match access.generic_name().and_then(|name| name.type_args()) {
                Some(list) => list.types().map(|ty| type_of_ref(&ty)).collect::<Option<Vec<_>>>()?,
                None => Vec::new(),
            };
            let linq = receiver
                .element()
                .and_then(|element| linq_method(name.text_trimmed(), &args, element, &type_args));
            if linq.is_some() {
                return linq;
            }

            let decl = find_type(receiver.name(), invocation)?;
            declared_method(&decl, name.text_trimmed(), args.len())
        }
        NAME_REF => {
            let name = NameRef::cast(callee)?.name()?;
            let decl = containing::<TypeDecl>(invocation)?;
            declared_method(&decl, name.text_trimmed(), args.len())
        }
        _ => None,
    }
}

fn declared_method(decl: &TypeDecl, name: &str, arity: usize) -> Option<MethodHandle> {
    let method = decl.members().filter_map(MethodDecl::cast).find(|method| {
        method.name().is_some_and(|token| token.text_trimmed() == name)
            && method.param_list().map_or(0, |list| list.params().count()) == arity
    })?;

    let owner = decl.name()?.text_trimmed().to_owned();
    let handle = MethodHandle::new(owner, name, arity);
    Some(match method.ret_ty().and_then(|ty| type_of_ref(&ty)) {
        Some(ty) => handle.returning(ty),
        None => handle,
    })
}
