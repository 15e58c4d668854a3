//! Library types and LINQ-style extension methods the fixture resolver knows.

use graft_resolve::{ENUMERABLE, MethodHandle, MethodShape, TypeHandle, TypeKind};
use graft_syntax::SyntaxKind::*;
use graft_syntax::SyntaxNode;
use graft_syntax::ast::{AstNode as _, TypeDecl, TypeRef};

use crate::scope::declared_types;

pub(crate) fn primitive(name: &str) -> TypeHandle {
    TypeHandle::new(name, TypeKind::Struct, None, [])
}

pub(crate) fn string_type() -> TypeHandle {
    TypeHandle::new("string", TypeKind::Class, None, ["Length"])
}

pub(crate) fn sequence_of(element: TypeHandle) -> TypeHandle {
    generic("IEnumerable", TypeKind::Sequence, element, &[])
}

fn generic(name: &str, kind: TypeKind, element: TypeHandle, properties: &[&str]) -> TypeHandle {
    let display = format!("{name}<{}>", element.name());
    TypeHandle::new(display, kind, Some(element), properties.iter().copied())
}

pub(crate) fn type_of_ref(ty: &TypeRef) -> Option<TypeHandle> {
    let name = ty.name().filter(|name| !name.is_missing())?;
    let args = match ty.type_args() {
        Some(list) => list.types().map(|arg| type_of_ref(&arg)).collect::<Option<Vec<_>>>()?,
        None => Vec::new(),
    };

    let mut handle = named_type(name.text_trimmed(), args, ty.syntax());
    let rank = ty.syntax().children_with_tokens().filter(|child| child.kind() == L_BRACKET).count();
    for _ in 0..rank {
        handle = TypeHandle::array(handle);
    }
    Some(handle)
}

fn named_type(name: &str, mut args: Vec<TypeHandle>, context: &SyntaxNode) -> TypeHandle {
    if args.len() == 1 {
        let element = args.remove(0);
        return match name {
            "List" | "HashSet" | "Queue" | "Stack" => {
                generic(name, TypeKind::Class, element, &["Count"])
            }
            "ICollection" | "IList" | "IReadOnlyCollection" | "IReadOnlyList" => {
                generic(name, TypeKind::Interface, element, &["Count"])
            }
            "ImmutableArray" => generic(name, TypeKind::Struct, element, &["Length"]),
            "IEnumerable" => sequence_of(element),
            _ => TypeHandle::error(format!("{name}<{}>", element.name())),
        };
    }
    if !args.is_empty() {
        return TypeHandle::error(name);
    }

    match name {
        "int" | "long" | "bool" | "double" | "char" => primitive(name),
        "string" => string_type(),
        "object" => TypeHandle::new(name, TypeKind::Class, None, []),
        _ => match find_type(name, context) {
            Some(decl) => type_of_decl(&decl),
            None => TypeHandle::error(name),
        },
    }
}

pub(crate) fn find_type(name: &str, context: &SyntaxNode) -> Option<TypeDecl> {
    declared_types(context)
        .find(|decl| decl.name().is_some_and(|decl_name| decl_name.text_trimmed() == name))
}

pub(crate) fn type_of_decl(decl: &TypeDecl) -> TypeHandle {
    let kind = match decl.syntax().kind() {
        STRUCT_DECL => TypeKind::Struct,
        INTERFACE_DECL => TypeKind::Interface,
        _ => TypeKind::Class,
    };
    let name = decl.name().map(|name| name.text_trimmed().to_owned()).unwrap_or_default();
    TypeHandle::new(name, kind, None, [])
}

/// A LINQ extension call on a receiver whose element type is `element`.
pub(crate) fn linq_method(
    name: &str,
    args: &[SyntaxNode],
    element: &TypeHandle,
    type_args: &[TypeHandle],
) -> Option<MethodHandle> {
    let shape = match args {
        [] => MethodShape::Parameterless,
        [arg] if arg.kind() == LAMBDA_EXPR => MethodShape::Predicate,
        _ => MethodShape::Other,
    };
    let returns = match name {
        "Count" => primitive("int"),
        "Any" | "All" => primitive("bool"),
        "Where" => sequence_of(element.clone()),
        "Cast" | "OfType" => sequence_of(type_args.first()?.clone()),
        "First" | "FirstOrDefault" | "Single" | "Last" => element.clone(),
        "ToList" => generic("List", TypeKind::Class, element.clone(), &["Count"]),
        "ToArray" => TypeHandle::array(element.clone()),
        _ => return None,
    };

    Some(
        MethodHandle::new(ENUMERABLE, name, args.len())
            .extension()
            .with_shape(shape)
            .returning(returns),
    )
}
