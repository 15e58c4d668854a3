//! The semantic side of matching: what a pattern may ask about types and
//! symbols, and how new identifiers are chosen without colliding.

mod handles;
mod names;

use graft_syntax::SyntaxNode;
pub use handles::{MethodHandle, MethodShape, SymbolHandle, TypeHandle, TypeKind};
pub use names::{has_camel_case_form, to_camel_case, unique_name, unique_name_in};
pub use rustc_hash::FxHashSet;

/// Declaring type of the LINQ-style sequence extension methods.
pub const ENUMERABLE: &str = "System.Linq.Enumerable";

/// Answers type and symbol questions about one syntax tree.
///
/// Every query returns `None` when the fact cannot be determined; callers
/// treat that as "no match". Implementations may block.
pub trait SemanticResolver: Send + Sync {
    /// Static type of an expression node, or the type a `TYPE_REF` names.
    fn resolve_type(&self, expr: &SyntaxNode) -> Option<TypeHandle>;

    /// Target of an `INVOCATION` node.
    fn resolve_method(&self, invocation: &SyntaxNode) -> Option<MethodHandle>;

    /// Error types never compare equal, not even to themselves.
    fn types_equal(&self, a: &TypeHandle, b: &TypeHandle) -> bool {
        !a.is_error() && !b.is_error() && a == b
    }

    /// Every name visible at the start of `position`.
    fn visible_names(&self, position: &SyntaxNode) -> FxHashSet<String>;

    /// The symbol introduced by a declaration node.
    fn declared_symbol(&self, declaration: &SyntaxNode) -> Option<SymbolHandle>;

    /// The symbol a `NAME_REF` binds to.
    fn referenced_symbol(&self, name_ref: &SyntaxNode) -> Option<SymbolHandle>;
}
