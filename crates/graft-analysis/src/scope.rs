use graft_resolve::SymbolHandle;
use graft_syntax::SyntaxKind::*;
use graft_syntax::ast::{
    AstNode, Block, CompilationUnit, FieldDecl, LambdaExpr, LocalDecl, MethodDecl, Param,
    TypeDecl,
};
use graft_syntax::{SyntaxNode, SyntaxToken};

/// Something that introduces a name.
#[derive(Debug, Clone)]
pub(crate) enum Declaration {
    Local(LocalDecl),
    Param(Param),
    Field(FieldDecl),
    Method(MethodDecl),
    Type(TypeDecl),
}

impl Declaration {
    pub(crate) fn from_node(node: &SyntaxNode) -> Option<Self> {
        let node = node.clone();
        Some(match node.kind() {
            LOCAL_DECL => Self::Local(LocalDecl::cast(node)?),
            PARAM => Self::Param(Param::cast(node)?),
            FIELD_DECL => Self::Field(FieldDecl::cast(node)?),
            METHOD_DECL => Self::Method(MethodDecl::cast(node)?),
            VARIABLE_DECLARATOR => return Self::from_node(&node.parent()?),
            kind if kind.is_type_decl() => Self::Type(TypeDecl::cast(node)?),
            _ => return None,
        })
    }

    pub(crate) fn name(&self) -> Option<SyntaxToken> {
        match self {
            Self::Local(local) => local.declarator()?.name(),
            Self::Param(param) => param.name(),
            Self::Field(field) => field.declarator()?.name(),
            Self::Method(method) => method.name(),
            Self::Type(ty) => ty.name(),
        }
    }

    /// Symbols are keyed by where the declared name starts.
    pub(crate) fn symbol(&self) -> Option<SymbolHandle> {
        let name = self.name().filter(|name| !name.is_missing())?;
        Some(SymbolHandle::new(name.trimmed_range().start().into()))
    }

    fn has_name(&self, text: &str) -> bool {
        self.name().is_some_and(|name| !name.is_missing() && name.text_trimmed() == text)
    }
}

/// Every declaration in scope at `position`, innermost scope first.
pub(crate) fn declarations(position: &SyntaxNode) -> Vec<Declaration> {
    let mut out = Vec::new();
    for scope in position.ancestors() {
        match scope.kind() {
            BLOCK => {
                let Some(block) = Block::cast(scope) else { continue };
                out.extend(block.statements().filter_map(LocalDecl::cast).map(Declaration::Local));
            }
            LAMBDA_EXPR => {
                let Some(lambda) = LambdaExpr::cast(scope) else { continue };
                out.extend(lambda.params().into_iter().map(Declaration::Param));
            }
            METHOD_DECL => {
                let Some(method) = MethodDecl::cast(scope) else { continue };
                if let Some(params) = method.param_list() {
                    out.extend(params.params().map(Declaration::Param));
                }
            }
            kind if kind.is_type_decl() => {
                let Some(ty) = TypeDecl::cast(scope) else { continue };
                out.extend(ty.members().filter_map(|member| Declaration::from_node(&member)));
                out.push(Declaration::Type(ty));
            }
            COMPILATION_UNIT => {
                let Some(unit) = CompilationUnit::cast(scope) else { continue };
                out.extend(unit.type_decls().map(Declaration::Type));
            }
            _ => {}
        }
    }
    out
}

/// The innermost declaration of `name` visible at `position`.
///
/// Locals only count once their declaration is complete, so an initializer
/// never sees the variable it initializes.
pub(crate) fn lookup(name: &str, position: &SyntaxNode) -> Option<Declaration> {
    let start = position.trimmed_range().start();
    declarations(position).into_iter().find(|declaration| {
        declaration.has_name(name)
            && match declaration {
                Declaration::Local(local) => local.syntax().trimmed_range().end() <= start,
                _ => true,
            }
    })
}

pub(crate) fn containing<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.ancestors().find_map(N::cast)
}

/// Every type declared anywhere in the tree containing `node`.
pub(crate) fn declared_types(node: &SyntaxNode) -> impl Iterator<Item = TypeDecl> + use<> {
    node.root().descendants().filter_map(TypeDecl::cast)
}
