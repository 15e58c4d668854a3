use crate::SyntaxKind::{self, *};
use crate::{NodeOrToken, SyntaxNode, SyntaxToken};

pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($($(#[$meta:meta])* $name:ident => $($kind:ident)|+;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $($kind)|+)
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    )*};
}

ast_node! {
    CompilationUnit => COMPILATION_UNIT;
    /// A `class`, `struct` or `interface` declaration.
    TypeDecl => CLASS_DECL | STRUCT_DECL | INTERFACE_DECL;
    FieldDecl => FIELD_DECL;
    MethodDecl => METHOD_DECL;
    ParamList => PARAM_LIST;
    Param => PARAM;
    VariableDeclarator => VARIABLE_DECLARATOR;
    TypeRef => TYPE_REF;
    TypeArgList => TYPE_ARG_LIST;
    Block => BLOCK;
    LocalDecl => LOCAL_DECL;
    ReturnStmt => RETURN_STMT;
    IfStmt => IF_STMT;
    ElseClause => ELSE_CLAUSE;
    LockStmt => LOCK_STMT;
    Literal => LITERAL;
    NameRef => NAME_REF;
    MemberAccess => MEMBER_ACCESS;
    GenericName => GENERIC_NAME;
    Invocation => INVOCATION;
    ArgList => ARG_LIST;
    PrefixExpr => PREFIX_EXPR;
    BinaryExpr => BINARY_EXPR;
    IsExpr => IS_EXPR;
    ConditionalExpr => CONDITIONAL_EXPR;
    LambdaExpr => LAMBDA_EXPR;
    ParenExpr => PAREN_EXPR;
}

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| token.kind() == kind)
}

fn exprs(parent: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> + use<> {
    parent.children().filter(|node| node.kind().is_expr())
}

fn modifiers(parent: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter(|token| token.kind().is_modifier())
}

impl CompilationUnit {
    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + use<> {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

impl TypeDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        modifiers(&self.0)
    }

    pub fn l_brace(&self) -> Option<SyntaxToken> {
        token(&self.0, L_BRACE)
    }

    pub fn r_brace(&self) -> Option<SyntaxToken> {
        token(&self.0, R_BRACE)
    }

    /// Fields, methods and nested type declarations, in source order.
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_member())
    }
}

impl FieldDecl {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        modifiers(&self.0)
    }

    pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers().any(|token| token.kind() == kind)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn declarator(&self) -> Option<VariableDeclarator> {
        child(&self.0)
    }
}

impl MethodDecl {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        modifiers(&self.0)
    }

    pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
        self.modifiers().any(|token| token.kind() == kind)
    }

    pub fn ret_ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + use<> {
        self.0.children().filter_map(Param::cast)
    }
}

impl Param {
    /// Absent for untyped lambda parameters.
    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }
}

impl VariableDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }

    pub fn initializer(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }
}

impl TypeRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        child(&self.0)
    }
}

impl TypeArgList {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + use<> {
        self.0.children().filter_map(TypeRef::cast)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_stmt())
    }
}

impl LocalDecl {
    /// `None` for `var` declarations.
    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn declarator(&self) -> Option<VariableDeclarator> {
        child(&self.0)
    }
}

impl ReturnStmt {
    pub fn expr(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }
}

impl IfStmt {
    pub fn condition(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child(&self.0)
    }
}

impl ElseClause {
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind().is_stmt())
    }
}

impl LockStmt {
    pub fn expr(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind().is_stmt())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    String,
    Bool(bool),
    Null,
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.first_token()
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        Some(match self.token()?.kind() {
            INT_NUMBER => LiteralKind::Int,
            STRING => LiteralKind::String,
            TRUE_KW => LiteralKind::Bool(true),
            FALSE_KW => LiteralKind::Bool(false),
            NULL_KW => LiteralKind::Null,
            _ => return None,
        })
    }

    /// `Some` for the `true`/`false` literals.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind()? {
            LiteralKind::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.token().is_some_and(|token| token.kind() == INT_NUMBER && token.text_trimmed() == "0")
    }
}

impl NameRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }
}

impl MemberAccess {
    pub fn receiver(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    /// The member name token, for both plain and generic member names.
    pub fn name(&self) -> Option<SyntaxToken> {
        match self.0.children().last()? {
            node if node.kind() == NAME_REF || node.kind() == GENERIC_NAME => token(&node, NAME),
            _ => None,
        }
    }

    pub fn generic_name(&self) -> Option<GenericName> {
        child(&self.0)
    }

    /// The `NAME_REF` or `GENERIC_NAME` after the dot.
    pub fn name_node(&self) -> Option<SyntaxNode> {
        self.0.children().skip(1).find(|node| matches!(node.kind(), NAME_REF | GENERIC_NAME))
    }
}

impl GenericName {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, NAME)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        child(&self.0)
    }
}

impl Invocation {
    pub fn callee(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        child(&self.0)
    }

    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.arg_list().into_iter().flat_map(|list| exprs(&list.0))
    }

    /// The callee when it is a member access `receiver.Name(...)`.
    pub fn member_access(&self) -> Option<MemberAccess> {
        self.callee().and_then(MemberAccess::cast)
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        exprs(&self.0)
    }
}

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        self.0.first_token()
    }

    pub fn operand(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .find(|token| token.kind().infix_precedence().is_some())
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op().map(|op| op.kind())
    }

    pub fn rhs(&self) -> Option<SyntaxNode> {
        exprs(&self.0).nth(1)
    }
}

impl IsExpr {
    pub fn expr(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

impl ConditionalExpr {
    pub fn condition(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }

    pub fn when_true(&self) -> Option<SyntaxNode> {
        exprs(&self.0).nth(1)
    }

    pub fn when_false(&self) -> Option<SyntaxNode> {
        exprs(&self.0).nth(2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LambdaBody {
    Expr(SyntaxNode),
    Block(Block),
}

impl LambdaExpr {
    /// Parameter names, for both `x => ...` and `(x, y) => ...`.
    pub fn params(&self) -> Vec<Param> {
        match child::<ParamList>(&self.0) {
            Some(list) => list.params().collect(),
            None => child::<Param>(&self.0).into_iter().collect(),
        }
    }

    pub fn body(&self) -> Option<LambdaBody> {
        let body = self.0.children().last()?;
        match body.kind() {
            BLOCK => Block::cast(body).map(LambdaBody::Block),
            kind if kind.is_expr() => Some(LambdaBody::Expr(body)),
            _ => None,
        }
    }
}

impl ParenExpr {
    pub fn expr(&self) -> Option<SyntaxNode> {
        exprs(&self.0).next()
    }
}
