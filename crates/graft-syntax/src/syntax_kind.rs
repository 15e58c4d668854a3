#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    L_PAREN,
    R_PAREN,
    L_BRACE,
    R_BRACE,
    L_BRACKET,
    R_BRACKET,
    LT,
    GT,
    LT_EQ,
    GT_EQ,
    EQ,
    EQ_EQ,
    BANG_EQ,
    BANG,
    AMP_AMP,
    PIPE_PIPE,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    QUESTION,
    COLON,
    SEMICOLON,
    COMMA,
    DOT,
    FAT_ARROW,

    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    READONLY_KW,
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    LOCK_KW,
    NEW_KW,
    THIS_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    IS_KW,
    VAR_KW,

    NAME,
    INT_NUMBER,
    STRING,

    UNKNOWN,
    EOF,

    COMPILATION_UNIT,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    FIELD_DECL,
    METHOD_DECL,
    PARAM_LIST,
    PARAM,
    VARIABLE_DECLARATOR,
    TYPE_REF,
    TYPE_ARG_LIST,

    BLOCK,
    LOCAL_DECL,
    EXPR_STMT,
    RETURN_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    LOCK_STMT,

    LITERAL,
    NAME_REF,
    THIS_EXPR,
    MEMBER_ACCESS,
    GENERIC_NAME,
    INVOCATION,
    ARG_LIST,
    OBJECT_CREATION,
    PREFIX_EXPR,
    BINARY_EXPR,
    ASSIGN_EXPR,
    IS_EXPR,
    CONDITIONAL_EXPR,
    LAMBDA_EXPR,
    PAREN_EXPR,

    ERROR,
    TOMBSTONE,
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Converts a raw discriminant back into a kind.
    pub fn from_raw(raw: u16) -> Option<Self> {
        if raw >= __LAST as u16 {
            return None;
        }
        // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants below `__LAST`.
        let kind = unsafe { std::mem::transmute::<u16, Self>(raw) };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        (CLASS_KW as u16..=VAR_KW as u16).contains(&(self as u16))
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | INTERNAL_KW | STATIC_KW | READONLY_KW
        )
    }

    pub fn is_type_decl(self) -> bool {
        matches!(self, CLASS_DECL | STRUCT_DECL | INTERFACE_DECL)
    }

    pub fn is_member(self) -> bool {
        self.is_type_decl() || matches!(self, FIELD_DECL | METHOD_DECL)
    }

    pub fn is_stmt(self) -> bool {
        matches!(self, BLOCK | LOCAL_DECL | EXPR_STMT | RETURN_STMT | IF_STMT | LOCK_STMT)
    }

    /// Expression node kinds. `ERROR` counts so that positional accessors stay
    /// stable when the parser recovered in place of an expression.
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            LITERAL
                | NAME_REF
                | THIS_EXPR
                | MEMBER_ACCESS
                | INVOCATION
                | OBJECT_CREATION
                | PREFIX_EXPR
                | GENERIC_NAME
                | BINARY_EXPR
                | ASSIGN_EXPR
                | IS_EXPR
                | CONDITIONAL_EXPR
                | LAMBDA_EXPR
                | PAREN_EXPR
                | ERROR
        )
    }

    /// Binding strength of an infix operator token; higher binds tighter.
    pub fn infix_precedence(self) -> Option<u8> {
        Some(match self {
            PIPE_PIPE => 2,
            AMP_AMP => 3,
            EQ_EQ | BANG_EQ => 4,
            LT | GT | LT_EQ | GT_EQ | IS_KW => 5,
            PLUS | MINUS => 6,
            STAR | SLASH => 7,
            _ => return None,
        })
    }

    /// The fixed source text of punctuation and keywords.
    pub fn static_text(self) -> Option<&'static str> {
        Some(match self {
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACE => "{",
            R_BRACE => "}",
            L_BRACKET => "[",
            R_BRACKET => "]",
            LT => "<",
            GT => ">",
            LT_EQ => "<=",
            GT_EQ => ">=",
            EQ => "=",
            EQ_EQ => "==",
            BANG_EQ => "!=",
            BANG => "!",
            AMP_AMP => "&&",
            PIPE_PIPE => "||",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            QUESTION => "?",
            COLON => ":",
            SEMICOLON => ";",
            COMMA => ",",
            DOT => ".",
            FAT_ARROW => "=>",
            CLASS_KW => "class",
            STRUCT_KW => "struct",
            INTERFACE_KW => "interface",
            PUBLIC_KW => "public",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            INTERNAL_KW => "internal",
            STATIC_KW => "static",
            READONLY_KW => "readonly",
            RETURN_KW => "return",
            IF_KW => "if",
            ELSE_KW => "else",
            LOCK_KW => "lock",
            NEW_KW => "new",
            THIS_KW => "this",
            TRUE_KW => "true",
            FALSE_KW => "false",
            NULL_KW => "null",
            IS_KW => "is",
            VAR_KW => "var",
            _ => return None,
        })
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "class" => CLASS_KW,
            "struct" => STRUCT_KW,
            "interface" => INTERFACE_KW,
            "public" => PUBLIC_KW,
            "private" => PRIVATE_KW,
            "protected" => PROTECTED_KW,
            "internal" => INTERNAL_KW,
            "static" => STATIC_KW,
            "readonly" => READONLY_KW,
            "return" => RETURN_KW,
            "if" => IF_KW,
            "else" => ELSE_KW,
            "lock" => LOCK_KW,
            "new" => NEW_KW,
            "this" => THIS_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "null" => NULL_KW,
            "is" => IS_KW,
            "var" => VAR_KW,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip() {
        for raw in 0..__LAST as u16 {
            let kind = SyntaxKind::from_raw(raw).unwrap();
            assert_eq!(kind as u16, raw);
        }
        assert_eq!(SyntaxKind::from_raw(__LAST as u16), None);
    }

    #[test]
    fn keywords_have_text() {
        for raw in CLASS_KW as u16..=VAR_KW as u16 {
            let kind = SyntaxKind::from_raw(raw).unwrap();
            assert!(kind.is_keyword());
            let text = kind.static_text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
        }
    }
}
