macro_rules! syntax_kinds {
    ($($kind:ident,)*) => {
        /// Every token and node kind of the Go concrete syntax tree
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($kind,)*
        }

        /// Indexed by discriminant
        const KINDS: &[SyntaxKind] = &[$(SyntaxKind::$kind,)*];
    };
}

syntax_kinds! {
    // trivia
    TOKEN_WHITESPACE,
    TOKEN_LINE_COMMENT,
    TOKEN_BLOCK_COMMENT,
    TOKEN_ERROR,

    // identifiers and literals
    TOKEN_IDENT,
    TOKEN_INT,
    TOKEN_FLOAT,
    TOKEN_IMAGINARY,
    TOKEN_RUNE,
    TOKEN_STRING,
    TOKEN_RAW_STRING,

    // keywords
    TOKEN_BREAK,
    TOKEN_CASE,
    TOKEN_CHAN,
    TOKEN_CONST,
    TOKEN_CONTINUE,
    TOKEN_DEFAULT,
    TOKEN_DEFER,
    TOKEN_ELSE,
    TOKEN_FALLTHROUGH,
    TOKEN_FOR,
    TOKEN_FUNC,
    TOKEN_GO,
    TOKEN_GOTO,
    TOKEN_IF,
    TOKEN_IMPORT,
    TOKEN_INTERFACE,
    TOKEN_MAP,
    TOKEN_PACKAGE,
    TOKEN_RANGE,
    TOKEN_RETURN,
    TOKEN_SELECT,
    TOKEN_STRUCT,
    TOKEN_SWITCH,
    TOKEN_TYPE,
    TOKEN_VAR,

    // operators
    TOKEN_ADD,
    TOKEN_SUB,
    TOKEN_MUL,
    TOKEN_DIV,
    TOKEN_REM,
    TOKEN_AND,
    TOKEN_OR,
    TOKEN_XOR,
    TOKEN_SHL,
    TOKEN_SHR,
    TOKEN_AND_NOT,
    TOKEN_ADD_ASSIGN,
    TOKEN_SUB_ASSIGN,
    TOKEN_MUL_ASSIGN,
    TOKEN_DIV_ASSIGN,
    TOKEN_REM_ASSIGN,
    TOKEN_AND_ASSIGN,
    TOKEN_OR_ASSIGN,
    TOKEN_XOR_ASSIGN,
    TOKEN_SHL_ASSIGN,
    TOKEN_SHR_ASSIGN,
    TOKEN_AND_NOT_ASSIGN,
    TOKEN_LAND,
    TOKEN_LOR,
    TOKEN_ARROW,
    TOKEN_INC,
    TOKEN_DEC,
    TOKEN_EQL,
    TOKEN_LSS,
    TOKEN_GTR,
    TOKEN_ASSIGN,
    TOKEN_NOT,
    TOKEN_TILDE,
    TOKEN_NEQ,
    TOKEN_LEQ,
    TOKEN_GEQ,
    TOKEN_DEFINE,
    TOKEN_ELLIPSIS,
    TOKEN_L_PAREN,
    TOKEN_R_PAREN,
    TOKEN_L_BRACK,
    TOKEN_R_BRACK,
    TOKEN_L_BRACE,
    TOKEN_R_BRACE,
    TOKEN_COMMA,
    TOKEN_DOT,
    TOKEN_SEMICOLON,
    TOKEN_COLON,

    // end of input, never stored in a tree
    TOKEN_EOF,

    // nodes
    NODE_ERROR,
    NODE_SOURCE_FILE,
    NODE_PACKAGE_CLAUSE,
    NODE_IMPORT_DECL,
    NODE_IMPORT_SPEC,
    NODE_CONST_DECL,
    NODE_CONST_SPEC,
    NODE_VAR_DECL,
    NODE_VAR_SPEC,
    NODE_TYPE_DECL,
    NODE_TYPE_SPEC,
    NODE_FUNC_DECL,
    NODE_RECEIVER,
    NODE_TYPE_PARAM_LIST,
    NODE_TYPE_PARAM,
    NODE_PARAM_LIST,
    NODE_PARAM,
    NODE_RESULT,

    NODE_NAME,
    NODE_NAME_REF,
    NODE_LABEL,

    NODE_TYPE_NAME,
    NODE_TYPE_ARGS,
    NODE_POINTER_TYPE,
    NODE_ARRAY_TYPE,
    NODE_SLICE_TYPE,
    NODE_MAP_TYPE,
    NODE_CHAN_TYPE,
    NODE_FUNC_TYPE,
    NODE_STRUCT_TYPE,
    NODE_FIELD_DECL,
    NODE_INTERFACE_TYPE,
    NODE_METHOD_SPEC,
    NODE_TYPE_ELEM,
    NODE_PAREN_TYPE,

    NODE_BLOCK,
    NODE_EXPR_STMT,
    NODE_SEND_STMT,
    NODE_INC_DEC_STMT,
    NODE_ASSIGN_STMT,
    NODE_SHORT_VAR_DECL,
    NODE_LABELED_STMT,
    NODE_GO_STMT,
    NODE_DEFER_STMT,
    NODE_RETURN_STMT,
    NODE_BRANCH_STMT,
    NODE_IF_STMT,
    NODE_SWITCH_STMT,
    NODE_TYPE_SWITCH_STMT,
    NODE_CASE_CLAUSE,
    NODE_SELECT_STMT,
    NODE_COMM_CLAUSE,
    NODE_FOR_STMT,
    NODE_RANGE_CLAUSE,

    NODE_LITERAL,
    NODE_COMPOSITE_LIT,
    NODE_LITERAL_VALUE,
    NODE_KEYED_ELEMENT,
    NODE_FUNC_LIT,
    NODE_PAREN_EXPR,
    NODE_SELECTOR_EXPR,
    NODE_INDEX_EXPR,
    NODE_SLICE_EXPR,
    NODE_TYPE_ASSERT_EXPR,
    NODE_CALL_EXPR,
    NODE_ARG_LIST,
    NODE_UNARY_EXPR,
    NODE_BINARY_EXPR,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub fn from_raw(raw: u16) -> Option<Self> {
        KINDS.get(usize::from(raw)).copied()
    }

    /// Whitespace and comments, which the parser skips over
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TOKEN_WHITESPACE | TOKEN_LINE_COMMENT | TOKEN_BLOCK_COMMENT
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TOKEN_INT | TOKEN_FLOAT | TOKEN_IMAGINARY | TOKEN_RUNE | TOKEN_STRING | TOKEN_RAW_STRING
        )
    }

    /// A newline after a token of this kind terminates the statement
    pub fn inserts_semicolon(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                TOKEN_IDENT
                    | TOKEN_BREAK
                    | TOKEN_CONTINUE
                    | TOKEN_FALLTHROUGH
                    | TOKEN_RETURN
                    | TOKEN_INC
                    | TOKEN_DEC
                    | TOKEN_R_PAREN
                    | TOKEN_R_BRACK
                    | TOKEN_R_BRACE
            )
    }

    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            TOKEN_ASSIGN
                | TOKEN_ADD_ASSIGN
                | TOKEN_SUB_ASSIGN
                | TOKEN_MUL_ASSIGN
                | TOKEN_DIV_ASSIGN
                | TOKEN_REM_ASSIGN
                | TOKEN_AND_ASSIGN
                | TOKEN_OR_ASSIGN
                | TOKEN_XOR_ASSIGN
                | TOKEN_SHL_ASSIGN
                | TOKEN_SHR_ASSIGN
                | TOKEN_AND_NOT_ASSIGN
        )
    }

    pub fn from_keyword(ident: &str) -> Option<Self> {
        let kind = match ident {
            "break" => TOKEN_BREAK,
            "case" => TOKEN_CASE,
            "chan" => TOKEN_CHAN,
            "const" => TOKEN_CONST,
            "continue" => TOKEN_CONTINUE,
            "default" => TOKEN_DEFAULT,
            "defer" => TOKEN_DEFER,
            "else" => TOKEN_ELSE,
            "fallthrough" => TOKEN_FALLTHROUGH,
            "for" => TOKEN_FOR,
            "func" => TOKEN_FUNC,
            "go" => TOKEN_GO,
            "goto" => TOKEN_GOTO,
            "if" => TOKEN_IF,
            "import" => TOKEN_IMPORT,
            "interface" => TOKEN_INTERFACE,
            "map" => TOKEN_MAP,
            "package" => TOKEN_PACKAGE,
            "range" => TOKEN_RANGE,
            "return" => TOKEN_RETURN,
            "select" => TOKEN_SELECT,
            "struct" => TOKEN_STRUCT,
            "switch" => TOKEN_SWITCH,
            "type" => TOKEN_TYPE,
            "var" => TOKEN_VAR,
            _ => return None,
        };
        Some(kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}
