//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the Kotlin-style declaration language the light facades read.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (classes, annotation entries, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42, 42L, 0x2A
    DECIMAL, // 3.14, 1.0f
    CHAR,    // 'c'
    STRING,  // "hello $name"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    L_ANGLE,     // <
    R_ANGLE,     // >
    COMMA,       // ,
    DOT,         // .
    COLON,       // :
    COLON_COLON, // ::
    SEMICOLON,   // ;
    EQ,          // =
    QUESTION,    // ?
    STAR,        // *
    AT,          // @
    MINUS,       // -

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    PACKAGE_KW,
    IMPORT_KW,
    ANNOTATION_KW,
    CLASS_KW,
    FUN_KW,
    VAL_KW,
    VAR_KW,
    VARARG_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_HEADER,
    IMPORT_DIRECTIVE,
    QUALIFIED_NAME,
    CLASS_DECL,
    CLASS_BODY,
    FUNCTION_DECL,
    PROPERTY_DECL,
    BLOCK,
    MODIFIER_LIST,
    ANNOTATION_ENTRY,
    TYPE_REF,
    TYPE_ARG_LIST,
    PARAMETER_LIST,
    PARAMETER,
    VALUE_ARGUMENT_LIST,
    VALUE_ARGUMENT,
    ARGUMENT_NAME,

    // Expressions
    STRING_TEMPLATE,
    CONSTANT_EXPR,
    CALL_EXPR,
    NAME_REF,
    DOT_QUALIFIED_EXPR,
    COLLECTION_LITERAL,
    CLASS_LITERAL,

    // Error recovery
    ERROR,

    // Sentinel - must be last
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::NULL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::MINUS as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER
                | Self::DECIMAL
                | Self::CHAR
                | Self::STRING
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Keywords that still act as names (soft keywords).
    pub fn is_soft_keyword(self) -> bool {
        matches!(self, Self::ANNOTATION_KW | Self::VARARG_KW | Self::IMPORT_KW)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KtLanguage {}

impl rowan::Language for KtLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<KtLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<KtLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<KtLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<KtLanguage>;
