//! Logos-based lexer for Kotlin-style declarations
//!
//! Fast tokenization using the logos crate. Every byte of input ends up in
//! some token so the resulting tree is lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"`[^`\n]+`")]
    Ident,

    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"[0-9]+[fF]")]
    Decimal,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("@")]
    At,
    #[token("-")]
    Minus,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("annotation")]
    Annotation,
    #[token("class")]
    Class,
    #[token("fun")]
    Fun,
    #[token("val")]
    Val,
    #[token("var")]
    Var,
    #[token("vararg")]
    Vararg,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Decimal => SyntaxKind::DECIMAL,
            LogosToken::Char => SyntaxKind::CHAR,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LAngle => SyntaxKind::L_ANGLE,
            LogosToken::RAngle => SyntaxKind::R_ANGLE,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::At => SyntaxKind::AT,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Package => SyntaxKind::PACKAGE_KW,
            LogosToken::Import => SyntaxKind::IMPORT_KW,
            LogosToken::Annotation => SyntaxKind::ANNOTATION_KW,
            LogosToken::Class => SyntaxKind::CLASS_KW,
            LogosToken::Fun => SyntaxKind::FUN_KW,
            LogosToken::Val => SyntaxKind::VAL_KW,
            LogosToken::Var => SyntaxKind::VAR_KW,
            LogosToken::Vararg => SyntaxKind::VARARG_KW,
            LogosToken::True => SyntaxKind::TRUE_KW,
            LogosToken::False => SyntaxKind::FALSE_KW,
            LogosToken::Null => SyntaxKind::NULL_KW,
        }
    }
}
