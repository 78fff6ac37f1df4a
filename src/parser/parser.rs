//! Recursive descent parser for Kotlin-style declarations
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node.
    ///
    /// The tree is created mutable so that usages can later be detached
    /// from it. Every call creates a fresh root.
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root_mut(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.range)
    }
}

/// Parse a source file into a CST
pub fn parse_file(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that can start a declaration; used as a recovery set.
const DECLARATION_START: &[SyntaxKind] = &[
    SyntaxKind::AT,
    SyntaxKind::ANNOTATION_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::FUN_KW,
    SyntaxKind::VAL_KW,
    SyntaxKind::VAR_KW,
];

/// Tokens that end an expression inside an argument or collection list.
const EXPRESSION_END: &[SyntaxKind] = &[
    SyntaxKind::COMMA,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACKET,
    SyntaxKind::R_BRACE,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Look ahead `n` significant tokens, skipping trivia
    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::__LAST)
    }

    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.nth(0) == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.nth(0))
    }

    fn at_end(&self) -> bool {
        self.nth_token(0).is_none()
    }

    fn is_name(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::IDENT || kind.is_soft_keyword()
    }

    fn at_name(&self) -> bool {
        Self::is_name(self.nth(0))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump_raw();
        }
    }

    fn bump_raw(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the next significant token (and any trivia before it)
    fn bump(&mut self) {
        self.skip_trivia();
        self.bump_raw();
    }

    /// Consume the next significant token, re-tagging it as `kind`
    fn bump_as(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.current() {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn expect_name(&mut self) -> bool {
        if self.at_name() {
            self.bump_as(SyntaxKind::IDENT);
            true
        } else {
            self.error("expected identifier");
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .nth_token(0)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_end() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_end() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node; leading trivia stays with the parent
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Grammar: file level
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        if self.at(SyntaxKind::PACKAGE_KW) {
            self.package_header();
        }
        while self.at(SyntaxKind::IMPORT_KW) {
            self.import_directive();
        }
        while !self.at_end() {
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            self.declaration();
        }

        // Trailing trivia belongs to the file
        self.skip_trivia();
        self.builder.finish_node();
    }

    fn package_header(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_HEADER);
        self.bump();
        self.qualified_name();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn import_directive(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DIRECTIVE);
        self.bump();
        self.qualified_name();
        if self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::STAR {
            self.bump();
            self.bump();
        }
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect_name();
        while self.at(SyntaxKind::DOT) && Self::is_name(self.nth(1)) {
            self.bump();
            self.bump_as(SyntaxKind::IDENT);
        }
        self.finish_node();
    }

    // =========================================================================
    // Grammar: declarations
    // =========================================================================

    fn declaration(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.at_any(&[SyntaxKind::AT, SyntaxKind::ANNOTATION_KW]);
        if has_modifiers {
            self.modifier_list();
        }

        match self.nth(0) {
            SyntaxKind::CLASS_KW => {
                self.start_node_at(checkpoint, SyntaxKind::CLASS_DECL);
                self.class_rest();
                self.finish_node();
            }
            SyntaxKind::FUN_KW => {
                self.start_node_at(checkpoint, SyntaxKind::FUNCTION_DECL);
                self.function_rest();
                self.finish_node();
            }
            SyntaxKind::VAL_KW | SyntaxKind::VAR_KW => {
                self.start_node_at(checkpoint, SyntaxKind::PROPERTY_DECL);
                self.property_rest();
                self.finish_node();
            }
            _ if has_modifiers => {
                self.start_node_at(checkpoint, SyntaxKind::ERROR);
                self.error("expected declaration after modifiers");
                self.finish_node();
            }
            _ => self.error_recover("expected declaration", DECLARATION_START),
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    fn modifier_list(&mut self) {
        self.start_node(SyntaxKind::MODIFIER_LIST);
        loop {
            match self.nth(0) {
                SyntaxKind::AT => self.annotation_entry(),
                SyntaxKind::ANNOTATION_KW => self.bump(),
                _ => break,
            }
        }
        self.finish_node();
    }

    fn class_rest(&mut self) {
        self.bump();
        self.expect_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parameter_list();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.class_body();
        }
    }

    fn class_body(&mut self) {
        self.start_node(SyntaxKind::CLASS_BODY);
        self.bump();
        while !self.at_end() && !self.at(SyntaxKind::R_BRACE) {
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            self.declaration();
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn function_rest(&mut self) {
        self.bump();
        self.expect_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parameter_list();
        } else {
            self.error("expected parameter list");
        }
        if self.eat(SyntaxKind::COLON) {
            self.type_ref();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.block();
        } else if self.eat(SyntaxKind::EQ) {
            self.expr();
        }
    }

    fn property_rest(&mut self) {
        self.bump();
        self.expect_name();
        if self.eat(SyntaxKind::COLON) {
            self.type_ref();
        }
        if self.eat(SyntaxKind::EQ) {
            self.expr();
        }
    }

    /// Function bodies are kept as opaque balanced-brace blocks
    fn block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.bump();
        let mut depth = 1usize;
        while !self.at_end() {
            match self.nth(0) {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parameter_list(&mut self) {
        self.start_node(SyntaxKind::PARAMETER_LIST);
        self.bump();
        while !self.at_end() && !self.at(SyntaxKind::R_PAREN) {
            self.parameter();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    fn parameter(&mut self) {
        self.start_node(SyntaxKind::PARAMETER);
        if self.at(SyntaxKind::AT) {
            self.modifier_list();
        }
        while self.at_any(&[SyntaxKind::VAL_KW, SyntaxKind::VAR_KW, SyntaxKind::VARARG_KW])
            && (Self::is_name(self.nth(1))
                || matches!(self.nth(1), SyntaxKind::VAL_KW | SyntaxKind::VAR_KW))
        {
            self.bump();
        }
        self.expect_name();
        if self.expect(SyntaxKind::COLON) {
            self.type_ref();
        }
        if self.eat(SyntaxKind::EQ) {
            self.expr();
        }
        self.finish_node();
    }

    fn type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);
        self.qualified_name();
        if self.at(SyntaxKind::L_ANGLE) {
            self.type_arg_list();
        }
        self.eat(SyntaxKind::QUESTION);
        self.finish_node();
    }

    fn type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);
        self.bump();
        while !self.at_end() && !self.at(SyntaxKind::R_ANGLE) {
            if !self.eat(SyntaxKind::STAR) {
                // Variance modifiers: `out T`, `in T`
                let variance = self
                    .nth_token(0)
                    .map(|t| t.kind == SyntaxKind::IDENT && matches!(t.text, "out" | "in"))
                    .unwrap_or(false);
                if variance && Self::is_name(self.nth(1)) {
                    self.bump();
                }
                self.type_ref();
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_ANGLE);
        self.finish_node();
    }

    // =========================================================================
    // Grammar: annotations and arguments
    // =========================================================================

    fn annotation_entry(&mut self) {
        self.start_node(SyntaxKind::ANNOTATION_ENTRY);
        self.bump();
        // Use-site target: `@field:Foo`
        if self.at_name() && self.nth(1) == SyntaxKind::COLON {
            self.bump_as(SyntaxKind::IDENT);
            self.bump();
        }
        self.type_ref();
        if self.at(SyntaxKind::L_PAREN) {
            self.value_argument_list();
        }
        self.finish_node();
    }

    fn value_argument_list(&mut self) {
        self.start_node(SyntaxKind::VALUE_ARGUMENT_LIST);
        self.bump();
        while !self.at_end() && !self.at(SyntaxKind::R_PAREN) {
            self.value_argument();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    fn value_argument(&mut self) {
        self.start_node(SyntaxKind::VALUE_ARGUMENT);
        if self.at_name() && self.nth(1) == SyntaxKind::EQ {
            self.start_node(SyntaxKind::ARGUMENT_NAME);
            self.bump_as(SyntaxKind::IDENT);
            self.finish_node();
            self.bump();
        }
        self.eat(SyntaxKind::STAR);
        self.expr();
        self.finish_node();
    }

    // =========================================================================
    // Grammar: expressions
    // =========================================================================

    fn expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.postfix_expr();
        while self.at(SyntaxKind::DOT) && Self::is_name(self.nth(1)) {
            self.start_node_at(checkpoint, SyntaxKind::DOT_QUALIFIED_EXPR);
            self.bump();
            self.postfix_expr();
            self.finish_node();
        }
    }

    fn postfix_expr(&mut self) {
        match self.nth(0) {
            SyntaxKind::STRING => {
                self.start_node(SyntaxKind::STRING_TEMPLATE);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::INTEGER
            | SyntaxKind::DECIMAL
            | SyntaxKind::CHAR
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW => {
                self.start_node(SyntaxKind::CONSTANT_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::MINUS
                if matches!(self.nth(1), SyntaxKind::INTEGER | SyntaxKind::DECIMAL) =>
            {
                self.start_node(SyntaxKind::CONSTANT_EXPR);
                self.bump();
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => self.collection_literal(),
            kind if Self::is_name(kind) => self.name_based_expr(),
            _ => {
                if self.at_any(EXPRESSION_END) || self.at_end() {
                    self.error("expected expression");
                } else {
                    self.error_recover("expected expression", EXPRESSION_END);
                }
            }
        }
    }

    fn name_based_expr(&mut self) {
        match self.nth(1) {
            SyntaxKind::L_PAREN | SyntaxKind::L_ANGLE => {
                self.start_node(SyntaxKind::CALL_EXPR);
                self.name_ref();
                if self.at(SyntaxKind::L_ANGLE) {
                    self.type_arg_list();
                }
                if self.at(SyntaxKind::L_PAREN) {
                    self.value_argument_list();
                } else {
                    self.error("expected argument list");
                }
                self.finish_node();
            }
            SyntaxKind::COLON_COLON if self.nth(2) == SyntaxKind::CLASS_KW => {
                self.start_node(SyntaxKind::CLASS_LITERAL);
                self.name_ref();
                self.bump();
                self.bump();
                self.finish_node();
            }
            _ => self.name_ref(),
        }
    }

    fn name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.bump_as(SyntaxKind::IDENT);
        self.finish_node();
    }

    fn collection_literal(&mut self) {
        self.start_node(SyntaxKind::COLLECTION_LITERAL);
        self.bump();
        while !self.at_end() && !self.at(SyntaxKind::R_BRACKET) {
            self.expr();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET);
        self.finish_node();
    }
}
