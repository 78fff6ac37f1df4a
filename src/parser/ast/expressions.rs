use super::*;
use crate::base::{ConstValue, FqName, unescape};

// ============================================================================
// Expression
// ============================================================================

/// An expression in argument or default-value position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    StringTemplate(StringTemplate),
    Constant(Constant),
    Call(CallExpr),
    DotQualified(DotQualifiedExpr),
    NameRef(NameRef),
    CollectionLiteral(CollectionLiteral),
    ClassLiteral(ClassLiteral),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::STRING_TEMPLATE
                | SyntaxKind::CONSTANT_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::DOT_QUALIFIED_EXPR
                | SyntaxKind::NAME_REF
                | SyntaxKind::COLLECTION_LITERAL
                | SyntaxKind::CLASS_LITERAL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let expr = match node.kind() {
            SyntaxKind::STRING_TEMPLATE => Self::StringTemplate(StringTemplate(node)),
            SyntaxKind::CONSTANT_EXPR => Self::Constant(Constant(node)),
            SyntaxKind::CALL_EXPR => Self::Call(CallExpr(node)),
            SyntaxKind::DOT_QUALIFIED_EXPR => Self::DotQualified(DotQualifiedExpr(node)),
            SyntaxKind::NAME_REF => Self::NameRef(NameRef(node)),
            SyntaxKind::COLLECTION_LITERAL => Self::CollectionLiteral(CollectionLiteral(node)),
            SyntaxKind::CLASS_LITERAL => Self::ClassLiteral(ClassLiteral(node)),
            _ => return None,
        };
        Some(expr)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::StringTemplate(n) => n.syntax(),
            Self::Constant(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::DotQualified(n) => n.syntax(),
            Self::NameRef(n) => n.syntax(),
            Self::CollectionLiteral(n) => n.syntax(),
            Self::ClassLiteral(n) => n.syntax(),
        }
    }
}

impl Expr {
    /// Whether this is a literal (string template or constant).
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::StringTemplate(_) | Self::Constant(_))
    }

    /// Strip member-access wrapping: `a.b.Foo(1)` yields the `Foo(1)` call.
    ///
    /// Anything that is not a dot-qualified expression ending in a call is
    /// returned unchanged.
    pub fn unwrap_call(self) -> Expr {
        if let Expr::DotQualified(dq) = &self {
            if let Some(Expr::Call(call)) = dq.selector() {
                return Expr::Call(call);
            }
        }
        self
    }

    /// The constant value of a literal expression.
    pub fn const_value(&self) -> Option<ConstValue> {
        match self {
            Self::StringTemplate(s) => s.value().map(ConstValue::String),
            Self::Constant(c) => c.value(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.syntax(), f)
    }
}

// ============================================================================
// Literals
// ============================================================================

ast_node!(StringTemplate, STRING_TEMPLATE);

impl StringTemplate {
    /// The literal text including quotes.
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    /// Whether the template interpolates `$name` or `${...}`.
    pub fn has_interpolation(&self) -> bool {
        let text = self.text();
        let bytes = text.as_bytes();
        bytes.iter().enumerate().any(|(i, &b)| {
            b == b'$'
                && (i == 0 || bytes[i - 1] != b'\\')
                && bytes
                    .get(i + 1)
                    .map(|n| *n == b'{' || n.is_ascii_alphabetic() || *n == b'_')
                    .unwrap_or(false)
        })
    }

    /// The string value, or `None` for interpolated templates.
    pub fn value(&self) -> Option<String> {
        if self.has_interpolation() {
            return None;
        }
        let token = find_token(&self.0, SyntaxKind::STRING)?;
        let text = token.text();
        let body = text.strip_prefix('"')?.strip_suffix('"')?;
        unescape(body)
    }
}

ast_node!(Constant, CONSTANT_EXPR);

impl Constant {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    /// The literal's value. Malformed literals have none.
    pub fn value(&self) -> Option<ConstValue> {
        let negative = has_token(&self.0, SyntaxKind::MINUS);
        let token = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_literal())?;
        let value = match token.kind() {
            SyntaxKind::INTEGER => ConstValue::parse_integer(token.text())?,
            SyntaxKind::DECIMAL => ConstValue::parse_decimal(token.text())?,
            SyntaxKind::CHAR => {
                let body = token.text().strip_prefix('\'')?.strip_suffix('\'')?;
                let mut chars = unescape(body)?.chars().collect::<Vec<_>>();
                if chars.len() != 1 {
                    return None;
                }
                ConstValue::Char(chars.remove(0))
            }
            SyntaxKind::TRUE_KW => ConstValue::Boolean(true),
            SyntaxKind::FALSE_KW => ConstValue::Boolean(false),
            SyntaxKind::NULL_KW => ConstValue::Null,
            _ => return None,
        };
        Some(if negative { value.negate() } else { value })
    }
}

// ============================================================================
// Calls and references
// ============================================================================

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    first_child_method!(callee, NameRef);
    first_child_method!(value_argument_list, ValueArgumentList);

    pub fn value_arguments(&self) -> Vec<ValueArgument> {
        self.value_argument_list()
            .map(|l| l.arguments())
            .unwrap_or_default()
    }

    /// The callee name prefixed by the receiver chain (`a.b.Foo` for `a.b.Foo(1)`).
    pub fn written_name(&self) -> Option<FqName> {
        let name = self.callee()?.name();
        let parent = self.0.parent().and_then(DotQualifiedExpr::cast);
        let receiver = parent
            .filter(|dq| dq.selector().map(|s| s.syntax() == &self.0).unwrap_or(false))
            .and_then(|dq| dq.receiver());
        let mut segments = match receiver {
            None => Vec::new(),
            Some(Expr::NameRef(r)) => vec![r.name()],
            Some(Expr::DotQualified(inner)) => inner.name_chain()?,
            Some(_) => return None,
        };
        segments.push(name);
        Some(FqName::new(segments.join(".")))
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn name(&self) -> Name {
        find_token(&self.0, SyntaxKind::IDENT)
            .map(|t| ident_text(&t))
            .unwrap_or_default()
    }

    pub fn ident_token(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::IDENT)
    }
}

ast_node!(DotQualifiedExpr, DOT_QUALIFIED_EXPR);

impl DotQualifiedExpr {
    /// The expression before the last `.`.
    pub fn receiver(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The expression after the last `.`.
    pub fn selector(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    /// `a.b.c` as `[a, b, c]` when every part is a plain name.
    pub fn name_chain(&self) -> Option<Vec<Name>> {
        let mut chain = match self.receiver()? {
            Expr::NameRef(r) => vec![r.name()],
            Expr::DotQualified(inner) => inner.name_chain()?,
            _ => return None,
        };
        match self.selector()? {
            Expr::NameRef(r) => chain.push(r.name()),
            _ => return None,
        }
        Some(chain)
    }
}

ast_node!(CollectionLiteral, COLLECTION_LITERAL);

impl CollectionLiteral {
    /// The bracketed element expressions in order.
    pub fn inner_expressions(&self) -> Vec<Expr> {
        self.0.children().filter_map(Expr::cast).collect()
    }
}

ast_node!(ClassLiteral, CLASS_LITERAL);

impl ClassLiteral {
    first_child_method!(name_ref, NameRef);
}

// ============================================================================
// Call-shaped annotation usages
// ============================================================================

/// An annotation usage: either an `@Foo(...)` entry or a `Foo(...)` call
/// written as a nested annotation argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallElement {
    Annotation(AnnotationEntry),
    Call(CallExpr),
}

impl AstNode for CallElement {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::ANNOTATION_ENTRY | SyntaxKind::CALL_EXPR)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ANNOTATION_ENTRY => Some(Self::Annotation(AnnotationEntry(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Annotation(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
        }
    }
}

impl CallElement {
    /// Supplied arguments in call order.
    pub fn value_arguments(&self) -> Vec<ValueArgument> {
        match self {
            Self::Annotation(entry) => entry.value_arguments(),
            Self::Call(call) => call.value_arguments(),
        }
    }

    /// The callee name as written.
    pub fn written_name(&self) -> Option<FqName> {
        match self {
            Self::Annotation(entry) => entry.written_name(),
            Self::Call(call) => call.written_name(),
        }
    }

    pub fn text_range(&self) -> rowan::TextRange {
        self.syntax().text_range()
    }
}

impl std::fmt::Display for CallElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.syntax(), f)
    }
}

impl From<AnnotationEntry> for CallElement {
    fn from(entry: AnnotationEntry) -> Self {
        Self::Annotation(entry)
    }
}

impl From<CallExpr> for CallElement {
    fn from(call: CallExpr) -> Self {
        Self::Call(call)
    }
}
