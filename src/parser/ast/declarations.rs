use super::*;
use crate::base::FqName;

// ============================================================================
// Source file
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    first_child_method!(package_header, PackageHeader);
    children_method!(imports, ImportDirective);
    children_method!(declarations, Declaration);

    /// The declared package, or the root package when there is no header.
    pub fn package_name(&self) -> FqName {
        self.package_header()
            .and_then(|h| h.qualified_name())
            .map(|q| q.fq_name())
            .unwrap_or_else(FqName::root)
    }

    /// Every class in the file, including nested ones, in source order.
    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> + '_ {
        self.0.descendants().filter_map(ClassDecl::cast)
    }

    /// Every annotation entry in the file, including those on parameters.
    pub fn annotation_entries(&self) -> impl Iterator<Item = AnnotationEntry> + '_ {
        self.0.descendants().filter_map(AnnotationEntry::cast)
    }
}

ast_node!(PackageHeader, PACKAGE_HEADER);

impl PackageHeader {
    first_child_method!(qualified_name, QualifiedName);
}

ast_node!(ImportDirective, IMPORT_DIRECTIVE);

impl ImportDirective {
    first_child_method!(qualified_name, QualifiedName);
    has_token_method!(is_all_under, STAR, "import a.b.*");

    pub fn fq_name(&self) -> Option<FqName> {
        self.qualified_name().map(|q| q.fq_name())
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// The identifier segments (`a`, `b`, `C` for `a.b.C`).
    pub fn segments(&self) -> Vec<Name> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| ident_text(&t))
            .collect()
    }

    pub fn fq_name(&self) -> FqName {
        FqName::new(self.segments().join("."))
    }

    /// The last segment.
    pub fn short_name(&self) -> Option<Name> {
        self.segments().pop()
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Any top-level or member declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Class(ClassDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
}

impl AstNode for Declaration {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL | SyntaxKind::FUNCTION_DECL | SyntaxKind::PROPERTY_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::FUNCTION_DECL => Some(Self::Function(FunctionDecl(node))),
            SyntaxKind::PROPERTY_DECL => Some(Self::Property(PropertyDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
        }
    }
}

impl Declaration {
    pub fn name(&self) -> Option<Name> {
        match self {
            Self::Class(n) => n.name(),
            Self::Function(n) => n.name(),
            Self::Property(n) => n.name(),
        }
    }

    pub fn modifier_list(&self) -> Option<ModifierList> {
        self.syntax().children().find_map(ModifierList::cast)
    }

    /// Annotation entries written directly on this declaration.
    pub fn annotation_entries(&self) -> Vec<AnnotationEntry> {
        self.modifier_list()
            .map(|m| m.annotation_entries().collect())
            .unwrap_or_default()
    }
}

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    ident_name_method!();
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(body, ClassBody);

    /// Whether the class is declared `annotation class`.
    pub fn is_annotation(&self) -> bool {
        self.modifier_list()
            .map(|m| m.has_annotation_keyword())
            .unwrap_or(false)
    }

    /// Primary constructor parameters in declaration order.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.parameter_list()
            .map(|l| l.parameters().collect())
            .unwrap_or_default()
    }

    /// Fully qualified name, taking the package and enclosing classes into account.
    pub fn fq_name(&self) -> Option<FqName> {
        let mut segments = vec![self.name()?];
        for outer in self.0.ancestors().skip(1).filter_map(ClassDecl::cast) {
            segments.push(outer.name()?);
        }
        let package = self
            .0
            .ancestors()
            .find_map(SourceFile::cast)
            .map(|f| f.package_name())
            .unwrap_or_else(FqName::root);
        Some(
            segments
                .iter()
                .rev()
                .fold(package, |acc, segment| acc.child(segment)),
        )
    }
}

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    children_method!(declarations, Declaration);
}

ast_node!(FunctionDecl, FUNCTION_DECL);

impl FunctionDecl {
    ident_name_method!();
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(return_type, TypeRef);
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    ident_name_method!();
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(type_ref, TypeRef);
    first_child_method!(initializer, Expr);
    has_token_method!(is_var, VAR_KW, "var x = 1");
}

ast_node!(ModifierList, MODIFIER_LIST);

impl ModifierList {
    children_method!(annotation_entries, AnnotationEntry);
    has_token_method!(has_annotation_keyword, ANNOTATION_KW, "annotation class A");
}

// ============================================================================
// Annotation entries
// ============================================================================

ast_node!(AnnotationEntry, ANNOTATION_ENTRY);

impl AnnotationEntry {
    first_child_method!(type_ref, TypeRef);
    first_child_method!(value_argument_list, ValueArgumentList);

    /// Supplied arguments in call order (empty for `@A` without parentheses).
    pub fn value_arguments(&self) -> Vec<ValueArgument> {
        self.value_argument_list()
            .map(|l| l.arguments())
            .unwrap_or_default()
    }

    /// Use-site target of `@field:Foo`.
    pub fn use_site_target(&self) -> Option<Name> {
        if !has_token(&self.0, SyntaxKind::COLON) {
            return None;
        }
        find_token(&self.0, SyntaxKind::IDENT).map(|t| ident_text(&t))
    }

    /// The annotation name as written (`Foo` or `a.b.Foo`).
    pub fn written_name(&self) -> Option<FqName> {
        self.type_ref()
            .and_then(|t| t.qualified_name())
            .map(|q| q.fq_name())
    }

    /// The declaration this entry annotates, if any.
    pub fn owner(&self) -> Option<SyntaxNode> {
        let modifiers = self.ancestor::<ModifierList>()?;
        modifiers.syntax().parent()
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    first_child_method!(qualified_name, QualifiedName);
    has_token_method!(is_nullable, QUESTION, "String?");

    /// Type arguments (`T` in `Array<T>`); star projections are skipped.
    pub fn type_arguments(&self) -> Vec<TypeRef> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_ARG_LIST)
            .map(|list| list.children().filter_map(TypeRef::cast).collect())
            .unwrap_or_default()
    }

    pub fn written_name(&self) -> Option<FqName> {
        self.qualified_name().map(|q| q.fq_name())
    }
}

// ============================================================================
// Parameters
// ============================================================================

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    children_method!(parameters, Parameter);
}

ast_node!(Parameter, PARAMETER);

impl Parameter {
    ident_name_method!();
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(type_ref, TypeRef);
    has_token_method!(is_vararg, VARARG_KW, "vararg names: String");

    /// The default value expression after `=`.
    pub fn default_value(&self) -> Option<Expr> {
        let mut seen_eq = false;
        for child in self.0.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::EQ => seen_eq = true,
                rowan::NodeOrToken::Node(n) if seen_eq => {
                    if let Some(expr) = Expr::cast(n) {
                        return Some(expr);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// The class whose primary constructor declares this parameter.
    pub fn owning_class(&self) -> Option<ClassDecl> {
        let list = self.0.parent()?;
        list.parent().and_then(ClassDecl::cast)
    }
}

// ============================================================================
// Value arguments
// ============================================================================

ast_node!(ValueArgumentList, VALUE_ARGUMENT_LIST);

impl ValueArgumentList {
    children_vec_method!(arguments, ValueArgument);
}

ast_node!(ValueArgument, VALUE_ARGUMENT);

impl ValueArgument {
    first_child_method!(expression, Expr);
    has_token_method!(is_spread, STAR, "*arrayOf(1)");

    /// The argument name of `name = value`, `None` for positional arguments.
    pub fn name(&self) -> Option<Name> {
        let name = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::ARGUMENT_NAME)?;
        find_token(&name, SyntaxKind::IDENT).map(|t| ident_text(&t))
    }

    pub fn is_named(&self) -> bool {
        self.name().is_some()
    }
}
