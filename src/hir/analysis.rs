//! The analysis host and the semantic queries the light layer runs against.

use std::sync::Arc;

use super::binding::{CallBinding, bind_arguments, declared_parameters};
use super::foreign::ForeignClass;
use super::resolve::{Resolver, SymbolIndex};
use super::symbols::{Definition, SourceClass};
use crate::base::{FileId, FqName, LineIndex};
use crate::parser::{
    AstNode, CallElement, CallExpr, DotQualifiedExpr, Expr, NameRef, SourceFile, SyntaxError,
    TypeRef, parse_file,
};

/// Semantic queries over source trees.
///
/// Implementations answer for nodes of the trees they were built from;
/// nodes from other trees resolve to nothing.
pub trait SemanticModel {
    /// The declaration a call-shaped usage invokes.
    fn resolve_callee(&self, call: &CallElement) -> Option<Definition>;

    /// Bind the usage's arguments to the callee's parameters.
    ///
    /// `None` when the callee does not resolve, is not constructor-like,
    /// or the arguments do not bind.
    fn resolve_call(&self, call: &CallElement) -> Option<CallBinding>;

    fn resolve_reference(&self, reference: &NameRef) -> Option<Definition>;

    fn resolve_type_ref(&self, type_ref: &TypeRef) -> Option<Definition>;

    /// Whether the call invokes a builtin array factory (`arrayOf`, `intArrayOf`, ...).
    fn is_array_function_call(&self, call: &CallExpr) -> bool {
        matches!(
            self.resolve_callee(&CallElement::Call(call.clone())),
            Some(Definition::ArrayFactory(_))
        )
    }
}

struct FileData {
    source: SourceFile,
    errors: Vec<SyntaxError>,
    line_index: LineIndex,
}

/// Owns parsed files and foreign classes, and answers semantic queries.
///
/// Trees are built mutable so that light facades can delete the usages
/// they wrap.
#[derive(Default)]
pub struct Analysis {
    files: Vec<FileData>,
    index: SymbolIndex,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and index a source file.
    pub fn add_file(&mut self, text: &str) -> FileId {
        let file_id = FileId::new(self.files.len() as u32);
        let parse = parse_file(text);
        if !parse.ok() {
            tracing::debug!(
                "[RESOLVE] {} has {} syntax error(s)",
                file_id,
                parse.errors.len()
            );
        }
        let source = match SourceFile::cast(parse.syntax()) {
            Some(source) => source,
            None => unreachable!("parser always produces a SOURCE_FILE root"),
        };
        let mut count = 0;
        for decl in source.classes() {
            let Some(fq_name) = decl.fq_name() else {
                continue;
            };
            let class = SourceClass {
                file: file_id,
                fq_name,
                decl,
            };
            if self.index.insert(Definition::SourceClass(class)) {
                count += 1;
            }
        }
        tracing::debug!("[RESOLVE] Indexed {} class(es) from {}", count, file_id);
        self.files.push(FileData {
            source,
            errors: parse.errors,
            line_index: LineIndex::new(text),
        });
        file_id
    }

    /// Register a compiled class.
    pub fn add_foreign_class(&mut self, class: ForeignClass) -> Arc<ForeignClass> {
        let class = Arc::new(class);
        self.index.insert(Definition::ForeignClass(class.clone()));
        class
    }

    pub fn file(&self, file_id: FileId) -> Option<&SourceFile> {
        self.files.get(file_id.index()).map(|f| &f.source)
    }

    pub fn parse_errors(&self, file_id: FileId) -> &[SyntaxError] {
        self.files
            .get(file_id.index())
            .map(|f| f.errors.as_slice())
            .unwrap_or_default()
    }

    /// Line/column mapping for navigating into a file.
    pub fn line_index(&self, file_id: FileId) -> Option<&LineIndex> {
        self.files.get(file_id.index()).map(|f| &f.line_index)
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId::new(i as u32), &f.source))
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn find_class(&self, fq_name: &str) -> Option<&Definition> {
        self.index.lookup_qualified(fq_name)
    }

    fn resolver_at(&self, node: &crate::parser::SyntaxNode) -> Resolver<'_> {
        Resolver::for_node(&self.index, node)
    }
}

impl SemanticModel for Analysis {
    fn resolve_callee(&self, call: &CallElement) -> Option<Definition> {
        let name = call.written_name()?;
        let resolver = self.resolver_at(call.syntax());
        let result = match call {
            CallElement::Annotation(_) => resolver.resolve(name.as_str()),
            CallElement::Call(_) => resolver.resolve_callee(name.as_str()),
        };
        result.into_definition()
    }

    fn resolve_call(&self, call: &CallElement) -> Option<CallBinding> {
        let callee = self.resolve_callee(call)?;
        let Some(parameters) = declared_parameters(&callee) else {
            tracing::trace!("[RESOLVE] {} is not constructor-like", callee);
            return None;
        };
        match bind_arguments(callee, parameters, call.value_arguments()) {
            Ok(binding) => Some(binding),
            Err(err) => {
                tracing::debug!("[RESOLVE] Cannot bind arguments of '{}': {}", call, err);
                None
            }
        }
    }

    fn resolve_reference(&self, reference: &NameRef) -> Option<Definition> {
        let node = reference.syntax();
        if let Some(call) = node.parent().and_then(CallExpr::cast) {
            return self.resolve_callee(&CallElement::Call(call));
        }
        let name = qualified_reference_name(reference)?;
        self.resolver_at(node).resolve(name.as_str()).into_definition()
    }

    fn resolve_type_ref(&self, type_ref: &TypeRef) -> Option<Definition> {
        let name = type_ref.written_name()?;
        self.resolver_at(type_ref.syntax())
            .resolve(name.as_str())
            .into_definition()
    }
}

/// `a.b.C` for the `C` of `a.b.C`; the plain name otherwise.
fn qualified_reference_name(reference: &NameRef) -> Option<FqName> {
    let parent = reference.syntax().parent().and_then(DotQualifiedExpr::cast);
    let Some(dq) = parent else {
        return Some(FqName::new(reference.name()));
    };
    let is_selector = matches!(dq.selector(), Some(Expr::NameRef(s)) if &s == reference);
    if !is_selector {
        return Some(FqName::new(reference.name()));
    }
    dq.name_chain().map(|chain| FqName::new(chain.join(".")))
}
