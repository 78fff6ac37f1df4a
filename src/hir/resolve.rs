//! Name resolution: resolving written names to declarations.
//!
//! Lookup for a simple name walks, in order:
//!
//! 1. classes nested in the enclosing classes (innermost first)
//! 2. explicit imports
//! 3. the file's own package
//! 4. star imports
//! 5. default imports (`kotlin`, `kotlin.annotation`, `java.lang`)
//! 6. the root package
//!
//! Dotted names are first tried as fully qualified, then as a nested
//! class path starting from a resolvable outer class.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::symbols::{ArrayFactory, Definition};
use crate::base::{FqName, Name};
use crate::parser::{AstNode, ClassDecl, SourceFile, SyntaxNode};

/// Packages imported into every file.
const DEFAULT_IMPORTS: [&str; 3] = ["kotlin", "kotlin.annotation", "java.lang"];

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Index of every class known to an analysis: source and foreign.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    /// Qualified name -> definition (insertion order preserved).
    by_qualified_name: IndexMap<FqName, Definition>,
    /// Simple name -> qualified names.
    by_simple_name: FxHashMap<Name, Vec<FqName>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. The first definition of a qualified name wins.
    pub fn insert(&mut self, definition: Definition) -> bool {
        let fq_name = definition.fq_name();
        if self.by_qualified_name.contains_key(&fq_name) {
            tracing::debug!(
                "[RESOLVE] Duplicate declaration of '{}' ignored ({})",
                fq_name,
                definition
            );
            return false;
        }
        self.by_simple_name
            .entry(Name::new(fq_name.short_name()))
            .or_default()
            .push(fq_name.clone());
        self.by_qualified_name.insert(fq_name, definition);
        true
    }

    pub fn lookup_qualified(&self, fq_name: &str) -> Option<&Definition> {
        self.by_qualified_name.get(fq_name)
    }

    /// All definitions with the given simple name, in insertion order.
    pub fn lookup_simple(&self, name: &str) -> Vec<&Definition> {
        self.by_simple_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|fq| self.by_qualified_name.get(fq))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.by_qualified_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_qualified_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_qualified_name.is_empty()
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// The lookup context of a source position: package, imports and
/// enclosing classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    package: FqName,
    explicit_imports: Vec<FqName>,
    star_imports: Vec<FqName>,
    /// Innermost first.
    enclosing_classes: Vec<FqName>,
}

impl Scope {
    /// The root package with no imports.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn for_node(node: &SyntaxNode) -> Self {
        let mut scope = Self::default();
        if let Some(file) = node.ancestors().find_map(SourceFile::cast) {
            scope.package = file.package_name();
            for import in file.imports() {
                let Some(fq_name) = import.fq_name() else {
                    continue;
                };
                if import.is_all_under() {
                    scope.star_imports.push(fq_name);
                } else {
                    scope.explicit_imports.push(fq_name);
                }
            }
        }
        scope.enclosing_classes = node
            .ancestors()
            .filter_map(ClassDecl::cast)
            .filter_map(|c| c.fq_name())
            .collect();
        scope
    }

    pub fn with_package(mut self, package: impl Into<FqName>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_import(mut self, import: impl Into<FqName>) -> Self {
        self.explicit_imports.push(import.into());
        self
    }

    pub fn with_star_import(mut self, package: impl Into<FqName>) -> Self {
        self.star_imports.push(package.into());
        self
    }

    pub fn package(&self) -> &FqName {
        &self.package
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Result of resolving a name.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveResult {
    /// Successfully resolved to a single definition.
    Found(Definition),
    /// Several star imports provide the name.
    Ambiguous(Vec<Definition>),
    /// Could not resolve the name.
    NotFound,
}

impl ResolveResult {
    /// The resolved definition if unambiguous.
    pub fn definition(&self) -> Option<&Definition> {
        match self {
            ResolveResult::Found(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_definition(self) -> Option<Definition> {
        match self {
            ResolveResult::Found(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

/// Resolves names as seen from one scope.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
    scope: Scope,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self {
            index,
            scope: Scope::root(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// A resolver for names written at `node`.
    pub fn for_node(index: &'a SymbolIndex, node: &SyntaxNode) -> Self {
        Self::new(index).with_scope(Scope::for_node(node))
    }

    /// Resolve a class name, simple or dotted.
    pub fn resolve(&self, name: &str) -> ResolveResult {
        if name.contains('.') {
            return self.resolve_dotted(name);
        }
        self.resolve_simple(name)
    }

    /// Resolve a call's callee: a class constructor or a builtin array factory.
    pub fn resolve_callee(&self, name: &str) -> ResolveResult {
        let result = self.resolve(name);
        if result.is_found() {
            return result;
        }
        let factory = match name.strip_prefix("kotlin.") {
            Some(rest) => ArrayFactory::from_name(rest),
            None if !name.contains('.') => self
                .imported_function(name)
                .or_else(|| ArrayFactory::from_name(name)),
            None => None,
        };
        match factory {
            Some(factory) => {
                tracing::trace!("[RESOLVE] '{}' is builtin {}", name, factory.fq_name());
                ResolveResult::Found(Definition::ArrayFactory(factory))
            }
            None => result,
        }
    }

    fn imported_function(&self, name: &str) -> Option<ArrayFactory> {
        self.scope
            .explicit_imports
            .iter()
            .filter(|import| import.short_name() == name)
            .find_map(|import| {
                let factory = ArrayFactory::from_name(name)?;
                (import == &factory.fq_name()).then_some(factory)
            })
    }

    fn resolve_simple(&self, name: &str) -> ResolveResult {
        for class in &self.scope.enclosing_classes {
            if let Some(def) = self.index.lookup_qualified(class.child(name).as_str()) {
                tracing::trace!("[RESOLVE] Found '{}' nested in '{}'", name, class);
                return ResolveResult::Found(def.clone());
            }
        }

        for import in &self.scope.explicit_imports {
            if import.short_name() != name {
                continue;
            }
            if let Some(def) = self.index.lookup_qualified(import.as_str()) {
                tracing::trace!("[RESOLVE] Found '{}' via import {}", name, import);
                return ResolveResult::Found(def.clone());
            }
        }

        if let Some(def) = self
            .index
            .lookup_qualified(self.scope.package.child(name).as_str())
        {
            return ResolveResult::Found(def.clone());
        }

        let from_star = self.lookup_in_packages(name, self.scope.star_imports.iter());
        if !matches!(from_star, ResolveResult::NotFound) {
            return from_star;
        }

        let defaults = DEFAULT_IMPORTS.iter().map(|p| FqName::new(*p)).collect::<Vec<_>>();
        let from_default = self.lookup_in_packages(name, defaults.iter());
        if !matches!(from_default, ResolveResult::NotFound) {
            return from_default;
        }

        if let Some(def) = self.index.lookup_qualified(name) {
            return ResolveResult::Found(def.clone());
        }

        tracing::trace!(
            "[RESOLVE] '{}' not found from package '{}' ({} imports)",
            name,
            self.scope.package,
            self.scope.explicit_imports.len() + self.scope.star_imports.len()
        );
        ResolveResult::NotFound
    }

    fn lookup_in_packages<'p>(
        &self,
        name: &str,
        packages: impl Iterator<Item = &'p FqName>,
    ) -> ResolveResult {
        let mut found: Vec<Definition> = Vec::new();
        for package in packages {
            if let Some(def) = self.index.lookup_qualified(package.child(name).as_str()) {
                if !found.contains(def) {
                    found.push(def.clone());
                }
            }
        }
        match found.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(found.remove(0)),
            _ => {
                tracing::debug!("[RESOLVE] '{}' is ambiguous: {} candidates", name, found.len());
                ResolveResult::Ambiguous(found)
            }
        }
    }

    fn resolve_dotted(&self, name: &str) -> ResolveResult {
        if let Some(def) = self.index.lookup_qualified(name) {
            return ResolveResult::Found(def.clone());
        }
        let Some((first, rest)) = name.split_once('.') else {
            return ResolveResult::NotFound;
        };
        match self.resolve_simple(first) {
            ResolveResult::Found(outer) => {
                let nested = FqName::new(format!("{}.{}", outer.fq_name(), rest));
                match self.index.lookup_qualified(nested.as_str()) {
                    Some(def) => ResolveResult::Found(def.clone()),
                    None => ResolveResult::NotFound,
                }
            }
            _ => ResolveResult::NotFound,
        }
    }
}
