//! JavaScript Extractor for Miller
//!
//! Walks a tree-sitter JavaScript tree top-down and builds the flat symbol and
//! import tables for one file. Besides ES declarations it recovers structure
//! from pre-class idioms:
//! - `module.exports` aliases turned into a per-file semantic type
//! - `Ctor.prototype.m = function` and `alias.m = function` methods
//! - `inherits`/`Object.create`/`Object.assign`/mixin inheritance edges
//! - constructor functions promoted to classes
//!
//! Each extractor owns the bodies of the symbols it builds; the main traversal
//! does not descend into them again.

mod calls;
mod finisher;
mod functions;
mod helpers;
mod imports;
mod module_alias;
pub(crate) mod node_kind;
mod prototypes;
mod signatures;
mod types;
mod variables;

use crate::extractors::base::{BaseExtractor, ExtractorConfig, Import, Symbol};
use crate::extractors::cancellation::CancellationToken;
use module_alias::AliasMap;
use node_kind::NodeKind;
use std::collections::BTreeSet;
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Symbols, imports and soft diagnostics for one file
#[derive(Debug, Clone, Default)]
pub struct JavaScriptExtraction {
    pub symbols: Vec<Symbol>,
    pub imports: Vec<Import>,
    pub errors: Vec<String>,
}

pub struct JavaScriptExtractor {
    base: BaseExtractor,
    cancel: CancellationToken,
    alias_map: AliasMap,
    /// Names exported through CommonJS or `export { ... }` statements
    export_names: BTreeSet<String>,
    symbols: Vec<Symbol>,
    imports: Vec<Import>,
    errors: Vec<String>,
}

impl JavaScriptExtractor {
    pub fn new(
        language: String,
        file_path: String,
        content: String,
        config: ExtractorConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            base: BaseExtractor::new(language, file_path, content, config),
            cancel,
            alias_map: AliasMap::default(),
            export_names: BTreeSet::new(),
            symbols: Vec::new(),
            imports: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Run the whole pipeline: alias pre-pass, traversal, post-pass.
    pub fn extract(mut self, tree: &Tree) -> JavaScriptExtraction {
        let root = tree.root_node();

        if self.base.has_error(&root) {
            self.errors
                .push(format!("{}: syntax errors present in tree", self.base.file_path));
        }

        self.alias_map = AliasMap::resolve(&self.base, root);
        self.visit_node(root);
        self.finish();

        debug!(
            "{} ({}): {} symbol(s), {} import(s) after post-pass",
            self.base.file_path,
            self.base.language,
            self.symbols.len(),
            self.imports.len()
        );

        JavaScriptExtraction {
            symbols: self.symbols,
            imports: self.imports,
            errors: self.errors,
        }
    }

    /// Main tree traversal.
    ///
    /// Explicit worklist in pre-order: children are pushed in reverse so
    /// declarations come out in source order. Nesting depth is bounded only by
    /// the heap.
    fn visit_node(&mut self, root: Node) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !self.visit_one(node) {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    /// Dispatch one node by kind. Returns true when its children still need visiting.
    fn visit_one(&mut self, node: Node) -> bool {
        match NodeKind::of(&node) {
            kind if kind.is_function_declaration() => {
                if let Some(symbol) = self.extract_function(node) {
                    self.symbols.push(symbol);
                }
                false
            }
            kind if kind.is_class() => {
                if let Some(symbol) = self.extract_class(node, None) {
                    self.symbols.push(symbol);
                }
                false
            }
            kind if kind.is_variable_declaration() => {
                if self.is_module_level(&node) {
                    self.extract_variable_declaration(node);
                    return false;
                }
                true
            }
            NodeKind::ImportStatement => {
                self.extract_import_statement(node);
                false
            }
            NodeKind::ExportStatement => {
                self.extract_export_statement(node);
                true
            }
            NodeKind::ExpressionStatement => !self.extract_expression_statement(node),
            // Only IIFE wrappers and callbacks are transparent
            kind if kind.is_function_value() => self.is_transparent_function(&node),
            _ => true,
        }
    }

    /// Statement-level pattern detection. Returns true when the statement was
    /// fully consumed and its subtree must not be visited again.
    fn extract_expression_statement(&mut self, node: Node) -> bool {
        let Some(expression) = node.named_child(0) else {
            return false;
        };

        if self.extract_exports_require(expression) {
            return true;
        }

        let methods = self.extract_prototype_methods(node, expression);
        if !methods.is_empty() {
            self.symbols.extend(methods);
            return true;
        }

        if self.detect_inheritance(expression) {
            return true;
        }

        self.collect_commonjs_export_names(expression);
        false
    }
}
