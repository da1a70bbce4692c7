//! Variable declaration extraction for JavaScript
//!
//! Module-level `var`/`let`/`const` declarators become symbols according to
//! their initializer: functions, classes, `require` bindings, or plain values.
//! Destructuring yields one symbol per bound name.

use super::node_kind::NodeKind;
use crate::extractors::base::{Import, Symbol, SymbolKind, SymbolOptions};
use tree_sitter::Node;

impl super::JavaScriptExtractor {
    pub(super) fn extract_variable_declaration(&mut self, node: Node) {
        let keyword = self.declaration_keyword(&node);
        let exported = self.is_exported(&node);
        let doc_comment = self.base.find_doc_comment(&node);

        let mut cursor = node.walk();
        let declarators: Vec<Node> = node
            .named_children(&mut cursor)
            .filter(|child| NodeKind::of(child) == NodeKind::VariableDeclarator)
            .collect();

        for declarator in declarators {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            let value = declarator.child_by_field_name("value");

            match NodeKind::of(&name_node) {
                NodeKind::Identifier => {
                    let name = self.base.get_node_text(&name_node);
                    if let Some(symbol) =
                        self.extract_declarator(declarator, &keyword, name, value, exported, &doc_comment)
                    {
                        self.symbols.push(symbol);
                    }
                }
                NodeKind::ObjectPattern | NodeKind::ArrayPattern => {
                    self.extract_destructuring(declarator, name_node, &keyword, value, exported, &doc_comment);
                }
                _ => {}
            }
        }
    }

    /// `var`, `let` or `const`
    fn declaration_keyword(&self, node: &Node) -> String {
        node.child(0)
            .map(|first| first.kind().to_string())
            .filter(|kind| matches!(kind.as_str(), "var" | "let" | "const"))
            .unwrap_or_else(|| "var".to_string())
    }

    fn extract_declarator(
        &mut self,
        declarator: Node,
        keyword: &str,
        name: String,
        value: Option<Node>,
        exported: bool,
        doc_comment: &str,
    ) -> Option<Symbol> {
        let Some(value) = value else {
            return Some(self.plain_variable(declarator, keyword, name, None, exported, doc_comment));
        };

        let resolved = self.assignment_chain_value(value);

        if let Some(import) = self.require_binding(&resolved, &name, &declarator) {
            self.imports.push(import);
            let signature = self.build_variable_signature(keyword, &name, Some(value));
            return Some(self.base.create_symbol(
                &declarator,
                name,
                SymbolKind::Import,
                SymbolOptions {
                    signature,
                    doc_comment: Some(doc_comment.to_string()),
                    exported,
                    ..Default::default()
                },
            ));
        }

        let kind = NodeKind::of(&resolved);
        if kind.is_function_value() {
            return Some(self.extract_function_value(
                declarator,
                resolved,
                name,
                exported,
                doc_comment.to_string(),
            ));
        }

        if kind.is_class() {
            let mut class = self.extract_class(resolved, Some(&name))?;
            class.exported = exported;
            class.doc_comment = doc_comment.to_string();
            return Some(class);
        }

        Some(self.plain_variable(declarator, keyword, name, Some(value), exported, doc_comment))
    }

    fn plain_variable(
        &self,
        anchor: Node,
        keyword: &str,
        name: String,
        value: Option<Node>,
        exported: bool,
        doc_comment: &str,
    ) -> Symbol {
        let kind = if keyword == "const" {
            SymbolKind::Constant
        } else {
            SymbolKind::Variable
        };
        let signature = self.build_variable_signature(keyword, &name, value);

        self.base.create_symbol(
            &anchor,
            name,
            kind,
            SymbolOptions {
                signature,
                doc_comment: Some(doc_comment.to_string()),
                exported,
                ..Default::default()
            },
        )
    }

    /// `x = require("p")` and `x = require("p").prop`
    fn require_binding(&self, value: &Node, local: &str, declarator: &Node) -> Option<Import> {
        let (path, names) = match NodeKind::of(value) {
            NodeKind::CallExpression => (self.require_source(value)?, Vec::new()),
            NodeKind::MemberExpression => {
                let object = value.child_by_field_name("object")?;
                let property = value.child_by_field_name("property")?;
                (
                    self.require_source(&object)?,
                    vec![self.base.get_node_text(&property)],
                )
            }
            _ => return None,
        };

        Some(Import {
            is_relative: Import::path_is_relative(&path),
            path,
            alias: Some(local.to_string()),
            names,
            is_common_js: true,
            location: self.base.location_of(declarator),
            ..Default::default()
        })
    }

    /// `const { a, b: c } = require("p")` is an import of the local names;
    /// any other destructuring declares one variable per bound name.
    fn extract_destructuring(
        &mut self,
        declarator: Node,
        pattern: Node,
        keyword: &str,
        value: Option<Node>,
        exported: bool,
        doc_comment: &str,
    ) {
        let mut locals = Vec::new();
        self.collect_pattern_names(&pattern, &mut locals);

        let require_path = value.and_then(|value| self.require_source(&value));
        if let Some(path) = require_path {
            if NodeKind::of(&pattern) == NodeKind::ObjectPattern {
                self.imports.push(Import {
                    is_relative: Import::path_is_relative(&path),
                    path,
                    names: locals,
                    is_common_js: true,
                    location: self.base.location_of(&declarator),
                    ..Default::default()
                });
                return;
            }
        }

        for local in locals {
            let symbol = self.plain_variable(declarator, keyword, local, value, exported, doc_comment);
            self.symbols.push(symbol);
        }
    }

    /// Local binding names in a destructuring pattern, left to right
    fn collect_pattern_names(&self, pattern: &Node, names: &mut Vec<String>) {
        let mut stack = vec![*pattern];
        while let Some(node) = stack.pop() {
            match NodeKind::of(&node) {
                NodeKind::Identifier | NodeKind::ShorthandPropertyIdentifierPattern => {
                    names.push(self.base.get_node_text(&node));
                }
                NodeKind::PairPattern => stack.extend(node.child_by_field_name("value")),
                NodeKind::AssignmentPattern | NodeKind::ObjectAssignmentPattern => {
                    stack.extend(node.child_by_field_name("left"))
                }
                NodeKind::ObjectPattern | NodeKind::ArrayPattern | NodeKind::RestPattern => {
                    let mut cursor = node.walk();
                    let children: Vec<Node> = node.named_children(&mut cursor).collect();
                    stack.extend(children.into_iter().rev());
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{extract, find, names};
    use crate::extractors::base::SymbolKind;

    #[test]
    fn test_variable_kinds() {
        let code = "/** Port. */\nconst PORT = 3000;\nlet count = 0;\nvar legacy;";
        let result = extract(code, "server.js");
        let port = find(&result.symbols, "PORT");
        assert_eq!(port.kind, SymbolKind::Constant);
        assert_eq!(port.signature, "const PORT = 3000");
        assert_eq!(port.doc_comment, "/** Port. */");
        assert_eq!(find(&result.symbols, "count").kind, SymbolKind::Variable);
        assert_eq!(find(&result.symbols, "legacy").signature, "var legacy");
    }

    #[test]
    fn test_function_valued_variable() {
        let result = extract("var handler = function (req) { respond(req); };", "app.js");
        let handler = find(&result.symbols, "handler");
        assert_eq!(handler.kind, SymbolKind::Function);
        assert_eq!(handler.calls[0].target, "respond");
        assert_eq!(handler.signature, "function handler(req)");
    }

    #[test]
    fn test_exported_const() {
        let result = extract("export const VERSION = '1.0';", "version.js");
        assert!(find(&result.symbols, "VERSION").exported);
    }

    #[test]
    fn test_require_binding() {
        let code = "var express = require('express');\nvar Router = require('./router').Router;";
        let result = extract(code, "app.js");
        assert_eq!(result.imports.len(), 2);

        let express = &result.imports[0];
        assert_eq!(express.path, "express");
        assert_eq!(express.alias.as_deref(), Some("express"));
        assert!(express.is_common_js);
        assert!(!express.is_relative);
        assert!(express.names.is_empty());

        let router = &result.imports[1];
        assert_eq!(router.path, "./router");
        assert_eq!(router.alias.as_deref(), Some("Router"));
        assert_eq!(router.names, vec!["Router"]);
        assert!(router.is_relative);

        assert_eq!(find(&result.symbols, "express").kind, SymbolKind::Import);
    }

    #[test]
    fn test_destructured_require_keeps_local_names() {
        let result = extract("const { join, resolve: res } = require('path');", "util.js");
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].names, vec!["join", "res"]);
        assert!(result.imports[0].alias.is_none());
        assert!(result.symbols.is_empty());
    }

    #[test]
    fn test_destructured_variables() {
        let result = extract("const { a, b: c, ...rest } = config;\nlet [x, y = 2] = pair;", "cfg.js");
        assert_eq!(names(&result.symbols), vec!["a", "c", "rest", "x", "y"]);
        assert_eq!(find(&result.symbols, "a").kind, SymbolKind::Constant);
        assert_eq!(find(&result.symbols, "x").kind, SymbolKind::Variable);
    }

    #[test]
    fn test_nested_variables_skipped() {
        let result = extract("function f() { var inner = 1; }", "f.js");
        assert_eq!(names(&result.symbols), vec!["f"]);
    }

    #[test]
    fn test_callback_declarations_found() {
        let result = extract("describe('x', function () { function helper() {} });", "spec.js");
        assert_eq!(names(&result.symbols), vec!["helper"]);
    }
}
