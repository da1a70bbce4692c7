//! Function and method extraction for JavaScript
//!
//! Handles function declarations, function values bound to variables, and class
//! methods. Plain functions whose name starts upper-case and whose own body
//! assigns `this.<field>` are promoted to constructor classes.

use super::node_kind::{Modifiers, NodeKind};
use crate::extractors::base::{Symbol, SymbolKind, SymbolMetadata, SymbolOptions};
use tree_sitter::Node;

/// How far the `this.<field> = ...` search descends through blocks
const MAX_THIS_ASSIGNMENT_DEPTH: usize = 8;

impl super::JavaScriptExtractor {
    /// Extract function declarations; `None` for nameless ones (`export default function () {}`)
    pub(super) fn extract_function(&mut self, node: Node) -> Option<Symbol> {
        let name_node = node.child_by_field_name("name")?;
        let name = self.base.get_node_text(&name_node);
        if name.is_empty() {
            return None;
        }

        let exported = self.is_exported(&node);
        Some(self.build_function_symbol(node, node, name, exported, None))
    }

    /// Function value bound to a name elsewhere (`var f = function () {}`).
    ///
    /// `anchor` locates the symbol and its doc comment; `function` supplies the
    /// signature, modifiers and body.
    pub(super) fn extract_function_value(
        &mut self,
        anchor: Node,
        function: Node,
        name: String,
        exported: bool,
        doc_comment: String,
    ) -> Symbol {
        self.build_function_symbol(anchor, function, name, exported, Some(doc_comment))
    }

    fn build_function_symbol(
        &mut self,
        anchor: Node,
        function: Node,
        name: String,
        exported: bool,
        doc_comment: Option<String>,
    ) -> Symbol {
        let modifiers = Modifiers::scan(&function);
        let signature = self.build_function_signature(&function, &name);
        let calls = self.collect_calls(function.child_by_field_name("body"));

        let mut symbol = self.base.create_symbol(
            &anchor,
            name,
            SymbolKind::Function,
            SymbolOptions {
                signature,
                doc_comment,
                exported,
                receiver: None,
                calls,
                metadata: Some(SymbolMetadata {
                    is_async: modifiers.is_async,
                    is_generator: modifiers.is_generator,
                    ..Default::default()
                }),
            },
        );

        self.promote_constructor(&function, &mut symbol);
        symbol
    }

    /// Reclassify a constructor-style function symbol as a class
    pub(super) fn promote_constructor(&self, function: &Node, symbol: &mut Symbol) {
        if self.is_constructor_function(function, &symbol.name) {
            symbol.kind = SymbolKind::Class;
            symbol.metadata_mut().is_constructor = true;
        }
    }

    /// Extract a class method definition owned by `class_name`
    pub(super) fn extract_method(&mut self, node: Node, class_name: &str) -> Option<Symbol> {
        let name_node = node.child_by_field_name("name")?;
        let name = self.base.get_node_text(&name_node);
        if name.is_empty() {
            return None;
        }

        let modifiers = Modifiers::scan(&node);
        let signature = self.build_method_signature(&node, &name);
        let calls = self.collect_calls(node.child_by_field_name("body"));
        let access_modifier = self.member_access_modifier(&name_node, &name);

        Some(self.base.create_symbol(
            &node,
            name.clone(),
            SymbolKind::Method,
            SymbolOptions {
                signature,
                doc_comment: None,
                exported: access_modifier.as_deref() != Some("private"),
                receiver: Some(class_name.to_string()),
                calls,
                metadata: Some(SymbolMetadata {
                    is_async: modifiers.is_async,
                    is_generator: modifiers.is_generator,
                    is_static: modifiers.is_static,
                    is_constructor: name == "constructor" && !modifiers.is_static,
                    access_modifier,
                    ..Default::default()
                }),
            },
        ))
    }

    /// Upper-case name and a direct `this.<field> = ...` in the function's own body
    fn is_constructor_function(&self, function: &Node, name: &str) -> bool {
        if NodeKind::of(function) == NodeKind::ArrowFunction {
            return false;
        }
        if !name.chars().next().map(char::is_uppercase).unwrap_or(false) {
            return false;
        }
        function
            .child_by_field_name("body")
            .map(|body| self.has_this_assignment(&body, 0))
            .unwrap_or(false)
    }

    /// Searches only through expression statements and statement blocks; nested
    /// functions, conditionals, loops and `try` blocks are not entered.
    fn has_this_assignment(&self, node: &Node, depth: usize) -> bool {
        if depth > MAX_THIS_ASSIGNMENT_DEPTH {
            return false;
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match NodeKind::of(&child) {
                NodeKind::AssignmentExpression => {
                    if self.assigns_this_member(&child) {
                        return true;
                    }
                }
                NodeKind::ExpressionStatement | NodeKind::StatementBlock => {
                    if self.has_this_assignment(&child, depth + 1) {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn assigns_this_member(&self, assignment: &Node) -> bool {
        assignment
            .child_by_field_name("left")
            .filter(|left| NodeKind::of(left) == NodeKind::MemberExpression)
            .and_then(|left| left.child_by_field_name("object"))
            .map(|object| NodeKind::of(&object) == NodeKind::This)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{extract, find};
    use crate::extractors::base::SymbolKind;

    #[test]
    fn test_function_declaration_basics() {
        let code = r#"
/** Adds numbers. */
async function add(a, b = 1, ...rest) {
    return sum(a, b);
}
"#;
        let result = extract(code, "lib/math.js");
        let add = find(&result.symbols, "add");
        assert_eq!(add.kind, SymbolKind::Function);
        assert_eq!(add.signature, "async function add(a, b = 1, ...rest)");
        assert_eq!(add.doc_comment, "/** Adds numbers. */");
        assert_eq!(add.location.start_line, 3);
        assert_eq!(add.location.start_column, 0);
        assert_eq!(add.location.end_line, 5);
        assert!(!add.exported);
        assert!(add.receiver.is_none());
        assert!(add.metadata.as_ref().unwrap().is_async);
        assert_eq!(add.calls.len(), 1);
        assert_eq!(add.calls[0].target, "sum");
    }

    #[test]
    fn test_generator_function() {
        let result = extract("function* ids() { yield next(); }", "gen.js");
        let ids = find(&result.symbols, "ids");
        assert!(ids.metadata.as_ref().unwrap().is_generator);
        assert_eq!(ids.signature, "function* ids()");
    }

    #[test]
    fn test_exported_function() {
        let result = extract("export function handler(req) {}", "routes.js");
        assert!(find(&result.symbols, "handler").exported);
    }

    #[test]
    fn test_anonymous_default_export_has_no_symbol() {
        let result = extract("export default function () { run(); }", "main.js");
        assert!(result.symbols.is_empty());
    }

    #[test]
    fn test_constructor_promotion() {
        let result = extract("function Router() { this.stack = []; }", "lib/r.js");
        let router = find(&result.symbols, "Router");
        assert_eq!(router.kind, SymbolKind::Class);
        assert!(router.metadata.as_ref().unwrap().is_constructor);
    }

    #[test]
    fn test_lowercase_function_not_promoted() {
        let result = extract("function router() { this.stack = []; }", "lib/r.js");
        let router = find(&result.symbols, "router");
        assert_eq!(router.kind, SymbolKind::Function);
        assert!(!router.metadata.as_ref().unwrap().is_constructor);
    }

    #[test]
    fn test_nested_function_assignment_not_promoted() {
        let result = extract(
            "function Router() { function f() { this.x = 1; } }",
            "lib/r.js",
        );
        assert_eq!(find(&result.symbols, "Router").kind, SymbolKind::Function);
    }

    #[test]
    fn test_assignment_in_plain_block_counts() {
        let result = extract("function Layer() { { this.path = '/'; } }", "lib/l.js");
        assert_eq!(find(&result.symbols, "Layer").kind, SymbolKind::Class);
    }

    #[test]
    fn test_assignment_inside_conditional_not_searched() {
        // Known boundary: only expression statements and blocks are searched
        let result = extract(
            "function Layer(opts) { if (opts) { this.opts = opts; } }",
            "lib/l.js",
        );
        assert_eq!(find(&result.symbols, "Layer").kind, SymbolKind::Function);
    }

    #[test]
    fn test_function_value_promoted() {
        let result = extract("var Route = function (path) { this.path = path; };", "lib/route.js");
        let route = find(&result.symbols, "Route");
        assert_eq!(route.kind, SymbolKind::Class);
        assert!(route.metadata.as_ref().unwrap().is_constructor);
    }

    #[test]
    fn test_arrow_never_promoted() {
        let result = extract("const Make = () => { this.x = 1; };", "lib/m.js");
        assert_eq!(find(&result.symbols, "Make").kind, SymbolKind::Function);
    }

    #[test]
    fn test_nested_declarations_not_emitted() {
        let result = extract("function outer() { function inner() {} inner(); }", "a.js");
        assert_eq!(result.symbols.len(), 1);
        assert_eq!(result.symbols[0].name, "outer");
        assert_eq!(result.symbols[0].calls[0].target, "inner");
    }

    #[test]
    fn test_iife_declarations_found() {
        let code = "(function () {\n  function helper() {}\n  var state = 1;\n})();\n";
        let result = extract(code, "a.js");
        assert!(result.symbols.iter().any(|s| s.name == "helper"));
        assert!(result.symbols.iter().any(|s| s.name == "state"));
    }
}
