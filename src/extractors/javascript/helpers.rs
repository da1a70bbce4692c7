//! Utility helper functions for JavaScript extraction
//!
//! Scope checks used by the traversal, parameter extraction, and the small
//! shape predicates (`require(...)`, `X.prototype`, `module.exports`) shared by
//! the import and prototype detectors.

use super::node_kind::NodeKind;
use tree_sitter::Node;

impl super::JavaScriptExtractor {
    /// Declarations directly under the program, an export wrapper, or an IIFE body
    pub(super) fn is_module_level(&self, node: &Node) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        match NodeKind::of(&parent) {
            NodeKind::Program | NodeKind::ExportStatement => true,
            NodeKind::StatementBlock => parent
                .parent()
                .map(|function| self.is_iife(&function))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Anonymous function values the traversal may enter: IIFE wrappers and
    /// call arguments (callbacks).
    pub(super) fn is_transparent_function(&self, node: &Node) -> bool {
        if self.is_iife(node) {
            return true;
        }
        node.parent()
            .map(|parent| NodeKind::of(&parent) == NodeKind::Arguments)
            .unwrap_or(false)
    }

    /// `(function () { ... })()` and `(() => { ... })()`
    pub(super) fn is_iife(&self, node: &Node) -> bool {
        if !NodeKind::of(node).is_function_value() {
            return false;
        }
        let mut current = *node;
        while let Some(parent) = current.parent() {
            match NodeKind::of(&parent) {
                NodeKind::ParenthesizedExpression => current = parent,
                NodeKind::CallExpression => {
                    return parent
                        .child_by_field_name("function")
                        .map(|callee| callee.id() == current.id())
                        .unwrap_or(false);
                }
                _ => return false,
            }
        }
        false
    }

    /// Wrapped directly in `export ...`
    pub(super) fn is_exported(&self, node: &Node) -> bool {
        node.parent()
            .map(|parent| NodeKind::of(&parent) == NodeKind::ExportStatement)
            .unwrap_or(false)
    }

    /// Extract function parameters as written
    pub(super) fn extract_parameters(&self, node: &Node) -> Vec<String> {
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut parameters = Vec::new();
            let mut cursor = params.walk();
            for child in params.named_children(&mut cursor) {
                if NodeKind::of(&child) == NodeKind::Comment {
                    continue;
                }
                parameters.push(self.base.get_node_text(&child));
            }
            return parameters;
        }

        // Single bare arrow parameter: x => x
        if let Some(param) = node.child_by_field_name("parameter") {
            return vec![self.base.get_node_text(&param)];
        }

        Vec::new()
    }

    /// Source path of `require("<string>")`
    pub(super) fn require_source(&self, node: &Node) -> Option<String> {
        if NodeKind::of(node) != NodeKind::CallExpression {
            return None;
        }
        let callee = node.child_by_field_name("function")?;
        if NodeKind::of(&callee) != NodeKind::Identifier
            || self.base.get_node_text(&callee) != "require"
        {
            return None;
        }
        let args = node.child_by_field_name("arguments")?;
        let first = args.named_child(0)?;
        self.base.string_literal_value(&first)
    }

    /// `X.prototype` → `X`
    pub(super) fn prototype_owner(&self, node: &Node) -> Option<String> {
        if NodeKind::of(node) != NodeKind::MemberExpression {
            return None;
        }
        let property = node.child_by_field_name("property")?;
        if self.base.get_node_text(&property) != "prototype" {
            return None;
        }
        let object = node.child_by_field_name("object")?;
        Some(self.base.get_node_text(&object))
    }

    /// `module.exports` or bare `exports`
    pub(super) fn is_module_exports(&self, node: &Node) -> bool {
        let text = self.base.get_node_text(node);
        text == "module.exports" || text == "exports"
    }

    /// Follow `a = b = <value>` chains to the final value
    pub(super) fn assignment_chain_value<'a>(&self, node: Node<'a>) -> Node<'a> {
        let mut current = node;
        loop {
            match NodeKind::of(&current) {
                NodeKind::AssignmentExpression => match current.child_by_field_name("right") {
                    Some(right) => current = right,
                    None => return current,
                },
                NodeKind::ParenthesizedExpression => match current.named_child(0) {
                    Some(inner) => current = inner,
                    None => return current,
                },
                _ => return current,
            }
        }
    }
}

/// Strip a trailing `.prototype` from an expression's text
pub(super) fn strip_prototype(text: &str) -> &str {
    text.strip_suffix(".prototype").unwrap_or(text)
}
