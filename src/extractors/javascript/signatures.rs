//! Signature building functions for JavaScript symbols
//!
//! Signatures are human-readable reconstructions of the declaration head, not
//! re-parseable source.

use super::node_kind::{Modifiers, NodeKind};
use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

/// Longest initializer text kept in a variable signature
const MAX_VALUE_LEN: usize = 50;
/// Longest arrow body inlined into a variable signature
const MAX_ARROW_BODY_LEN: usize = 30;

impl super::JavaScriptExtractor {
    /// `class Name extends Base`
    pub(super) fn build_class_signature(&self, name: &str, extends: Option<&str>) -> String {
        match extends {
            Some(base) => format!("class {} extends {}", name, base),
            None => format!("class {}", name),
        }
    }

    /// Function head rendered under `name`, which may differ from the function's
    /// own name (prototype and alias methods use the property name).
    pub(super) fn build_function_signature(&self, node: &Node, name: &str) -> String {
        let modifiers = Modifiers::scan(node);
        let parameters = self.extract_parameters(node).join(", ");

        let mut signature = String::new();
        if modifiers.is_async {
            signature.push_str("async ");
        }

        if NodeKind::of(node) == NodeKind::ArrowFunction {
            signature.push_str(&format!("{} = ({}) =>", name, parameters));
        } else {
            signature.push_str(if modifiers.is_generator {
                "function* "
            } else {
                "function "
            });
            signature.push_str(&format!("{}({})", name, parameters));
        }

        signature
    }

    /// Class method head: `static async get *name(params)`
    pub(super) fn build_method_signature(&self, node: &Node, name: &str) -> String {
        let modifiers = Modifiers::scan(node);
        let parameters = self.extract_parameters(node);

        let mut signature = String::new();
        if modifiers.is_static {
            signature.push_str("static ");
        }
        if modifiers.is_async {
            signature.push_str("async ");
        }
        if modifiers.is_getter {
            signature.push_str("get ");
        }
        if modifiers.is_setter {
            signature.push_str("set ");
        }
        if modifiers.is_generator {
            signature.push('*');
        }

        signature.push_str(&format!("{}({})", name, parameters.join(", ")));
        signature
    }

    /// `const name = <value>`; long initializers are truncated
    pub(super) fn build_variable_signature(
        &self,
        keyword: &str,
        name: &str,
        value: Option<Node>,
    ) -> String {
        let mut signature = format!("{} {}", keyword, name);

        let Some(value) = value else {
            return signature;
        };

        if NodeKind::of(&value) == NodeKind::ArrowFunction {
            let modifiers = Modifiers::scan(&value);
            let params = self.extract_parameters(&value).join(", ");
            signature.push_str(if modifiers.is_async { " = async " } else { " = " });
            signature.push_str(&format!("({}) =>", params));

            // Inline short expression bodies
            if let Some(body) = value.child_by_field_name("body") {
                if NodeKind::of(&body) != NodeKind::StatementBlock {
                    let body_text = self.base.get_node_text(&body);
                    if body_text.len() <= MAX_ARROW_BODY_LEN {
                        signature.push_str(&format!(" {}", body_text));
                    }
                }
            }
        } else {
            let value_text = self.base.get_node_text(&value);
            signature.push_str(&format!(
                " = {}",
                BaseExtractor::truncate_string(&value_text, MAX_VALUE_LEN)
            ));
        }

        signature
    }

    /// Class field head: `static name = <value>`
    pub(super) fn build_field_signature(&self, node: &Node, name: &str) -> String {
        let mut signature = String::new();
        if Modifiers::scan(node).is_static {
            signature.push_str("static ");
        }
        signature.push_str(name);

        if let Some(value) = node.child_by_field_name("value") {
            let value_text = self.base.get_node_text(&value);
            signature.push_str(&format!(
                " = {}",
                BaseExtractor::truncate_string(&value_text, MAX_ARROW_BODY_LEN)
            ));
        }

        signature
    }
}
