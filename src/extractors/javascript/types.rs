//! Class extraction
//!
//! Classes own their members: methods and fields become `children` with the
//! class name as receiver, and non-constructor methods are summarized in
//! `metadata.methods`.

use super::node_kind::{Modifiers, NodeKind};
use crate::extractors::base::{MethodSignature, Symbol, SymbolKind, SymbolMetadata, SymbolOptions};
use tree_sitter::Node;

impl super::JavaScriptExtractor {
    /// Extract a class declaration or class expression.
    ///
    /// `name_override` names class expressions bound to a variable
    /// (`const Foo = class {}`); anonymous classes without one yield `None`.
    pub(super) fn extract_class(&mut self, node: Node, name_override: Option<&str>) -> Option<Symbol> {
        let name = match name_override {
            Some(name) => name.to_string(),
            None => self.base.get_field_text(&node, "name")?,
        };
        if name.is_empty() {
            return None;
        }

        let extends = self.class_heritage(&node);
        let signature = self.build_class_signature(&name, extends.as_deref());
        let exported = self.is_exported(&node);

        let mut class = self.base.create_symbol(
            &node,
            name.clone(),
            SymbolKind::Class,
            SymbolOptions {
                signature,
                exported,
                metadata: Some(SymbolMetadata {
                    extends,
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        if let Some(body) = node.child_by_field_name("body") {
            class.children = self.extract_class_members(body, &name);
        }

        class.metadata_mut().methods = class
            .children
            .iter()
            .filter(|child| child.kind == SymbolKind::Method)
            .filter(|child| !child.metadata.as_ref().is_some_and(|m| m.is_constructor))
            .map(MethodSignature::from_symbol)
            .collect();

        Some(class)
    }

    /// `extends <expr>` target text
    fn class_heritage(&self, node: &Node) -> Option<String> {
        let heritage = self.base.find_child_by_type(node, "class_heritage")?;
        let mut cursor = heritage.walk();
        let target = heritage
            .named_children(&mut cursor)
            .find(|child| NodeKind::of(child) != NodeKind::Comment)?;
        Some(self.base.get_node_text(&target))
    }

    fn extract_class_members(&mut self, body: Node, class_name: &str) -> Vec<Symbol> {
        let mut members = Vec::new();
        let mut cursor = body.walk();
        let children: Vec<Node> = body.named_children(&mut cursor).collect();

        for member in children {
            let symbol = match NodeKind::of(&member) {
                NodeKind::MethodDefinition => self.extract_method(member, class_name),
                NodeKind::FieldDefinition => self.extract_field(member, class_name),
                _ => None,
            };
            if let Some(symbol) = symbol {
                members.push(symbol);
            }
        }

        members
    }

    /// Class field; function-valued initializers become methods
    fn extract_field(&mut self, node: Node, class_name: &str) -> Option<Symbol> {
        let name_node = node.child_by_field_name("property")?;
        let name = self.base.get_node_text(&name_node);
        if name.is_empty() {
            return None;
        }

        let access_modifier = self.member_access_modifier(&name_node, &name);
        let exported = access_modifier.as_deref() != Some("private");
        let is_static = Modifiers::scan(&node).is_static;
        let value = node
            .child_by_field_name("value")
            .filter(|value| NodeKind::of(value).is_function_value());

        let Some(function) = value else {
            let signature = self.build_field_signature(&node, &name);
            return Some(self.base.create_symbol(
                &node,
                name,
                SymbolKind::Field,
                SymbolOptions {
                    signature,
                    exported,
                    receiver: Some(class_name.to_string()),
                    metadata: Some(SymbolMetadata {
                        is_static,
                        access_modifier,
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ));
        };

        let modifiers = Modifiers::scan(&function);
        let mut signature = self.build_method_signature(&function, &name);
        if is_static {
            signature.insert_str(0, "static ");
        }
        let calls = self.collect_calls(function.child_by_field_name("body"));

        Some(self.base.create_symbol(
            &node,
            name,
            SymbolKind::Method,
            SymbolOptions {
                signature,
                exported,
                receiver: Some(class_name.to_string()),
                calls,
                metadata: Some(SymbolMetadata {
                    is_async: modifiers.is_async,
                    is_generator: modifiers.is_generator,
                    is_static,
                    access_modifier,
                    ..Default::default()
                }),
                ..Default::default()
            },
        ))
    }

    /// `#name` is private, `_name` is protected by convention
    pub(super) fn member_access_modifier(&self, name_node: &Node, name: &str) -> Option<String> {
        if NodeKind::of(name_node) == NodeKind::PrivatePropertyIdentifier || name.starts_with('#') {
            Some("private".to_string())
        } else if name.starts_with('_') {
            Some("protected".to_string())
        } else {
            None
        }
    }
}
