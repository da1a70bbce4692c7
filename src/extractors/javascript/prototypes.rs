//! Prototype-pattern detection
//!
//! Recovers methods and inheritance from pre-class idioms:
//!
//! ```text
//! proto.handle = function handle() {}              // alias method
//! res.set = res.header = function header() {}      // chained alias methods
//! Router.prototype.route = function () {}          // prototype method
//! Router.prototype = { route: function () {} }     // prototype object literal
//! exports.compile = function () {}                 // CommonJS named export
//! util.inherits(Child, Parent)                     // inheritance edges
//! ```

use super::helpers::strip_prototype;
use super::node_kind::{Modifiers, NodeKind};
use crate::extractors::base::{CallSite, Symbol, SymbolKind, SymbolMetadata, SymbolOptions};
use tracing::debug;
use tree_sitter::Node;

/// Owner of a method bound through one assignment link
enum MethodOwner {
    /// Known alias or `Ctor.prototype`: a method with this receiver
    Type(String),
    /// `exports.name` / `module.exports.name`: an exported free function
    CommonJs,
}

impl super::JavaScriptExtractor {
    /// Methods attached by assignment in `expression`; empty when the statement
    /// has none of the recognized shapes.
    pub(super) fn extract_prototype_methods(&mut self, statement: Node, expression: Node) -> Vec<Symbol> {
        if NodeKind::of(&expression) != NodeKind::AssignmentExpression {
            return Vec::new();
        }

        let (links, value) = self.assignment_links(expression);

        if NodeKind::of(&value) == NodeKind::Object {
            return match links.as_slice() {
                [left] => match self.prototype_owner(left) {
                    Some(owner) => self.extract_prototype_object(value, &owner),
                    None => Vec::new(),
                },
                _ => Vec::new(),
            };
        }

        if !NodeKind::of(&value).is_function_value() {
            return Vec::new();
        }

        let owners: Vec<(String, MethodOwner)> = links
            .iter()
            .filter_map(|left| self.method_owner(left))
            .collect();
        if owners.is_empty() {
            return Vec::new();
        }

        // One body scan shared by every link in the chain
        let calls = self.collect_calls(value.child_by_field_name("body"));
        let doc_comment = self.base.find_doc_comment(&statement);

        owners
            .into_iter()
            .map(|(name, owner)| {
                self.assigned_function_symbol(statement, value, name, owner, &calls, &doc_comment)
            })
            .collect()
    }

    /// Left-hand sides of `a.x = b.y = <value>` in source order, and the final value
    fn assignment_links<'a>(&self, expression: Node<'a>) -> (Vec<Node<'a>>, Node<'a>) {
        let mut links = Vec::new();
        let mut current = expression;
        loop {
            match NodeKind::of(&current) {
                NodeKind::AssignmentExpression => {
                    let (Some(left), Some(right)) = (
                        current.child_by_field_name("left"),
                        current.child_by_field_name("right"),
                    ) else {
                        return (links, current);
                    };
                    links.push(left);
                    current = right;
                }
                NodeKind::ParenthesizedExpression => match current.named_child(0) {
                    Some(inner) => current = inner,
                    None => return (links, current),
                },
                _ => return (links, current),
            }
        }
    }

    /// Property name and owner of a `<object>.<property>` assignment target
    fn method_owner(&self, left: &Node) -> Option<(String, MethodOwner)> {
        if NodeKind::of(left) != NodeKind::MemberExpression {
            return None;
        }
        let object = left.child_by_field_name("object")?;
        let property = left.child_by_field_name("property")?;
        let name = self.base.get_node_text(&property);
        if name.is_empty() {
            return None;
        }

        if NodeKind::of(&object) == NodeKind::Identifier {
            if let Some(semantic_name) = self.alias_map.get(&self.base.get_node_text(&object)) {
                return Some((name, MethodOwner::Type(semantic_name.to_string())));
            }
        }

        if let Some(owner) = self.prototype_owner(&object) {
            return Some((name, MethodOwner::Type(owner)));
        }

        if self.is_module_exports(&object) {
            return Some((name, MethodOwner::CommonJs));
        }

        None
    }

    fn assigned_function_symbol(
        &self,
        statement: Node,
        function: Node,
        name: String,
        owner: MethodOwner,
        calls: &[CallSite],
        doc_comment: &str,
    ) -> Symbol {
        let modifiers = Modifiers::scan(&function);
        let signature = self.build_function_signature(&function, &name);
        let metadata = SymbolMetadata {
            is_async: modifiers.is_async,
            is_generator: modifiers.is_generator,
            ..Default::default()
        };

        let (kind, receiver) = match owner {
            MethodOwner::Type(receiver) => (SymbolKind::Method, Some(receiver)),
            MethodOwner::CommonJs => (SymbolKind::Function, None),
        };

        let mut symbol = self.base.create_symbol(
            &statement,
            name,
            kind,
            SymbolOptions {
                signature,
                doc_comment: Some(doc_comment.to_string()),
                exported: true,
                receiver,
                calls: calls.to_vec(),
                metadata: Some(metadata),
            },
        );

        if symbol.kind == SymbolKind::Function {
            self.promote_constructor(&function, &mut symbol);
        }
        symbol
    }

    /// `Ctor.prototype = { m: function () {}, n() {} }`
    fn extract_prototype_object(&mut self, object: Node, owner: &str) -> Vec<Symbol> {
        let mut methods = Vec::new();
        let mut cursor = object.walk();
        let members: Vec<Node> = object.named_children(&mut cursor).collect();

        for member in members {
            let (key, function) = match NodeKind::of(&member) {
                NodeKind::Pair => {
                    let (Some(key), Some(value)) = (
                        member.child_by_field_name("key"),
                        member.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    if !NodeKind::of(&value).is_function_value() {
                        continue;
                    }
                    (key, value)
                }
                NodeKind::MethodDefinition => match member.child_by_field_name("name") {
                    Some(key) => (key, member),
                    None => continue,
                },
                _ => continue,
            };

            let name = self
                .base
                .string_literal_value(&key)
                .unwrap_or_else(|| self.base.get_node_text(&key));
            if name.is_empty() {
                continue;
            }

            let modifiers = Modifiers::scan(&function);
            let signature = if NodeKind::of(&function) == NodeKind::MethodDefinition {
                self.build_method_signature(&function, &name)
            } else {
                self.build_function_signature(&function, &name)
            };
            let calls = self.collect_calls(function.child_by_field_name("body"));

            methods.push(self.base.create_symbol(
                &member,
                name,
                SymbolKind::Method,
                SymbolOptions {
                    signature,
                    doc_comment: None,
                    exported: true,
                    receiver: Some(owner.to_string()),
                    calls,
                    metadata: Some(SymbolMetadata {
                        is_async: modifiers.is_async,
                        is_generator: modifiers.is_generator,
                        ..Default::default()
                    }),
                },
            ));
        }

        methods
    }

    /// Record an inheritance edge when `expression` has one of the recognized
    /// shapes. Returns true when a shape matched, whether or not the child
    /// symbol exists.
    pub(super) fn detect_inheritance(&mut self, expression: Node) -> bool {
        let edge = match NodeKind::of(&expression) {
            NodeKind::CallExpression => self.call_inheritance(&expression),
            NodeKind::AssignmentExpression => self.object_create_inheritance(&expression),
            _ => None,
        };

        match edge {
            Some((child, parent)) => {
                self.set_extends(&child, parent);
                true
            }
            None => false,
        }
    }

    /// `inherits`, `Object.assign`, `*mixin` and bare `setPrototypeOf` calls
    fn call_inheritance(&self, call: &Node) -> Option<(String, String)> {
        let callee = call.child_by_field_name("function")?;
        let args = self.call_arguments(call);

        let (callee_name, qualified) = match NodeKind::of(&callee) {
            NodeKind::Identifier => (self.base.get_node_text(&callee), false),
            NodeKind::MemberExpression => {
                let property = callee.child_by_field_name("property")?;
                (self.base.get_node_text(&property), true)
            }
            _ => return None,
        };

        if callee_name == "inherits" || (callee_name == "setPrototypeOf" && !qualified) {
            let [child, parent, ..] = args.as_slice() else {
                return None;
            };
            return Some((self.owner_text(child), self.owner_text(parent)));
        }

        if qualified && self.base.get_node_text(&callee) == "Object.assign" {
            let (target, sources) = args.split_first()?;
            self.prototype_owner(target)?;
            let parent = sources
                .iter()
                .rev()
                .find_map(|source| self.prototype_owner(source))?;
            return Some((self.owner_text(target), parent));
        }

        // Case-sensitive: `utils.mixin` and `merge_mixin` match, `applyMixin` does not
        if callee_name.ends_with("mixin") && args.len() >= 2 {
            let (target, sources) = args.split_first()?;
            let parent = sources.iter().rev().find(|source| {
                matches!(
                    NodeKind::of(source),
                    NodeKind::Identifier | NodeKind::MemberExpression
                )
            })?;
            return Some((self.owner_text(target), self.owner_text(parent)));
        }

        None
    }

    /// `Child.prototype = Object.create(Parent.prototype)`
    fn object_create_inheritance(&self, assignment: &Node) -> Option<(String, String)> {
        let left = assignment.child_by_field_name("left")?;
        let child = self.prototype_owner(&left)?;

        let right = assignment.child_by_field_name("right")?;
        if NodeKind::of(&right) != NodeKind::CallExpression {
            return None;
        }
        let callee = right.child_by_field_name("function")?;
        if self.base.get_node_text(&callee) != "Object.create" {
            return None;
        }
        let args = self.call_arguments(&right);
        let parent = args.first()?;
        Some((child, self.owner_text(parent)))
    }

    fn call_arguments<'a>(&self, call: &Node<'a>) -> Vec<Node<'a>> {
        let Some(args) = call.child_by_field_name("arguments") else {
            return Vec::new();
        };
        let mut cursor = args.walk();
        args.named_children(&mut cursor)
            .filter(|arg| NodeKind::of(arg) != NodeKind::Comment)
            .collect()
    }

    /// Argument text with any trailing `.prototype` removed
    fn owner_text(&self, node: &Node) -> String {
        strip_prototype(&self.base.get_node_text(node)).to_string()
    }

    /// First registered symbol named `child` gets the edge; otherwise it is dropped
    fn set_extends(&mut self, child: &str, parent: String) {
        match self.symbols.iter_mut().find(|symbol| symbol.name == child) {
            Some(symbol) => symbol.metadata_mut().extends = Some(parent),
            None => debug!(
                "{}: inheritance edge {} -> {} has no registered child",
                self.base.file_path, child, parent
            ),
        }
    }

    /// Names made public through CommonJS assignments
    pub(super) fn collect_commonjs_export_names(&mut self, expression: Node) {
        if NodeKind::of(&expression) != NodeKind::AssignmentExpression {
            return;
        }
        let (Some(left), Some(right)) = (
            expression.child_by_field_name("left"),
            expression.child_by_field_name("right"),
        ) else {
            return;
        };

        let whole_module = self.base.get_node_text(&left) == "module.exports";
        let named_export = NodeKind::of(&left) == NodeKind::MemberExpression
            && left
                .child_by_field_name("object")
                .map(|object| self.is_module_exports(&object))
                .unwrap_or(false);

        match NodeKind::of(&right) {
            NodeKind::Identifier if whole_module || named_export => {
                self.export_names.insert(self.base.get_node_text(&right));
            }
            NodeKind::Object if whole_module => {
                let mut cursor = right.walk();
                for member in right.named_children(&mut cursor) {
                    let local = match NodeKind::of(&member) {
                        NodeKind::ShorthandPropertyIdentifier => Some(member),
                        NodeKind::Pair => member
                            .child_by_field_name("value")
                            .filter(|value| NodeKind::of(value) == NodeKind::Identifier),
                        _ => None,
                    };
                    if let Some(local) = local {
                        self.export_names.insert(self.base.get_node_text(&local));
                    }
                }
            }
            _ => {}
        }
    }
}
