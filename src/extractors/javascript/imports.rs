//! Import statement extraction for JavaScript
//!
//! ES `import` statements, re-exports and `exports.x = require(...)`.
//! Variable-bound `require` calls are handled with the other declarators in
//! `variables.rs`.

use super::node_kind::NodeKind;
use crate::extractors::base::Import;
use tree_sitter::Node;

impl super::JavaScriptExtractor {
    /// `import a, { b as c } from "x"` and `import * as ns from "x"`; one Import per statement
    pub(super) fn extract_import_statement(&mut self, node: Node) {
        let Some(path) = self.module_source(&node) else {
            return;
        };

        let mut import = Import {
            is_relative: Import::path_is_relative(&path),
            path,
            is_module: true,
            location: self.base.location_of(&node),
            ..Default::default()
        };

        if let Some(clause) = self.base.find_child_by_type(&node, "import_clause") {
            let mut cursor = clause.walk();
            for child in clause.named_children(&mut cursor) {
                match NodeKind::of(&child) {
                    NodeKind::Identifier => {
                        import.is_default = true;
                        import.alias = Some(self.base.get_node_text(&child));
                    }
                    NodeKind::NamespaceImport => {
                        import.is_namespace = true;
                        if let Some(local) = self.base.find_child_by_type(&child, "identifier") {
                            import.alias = Some(self.base.get_node_text(&local));
                        }
                    }
                    NodeKind::NamedImports => {
                        import.names.extend(self.import_specifier_locals(&child));
                    }
                    _ => {}
                }
            }
        }

        self.imports.push(import);
    }

    /// Local binding names of `{ a, b as c }` → `a`, `c`
    fn import_specifier_locals(&self, named_imports: &Node) -> Vec<String> {
        let mut locals = Vec::new();
        let mut cursor = named_imports.walk();
        for specifier in named_imports.named_children(&mut cursor) {
            if NodeKind::of(&specifier) != NodeKind::ImportSpecifier {
                continue;
            }
            let local = specifier
                .child_by_field_name("alias")
                .or_else(|| specifier.child_by_field_name("name"));
            if let Some(local) = local {
                locals.push(self.base.get_node_text(&local));
            }
        }
        locals
    }

    /// Re-exports become imports; local `export { a }` and `export default a`
    /// feed the export back-propagation.
    pub(super) fn extract_export_statement(&mut self, node: Node) {
        let clause = self.base.find_child_by_type(&node, "export_clause");

        if let Some(path) = self.module_source(&node) {
            let mut import = Import {
                is_relative: Import::path_is_relative(&path),
                path,
                is_module: true,
                location: self.base.location_of(&node),
                ..Default::default()
            };

            match clause {
                Some(clause) => import.names = self.export_specifier_names(&clause, true),
                None => {
                    // export * from "x" / export * as ns from "x"
                    import.is_namespace = true;
                    import.alias = self
                        .base
                        .find_child_by_type(&node, "namespace_export")
                        .and_then(|ns| self.base.find_child_by_type(&ns, "identifier"))
                        .map(|local| self.base.get_node_text(&local));
                }
            }

            self.imports.push(import);
            return;
        }

        if let Some(clause) = clause {
            for local in self.export_specifier_names(&clause, false) {
                self.export_names.insert(local);
            }
            return;
        }

        if let Some(value) = node.child_by_field_name("value") {
            if NodeKind::of(&value) == NodeKind::Identifier {
                self.export_names.insert(self.base.get_node_text(&value));
            }
        }
    }

    /// Names in `{ a, b as c }`: exported names (`a`, `c`) or local names (`a`, `b`)
    fn export_specifier_names(&self, clause: &Node, exported: bool) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = clause.walk();
        for specifier in clause.named_children(&mut cursor) {
            if NodeKind::of(&specifier) != NodeKind::ExportSpecifier {
                continue;
            }
            let name = if exported {
                specifier
                    .child_by_field_name("alias")
                    .or_else(|| specifier.child_by_field_name("name"))
            } else {
                specifier.child_by_field_name("name")
            };
            if let Some(name) = name {
                let text = self.base.get_node_text(&name);
                names.push(self.base.string_literal_value(&name).unwrap_or(text));
            }
        }
        names
    }

    /// `exports.x = require("p")` / `module.exports.x = require("p")`
    pub(super) fn extract_exports_require(&mut self, expression: Node) -> bool {
        if NodeKind::of(&expression) != NodeKind::AssignmentExpression {
            return false;
        }
        let (Some(left), Some(right)) = (
            expression.child_by_field_name("left"),
            expression.child_by_field_name("right"),
        ) else {
            return false;
        };

        if NodeKind::of(&left) != NodeKind::MemberExpression {
            return false;
        }
        let is_exports_property = left
            .child_by_field_name("object")
            .map(|object| self.is_module_exports(&object))
            .unwrap_or(false);
        if !is_exports_property {
            return false;
        }

        let Some(path) = self.require_source(&right) else {
            return false;
        };
        let alias = left
            .child_by_field_name("property")
            .map(|property| self.base.get_node_text(&property));

        self.imports.push(Import {
            is_relative: Import::path_is_relative(&path),
            path,
            alias,
            is_common_js: true,
            location: self.base.location_of(&expression),
            ..Default::default()
        });
        true
    }

    /// `from "<path>"` of an import or re-export
    fn module_source(&self, node: &Node) -> Option<String> {
        let source = node.child_by_field_name("source")?;
        self.base.string_literal_value(&source)
    }
}
