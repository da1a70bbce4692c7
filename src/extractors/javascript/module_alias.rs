//! Module-alias pre-pass
//!
//! Finds top-level variables that stand for the module's public surface:
//!
//! ```text
//! var app = exports = module.exports = {};   // declaration chain
//! module.exports = router;                   // bare re-assignment
//! ```
//!
//! Every such variable maps to one semantic type name derived from the file
//! path (`lib/router/index.js` → `Router`). Only the program root's direct
//! children are scanned.

use super::node_kind::NodeKind;
use crate::extractors::base::BaseExtractor;
use crate::utils::paths::semantic_type_name;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use tree_sitter::Node;

/// Local variable name → semantic type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AliasMap {
    aliases: BTreeMap<String, String>,
}

impl AliasMap {
    pub(crate) fn resolve(base: &BaseExtractor, root: Node) -> Self {
        let mut map = AliasMap::default();
        let Some(semantic_name) = semantic_type_name(&base.file_path) else {
            return map;
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match NodeKind::of(&child) {
                kind if kind.is_variable_declaration() => {
                    for name in declaration_aliases(base, &child) {
                        map.aliases.insert(name, semantic_name.clone());
                    }
                }
                NodeKind::ExpressionStatement => {
                    if let Some(name) = reassigned_alias(base, &child) {
                        map.aliases.insert(name, semantic_name.clone());
                    }
                }
                _ => {}
            }
        }

        if !map.aliases.is_empty() {
            debug!(
                "{}: {} module alias(es) for {}",
                base.file_path,
                map.aliases.len(),
                semantic_name
            );
        }
        map
    }

    /// Semantic type name for a local variable
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Distinct semantic names, sorted
    pub(crate) fn semantic_names(&self) -> BTreeSet<&str> {
        self.aliases.values().map(String::as_str).collect()
    }

    /// Variables aliasing `semantic_name`, alphabetically
    pub(crate) fn aliases_of<'a>(&'a self, semantic_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, semantic)| semantic.as_str() == semantic_name)
            .map(|(alias, _)| alias.as_str())
    }
}

/// Declarators whose initializer is an assignment chain touching `module.exports`/`exports`
fn declaration_aliases(base: &BaseExtractor, declaration: &Node) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = declaration.walk();
    for declarator in declaration.named_children(&mut cursor) {
        if NodeKind::of(&declarator) != NodeKind::VariableDeclarator {
            continue;
        }
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        if NodeKind::of(&name_node) != NodeKind::Identifier {
            continue;
        }
        let Some(value) = declarator.child_by_field_name("value") else {
            continue;
        };
        if targets_module_exports(base, &value) {
            names.push(base.get_node_text(&name_node));
        }
    }
    names
}

/// True when any assignment in the chain assigns to `module.exports` or `exports`
fn targets_module_exports(base: &BaseExtractor, node: &Node) -> bool {
    let mut current = *node;
    loop {
        let next = match NodeKind::of(&current) {
            NodeKind::AssignmentExpression => {
                let left_matches = current
                    .child_by_field_name("left")
                    .map(|left| {
                        let text = base.get_node_text(&left);
                        text == "module.exports" || text == "exports"
                    })
                    .unwrap_or(false);
                if left_matches {
                    return true;
                }
                current.child_by_field_name("right")
            }
            NodeKind::ParenthesizedExpression => current.named_child(0),
            _ => None,
        };
        match next {
            Some(inner) => current = inner,
            None => return false,
        }
    }
}

/// `module.exports = <identifier>;`
fn reassigned_alias(base: &BaseExtractor, statement: &Node) -> Option<String> {
    let expression = statement.named_child(0)?;
    if NodeKind::of(&expression) != NodeKind::AssignmentExpression {
        return None;
    }
    let left = expression.child_by_field_name("left")?;
    if base.get_node_text(&left) != "module.exports" {
        return None;
    }
    let right = expression.child_by_field_name("right")?;
    if NodeKind::of(&right) != NodeKind::Identifier {
        return None;
    }
    Some(base.get_node_text(&right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::ExtractorConfig;
    use tree_sitter::Parser;

    fn resolve(code: &str, file_path: &str) -> AliasMap {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        let base = BaseExtractor::new(
            "javascript".to_string(),
            file_path.to_string(),
            code.to_string(),
            ExtractorConfig::default(),
        );
        AliasMap::resolve(&base, tree.root_node())
    }

    #[test]
    fn test_declaration_chain_alias() {
        let map = resolve("var proto = module.exports = function () {};", "lib/router/index.js");
        assert_eq!(map.get("proto"), Some("Router"));
    }

    #[test]
    fn test_nested_chain_alias() {
        let map = resolve("var app = exports = module.exports = {};", "lib/express.js");
        assert_eq!(map.get("app"), Some("Express"));
    }

    #[test]
    fn test_bare_reassignment_alias() {
        let map = resolve("var res = {};\nmodule.exports = res;", "lib/response.js");
        assert_eq!(map.get("res"), Some("Response"));
    }

    #[test]
    fn test_multiple_variables_share_semantic_name() {
        let code = "var req = module.exports = {};\nvar request = exports = {};";
        let map = resolve(code, "lib/request.js");
        assert_eq!(map.semantic_names().into_iter().collect::<Vec<_>>(), vec!["Request"]);
        assert_eq!(map.aliases_of("Request").collect::<Vec<_>>(), vec!["req", "request"]);
    }

    #[test]
    fn test_plain_assignment_is_not_alias() {
        let map = resolve("var x = y = {};\nmodule.exports = { a: 1 };", "lib/util.js");
        assert!(map.is_empty());
    }

    #[test]
    fn test_nested_scopes_ignored() {
        let map = resolve("function f() { var app = module.exports = {}; }", "lib/app.js");
        assert!(!map.contains("app"));
    }

    #[test]
    fn test_root_index_produces_nothing() {
        let map = resolve("var app = module.exports = {};", "index.js");
        assert!(map.is_empty());
    }
}
