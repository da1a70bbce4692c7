//! Call-site extraction for symbol bodies
//!
//! Uses an explicit `(node, depth)` worklist instead of recursion so memory and
//! node visits per body are bounded by the configured depth and call-site caps.
//! Dynamic `import("<literal>")` calls are routed to the import list.

use super::node_kind::NodeKind;
use crate::extractors::base::{BaseExtractor, CallSite, Import};
use crate::extractors::cancellation::CancellationToken;
use tracing::debug;
use tree_sitter::Node;

/// Nodes visited between cancellation polls
const CANCEL_CHECK_INTERVAL: usize = 100;

/// Longest member-expression argument kept as a callback candidate
const MAX_FUNCTION_ARG_LEN: usize = 50;

const LITERAL_KEYWORDS: &[&str] = &["true", "false", "null", "undefined"];

/// Ambient globals never reported as callback arguments
const AMBIENT_GLOBALS: &[&str] = &[
    "arguments",
    "console",
    "document",
    "exports",
    "global",
    "globalThis",
    "module",
    "process",
    "require",
    "window",
];

/// Calls and dynamic imports found in one body. Either may be truncated.
#[derive(Debug, Default)]
pub(crate) struct CallScan {
    pub calls: Vec<CallSite>,
    pub dynamic_imports: Vec<Import>,
    pub truncated: bool,
}

pub(crate) fn scan_calls(base: &BaseExtractor, body: Node, cancel: &CancellationToken) -> CallScan {
    let max_depth = base.config.max_call_depth;
    let max_calls = base.config.max_call_sites;

    let mut scan = CallScan::default();
    let mut stack: Vec<(Node, usize)> = vec![(body, 0)];
    let mut visited = 0usize;

    while let Some((node, depth)) = stack.pop() {
        if depth > max_depth {
            continue;
        }

        visited += 1;
        if visited % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            debug!("call-site scan cancelled after {} nodes", visited);
            scan.truncated = true;
            return scan;
        }

        if scan.calls.len() >= max_calls {
            scan.truncated = true;
            return scan;
        }

        match NodeKind::of(&node) {
            NodeKind::CallExpression => {
                if let Some(import) = dynamic_import(base, &node) {
                    scan.dynamic_imports.push(import);
                } else if let Some(call) = call_site(base, &node) {
                    scan.calls.push(call);
                }
            }
            NodeKind::NewExpression => {
                if let Some(call) = constructor_site(base, &node) {
                    scan.calls.push(call);
                }
            }
            _ => {}
        }

        // Reverse push keeps left-to-right order on pop
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push((child, depth + 1));
            }
        }
    }

    scan
}

/// `import("./x")` with a single string literal argument
fn dynamic_import(base: &BaseExtractor, node: &Node) -> Option<Import> {
    let callee = node.child_by_field_name("function")?;
    if NodeKind::of(&callee) != NodeKind::ImportKeyword {
        return None;
    }

    let args = node.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let named: Vec<Node> = args.named_children(&mut cursor).collect();
    if named.len() != 1 {
        return None;
    }
    let path = base.string_literal_value(&named[0])?;

    Some(Import {
        is_relative: Import::path_is_relative(&path),
        path,
        is_dynamic: true,
        is_module: true,
        location: base.location_of(node),
        ..Default::default()
    })
}

fn call_site(base: &BaseExtractor, node: &Node) -> Option<CallSite> {
    let callee = node.child_by_field_name("function")?;
    let (target, receiver) = match NodeKind::of(&callee) {
        NodeKind::Identifier => (base.get_node_text(&callee), None),
        NodeKind::MemberExpression => {
            let property = callee.child_by_field_name("property")?;
            let object = callee.child_by_field_name("object")?;
            (base.get_node_text(&property), Some(base.get_node_text(&object)))
        }
        // Import keyword with a non-literal argument, computed callees, etc.
        _ => return None,
    };

    if target.is_empty() {
        return None;
    }

    Some(CallSite {
        target,
        is_method: receiver.is_some(),
        receiver,
        function_args: function_args(base, node),
        location: base.location_of(node),
    })
}

/// `new X()` and `new ns.X()`
fn constructor_site(base: &BaseExtractor, node: &Node) -> Option<CallSite> {
    let constructor = node.child_by_field_name("constructor")?;
    let (target, receiver) = match NodeKind::of(&constructor) {
        NodeKind::Identifier => (base.get_node_text(&constructor), None),
        NodeKind::MemberExpression => {
            let property = constructor.child_by_field_name("property")?;
            let object = constructor.child_by_field_name("object")?;
            (base.get_node_text(&property), Some(base.get_node_text(&object)))
        }
        _ => return None,
    };

    if target.is_empty() {
        return None;
    }

    Some(CallSite {
        target,
        is_method: receiver.is_some(),
        receiver,
        function_args: Vec::new(),
        location: base.location_of(node),
    })
}

/// Identifier and short member-expression arguments (callback candidates)
fn function_args(base: &BaseExtractor, node: &Node) -> Vec<String> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut cursor = args.walk();
    for arg in args.named_children(&mut cursor) {
        match NodeKind::of(&arg) {
            NodeKind::Identifier => {
                let name = base.get_node_text(&arg);
                if LITERAL_KEYWORDS.contains(&name.as_str())
                    || AMBIENT_GLOBALS.contains(&name.as_str())
                {
                    continue;
                }
                result.push(name);
            }
            NodeKind::MemberExpression => {
                let text = base.get_node_text(&arg);
                if text.len() <= MAX_FUNCTION_ARG_LEN && !text.contains('(') {
                    result.push(text);
                }
            }
            _ => {}
        }
    }
    result
}

impl super::JavaScriptExtractor {
    /// Scan a body for calls; dynamic imports go straight to the import list.
    pub(super) fn collect_calls(&mut self, body: Option<Node>) -> Vec<CallSite> {
        let Some(body) = body else {
            return Vec::new();
        };
        let scan = scan_calls(&self.base, body, &self.cancel);
        if scan.truncated {
            debug!(
                "call-site scan truncated in {} at line {}",
                self.base.file_path,
                body.start_position().row + 1
            );
        }
        self.imports.extend(scan.dynamic_imports);
        scan.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{
        ExtractorConfig, MAX_CALL_EXPRESSION_DEPTH, MAX_CALL_SITES_PER_SYMBOL,
    };
    use tree_sitter::{Parser, Tree};

    fn parse(code: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    fn scan_with(code: &str, config: ExtractorConfig, cancel: &CancellationToken) -> CallScan {
        let tree = parse(code);
        let base = BaseExtractor::new(
            "javascript".to_string(),
            "test.js".to_string(),
            code.to_string(),
            config,
        );
        let function = tree.root_node().named_child(0).unwrap();
        let body = function.child_by_field_name("body").unwrap();
        scan_calls(&base, body, cancel)
    }

    fn scan(code: &str) -> CallScan {
        scan_with(code, ExtractorConfig::default(), &CancellationToken::new())
    }

    fn targets(scan: &CallScan) -> Vec<&str> {
        scan.calls.iter().map(|c| c.target.as_str()).collect()
    }

    #[test]
    fn test_plain_and_method_calls() {
        let result = scan("function f() { g(); this.h(); obj.m(1); }");
        assert_eq!(targets(&result), vec!["g", "h", "m"]);

        let g = &result.calls[0];
        assert!(!g.is_method);
        assert_eq!(g.receiver, None);

        let h = &result.calls[1];
        assert!(h.is_method);
        assert_eq!(h.receiver.as_deref(), Some("this"));

        let m = &result.calls[2];
        assert_eq!(m.receiver.as_deref(), Some("obj"));
    }

    #[test]
    fn test_nested_calls_in_preorder() {
        let result = scan("function f() { outer(inner()); }");
        assert_eq!(targets(&result), vec!["outer", "inner"]);
    }

    #[test]
    fn test_calls_inside_nested_functions_included() {
        let code = "function f() { items.forEach(function (item) { handle(item); }); }";
        assert_eq!(targets(&scan(code)), vec!["forEach", "handle"]);
    }

    #[test]
    fn test_constructor_calls() {
        let result = scan("function f() { new Router(); new http.Server(opts); }");
        assert_eq!(targets(&result), vec!["Router", "Server"]);
        assert!(!result.calls[0].is_method);
        assert!(result.calls[1].is_method);
        assert_eq!(result.calls[1].receiver.as_deref(), Some("http"));
    }

    #[test]
    fn test_function_args_filtering() {
        let result = scan(
            "function f() { app.use(handler, this.onError, true, undefined, console, 'x', g()); }",
        );
        assert_eq!(result.calls[0].function_args, vec!["handler", "this.onError"]);
        // g() is itself a call site
        assert_eq!(targets(&result), vec!["use", "g"]);
    }

    #[test]
    fn test_long_member_argument_dropped() {
        let long = format!("a.{}", "b".repeat(60));
        let code = format!("function f() {{ run({long}, short.name); }}");
        let result = scan(&code);
        assert_eq!(result.calls[0].function_args, vec!["short.name"]);
    }

    #[test]
    fn test_dynamic_import_literal_only() {
        let result = scan("function f() { import('./x'); import(`./${name}`); import(name); }");
        assert!(result.calls.is_empty(), "dynamic imports are not call sites");
        assert_eq!(result.dynamic_imports.len(), 1);
        let import = &result.dynamic_imports[0];
        assert_eq!(import.path, "./x");
        assert!(import.is_dynamic);
        assert!(import.is_module);
        assert!(import.is_relative);
    }

    #[test]
    fn test_call_site_cap_is_exact() {
        let calls: String = (0..1200).map(|i| format!("f{i}();\n")).collect();
        let code = format!("function big() {{\n{calls}}}");
        let result = scan(&code);
        assert_eq!(result.calls.len(), MAX_CALL_SITES_PER_SYMBOL);
        assert!(result.truncated);
        assert_eq!(result.calls[0].target, "f0");
    }

    #[test]
    fn test_depth_pruning_keeps_shallow_siblings() {
        let depth = MAX_CALL_EXPRESSION_DEPTH + 10;
        let deep = format!("{}deep(){}", "(".repeat(depth), ")".repeat(depth));
        let code = format!("function f() {{ shallow(); x = {deep}; }}");
        let result = scan(&code);
        assert_eq!(targets(&result), vec!["shallow"]);
    }

    #[test]
    fn test_configured_depth_limit() {
        let config = ExtractorConfig {
            max_call_depth: 2,
            ..ExtractorConfig::default()
        };
        // body(0) > expression_statement(1) > call(2) > arguments(3) > call(4)
        let result = scan_with("function f() { a(b()); }", config, &CancellationToken::new());
        assert_eq!(targets(&result), vec!["a"]);
    }

    #[test]
    fn test_cancelled_scan_returns_partial() {
        let calls: String = (0..500).map(|i| format!("f{i}();\n")).collect();
        let code = format!("function big() {{\n{calls}}}");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = scan_with(&code, ExtractorConfig::default(), &cancel);
        assert!(result.truncated);
        assert!(result.calls.len() < 500);
    }
}
