// Behavioral guarantees of the extraction engine

use super::{extract, top_level, APPLICATION_JS, RESPONSE_JS, ROUTER_JS};
use crate::extractors::base::{
    ExtractorConfig, SymbolKind, MAX_CALL_EXPRESSION_DEPTH, MAX_CALL_SITES_PER_SYMBOL,
};
use crate::extractors::{CancellationToken, ExtractError, ExtractorManager};

#[test]
fn test_extraction_is_deterministic() {
    let first = extract("lib/router/index.js", ROUTER_JS);
    let second = extract("lib/router/index.js", ROUTER_JS);
    assert_eq!(first.hash, second.hash);
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.imports, second.imports);
}

#[test]
fn test_hash_changes_with_any_byte() {
    let original = extract("lib/response.js", RESPONSE_JS);
    let mut bytes = RESPONSE_JS.as_bytes().to_vec();
    let last = bytes.len() - 2;
    bytes[last] = if bytes[last] == b'x' { b'y' } else { b'x' };
    let changed = ExtractorManager::new()
        .extract_file("lib/response.js", &bytes, &CancellationToken::new())
        .unwrap();
    assert_ne!(original.hash, changed.hash);
}

#[test]
fn test_call_sites_capped_per_symbol() {
    let calls: String = (0..MAX_CALL_SITES_PER_SYMBOL + 250)
        .map(|i| format!("  call{i}();\n"))
        .collect();
    let code = format!("function busy() {{\n{calls}}}\n");
    let result = extract("lib/busy.js", &code);
    let busy = &top_level(&result, "busy", SymbolKind::Function)[0];
    assert_eq!(busy.calls.len(), MAX_CALL_SITES_PER_SYMBOL);
}

#[test]
fn test_deep_calls_pruned_shallow_kept() {
    let depth = MAX_CALL_EXPRESSION_DEPTH + 5;
    let deep = format!("{}buried(){}", "[".repeat(depth), "]".repeat(depth));
    let code = format!("function nested() {{\n  visible();\n  var x = {deep};\n  alsoVisible();\n}}\n");
    let result = extract("lib/nested.js", &code);
    let nested = &top_level(&result, "nested", SymbolKind::Function)[0];
    let targets: Vec<&str> = nested.calls.iter().map(|c| c.target.as_str()).collect();
    assert_eq!(targets, vec!["visible", "alsoVisible"]);
}

#[test]
fn test_alias_method_receiver_from_index_path() {
    let code = "var proto = module.exports = function () {};\nproto.handle = function handle() {};\n";
    let result = extract("lib/router/index.js", code);
    let handles = top_level(&result, "handle", SymbolKind::Method);
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].receiver.as_deref(), Some("Router"));
    assert!(handles[0].exported);
}

#[test]
fn test_chained_alias_methods_share_calls() {
    let result = extract("lib/response.js", RESPONSE_JS);
    let set = top_level(&result, "set", SymbolKind::Method)[0];
    let header = top_level(&result, "header", SymbolKind::Method)[0];
    assert_eq!(set.calls, header.calls);
    assert_eq!(set.calls[0].target, "setHeader");
    assert_eq!(set.doc_comment, header.doc_comment);
}

#[test]
fn test_constructor_promotion_boundary() {
    let code = r#"
function Router() { this.stack = []; }
function router() { this.stack = []; }
function Outer() { function f() { this.x = 1; } }
"#;
    let result = extract("lib/ctors.js", code);

    let upper = &top_level(&result, "Router", SymbolKind::Class)[0];
    assert!(upper.metadata.as_ref().unwrap().is_constructor);
    assert_eq!(top_level(&result, "router", SymbolKind::Function).len(), 1);
    assert_eq!(top_level(&result, "Outer", SymbolKind::Function).len(), 1);
}

#[test]
fn test_explicit_class_suppresses_synthetic() {
    let result = extract("lib/application.js", APPLICATION_JS);
    assert_eq!(top_level(&result, "Application", SymbolKind::Class).len(), 1);
}

#[test]
fn test_dynamic_import_literal_only() {
    let code = "async function load(name) {\n  await import('./x');\n  await import(`./${name}`);\n}\n";
    let result = extract("lib/load.js", code);
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.imports[0].path, "./x");
    assert!(result.imports[0].is_dynamic);
    assert!(top_level(&result, "load", SymbolKind::Function)[0].calls.is_empty());
}

#[test]
fn test_syntax_errors_are_soft() {
    let result = extract("lib/broken.js", "function ok() {}\nfunction broken( {\n");
    assert!(result.errors.iter().any(|e| e.contains("syntax errors")));
    assert_eq!(top_level(&result, "ok", SymbolKind::Function).len(), 1);
}

#[test]
fn test_batch_keeps_input_order() {
    let files = vec![
        ("lib/router/index.js".to_string(), ROUTER_JS.as_bytes().to_vec()),
        ("lib/bad.js".to_string(), vec![0xff, 0xfe]),
        ("lib/response.js".to_string(), RESPONSE_JS.as_bytes().to_vec()),
    ];
    let results = ExtractorManager::new().extract_files_batch(&files, &CancellationToken::new());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().file_path, "lib/router/index.js");
    assert!(matches!(results[1], Err(ExtractError::InvalidUtf8 { .. })));
    assert_eq!(results[2].as_ref().unwrap().file_path, "lib/response.js");
}

#[test]
fn test_private_symbols_filtered_by_config() {
    let manager = ExtractorManager::with_config(ExtractorConfig {
        include_private: false,
        ..ExtractorConfig::default()
    });
    let result = manager
        .extract_file("lib/router/index.js", ROUTER_JS.as_bytes(), &CancellationToken::new())
        .unwrap();
    let names: Vec<&str> = result.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["proto", "handle", "use", "route", "Router"]);
}

#[test]
fn test_result_serializes_to_json() {
    let result = extract("lib/router/index.js", ROUTER_JS);
    let json = result.to_json().unwrap();
    assert!(json.contains("\"kind\":\"method\""));
    assert!(json.contains("\"receiver\":\"Router\""));
    assert!(json.contains(&result.hash));
}

#[test]
fn test_windows_paths_normalized() {
    let result = extract("lib\\router\\index.js", ROUTER_JS);
    assert_eq!(result.file_path, "lib/router/index.js");
    assert_eq!(top_level(&result, "Router", SymbolKind::Class).len(), 1);
    assert!(result
        .symbols
        .iter()
        .all(|s| s.location.file_path == "lib/router/index.js"));
}

#[test]
fn test_deeply_nested_top_level_statement() {
    let depth = 5000;
    let code = format!(
        "x = {}1{};\nfunction after() {{}}\n",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let result = extract("lib/deep.js", &code);
    assert_eq!(top_level(&result, "after", SymbolKind::Function).len(), 1);
}

#[test]
fn test_deeply_nested_destructuring_pattern() {
    let depth = 2000;
    let code = format!(
        "var {}inner{} = source;\n",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let result = extract("lib/deep.js", &code);
    assert_eq!(top_level(&result, "inner", SymbolKind::Variable).len(), 1);
}

#[test]
fn test_long_alias_assignment_chain() {
    let links: String = (0..3000).map(|i| format!("a{i} = ")).collect();
    let code = format!("var app = {links}module.exports = {{}};\napp.start = function () {{}};\n");
    let result = extract("lib/deep.js", &code);
    let start = top_level(&result, "start", SymbolKind::Method);
    assert_eq!(start.len(), 1);
    assert_eq!(start[0].receiver.as_deref(), Some("Deep"));
}

#[test]
fn test_plain_function_alias_shares_id_with_synthetic_class() {
    // Same name and line: the synthetic class collides with the function it mirrors
    let result = extract("lib/router.js", "var Router = module.exports = function () {};\n");
    let function = top_level(&result, "Router", SymbolKind::Function)[0];
    let class = top_level(&result, "Router", SymbolKind::Class)[0];
    assert_eq!(function.id, class.id);
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("duplicate symbol id") && e.ends_with("for Router")));
}
