// End-to-end extraction tests through ExtractorManager
//
// Fixtures live under test_samples/ and are embedded at compile time.

mod properties;

use crate::extractors::base::{ParseResult, Symbol, SymbolKind};
use crate::extractors::{CancellationToken, ExtractorManager};

pub(crate) const ROUTER_JS: &str = include_str!("../../test_samples/lib/router/index.js");
pub(crate) const RESPONSE_JS: &str = include_str!("../../test_samples/lib/response.js");
pub(crate) const APPLICATION_JS: &str = include_str!("../../test_samples/lib/application.js");

pub(crate) fn extract(file_path: &str, code: &str) -> ParseResult {
    ExtractorManager::new()
        .extract_file(file_path, code.as_bytes(), &CancellationToken::new())
        .unwrap_or_else(|e| panic!("extraction of {file_path} failed: {e}"))
}

pub(crate) fn top_level<'a>(result: &'a ParseResult, name: &'a str, kind: SymbolKind) -> Vec<&'a Symbol> {
    result.symbols_named(name).filter(|s| s.kind == kind).collect()
}

pub(crate) fn call_targets(symbol: &Symbol) -> Vec<&str> {
    symbol.calls.iter().map(|c| c.target.as_str()).collect()
}
