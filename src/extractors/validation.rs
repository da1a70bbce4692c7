//! Structural sanity checks on an assembled result.
//!
//! Findings are returned as diagnostics; they never fail the extraction.

use crate::extractors::base::{Import, Symbol, SymbolKind};
use std::collections::HashSet;

/// Check symbol and import invariants, returning one message per violation
pub fn validate(file_path: &str, symbols: &[Symbol], imports: &[Import]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for symbol in symbols {
        if !seen_ids.insert(symbol.id.as_str()) {
            errors.push(format!(
                "{}: duplicate symbol id {} for {}",
                file_path, symbol.id, symbol.name
            ));
        }
        validate_symbol(file_path, symbol, false, &mut errors);
    }

    for import in imports {
        if import.path.is_empty() {
            errors.push(format!(
                "{}: import at line {} has an empty path",
                file_path, import.location.start_line
            ));
        }
    }

    errors
}

fn validate_symbol(file_path: &str, symbol: &Symbol, is_child: bool, errors: &mut Vec<String>) {
    let line = symbol.location.start_line;

    if symbol.name.is_empty() {
        errors.push(format!("{}: symbol at line {} has an empty name", file_path, line));
    }
    if line < 1 {
        errors.push(format!("{}: {} has start line 0", file_path, symbol.name));
    }
    if symbol.location.end_line < line {
        errors.push(format!(
            "{}: {} ends (line {}) before it starts (line {})",
            file_path, symbol.name, symbol.location.end_line, line
        ));
    }
    if !symbol.children.is_empty() && symbol.kind != SymbolKind::Class {
        errors.push(format!(
            "{}: {} is a {} but has children",
            file_path, symbol.name, symbol.kind
        ));
    }
    if is_child && symbol.receiver.is_none() {
        errors.push(format!("{}: member {} has no receiver", file_path, symbol.name));
    }
    for call in &symbol.calls {
        if call.target.is_empty() {
            errors.push(format!(
                "{}: {} has a call site with an empty target at line {}",
                file_path, symbol.name, call.location.start_line
            ));
        }
    }

    for child in &symbol.children {
        validate_symbol(file_path, child, true, errors);
    }
}
