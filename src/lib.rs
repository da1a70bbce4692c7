// Miller JS Graph - tree-sitter symbol and call-graph extraction for JavaScript
//
// Recovers classes, methods, inheritance and module exports from legacy
// CommonJS and prototype-based code as well as modern ES syntax.

pub mod extractors;
pub mod language;
pub mod utils;

#[cfg(test)]
mod tests;

pub use extractors::{
    hash_content, CancellationToken, ExtractError, ExtractorConfig, ExtractorManager, ParseResult,
};
