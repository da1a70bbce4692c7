// Base Extractor Types and Helpers for Miller
//
// - types.rs: All data structures (Symbol, Import, CallSite, ParseResult, ...)
// - extractor.rs: BaseExtractor implementation (core methods)
// - tree_methods.rs: Tree navigation helpers
// - creation_methods.rs: Symbol construction

pub mod creation_methods;
pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use creation_methods::SymbolOptions;
pub use extractor::BaseExtractor;
pub use types::{
    CallSite, ExtractorConfig, Import, Location, MethodSignature, ParseResult, Symbol,
    SymbolKind, SymbolMetadata, MAX_CALL_EXPRESSION_DEPTH, MAX_CALL_SITES_PER_SYMBOL,
    MAX_FILE_SIZE,
};
