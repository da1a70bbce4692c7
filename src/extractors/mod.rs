//! Miller's JavaScript Extractors Module
//!
//! Turns JavaScript source into a flat symbol table with per-symbol call sites,
//! using tree-sitter for parsing.
//!
//! # Architecture
//!
//! - `base` - Shared types and the BaseExtractor helpers
//! - `javascript` - Traversal, declaration extractors and legacy-idiom detectors
//! - `manager` - ExtractorManager public API (single file and batch)
//! - `validation` - Post-hoc structural checks, reported as soft diagnostics
//! - `cancellation` - Cooperative cancellation token
//! - `error` - Hard failure taxonomy

pub mod base;
pub mod cancellation;
pub mod error;
pub mod javascript;
pub mod manager;
pub mod validation;

// Re-export the public API
pub use base::{
    CallSite, ExtractorConfig, Import, Location, ParseResult, Symbol, SymbolKind, SymbolMetadata,
};
pub use cancellation::CancellationToken;
pub use error::ExtractError;
pub use manager::{hash_content, ExtractorManager};
