// Base Extractor Types for Miller
//
// All data structures produced by a single extraction call: symbols, imports,
// call sites and the per-file ParseResult.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard cap on call sites recorded for one symbol body.
pub const MAX_CALL_SITES_PER_SYMBOL: usize = 1000;

/// Deepest node (relative to the body root) the call-site walker will visit.
pub const MAX_CALL_EXPRESSION_DEPTH: usize = 64;

/// Largest source file accepted for extraction (5 MiB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Extraction settings
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Keep non-exported top-level symbols in the output
    pub include_private: bool,
    /// Inputs larger than this many bytes are rejected before parsing
    pub max_file_size: usize,
    /// Node depth limit for the call-site walker
    pub max_call_depth: usize,
    /// Call-site cap per symbol body
    pub max_call_sites: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            include_private: true,
            max_file_size: MAX_FILE_SIZE,
            max_call_depth: MAX_CALL_EXPRESSION_DEPTH,
            max_call_sites: MAX_CALL_SITES_PER_SYMBOL,
        }
    }
}

/// Source position of a symbol, import or call site
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file_path: String,
    /// Start line number (1-based)
    pub start_line: u32,
    /// Start column number (0-based)
    pub start_column: u32,
    /// End line number (1-based)
    pub end_line: u32,
    /// End column number (0-based)
    pub end_column: u32,
}

/// A declared entity (function, class, method, etc.) extracted from source code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Symbol {
    /// MD5 of file path, start line and qualified name
    pub id: String,
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
    /// Human-readable reconstruction of the declaration
    pub signature: String,
    /// Immediately preceding `/** ... */` comment, empty if none
    pub doc_comment: String,
    pub exported: bool,
    /// Owning type name for methods and fields
    pub receiver: Option<String>,
    /// Members; only populated on Class symbols
    pub children: Vec<Symbol>,
    /// Call sites found in the symbol's body
    pub calls: Vec<CallSite>,
    pub metadata: Option<SymbolMetadata>,
}

impl Symbol {
    /// Mutable metadata, created on first use
    pub fn metadata_mut(&mut self) -> &mut SymbolMetadata {
        self.metadata.get_or_insert_with(SymbolMetadata::default)
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self.kind, SymbolKind::Class | SymbolKind::Interface)
    }
}

/// Symbol kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Method,
    Field,
    Property,
    Variable,
    Constant,
    Import,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Interface => write!(f, "interface"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Property => write!(f, "property"),
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::Import => write!(f, "import"),
        }
    }
}

/// Declaration details that only apply to some symbol kinds
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SymbolMetadata {
    pub is_async: bool,
    pub is_generator: bool,
    pub is_static: bool,
    pub is_constructor: bool,
    /// "private" for `#name` members, "protected" for `_name` members
    pub access_modifier: Option<String>,
    pub extends: Option<String>,
    /// Non-constructor methods of a class
    pub methods: Vec<MethodSignature>,
}

/// Method summary attached to a Class symbol's metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub signature: String,
    pub is_static: bool,
    pub is_async: bool,
}

impl MethodSignature {
    pub fn from_symbol(symbol: &Symbol) -> Self {
        let metadata = symbol.metadata.clone().unwrap_or_default();
        Self {
            name: symbol.name.clone(),
            signature: symbol.signature.clone(),
            is_static: metadata.is_static,
            is_async: metadata.is_async,
        }
    }
}

/// One module dependency reference
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Import {
    pub path: String,
    /// Local binding for default, namespace or `require` imports
    pub alias: Option<String>,
    /// Named bindings (local names)
    pub names: Vec<String>,
    pub is_default: bool,
    pub is_namespace: bool,
    pub is_module: bool,
    pub is_common_js: bool,
    pub is_dynamic: bool,
    pub is_relative: bool,
    pub location: Location,
}

impl Import {
    /// Relative module specifiers start with `.` or `/`
    pub fn path_is_relative(path: &str) -> bool {
        path.starts_with('.') || path.starts_with('/')
    }
}

/// One invocation found inside a body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallSite {
    /// Called function, method or class name (never empty)
    pub target: String,
    /// Object text for method calls (`this`, `obj`, `ns`)
    pub receiver: Option<String>,
    pub is_method: bool,
    /// Identifiers passed as arguments (callback candidates)
    pub function_args: Vec<String>,
    pub location: Location,
}

/// Output of one extraction call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub file_path: String,
    pub language: String,
    /// blake3 hex digest of the source bytes
    pub hash: String,
    pub parsed_at: DateTime<Utc>,
    pub symbols: Vec<Symbol>,
    pub imports: Vec<Import>,
    /// Non-fatal diagnostics
    pub errors: Vec<String>,
}

impl ParseResult {
    /// Top-level symbols with the given name
    pub fn symbols_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
