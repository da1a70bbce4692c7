// Symbol creation methods for BaseExtractor

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::types::{CallSite, Symbol, SymbolKind, SymbolMetadata};

/// Options for creating symbols
#[derive(Debug, Clone, Default)]
pub struct SymbolOptions {
    pub signature: String,
    pub doc_comment: Option<String>,
    pub exported: bool,
    pub receiver: Option<String>,
    pub calls: Vec<CallSite>,
    pub metadata: Option<SymbolMetadata>,
}

impl BaseExtractor {
    /// Create a symbol located at `node`.
    ///
    /// The doc comment is looked up from `node` unless the options carry one.
    pub fn create_symbol(
        &self,
        node: &Node,
        name: String,
        kind: SymbolKind,
        options: SymbolOptions,
    ) -> Symbol {
        let location = self.location_of(node);
        let qualified_name = match &options.receiver {
            Some(receiver) => format!("{}.{}", receiver, name),
            None => name.clone(),
        };
        let id = self.generate_id(&qualified_name, location.start_line);

        Symbol {
            id,
            name,
            kind,
            location,
            signature: options.signature,
            doc_comment: options
                .doc_comment
                .unwrap_or_else(|| self.find_doc_comment(node)),
            exported: options.exported,
            receiver: options.receiver,
            children: Vec::new(),
            calls: options.calls,
            metadata: options.metadata,
        }
    }
}
