//! Post-pass over the assembled symbol table
//!
//! Runs after traversal: export back-propagation, synthetic classes for
//! alias-derived types, and the privacy filter.

use crate::extractors::base::{Location, MethodSignature, Symbol, SymbolKind, SymbolMetadata};
use tracing::debug;

impl super::JavaScriptExtractor {
    pub(super) fn finish(&mut self) {
        self.propagate_exports();
        self.emit_synthetic_classes();

        if !self.base.config.include_private {
            let before = self.symbols.len();
            self.symbols.retain(|symbol| symbol.exported);
            debug!(
                "{}: dropped {} private top-level symbol(s)",
                self.base.file_path,
                before - self.symbols.len()
            );
        }
    }

    /// Names bound to the module surface become exported even when declared
    /// before the export statement.
    fn propagate_exports(&mut self) {
        for symbol in self.symbols.iter_mut().filter(|symbol| !symbol.exported) {
            if self.alias_map.contains(&symbol.name) || self.export_names.contains(&symbol.name) {
                symbol.exported = true;
            }
        }
    }

    /// One exported Class per semantic name without an explicit Class/Interface
    fn emit_synthetic_classes(&mut self) {
        if self.alias_map.is_empty() {
            return;
        }

        let mut synthetic = Vec::new();
        for semantic_name in self.alias_map.semantic_names() {
            let explicit = self
                .symbols
                .iter()
                .any(|symbol| symbol.is_class_like() && symbol.name == semantic_name);
            if explicit {
                continue;
            }

            let aliases: Vec<&str> = self.alias_map.aliases_of(semantic_name).collect();
            // Only the alphabetically first alias places the class
            let location = aliases
                .first()
                .and_then(|alias| self.symbols.iter().find(|symbol| symbol.name == *alias))
                .map(|symbol| symbol.location.clone())
                .unwrap_or_else(|| Location {
                    file_path: self.base.file_path.clone(),
                    start_line: 1,
                    start_column: 0,
                    end_line: 1,
                    end_column: 0,
                });

            let children: Vec<Symbol> = self
                .symbols
                .iter()
                .filter(|symbol| symbol.receiver.as_deref() == Some(semantic_name))
                .cloned()
                .collect();
            let methods = children
                .iter()
                .filter(|child| child.kind == SymbolKind::Method)
                .map(MethodSignature::from_symbol)
                .collect();

            let mut class = self.synthetic_class(semantic_name, location, &aliases);
            class.children = children;
            class.metadata = Some(SymbolMetadata {
                methods,
                ..Default::default()
            });
            synthetic.push(class);
        }

        debug!(
            "{}: {} synthetic class(es)",
            self.base.file_path,
            synthetic.len()
        );
        self.symbols.extend(synthetic);
    }

    fn synthetic_class(&self, name: &str, location: Location, aliases: &[&str]) -> Symbol {
        Symbol {
            id: self.base.generate_id(name, location.start_line),
            name: name.to_string(),
            kind: SymbolKind::Class,
            location,
            signature: format!("class {}", name),
            doc_comment: format!("Synthetic class for module alias(es): {}", aliases.join(", ")),
            exported: true,
            receiver: None,
            children: Vec::new(),
            calls: Vec::new(),
            metadata: None,
        }
    }
}
