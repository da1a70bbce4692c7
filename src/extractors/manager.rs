//! ExtractorManager - Public API for symbol and call-graph extraction
//!
//! Validates raw input, parses it with tree-sitter, runs the JavaScript
//! extractor and assembles the `ParseResult`. Every call is independent, so the
//! batch API simply fans files out over rayon.

use crate::extractors::base::{ExtractorConfig, ParseResult};
use crate::extractors::cancellation::CancellationToken;
use crate::extractors::error::ExtractError;
use crate::extractors::javascript::JavaScriptExtractor;
use crate::extractors::validation;
use crate::language;
use crate::utils::paths::to_unix_style;
use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, warn};
use tree_sitter::Parser;

/// Stateless front door for extraction; holds only configuration
#[derive(Debug, Clone, Default)]
pub struct ExtractorManager {
    config: ExtractorConfig,
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn supported_languages(&self) -> Vec<&'static str> {
        vec!["javascript", "jsx"]
    }

    /// Extract one file.
    ///
    /// Fails on oversized or non-UTF-8 input, on cancellation before or right
    /// after parsing, and when no tree can be built. Cancellation during
    /// call-site scanning only truncates the result.
    pub fn extract_file(
        &self,
        file_path: &str,
        content: &[u8],
        cancel: &CancellationToken,
    ) -> Result<ParseResult, ExtractError> {
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled {
                file_path: file_path.to_string(),
            });
        }

        if content.len() > self.config.max_file_size {
            warn!(
                "Rejecting {}: {} bytes exceeds {}",
                file_path,
                content.len(),
                self.config.max_file_size
            );
            return Err(ExtractError::FileTooLarge {
                file_path: file_path.to_string(),
                size: content.len(),
                limit: self.config.max_file_size,
            });
        }

        let source = std::str::from_utf8(content).map_err(|source| {
            warn!("Rejecting {}: invalid UTF-8", file_path);
            ExtractError::InvalidUtf8 {
                file_path: file_path.to_string(),
                source,
            }
        })?;

        let unsupported = |e: anyhow::Error| ExtractError::UnsupportedLanguage {
            file_path: file_path.to_string(),
            reason: e.to_string(),
        };
        let language_name = language::language_for_path(file_path).map_err(unsupported)?;
        let tree_sitter_language =
            language::get_tree_sitter_language(language_name).map_err(unsupported)?;

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_language)
            .map_err(|e| ExtractError::ParseFailed {
                file_path: file_path.to_string(),
                reason: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::ParseFailed {
                file_path: file_path.to_string(),
                reason: "parser produced no tree".to_string(),
            })?;

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled {
                file_path: file_path.to_string(),
            });
        }

        let extractor = JavaScriptExtractor::new(
            language_name.to_string(),
            file_path.to_string(),
            source.to_string(),
            self.config.clone(),
            cancel.clone(),
        );
        let extraction = extractor.extract(&tree);

        let mut errors = extraction.errors;
        errors.extend(validation::validate(
            file_path,
            &extraction.symbols,
            &extraction.imports,
        ));
        for error in &errors {
            warn!("{}", error);
        }

        debug!(
            "Extracted {} symbols and {} imports from {} file: {}",
            extraction.symbols.len(),
            extraction.imports.len(),
            language_name,
            file_path
        );

        Ok(ParseResult {
            file_path: to_unix_style(file_path),
            language: language_name.to_string(),
            hash: hash_content(content),
            parsed_at: Utc::now(),
            symbols: extraction.symbols,
            imports: extraction.imports,
            errors,
        })
    }

    /// Extract many files in parallel; results keep the input order
    pub fn extract_files_batch(
        &self,
        files: &[(String, Vec<u8>)],
        cancel: &CancellationToken,
    ) -> Vec<Result<ParseResult, ExtractError>> {
        files
            .par_iter()
            .map(|(file_path, content)| self.extract_file(file_path, content, cancel))
            .collect()
    }
}

/// blake3 hex digest of raw content
pub fn hash_content(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}
