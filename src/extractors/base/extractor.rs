// BaseExtractor implementation for Miller
//
// Holds the source text and file path for one extraction and provides the
// node-text, doc-comment and ID helpers every extractor module uses.

use md5;
use tree_sitter::Node;

use super::types::{ExtractorConfig, Location};

/// Shared state and helpers for one file's extraction
pub struct BaseExtractor {
    pub language: String,
    pub file_path: String,
    pub content: String,
    pub config: ExtractorConfig,
}

impl BaseExtractor {
    /// File paths are stored Unix-style; they are never read from disk.
    pub fn new(language: String, file_path: String, content: String, config: ExtractorConfig) -> Self {
        Self {
            language,
            file_path: crate::utils::paths::to_unix_style(&file_path),
            content,
            config,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Find the doc comment for a node.
    ///
    /// Only the immediately preceding named sibling is examined, and it must be a
    /// block comment opening with `/**`. When the node sits inside an export
    /// wrapper the wrapper's preceding sibling is tried instead. Comments are never
    /// concatenated.
    pub fn find_doc_comment(&self, node: &Node) -> String {
        if let Some(comment) = self.preceding_doc_comment(node) {
            return comment;
        }

        if let Some(parent) = node.parent() {
            if parent.kind() == "export_statement" {
                if let Some(comment) = self.preceding_doc_comment(&parent) {
                    return comment;
                }
            }
        }

        String::new()
    }

    fn preceding_doc_comment(&self, node: &Node) -> Option<String> {
        let sibling = node.prev_named_sibling()?;
        if sibling.kind() != "comment" {
            return None;
        }
        let text = self.get_node_text(&sibling);
        if text.trim_start().starts_with("/**") {
            Some(text.trim().to_string())
        } else {
            None
        }
    }

    /// Generate ID for a symbol (MD5 of path, line and qualified name)
    pub fn generate_id(&self, qualified_name: &str, line: u32) -> String {
        let input = format!("{}:{}:{}", self.file_path, line, qualified_name);
        let digest = md5::compute(input.as_bytes());
        format!("{:x}", digest)
    }

    /// 1-based lines, 0-based columns
    pub fn location_of(&self, node: &Node) -> Location {
        let start_pos = node.start_position();
        let end_pos = node.end_position();
        Location {
            file_path: self.file_path.clone(),
            start_line: (start_pos.row + 1) as u32,
            start_column: start_pos.column as u32,
            end_line: (end_pos.row + 1) as u32,
            end_column: end_pos.column as u32,
        }
    }

    /// Contents of a string literal node without its quotes
    pub fn string_literal_value(&self, node: &Node) -> Option<String> {
        if node.kind() != "string" {
            return None;
        }
        let text = self.get_node_text(node);
        let trimmed = text.trim_matches(|c| c == '\'' || c == '"');
        Some(trimmed.to_string())
    }

    /// Safely truncate a string to a maximum number of characters (not bytes)
    pub fn truncate_string(text: &str, max_chars: usize) -> String {
        let char_count = text.chars().count();
        if char_count <= max_chars {
            text.to_string()
        } else {
            text.chars().take(max_chars).collect::<String>() + "..."
        }
    }
}
