//! Language Support - tree-sitter language configuration
//!
//! All grammar lookups go through here so the manager and the tests agree on
//! which tags and extensions are supported.

use anyhow::Result;
use std::path::Path;

/// Get tree-sitter language parser for a given language name
///
/// `jsx` shares the JavaScript grammar, which already parses JSX syntax.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "javascript" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: javascript, jsx",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("jsx"),
        _ => None,
    }
}

/// Detect language from a file path's extension
pub fn detect_language(file_path: &str) -> Option<&'static str> {
    Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}

/// Language for a path; extension-less paths are treated as JavaScript
pub fn language_for_path(file_path: &str) -> Result<&'static str> {
    let Some(extension) = Path::new(file_path).extension().and_then(|ext| ext.to_str()) else {
        return Ok("javascript");
    };
    detect_language_from_extension(extension)
        .ok_or_else(|| anyhow::anyhow!("No extractor for '.{}' files: {}", extension, file_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_extensions() {
        assert_eq!(detect_language("lib/router/index.js"), Some("javascript"));
        assert_eq!(detect_language("src/app.mjs"), Some("javascript"));
        assert_eq!(detect_language("bin/cli.cjs"), Some("javascript"));
        assert_eq!(detect_language("ui/App.jsx"), Some("jsx"));
        assert_eq!(detect_language("main.py"), None);
    }

    #[test]
    fn test_grammar_lookup() {
        assert!(get_tree_sitter_language("javascript").is_ok());
        assert!(get_tree_sitter_language("jsx").is_ok());
        let err = get_tree_sitter_language("rust").unwrap_err();
        assert!(err.to_string().contains("Unsupported language"));
    }

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path("bin/www").unwrap(), "javascript");
        assert_eq!(language_for_path("a.jsx").unwrap(), "jsx");
        assert!(language_for_path("a.rs").is_err());
    }
}
