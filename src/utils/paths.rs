// Miller's Path Utilities
//
// File paths arrive as plain strings (they are never read from disk). They are
// normalized to Unix-style separators for storage and ID generation, and the
// module-alias resolver derives a semantic type name from them.

/// Normalize a path string to Unix-style `/` separators
///
/// # Examples
/// ```
/// use miller_jsgraph::utils::paths::to_unix_style;
/// assert_eq!(to_unix_style("lib\\router\\index.js"), "lib/router/index.js");
/// ```
pub fn to_unix_style(path: &str) -> String {
    path.replace('\\', "/")
}

/// Derive the semantic type name of a module from its path
///
/// Takes the file's base name without extension; `index` files use their parent
/// directory's name instead. The first character is upper-cased. Returns `None`
/// when no usable name remains (e.g. a root-level `index.js`).
///
/// # Examples
/// ```
/// use miller_jsgraph::utils::paths::semantic_type_name;
/// assert_eq!(semantic_type_name("lib/router/index.js").as_deref(), Some("Router"));
/// assert_eq!(semantic_type_name("lib/application.js").as_deref(), Some("Application"));
/// assert_eq!(semantic_type_name("index.js"), None);
/// ```
pub fn semantic_type_name(file_path: &str) -> Option<String> {
    let unix = to_unix_style(file_path);
    let mut segments: Vec<&str> = unix.split('/').filter(|s| !s.is_empty()).collect();

    let file_name = segments.pop()?;
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    };

    let base = if stem == "index" {
        *segments.last()?
    } else {
        stem
    };

    if base.is_empty() || base == "." || base == ".." {
        return None;
    }

    let mut chars = base.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
