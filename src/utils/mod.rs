// Miller's Utilities Module

/// Path helpers (Unix-style normalization, semantic type names)
pub mod paths;
