//! Type definitions for JSON Pointer.

/// A step in a JSON Pointer path.
///
/// Always a string: an object key, or the decimal form of an array index.
pub type PathStep = String;

/// A JSON Pointer path, already unescaped.
pub type Path = Vec<PathStep>;
