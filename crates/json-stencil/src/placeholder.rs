//! Recognition of `start + path + end` markers inside template strings.
//!
//! Parsing never fails: anything that does not look like a placeholder is
//! literal text.

/// A placeholder found in a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// The text between the markers.
    pub path: &'t str,
    /// The placeholder including both markers.
    pub full_text: &'t str,
    /// Byte offset of the start marker.
    pub start_offset: usize,
    /// Byte offset just past the end marker.
    pub end_offset: usize,
    /// The placeholder spans the whole scanned string.
    pub is_exact_match: bool,
}

/// Scanner for one marker pair.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderParser<'m> {
    start: &'m str,
    end: &'m str,
}

impl<'m> PlaceholderParser<'m> {
    /// Markers are expected to be validated already (non-empty, distinct).
    pub fn new(start: &'m str, end: &'m str) -> Self {
        PlaceholderParser { start, end }
    }

    /// Returns the placeholder when `text` is exactly one placeholder and
    /// nothing else.
    ///
    /// Neither marker may occur inside the path region, so `"${/a}${/b}"`
    /// is not an exact match.
    pub fn exact<'t>(&self, text: &'t str) -> Option<Placeholder<'t>> {
        let (start_len, end_len) = (self.start.len(), self.end.len());
        if text.len() < start_len + end_len + 1 {
            return None;
        }
        if !text.starts_with(self.start) || !text.ends_with(self.end) {
            return None;
        }
        let path = &text[start_len..text.len() - end_len];
        if path.contains(self.start) || path.contains(self.end) || !is_path_like(path) {
            return None;
        }
        Some(Placeholder {
            path,
            full_text: text,
            start_offset: 0,
            end_offset: text.len(),
            is_exact_match: true,
        })
    }

    /// Every well-formed placeholder in `text`, left to right.
    ///
    /// A start marker without a following end marker ends the scan; an empty
    /// path (`"${}"`) is skipped as literal text.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<Placeholder<'t>> {
        let mut found = Vec::new();
        let mut cursor = 0;
        while let Some(rel) = text[cursor..].find(self.start) {
            let start_offset = cursor + rel;
            let path_start = start_offset + self.start.len();
            let Some(rel_end) = text[path_start..].find(self.end) else {
                break;
            };
            let path_end = path_start + rel_end;
            let end_offset = path_end + self.end.len();
            let path = &text[path_start..path_end];
            if is_path_like(path) {
                found.push(Placeholder {
                    path,
                    full_text: &text[start_offset..end_offset],
                    start_offset,
                    end_offset,
                    is_exact_match: start_offset == 0
                        && end_offset == text.len()
                        && !path.contains(self.start),
                });
            }
            cursor = end_offset;
        }
        found
    }

    /// Quick check used to skip strings that cannot hold a placeholder.
    pub fn may_contain_placeholder(&self, text: &str) -> bool {
        text.len() > self.start.len() + self.end.len() && text.contains(self.start)
    }
}

fn is_path_like(path: &str) -> bool {
    !path.is_empty()
}
