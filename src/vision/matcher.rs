//! Target code matching
//!
//! Matching is plain substring containment on normalized numeric text; all
//! tolerance for OCR misreads lives in the normalizer, not here.

/// Find the first target code contained in a normalized line.
///
/// Codes are tested in caller-supplied order, so when several codes occur in
/// the same line the earliest one in the list wins. An empty line never
/// matches; an empty code list yields `None` trivially.
pub fn find_match<'a>(normalized: &str, codes: &'a [String]) -> Option<&'a str> {
    if normalized.is_empty() {
        return None;
    }
    codes
        .iter()
        .find(|code| normalized.contains(code.as_str()))
        .map(String::as_str)
}
