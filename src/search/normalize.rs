/// Normalize text for matching: lower-case, collapse every whitespace run to a
/// single space, and trim both ends.
///
/// Applied identically to search terms and display fields.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
