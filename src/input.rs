/// Extract the lookup key from raw search-box text.
///
/// Leading and trailing whitespace is stripped. An empty result means the
/// search is a no-op. Nothing else is validated; a bad login is left for
/// the API to reject.
pub fn read_query(raw: &str) -> Option<&str> {
    let query = raw.trim();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}
