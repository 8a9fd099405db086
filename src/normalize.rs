/// Trim and ASCII-lowercase an ingredient term. Non-ASCII characters pass
/// through unchanged.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// Normalize, then reduce a simple trailing-"s" plural to singular.
///
/// This is a crude heuristic and is kept that way on purpose: the exception
/// and substitution tables are tuned against it, and substring containment
/// still recovers most words it mangles ("molasses" -> "molasse").
/// Single-character terms are left alone so "s" stays "s".
#[must_use]
pub fn singularize(s: &str) -> String {
    let norm = normalize(s);
    if norm.len() > 1 && norm.ends_with('s') {
        norm[..norm.len() - 1].to_string()
    } else {
        norm
    }
}
