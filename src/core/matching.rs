//! Title matching predicates for wishlist and double-match detection.
//!
//! Matching is deliberately looser than exact equality so that partial or
//! abbreviated titles still hit ("The Hobbit" vs "Hobbit"), but it works on
//! whole tokens rather than raw substrings so that short titles like "IT"
//! don't light up inside unrelated ones ("Fit for a King").

/// Lowercased alphanumeric tokens of a title
pub fn title_tokens(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Check whether two titles refer to (plausibly) the same book
///
/// True when either title's token set contains the other's. Case-insensitive
/// and bidirectional; empty titles never match.
#[inline]
pub fn titles_match(a: &str, b: &str) -> bool {
    let tokens_a = title_tokens(a);
    let tokens_b = title_tokens(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return false;
    }

    contains_all(&tokens_a, &tokens_b) || contains_all(&tokens_b, &tokens_a)
}

fn contains_all(haystack: &[String], needles: &[String]) -> bool {
    needles.iter().all(|n| haystack.contains(n))
}

/// Check whether a candidate title overlaps the viewer's wishlist
#[inline]
pub fn matches_wishlist(candidate_title: &str, wishlist_titles: &[String]) -> bool {
    wishlist_titles
        .iter()
        .any(|wanted| titles_match(candidate_title, wanted))
}

/// Check the mutual-interest condition
///
/// True when the candidate's owner wants (has in their wishlist) any title
/// the viewer owns. Combined with an already-established wishlist match this
/// makes the relationship a double match: each party owns something the
/// other wants.
#[inline]
pub fn is_double_match(owner_wishlist_titles: &[String], viewer_library_titles: &[String]) -> bool {
    owner_wishlist_titles
        .iter()
        .any(|wanted| matches_wishlist(wanted, viewer_library_titles))
}
