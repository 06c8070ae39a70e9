use crate::models::TierWeights;

/// Compose a match score from tier and distance
///
/// Scoring formula:
/// - 1000 (double match) or 100 (wishlist match) or 0 (no match) as the base,
/// - minus the distance in km when the distance is known.
///
/// Distance is a tie-breaking penalty inside a tier, not a threshold: a
/// double match 500 km away (score 500) still outranks a plain wishlist
/// match next door (score 100). An unknown distance leaves the base alone.
#[inline]
pub fn match_score(
    is_wishlist_match: bool,
    is_double_match: bool,
    distance_km: Option<f64>,
    weights: &TierWeights,
) -> f64 {
    let base = if is_double_match {
        weights.double_match
    } else if is_wishlist_match {
        weights.wishlist_match
    } else {
        0.0
    };

    match distance_km {
        Some(km) => base - km,
        None => base,
    }
}
