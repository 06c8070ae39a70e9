use std::collections::HashMap;

use crate::core::{
    distance::optional_distance,
    matching::{is_double_match, matches_wishlist},
    scoring::match_score,
};
use crate::models::{Book, Profile, RankedBook, TierWeights, ViewerContext};

/// Result of a ranking pass
#[derive(Debug)]
pub struct RankOutcome {
    pub books: Vec<RankedBook>,
    pub total_candidates: usize,
}

/// The ranking composer
///
/// Joins candidate books with their owners' profiles, annotates each with
/// distance and match tier, composes the match score, and orders the set.
/// Pure over its inputs: no I/O, nothing mutated, result discarded after
/// rendering.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: TierWeights,
}

impl Ranker {
    pub fn new(weights: TierWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: TierWeights::default(),
        }
    }

    /// Annotate and rank a candidate set for a viewer
    ///
    /// # Arguments
    /// * `viewer` - The requesting user's coordinates, wishlist and library
    /// * `candidates` - Available books owned by other users
    /// * `owners` - Owner profiles, keyed by user id
    /// * `owner_wishlists` - Wishlist titles of wishlist-matched owners,
    ///   keyed by user id (only matched owners need an entry)
    /// * `limit` - Maximum number of ranked books to return
    ///
    /// Sort order: descending match score; for equal scores with both
    /// distances known, ascending distance. Ties with unknown distance keep
    /// their incoming order (the sort is stable).
    pub fn rank(
        &self,
        viewer: &ViewerContext,
        candidates: Vec<Book>,
        owners: &HashMap<String, Profile>,
        owner_wishlists: &HashMap<String, Vec<String>>,
        limit: usize,
    ) -> RankOutcome {
        let total_candidates = candidates.len();

        let mut ranked: Vec<RankedBook> = candidates
            .into_iter()
            .filter(|book| book.owner_id != viewer.user_id)
            .map(|book| {
                let owner = owners.get(&book.owner_id);

                let distance_km = optional_distance(
                    viewer.coordinates,
                    owner.and_then(|p| p.coordinates()),
                );

                let is_wishlist_match = matches_wishlist(&book.title, &viewer.wishlist_titles);

                // The mutual check only runs for books already matching the
                // viewer's wishlist; only those owners' wishlists were fetched.
                let double = is_wishlist_match
                    && owner_wishlists
                        .get(&book.owner_id)
                        .map(|titles| is_double_match(titles, &viewer.library_titles))
                        .unwrap_or(false);

                let score = match_score(is_wishlist_match, double, distance_km, &self.weights);

                RankedBook {
                    id: book.id,
                    title: book.title,
                    author: book.author,
                    isbn: book.isbn,
                    condition: book.condition,
                    genre: book.genre,
                    description: book.description,
                    cover_url: book.cover_url,
                    owner_id: book.owner_id,
                    owner_name: owner.and_then(|p| p.display_name.clone()),
                    distance_km,
                    is_wishlist_match,
                    is_double_match: double,
                    match_score: score,
                }
            })
            .collect();

        // Sort by score (descending), then by distance (ascending) when both
        // sides have a known distance
        ranked.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| match (a.distance_km, b.distance_km) {
                    (Some(da), Some(db)) => {
                        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                    }
                    _ => std::cmp::Ordering::Equal,
                })
        });

        ranked.truncate(limit);

        RankOutcome {
            books: ranked,
            total_candidates,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
