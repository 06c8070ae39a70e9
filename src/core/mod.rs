// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matching;
pub mod ranker;
pub mod scoring;

pub use distance::{haversine_distance, optional_distance};
pub use filters::{matches_filters, matches_search};
pub use matching::{is_double_match, matches_wishlist, titles_match};
pub use ranker::{RankOutcome, Ranker};
pub use scoring::match_score;
