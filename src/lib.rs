//! BookSwap Match - match and distance ranking service for the BookSwap app
//!
//! This library provides the book-discovery ranking core used by the
//! BookSwap app: haversine distance, wishlist and double-match detection,
//! and the composite ranking over annotated candidates.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{haversine_distance, titles_match, Ranker};
pub use models::{Book, DiscoverBooksRequest, DiscoverBooksResponse, Profile, RankedBook, TierWeights, ViewerContext, WishlistEntry};
