// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Book, BookCondition, DiscoverFilters, Profile, RankedBook, TierWeights, ViewerContext, WishlistEntry};
pub use requests::{DiscoverBooksRequest, UpdateLocationRequest};
pub use responses::{DiscoverBooksResponse, ErrorResponse, HealthResponse, UpdateLocationResponse};
