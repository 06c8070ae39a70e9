// Service exports
pub mod cache;
pub mod geocode;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use geocode::{GeoPoint, GeocodeClient, GeocodeError};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
