use serde::{Deserialize, Serialize};

/// Physical condition of a listed book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// A book in a user's library, as stored in the `books` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub condition: BookCondition,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default = "default_true")]
    pub available_for_swap: bool,
    #[serde(rename = "user_id")]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

/// A wishlist entry, as stored in the `wishlists` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(rename = "user_id")]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_priority() -> u8 { 1 }

impl WishlistEntry {
    /// Human-readable priority label (1 = low, 3 = high)
    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            3 => "high",
            2 => "medium",
            _ => "low",
        }
    }
}

/// A user profile, as stored in the `profiles` table
///
/// Coordinates are geocoded from the address and may be absent; a profile
/// without coordinates still participates in ranking, just without distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Profile {
    /// Both coordinates, or `None` when either is missing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A candidate book annotated with match and distance data
///
/// Ephemeral: built per discovery request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub condition: BookCondition,
    pub genre: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "coverUrl")]
    pub cover_url: Option<String>,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    #[serde(rename = "isWishlistMatch")]
    pub is_wishlist_match: bool,
    #[serde(rename = "isDoubleMatch")]
    pub is_double_match: bool,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Everything the ranking pass needs to know about the requesting user
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub user_id: String,
    pub coordinates: Option<(f64, f64)>,
    pub wishlist_titles: Vec<String>,
    pub library_titles: Vec<String>,
}

/// Search/genre/condition filters applied before ranking
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilters {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub condition: Option<BookCondition>,
}

/// Score contributed by each match tier
#[derive(Debug, Clone, Copy)]
pub struct TierWeights {
    pub double_match: f64,
    pub wishlist_match: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            double_match: 1000.0,
            wishlist_match: 100.0,
        }
    }
}
