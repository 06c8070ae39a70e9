use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::BookCondition;

/// Request to discover available books, ranked by match and distance
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverBooksRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub condition: Option<BookCondition>,
}

fn default_limit() -> u16 {
    50
}

/// Request to update a profile's display name, address and coordinates
///
/// When `address` is set it is geocoded before the write; an unresolvable
/// address rejects the whole update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    #[serde(alias = "display_name", rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
