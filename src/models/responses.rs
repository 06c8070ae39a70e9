use serde::{Deserialize, Serialize};
use crate::models::domain::RankedBook;

/// Response for the book discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverBooksResponse {
    pub books: Vec<RankedBook>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the profile location update endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocationResponse {
    pub success: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
