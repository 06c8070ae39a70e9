use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during address geocoding
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Address could not be resolved: {0}")]
    Unresolvable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// A geocoded position
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Nominatim hit format: lat/lon arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Nominatim geocoding client
///
/// Resolves a free-text address to coordinates; invoked only when a
/// profile's address changes, never during ranking.
pub struct GeocodeClient {
    endpoint: String,
    user_agent: String,
    client: Client,
}

impl GeocodeClient {
    pub fn new(endpoint: String, user_agent: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            user_agent,
            client,
        }
    }

    /// Resolve a free-text address to coordinates
    ///
    /// An address the geocoder does not know yields `Unresolvable`, which
    /// callers report to the user rather than writing zeros.
    pub async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::Unresolvable("empty address".to_string()));
        }

        let url = format!(
            "{}/search?format=json&q={}&limit=1",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(address),
        );

        tracing::debug!("Geocoding address via {}", self.endpoint);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Geocoder responded with {}",
                response.status()
            )));
        }

        let hits: Vec<NominatimHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse geocoder response: {}", e)))?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::Unresolvable(address.to_string()))?;

        let latitude = hit
            .lat
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("Bad latitude '{}': {}", hit.lat, e)))?;
        let longitude = hit
            .lon
            .parse::<f64>()
            .map_err(|e| GeocodeError::InvalidResponse(format!("Bad longitude '{}': {}", hit.lon, e)))?;

        Ok(GeoPoint { latitude, longitude })
    }
}
