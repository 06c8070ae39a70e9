use crate::models::{Book, Profile, WishlistEntry};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase PostgREST client
///
/// Handles all communication with the hosted data platform:
/// - Filtered selects on books, wishlists and profiles
/// - Batched lookups keyed by owner-id sets
/// - The profile coordinate upsert (the one write this service performs)
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub books: String,
    pub wishlists: String,
    pub profiles: String,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            tables,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            table
        )
    }

    async fn get_rows<T>(&self, url: &str, context: &str) -> Result<Vec<T>, SupabaseError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!("Supabase select: {}", url);

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch {}: {}",
                context, status
            )));
        }

        // PostgREST returns a bare JSON array of rows
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {}: {}", context, e)))
    }

    /// Fetch all books available for swap, excluding the requesting user's own
    pub async fn available_books(&self, exclude_owner: &str) -> Result<Vec<Book>, SupabaseError> {
        let url = format!(
            "{}?select=*&available_for_swap=eq.true&user_id=neq.{}&order=created_at.desc",
            self.table_url(&self.tables.books),
            urlencoding::encode(exclude_owner),
        );

        let books = self.get_rows(&url, "available books").await?;
        tracing::debug!("Fetched {} available books", books.len());
        Ok(books)
    }

    /// Fetch a user's own library (all books, regardless of availability)
    pub async fn library(&self, user_id: &str) -> Result<Vec<Book>, SupabaseError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}",
            self.table_url(&self.tables.books),
            urlencoding::encode(user_id),
        );

        self.get_rows(&url, "library").await
    }

    /// Fetch a user's wishlist, highest priority first
    pub async fn wishlist(&self, user_id: &str) -> Result<Vec<WishlistEntry>, SupabaseError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=priority.desc,created_at.desc",
            self.table_url(&self.tables.wishlists),
            urlencoding::encode(user_id),
        );

        self.get_rows(&url, "wishlist").await
    }

    /// Fetch a single profile by user id
    pub async fn profile(&self, user_id: &str) -> Result<Profile, SupabaseError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&limit=1",
            self.table_url(&self.tables.profiles),
            urlencoding::encode(user_id),
        );

        let mut profiles: Vec<Profile> = self.get_rows(&url, "profile").await?;
        profiles
            .pop()
            .ok_or_else(|| SupabaseError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Fetch profiles for a set of owner ids in one query
    pub async fn profiles_for(&self, owner_ids: &[String]) -> Result<HashMap<String, Profile>, SupabaseError> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!(
            "{}?select=*&user_id=in.({})",
            self.table_url(&self.tables.profiles),
            in_list(owner_ids),
        );

        let profiles: Vec<Profile> = self.get_rows(&url, "owner profiles").await?;
        tracing::debug!("Fetched {} owner profiles for {} ids", profiles.len(), owner_ids.len());

        Ok(profiles
            .into_iter()
            .map(|p| (p.user_id.clone(), p))
            .collect())
    }

    /// Fetch wishlist titles for a set of owner ids in one batched query
    ///
    /// Replaces the per-candidate secondary fetch: one request keyed by the
    /// set of wishlist-matched owners, grouped by owner on the way out.
    pub async fn wishlist_titles_for(
        &self,
        owner_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, SupabaseError> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!(
            "{}?select=user_id,title&user_id=in.({})",
            self.table_url(&self.tables.wishlists),
            in_list(owner_ids),
        );

        #[derive(serde::Deserialize)]
        struct TitleRow {
            user_id: String,
            title: String,
        }

        let rows: Vec<TitleRow> = self.get_rows(&url, "owner wishlists").await?;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(row.title);
        }

        tracing::debug!("Fetched wishlists for {} of {} matched owners", grouped.len(), owner_ids.len());
        Ok(grouped)
    }

    /// Upsert a profile's display name, address and coordinates
    ///
    /// The row key is always the caller's own user id: this write can never
    /// touch another user's profile, independent of platform-side policies.
    pub async fn upsert_profile_location(
        &self,
        user_id: &str,
        display_name: Option<&str>,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(), SupabaseError> {
        let url = format!(
            "{}?on_conflict=user_id",
            self.table_url(&self.tables.profiles),
        );

        let payload = serde_json::json!([{
            "user_id": user_id,
            "display_name": display_name,
            "address": address,
            "latitude": latitude,
            "longitude": longitude,
        }]);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to upsert profile: {}",
                status
            )));
        }

        tracing::debug!("Upserted profile location for {}", user_id);
        Ok(())
    }

    /// Cheap reachability probe for the health endpoint
    pub async fn health_check(&self) -> bool {
        let url = format!("{}?select=user_id&limit=1", self.table_url(&self.tables.profiles));

        match self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Build a PostgREST `in.(...)` value list, quoted and URL-encoded
fn in_list(ids: &[String]) -> String {
    let joined = ids
        .iter()
        .map(|id| format!("\"{}\"", id))
        .collect::<Vec<_>>()
        .join(",");
    urlencoding::encode(&joined).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tables() -> SupabaseTables {
        SupabaseTables {
            books: "books".to_string(),
            wishlists: "wishlists".to_string(),
            profiles: "profiles".to_string(),
        }
    }

    #[test]
    fn test_supabase_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.test".to_string(),
            "test_key".to_string(),
            test_tables(),
        );

        assert_eq!(client.base_url, "https://project.supabase.test");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(
            client.table_url("books"),
            "https://project.supabase.test/rest/v1/books"
        );
    }

    #[test]
    fn test_in_list_quotes_and_encodes() {
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(in_list(&ids), "%22a%22%2C%22b%22");
    }
}
