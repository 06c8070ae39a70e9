use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use std::sync::Arc;
use validator::Validate;

use crate::core::{matches_filters, matches_wishlist, Ranker};
use crate::models::{
    DiscoverBooksRequest, DiscoverBooksResponse, DiscoverFilters, ErrorResponse, HealthResponse,
    UpdateLocationRequest, UpdateLocationResponse, ViewerContext,
};
use crate::services::{CacheKey, CacheManager, GeoPoint, GeocodeClient, GeocodeError, SupabaseClient, SupabaseError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub geocoder: Arc<GeocodeClient>,
    pub cache: Option<Arc<CacheManager>>,
    pub ranker: Ranker,
}

/// Configure all book-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/books/discover", web::post().to(discover_books))
        .route("/profile/location", web::put().to(update_location));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let supabase_healthy = state.supabase.health_check().await;

    let status = if supabase_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Book discovery endpoint
///
/// POST /api/v1/books/discover
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 50,
///   "search": "string",
///   "genre": "string",
///   "condition": "excellent|good|fair|poor"
/// }
/// ```
///
/// Runs a full ranking pass over freshly fetched data. Any downstream fetch
/// failure aborts the pass; partial results are never returned as complete.
async fn discover_books(
    state: web::Data<AppState>,
    req: web::Json<DiscoverBooksRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    // Cap limit to prevent excessive responses
    let limit = req.limit.min(100) as usize;

    tracing::info!("Discovering books for user: {}, limit: {}", user_id, limit);

    // Viewer profile may not exist yet; that only means unknown distance
    let viewer_coordinates = match state.supabase.profile(user_id).await {
        Ok(profile) => profile.coordinates(),
        Err(SupabaseError::NotFound(_)) => None,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return fetch_error("Failed to fetch user profile", e);
        }
    };

    let wishlist = match state.supabase.wishlist(user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to fetch wishlist for {}: {}", user_id, e);
            return fetch_error("Failed to fetch wishlist", e);
        }
    };

    let library = match state.supabase.library(user_id).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!("Failed to fetch library for {}: {}", user_id, e);
            return fetch_error("Failed to fetch library", e);
        }
    };

    let candidates = match state.supabase.available_books(user_id).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!("Failed to fetch candidates for {}: {}", user_id, e);
            return fetch_error("Failed to fetch available books", e);
        }
    };

    tracing::debug!("Found {} candidate books for {}", candidates.len(), user_id);

    let filters = DiscoverFilters {
        search: req.search.clone(),
        genre: req.genre.clone(),
        condition: req.condition,
    };

    let candidates: Vec<_> = candidates
        .into_iter()
        .filter(|book| matches_filters(book, &filters))
        .collect();

    let viewer = ViewerContext {
        user_id: user_id.clone(),
        coordinates: viewer_coordinates,
        wishlist_titles: wishlist.into_iter().map(|e| e.title).collect(),
        library_titles: library.into_iter().map(|b| b.title).collect(),
    };

    // One batched profile fetch for all candidate owners
    let owner_ids: Vec<String> = candidates
        .iter()
        .map(|b| b.owner_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let owners = match state.supabase.profiles_for(&owner_ids).await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to fetch owner profiles: {}", e);
            return fetch_error("Failed to fetch owner profiles", e);
        }
    };

    // The double-match lookup only covers owners of wishlist-matched books,
    // and runs as a single batched query
    let matched_owner_ids: Vec<String> = candidates
        .iter()
        .filter(|b| matches_wishlist(&b.title, &viewer.wishlist_titles))
        .map(|b| b.owner_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let owner_wishlists = match state.supabase.wishlist_titles_for(&matched_owner_ids).await {
        Ok(wishlists) => wishlists,
        Err(e) => {
            tracing::error!("Failed to fetch matched owners' wishlists: {}", e);
            return fetch_error("Failed to fetch owner wishlists", e);
        }
    };

    let result = state
        .ranker
        .rank(&viewer, candidates, &owners, &owner_wishlists, limit);

    tracing::info!(
        "Returning {} ranked books for user {} (from {} candidates)",
        result.books.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(DiscoverBooksResponse {
        books: result.books,
        total_candidates: result.total_candidates,
    })
}

/// Profile location update endpoint
///
/// PUT /api/v1/profile/location
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "displayName": "string",
///   "address": "string"
/// }
/// ```
///
/// A set address is geocoded before the write; an unresolvable address
/// rejects the whole update with 422. A cleared address clears the stored
/// coordinates.
async fn update_location(
    state: web::Data<AppState>,
    req: web::Json<UpdateLocationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let address = req.address.as_deref().map(str::trim).filter(|a| !a.is_empty());

    let point = match address {
        Some(addr) => match resolve_address(&state, addr).await {
            Ok(point) => Some(point),
            Err(GeocodeError::Unresolvable(_)) => {
                tracing::info!("Unresolvable address in location update for {}", req.user_id);
                return HttpResponse::UnprocessableEntity().json(ErrorResponse {
                    error: "Geocoding failed".to_string(),
                    message: "Could not find coordinates for the provided address".to_string(),
                    status_code: 422,
                });
            }
            Err(e) => {
                tracing::error!("Geocoding failed for {}: {}", req.user_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Geocoding failed".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
        None => None,
    };

    // The write is keyed on the caller's own user id only
    let upsert = state
        .supabase
        .upsert_profile_location(
            &req.user_id,
            req.display_name.as_deref(),
            address,
            point.map(|p| p.latitude),
            point.map(|p| p.longitude),
        )
        .await;

    match upsert {
        Ok(()) => HttpResponse::Ok().json(UpdateLocationResponse {
            success: true,
            latitude: point.map(|p| p.latitude),
            longitude: point.map(|p| p.longitude),
        }),
        Err(e) => {
            tracing::error!("Failed to upsert profile for {}: {}", req.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Geocode an address, going through the cache when one is available
async fn resolve_address(state: &AppState, address: &str) -> Result<GeoPoint, GeocodeError> {
    let key = CacheKey::geocode(address);

    if let Some(cache) = &state.cache {
        if let Ok(point) = cache.get::<GeoPoint>(&key).await {
            tracing::debug!("Geocode cache hit for address");
            return Ok(point);
        }
    }

    let point = state.geocoder.geocode(address).await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&key, &point).await {
            tracing::warn!("Failed to cache geocode result: {}", e);
        }
    }

    Ok(point)
}

fn fetch_error(context: &str, err: SupabaseError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: 500,
    })
}
