use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{AddWishlistRequest, WishlistResponse};
use super::repo;
use crate::{auth::extractors::AuthUser, error::ApiError, products::repo::Product, state::AppState};

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(get_wishlist).post(add_product))
        .route("/wishlist/clear", delete(clear_wishlist))
        .route("/wishlist/:product_id", delete(remove_product))
}

async fn current(state: &AppState, user_id: Uuid) -> Result<Json<WishlistResponse>, ApiError> {
    let products = repo::products(&state.db, user_id).await?;
    Ok(Json(WishlistResponse { products }))
}

#[instrument(skip(state))]
pub async fn get_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<WishlistResponse>, ApiError> {
    current(&state, user.user_id).await
}

#[instrument(skip(state, payload))]
pub async fn add_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddWishlistRequest>,
) -> Result<Json<WishlistResponse>, ApiError> {
    if !Product::exists(&state.db, payload.product_id).await? {
        warn!(product_id = %payload.product_id, "wishlist add for unknown product");
        return Err(ApiError::NotFound("product"));
    }

    repo::add(&state.db, user.user_id, payload.product_id).await?;
    info!(user_id = %user.user_id, product_id = %payload.product_id, "wishlist product added");
    current(&state, user.user_id).await
}

#[instrument(skip(state))]
pub async fn remove_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<WishlistResponse>, ApiError> {
    if !repo::remove(&state.db, user.user_id, product_id).await? {
        return Err(ApiError::NotFound("wishlist item"));
    }
    info!(user_id = %user.user_id, product_id = %product_id, "wishlist product removed");
    current(&state, user.user_id).await
}

#[instrument(skip(state))]
pub async fn clear_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<WishlistResponse>, ApiError> {
    repo::clear(&state.db, user.user_id).await?;
    info!(user_id = %user.user_id, "wishlist cleared");
    current(&state, user.user_id).await
}
