use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{validate_quantity, AddItemRequest, CartResponse, UpdateQuantityRequest};
use super::repo;
use crate::{auth::extractors::AuthUser, error::ApiError, products::repo::Product, state::AppState};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_item))
        .route("/cart/clear", delete(clear_cart))
        .route("/cart/:product_id", put(update_item).delete(remove_item))
}

async fn current(state: &AppState, user_id: Uuid) -> Result<Json<CartResponse>, ApiError> {
    let items = repo::lines(&state.db, user_id).await?;
    Ok(Json(CartResponse { items }))
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CartResponse>, ApiError> {
    current(&state, user.user_id).await
}

#[instrument(skip(state, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    validate_quantity(payload.quantity)?;

    if !Product::exists(&state.db, payload.product_id).await? {
        warn!(product_id = %payload.product_id, "add to cart for unknown product");
        return Err(ApiError::NotFound("product"));
    }

    repo::add_item(&state.db, user.user_id, payload.product_id, payload.quantity).await?;
    info!(
        user_id = %user.user_id,
        product_id = %payload.product_id,
        quantity = payload.quantity,
        "cart item added"
    );
    current(&state, user.user_id).await
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    validate_quantity(payload.quantity)?;

    if !repo::set_quantity(&state.db, user.user_id, product_id, payload.quantity).await? {
        return Err(ApiError::NotFound("cart item"));
    }
    info!(
        user_id = %user.user_id,
        product_id = %product_id,
        quantity = payload.quantity,
        "cart item quantity set"
    );
    current(&state, user.user_id).await
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<CartResponse>, ApiError> {
    if !repo::remove_item(&state.db, user.user_id, product_id).await? {
        return Err(ApiError::NotFound("cart item"));
    }
    info!(user_id = %user.user_id, product_id = %product_id, "cart item removed");
    current(&state, user.user_id).await
}

#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CartResponse>, ApiError> {
    repo::clear(&state.db, user.user_id).await?;
    info!(user_id = %user.user_id, "cart cleared");
    current(&state, user.user_id).await
}
