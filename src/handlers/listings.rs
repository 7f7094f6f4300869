use axum::extract::{Path, State};
use axum::response::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::AuthUser;
use crate::database::listings::{self, ListingChanges, NewListing};
use crate::database::models::Listing;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::Rules;

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub deal_price: Option<Decimal>,
    pub images: Option<String>,
}

/// POST /api/products - create a listing owned by the caller.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateListingRequest>,
) -> Result<Json<Listing>, ApiError> {
    Rules::new()
        .required("name", body.name.as_deref(), "Name is required")
        .present("price", body.price.as_ref(), "Price is required")
        .present("deal_price", body.deal_price.as_ref(), "Deal price is required")
        .finish()?;

    let listing = listings::insert(
        &state.pool,
        NewListing {
            account_id: user.id,
            name: body.name.unwrap_or_default(),
            price: body.price.unwrap_or_default(),
            deal_price: body.deal_price.unwrap_or_default(),
            images: body.images,
        },
    )
    .await?;

    Ok(Json(listing))
}

/// Load a listing and require that the caller owns it. Malformed and unknown
/// ids collapse into the same not-found.
async fn find_owned(state: &AppState, user: &AuthUser, id: &str) -> Result<Listing, ApiError> {
    let id = Uuid::parse_str(id).map_err(|_| ApiError::not_found("Product not found"))?;

    let listing = listings::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if listing.account_id != user.id {
        return Err(ApiError::unauthorized("User not authorized"));
    }

    Ok(listing)
}

/// PUT /api/products/update/:product_id - partial update of an owned listing.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(changes): Json<ListingChanges>,
) -> Result<Json<Value>, ApiError> {
    let listing = find_owned(&state, &user, &product_id).await?;

    listings::update(&state.pool, listing.id, changes).await?;
    Ok(Json(json!({ "msg": "Product updated" })))
}

/// DELETE /api/products/delete/:product_id - delete an owned listing.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let listing = find_owned(&state, &user, &product_id).await?;

    listings::delete(&state.pool, listing.id).await?;
    Ok(Json(json!({ "msg": "Deleted product" })))
}
