use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Listing;
use super::DatabaseError;

const LISTING_COLUMNS: &str =
    "id, account_id, name, price, deal_price, short_des, des, image, images, created_at";

pub struct NewListing {
    pub account_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub deal_price: Decimal,
    pub images: Option<String>,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ListingChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub deal_price: Option<Decimal>,
    pub short_des: Option<String>,
    pub des: Option<String>,
    pub image: Option<String>,
    pub images: Option<String>,
}

pub async fn insert(pool: &PgPool, listing: NewListing) -> Result<Listing, DatabaseError> {
    let row = sqlx::query_as::<_, Listing>(&format!(
        "INSERT INTO listings (id, account_id, name, price, deal_price, images)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {}",
        LISTING_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(listing.account_id)
    .bind(&listing.name)
    .bind(listing.price)
    .bind(listing.deal_price)
    .bind(&listing.images)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Listing>, DatabaseError> {
    let row = sqlx::query_as::<_, Listing>(&format!(
        "SELECT {} FROM listings WHERE id = $1",
        LISTING_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: ListingChanges,
) -> Result<Listing, DatabaseError> {
    let row = sqlx::query_as::<_, Listing>(&format!(
        "UPDATE listings
         SET name = COALESCE($2, name),
             price = COALESCE($3, price),
             deal_price = COALESCE($4, deal_price),
             short_des = COALESCE($5, short_des),
             des = COALESCE($6, des),
             image = COALESCE($7, image),
             images = COALESCE($8, images)
         WHERE id = $1
         RETURNING {}",
        LISTING_COLUMNS
    ))
    .bind(id)
    .bind(&changes.name)
    .bind(changes.price)
    .bind(changes.deal_price)
    .bind(&changes.short_des)
    .bind(&changes.des)
    .bind(&changes.image)
    .bind(&changes.images)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
