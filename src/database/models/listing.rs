use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A sellable item owned by an account. Prices are decimals, not text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub account_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub deal_price: Decimal,
    pub short_des: Option<String>,
    pub des: Option<String>,
    pub image: Option<String>,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
}
