use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A bookable house as stored in the `houses` table.
#[derive(FromRow, Serialize, Clone, PartialEq, Eq, Default, Debug)]
#[sqlx(default)]
pub struct Listing {
    pub id: i32,
    pub name: String,
    pub image_name: Option<String>,
    pub description: String,
    pub price: i32,
    pub capacity: i32,
    pub postal_code: String,
    pub address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
