use chrono::NaiveDate;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,

    // Location
    pub region: String,

    // Layout
    pub price: BigDecimal,
    pub area: f64,
    pub availability: NaiveDate,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub listing_type: Option<String>, // APARTMENT, HOUSE, STUDIO...

    // Amenities
    pub has_wifi: bool,
    pub has_parking: bool,
    pub has_air_conditioning: bool,
    pub has_heating: bool,
    pub furnished: bool,
    pub pets_allowed: bool,

    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn price_value(&self) -> f64 {
        self.price.to_f64().unwrap_or(0.0)
    }

    /// Number of amenities both listings offer plus matching bedroom and
    /// bathroom counts (only when both sides declare them).
    pub fn common_features(&self, other: &Listing) -> u32 {
        let shared_flags = [
            self.has_wifi && other.has_wifi,
            self.has_parking && other.has_parking,
            self.has_air_conditioning && other.has_air_conditioning,
            self.has_heating && other.has_heating,
            self.furnished && other.furnished,
            self.pets_allowed && other.pets_allowed,
        ];

        let mut count = shared_flags.iter().filter(|shared| **shared).count() as u32;

        if matches!((self.bedrooms, other.bedrooms), (Some(a), Some(b)) if a == b) {
            count += 1;
        }
        if matches!((self.bathrooms, other.bathrooms), (Some(a), Some(b)) if a == b) {
            count += 1;
        }

        count
    }

    pub fn is_available_on(&self, day: NaiveDate) -> bool {
        self.availability <= day
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}
