use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::listingmodel::Listing;

const LISTING_COLUMNS: &str = r#"
    l.id, l.owner_id, l.title, l.region, l.price, l.area, l.availability,
    l.bedrooms, l.bathrooms, l.listing_type,
    l.has_wifi, l.has_parking, l.has_air_conditioning, l.has_heating,
    l.furnished, l.pets_allowed, l.created_at
"#;

/// Read accessors over the listings table, which belongs to the listing service.
#[async_trait]
pub trait ListingExt {
    async fn get_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<Listing>, sqlx::Error>;

    /// The whole catalog, newest first.
    async fn get_listings(&self) -> Result<Vec<Listing>, sqlx::Error>;

    async fn get_listings_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Listing>, sqlx::Error>;
}

#[async_trait]
pub trait FavoriteExt {
    /// Listings the user favorited, in the order they were favorited.
    async fn get_favorite_listings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Listing>, sqlx::Error>;

    /// `(user_id, listing_id)` pairs for every favorite held by `user_ids`.
    async fn get_favorite_pairs(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn get_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {} FROM listings l WHERE l.id = $1", LISTING_COLUMNS);

        sqlx::query_as::<_, Listing>(&query)
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_listings(&self) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM listings l ORDER BY l.created_at DESC NULLS LAST, l.id",
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_listings_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM listings l WHERE l.owner_id = $1 ORDER BY l.created_at DESC NULLS LAST, l.id",
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
    }
}

#[async_trait]
impl FavoriteExt for DBClient {
    async fn get_favorite_listings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM favorites f
            JOIN listings l ON l.id = f.listing_id
            WHERE f.user_id = $1
            ORDER BY f.created_at, l.id
            "#,
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_favorite_pairs(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            SELECT user_id, listing_id
            FROM favorites
            WHERE user_id = ANY($1)
            ORDER BY user_id, created_at, listing_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
    }
}
