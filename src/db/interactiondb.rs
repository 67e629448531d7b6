use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::interactionmodel::{Interaction, NewInteraction};

/// Append-only store of user/listing interactions.
#[async_trait]
pub trait InteractionExt {
    /// Insert unless the `(user, listing, kind)` tuple already exists.
    /// Returns `None` when the row was already there.
    async fn save_interaction(
        &self,
        interaction: NewInteraction,
    ) -> Result<Option<Interaction>, sqlx::Error>;

    async fn get_user_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Interaction>, sqlx::Error>;

    async fn get_total_interaction_score(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
    ) -> Result<f64, sqlx::Error>;

    /// Total interaction score per listing for one user.
    async fn get_interaction_scores_by_listing(
        &self,
        user_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, sqlx::Error>;

    /// Listings ranked by interaction count since `since`, busiest first.
    async fn get_popular_listing_ids(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(Uuid, i64)>, sqlx::Error>;

    /// Users sharing a favorited or clicked listing with `user_id`.
    async fn get_similar_users(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error>;

    async fn delete_interactions_for_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<u64, sqlx::Error>;
}

const INTERACTION_COLUMNS: &str =
    "id, user_id, listing_id, interaction_type, search_query, interaction_score, created_at";

#[async_trait]
impl InteractionExt for DBClient {
    async fn save_interaction(
        &self,
        interaction: NewInteraction,
    ) -> Result<Option<Interaction>, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO user_interactions
                (id, user_id, listing_id, interaction_type, search_query, interaction_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id, listing_id, interaction_type) DO NOTHING
            RETURNING {}
            "#,
            INTERACTION_COLUMNS
        );

        sqlx::query_as::<_, Interaction>(&query)
            .bind(Uuid::new_v4())
            .bind(interaction.user_id)
            .bind(interaction.listing_id)
            .bind(interaction.interaction_type)
            .bind(interaction.search_query)
            .bind(interaction.interaction_score)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Interaction>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM user_interactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            INTERACTION_COLUMNS
        );

        sqlx::query_as::<_, Interaction>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_total_interaction_score(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
    ) -> Result<f64, sqlx::Error> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(interaction_score), 0.0)::float8
            FROM user_interactions
            WHERE user_id = $1 AND listing_id = $2
            "#,
        )
        .bind(user_id)
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn get_interaction_scores_by_listing(
        &self,
        user_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Uuid, f64)>(
            r#"
            SELECT listing_id, COALESCE(SUM(interaction_score), 0.0)::float8
            FROM user_interactions
            WHERE user_id = $1
            GROUP BY listing_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn get_popular_listing_ids(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT listing_id, COUNT(id)::bigint AS interaction_count
            FROM user_interactions
            WHERE created_at >= $1
            GROUP BY listing_id
            ORDER BY interaction_count DESC, listing_id
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_similar_users(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT ui2.user_id
            FROM user_interactions ui1
            JOIN user_interactions ui2 ON ui1.listing_id = ui2.listing_id
            WHERE ui1.user_id = $1
              AND ui2.user_id <> $1
              AND ui1.interaction_type IN ('favorite', 'click')
              AND ui2.interaction_type IN ('favorite', 'click')
            ORDER BY ui2.user_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_interactions_for_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM user_interactions WHERE listing_id = $1"#)
            .bind(listing_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
