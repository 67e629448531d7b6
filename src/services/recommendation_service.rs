use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{
    error::ServiceError,
    fusion::Fusion,
    profile::ContentProfile,
    similarity::{find_similar_tastes, SimilarTastes},
    strategies,
};
use crate::db::RecoStore;
use crate::models::{
    listingmodel::Listing,
    recommendationmodel::Recommendation,
    usermodel::User,
};

pub const DEFAULT_POPULAR_WINDOW_DAYS: i64 = 30;

/// Everything one request reads, fetched once up front.
struct Snapshot {
    user: User,
    catalog: Vec<Listing>,
    favorites: Vec<Listing>,
    favorite_ids: HashSet<Uuid>,
    similar: SimilarTastes,
    interaction_scores: HashMap<Uuid, f64>,
}

/// Blends collaborative, content-based and preference-based scoring, topping
/// up with popular listings when those three come back short.
pub struct RecommendationService<S> {
    store: Arc<S>,
    popular_window: Duration,
}

impl<S: RecoStore> RecommendationService<S> {
    pub fn new(store: Arc<S>, popular_window_days: i64) -> Self {
        Self {
            store,
            popular_window: Duration::days(popular_window_days),
        }
    }

    pub async fn get_recommendations(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        self.get_recommendations_at(user_id, limit, Utc::now()).await
    }

    /// Same as `get_recommendations` with an explicit clock.
    pub async fn get_recommendations_at(
        &self,
        user_id: Uuid,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        if limit <= 0 {
            return Err(ServiceError::InvalidLimit(limit));
        }
        let limit = limit as usize;

        let snapshot = self.load_snapshot(user_id).await?;
        let today = now.date_naive();

        let mut fusion = Fusion::new();

        let collaborative = strategies::collaborative(
            &snapshot.similar,
            &snapshot.catalog,
            &snapshot.favorite_ids,
        );
        let collaborative_count = collaborative.len();
        fusion.merge(strategies::rank(collaborative, limit));

        let profile = ContentProfile::from_favorites(&snapshot.favorites);
        let content = strategies::content_based(
            profile.as_ref(),
            &snapshot.catalog,
            &snapshot.favorite_ids,
        );
        let content_count = content.len();
        fusion.merge(strategies::rank(content, limit));

        let preference = strategies::preference_based(
            &snapshot.user,
            &snapshot.catalog,
            &snapshot.favorite_ids,
            &snapshot.interaction_scores,
            today,
        );
        let preference_count = preference.len();
        fusion.merge(strategies::rank(preference, limit));

        tracing::debug!(
            "Recommendations for {}: collaborative={}, content={}, preference={}, fused={}",
            user_id,
            collaborative_count,
            content_count,
            preference_count,
            fusion.len()
        );

        if fusion.len() < limit {
            let wanted = limit - fusion.len();
            let popular_ids = self
                .store
                .get_popular_listing_ids(now - self.popular_window)
                .await?;

            let mut exclude = fusion.listing_ids();
            exclude.extend(snapshot.favorite_ids.iter().copied());

            let popular = strategies::popular(&popular_ids, &snapshot.catalog, &exclude, wanted);
            tracing::debug!(
                "Recommendations for {}: popularity fallback filled {} of {} open slots",
                user_id,
                popular.len(),
                wanted
            );
            fusion.merge(popular);
        }

        let listings: HashMap<Uuid, &Listing> =
            snapshot.catalog.iter().map(|l| (l.id, l)).collect();

        let recommendations: Vec<Recommendation> = fusion
            .into_ranked(limit)
            .into_iter()
            .filter_map(|fused| {
                listings.get(&fused.listing_id).map(|listing| Recommendation {
                    listing: (*listing).clone(),
                    recommendation_score: fused.score,
                    reason: fused.reason,
                    recommendation_type: fused.recommendation_type,
                })
            })
            .collect();

        tracing::info!(
            "Generated {} recommendations for user {} (limit {})",
            recommendations.len(),
            user_id,
            limit
        );

        Ok(recommendations)
    }

    async fn load_snapshot(&self, user_id: Uuid) -> Result<Snapshot, ServiceError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let catalog = self.store.get_listings().await?;
        let favorites = self.store.get_favorite_listings(user_id).await?;
        let favorite_ids = favorites.iter().map(|l| l.id).collect();
        let similar = find_similar_tastes(self.store.as_ref(), user_id).await?;
        let interaction_scores = self.store.get_interaction_scores_by_listing(user_id).await?;

        Ok(Snapshot {
            user,
            catalog,
            favorites,
            favorite_ids,
            similar,
            interaction_scores,
        })
    }
}
