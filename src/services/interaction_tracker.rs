use std::sync::Arc;

use uuid::Uuid;

use super::error::ServiceError;
use crate::db::RecoStore;
use crate::models::interactionmodel::{Interaction, InteractionType, NewInteraction};

/// Entry point for browsing and favoriting flows. Recording never fails the
/// caller: every problem is logged and dropped.
pub struct InteractionTracker<S> {
    store: Arc<S>,
}

impl<S: RecoStore> InteractionTracker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
        interaction_type: InteractionType,
        search_query: Option<String>,
        score: Option<f64>,
    ) {
        let new = NewInteraction::new(user_id, listing_id, interaction_type, search_query, score);

        match self.try_record(new).await {
            Ok(Some(interaction)) => tracing::debug!(
                "Recorded {} interaction {} for user {} on listing {}",
                interaction.interaction_type,
                interaction.id,
                user_id,
                listing_id
            ),
            Ok(None) => tracing::debug!(
                "Interaction {} for user {} on listing {} already recorded",
                interaction_type,
                user_id,
                listing_id
            ),
            Err(e @ (ServiceError::UserNotFound(_) | ServiceError::ListingNotFound(_))) => {
                tracing::warn!("Skipping {} interaction: {}", interaction_type, e)
            }
            Err(e) => tracing::error!(
                "Failed to record {} interaction for user {} on listing {}: {}",
                interaction_type,
                user_id,
                listing_id,
                e
            ),
        }
    }

    pub async fn record_interaction_by_email(
        &self,
        email: &str,
        listing_id: Uuid,
        interaction_type: InteractionType,
        search_query: Option<String>,
    ) {
        match self.store.get_user_by_email(email).await {
            Ok(Some(user)) => {
                self.record_interaction(user.id, listing_id, interaction_type, search_query, None)
                    .await
            }
            Ok(None) => tracing::warn!("Skipping {} interaction: no user with email {}", interaction_type, email),
            Err(e) => tracing::error!("Failed to resolve user {} for interaction: {}", email, e),
        }
    }

    /// Most recent first.
    pub async fn get_user_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Interaction>, ServiceError> {
        if limit <= 0 {
            return Err(ServiceError::InvalidLimit(limit));
        }
        if self.store.get_user(user_id).await?.is_none() {
            return Err(ServiceError::UserNotFound(user_id));
        }
        Ok(self.store.get_user_interactions(user_id, limit).await?)
    }

    /// Drops every interaction on a listing that is being deleted.
    pub async fn remove_listing_interactions(&self, listing_id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.store.delete_interactions_for_listing(listing_id).await?;
        tracing::info!("Removed {} interactions for listing {}", removed, listing_id);
        Ok(removed)
    }

    async fn try_record(&self, new: NewInteraction) -> Result<Option<Interaction>, ServiceError> {
        if self.store.get_user(new.user_id).await?.is_none() {
            return Err(ServiceError::UserNotFound(new.user_id));
        }
        if self.store.get_listing(new.listing_id).await?.is_none() {
            return Err(ServiceError::ListingNotFound(new.listing_id));
        }
        Ok(self.store.save_interaction(new).await?)
    }
}
