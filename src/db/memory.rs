//! In-process store used by the service tests.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    interactiondb::InteractionExt,
    listingdb::{FavoriteExt, ListingExt},
    userdb::UserExt,
};
use crate::models::{
    interactionmodel::{Interaction, InteractionType, NewInteraction},
    listingmodel::Listing,
    usermodel::User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    listings: Vec<Listing>,
    favorites: Vec<(Uuid, Uuid)>,
    interactions: Vec<Interaction>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_interactions: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, preferred_region: Option<&str>, max_budget: Option<f64>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.users.push(User {
            id,
            name: "tenant".to_string(),
            email: format!("{}@rentmap.test", id),
            preferred_region: preferred_region.map(str::to_string),
            max_budget,
            created_at: Some(Utc::now()),
        });
        id
    }

    /// Listings are returned in insertion order.
    pub async fn add_listing(&self, listing: Listing) -> Uuid {
        let id = listing.id;
        self.tables.write().await.listings.push(listing);
        id
    }

    pub async fn add_favorite(&self, user_id: Uuid, listing_id: Uuid) {
        let mut tables = self.tables.write().await;
        if !tables.favorites.contains(&(user_id, listing_id)) {
            tables.favorites.push((user_id, listing_id));
        }
    }

    /// Seeds an interaction with a chosen timestamp, bypassing uniqueness.
    pub async fn seed_interaction(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
        interaction_type: InteractionType,
        created_at: DateTime<Utc>,
    ) {
        self.tables.write().await.interactions.push(Interaction {
            id: Uuid::new_v4(),
            user_id,
            listing_id,
            interaction_type,
            search_query: None,
            interaction_score: interaction_type.default_score(),
            created_at,
        });
    }

    pub async fn user_email(&self, user_id: Uuid) -> Option<String> {
        let tables = self.tables.read().await;
        tables.users.iter().find(|u| u.id == user_id).map(|u| u.email.clone())
    }

    pub async fn interactions(&self) -> Vec<Interaction> {
        self.tables.read().await.interactions.clone()
    }

    /// Makes every interaction-table call fail, like a dropped pool.
    pub fn fail_interactions(&self, fail: bool) {
        self.fail_interactions.store(fail, Ordering::SeqCst);
    }

    fn check_interactions(&self) -> Result<(), sqlx::Error> {
        if self.fail_interactions.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }
}

#[async_trait]
impl ListingExt for MemoryStore {
    async fn get_listing(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.listings.iter().find(|l| l.id == listing_id).cloned())
    }

    async fn get_listings(&self) -> Result<Vec<Listing>, sqlx::Error> {
        Ok(self.tables.read().await.listings.clone())
    }

    async fn get_listings_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.listings.iter().filter(|l| l.owner_id == owner_id).cloned().collect())
    }
}

#[async_trait]
impl FavoriteExt for MemoryStore {
    async fn get_favorite_listings(&self, user_id: Uuid) -> Result<Vec<Listing>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, l)| tables.listings.iter().find(|listing| listing.id == *l).cloned())
            .collect())
    }

    async fn get_favorite_pairs(&self, user_ids: &[Uuid]) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|(u, _)| user_ids.contains(u))
            .copied()
            .collect())
    }
}

#[async_trait]
impl InteractionExt for MemoryStore {
    async fn save_interaction(
        &self,
        interaction: NewInteraction,
    ) -> Result<Option<Interaction>, sqlx::Error> {
        self.check_interactions()?;

        // Check and insert under one write lock.
        let mut tables = self.tables.write().await;
        let exists = tables.interactions.iter().any(|i| {
            i.user_id == interaction.user_id
                && i.listing_id == interaction.listing_id
                && i.interaction_type == interaction.interaction_type
        });
        if exists {
            return Ok(None);
        }

        let stored = Interaction {
            id: Uuid::new_v4(),
            user_id: interaction.user_id,
            listing_id: interaction.listing_id,
            interaction_type: interaction.interaction_type,
            search_query: interaction.search_query,
            interaction_score: interaction.interaction_score,
            created_at: Utc::now(),
        };
        tables.interactions.push(stored.clone());
        Ok(Some(stored))
    }

    async fn get_user_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Interaction>, sqlx::Error> {
        self.check_interactions()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Interaction> = tables
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn get_total_interaction_score(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
    ) -> Result<f64, sqlx::Error> {
        self.check_interactions()?;
        let tables = self.tables.read().await;
        Ok(tables
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id && i.listing_id == listing_id)
            .map(|i| i.interaction_score)
            .sum())
    }

    async fn get_interaction_scores_by_listing(
        &self,
        user_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, sqlx::Error> {
        self.check_interactions()?;
        let tables = self.tables.read().await;
        let mut totals = HashMap::new();
        for i in tables.interactions.iter().filter(|i| i.user_id == user_id) {
            *totals.entry(i.listing_id).or_insert(0.0) += i.interaction_score;
        }
        Ok(totals)
    }

    async fn get_popular_listing_ids(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
        self.check_interactions()?;
        let tables = self.tables.read().await;
        let mut counts: Vec<(Uuid, i64)> = Vec::new();
        for i in tables.interactions.iter().filter(|i| i.created_at >= since) {
            match counts.iter_mut().find(|(id, _)| *id == i.listing_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((i.listing_id, 1)),
            }
        }
        // Stable: equal counts keep first-appearance order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }

    async fn get_similar_users(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        self.check_interactions()?;
        let tables = self.tables.read().await;
        let strong_listings: HashSet<Uuid> = tables
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id && i.interaction_type.is_strong_signal())
            .map(|i| i.listing_id)
            .collect();

        let similar: BTreeSet<Uuid> = tables
            .interactions
            .iter()
            .filter(|i| {
                i.user_id != user_id
                    && i.interaction_type.is_strong_signal()
                    && strong_listings.contains(&i.listing_id)
            })
            .map(|i| i.user_id)
            .collect();

        Ok(similar.into_iter().collect())
    }

    async fn delete_interactions_for_listing(&self, listing_id: Uuid) -> Result<u64, sqlx::Error> {
        self.check_interactions()?;
        let mut tables = self.tables.write().await;
        let before = tables.interactions.len();
        tables.interactions.retain(|i| i.listing_id != listing_id);
        Ok((before - tables.interactions.len()) as u64)
    }
}
