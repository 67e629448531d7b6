use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::recommendationmodel::{RecommendationType, ScoredListing};

pub const REASON_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq)]
pub struct FusedListing {
    pub listing_id: Uuid,
    pub score: f64,
    pub reason: String,
    /// Strategy that first produced the listing.
    pub recommendation_type: RecommendationType,
}

/// Running merge of strategy outputs, one entry per listing in first-seen order.
#[derive(Debug, Default)]
pub struct Fusion {
    entries: Vec<FusedListing>,
    positions: HashMap<Uuid, usize>,
}

impl Fusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listing seen for the first time is taken as is. A repeat averages
    /// its score with the existing one and appends its reason.
    pub fn merge(&mut self, scored: Vec<ScoredListing>) {
        for item in scored {
            match self.positions.get(&item.listing_id) {
                Some(&pos) => {
                    let entry = &mut self.entries[pos];
                    entry.score = ((entry.score + item.score) / 2.0).clamp(0.0, 1.0);
                    entry.reason.push_str(REASON_SEPARATOR);
                    entry.reason.push_str(item.reason());
                }
                None => {
                    self.positions.insert(item.listing_id, self.entries.len());
                    self.entries.push(FusedListing {
                        listing_id: item.listing_id,
                        score: item.score.clamp(0.0, 1.0),
                        reason: item.reason().to_string(),
                        recommendation_type: item.recommendation_type,
                    });
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn listing_ids(&self) -> HashSet<Uuid> {
        self.positions.keys().copied().collect()
    }

    /// Highest score first; ties stay in first-seen order.
    pub fn into_ranked(mut self, limit: usize) -> Vec<FusedListing> {
        self.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        self.entries.truncate(limit);
        self.entries
    }
}
