use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::listingmodel::Listing;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    Collaborative,
    ContentBased,
    PreferenceBased,
    Popular,
}

impl RecommendationType {
    /// Fixed reason vocabulary, one entry per strategy.
    pub fn reason(&self) -> &'static str {
        match self {
            RecommendationType::Collaborative => "recommended by users with similar taste",
            RecommendationType::ContentBased => "similar to listings you liked",
            RecommendationType::PreferenceBased => "matches your preferences",
            RecommendationType::Popular => "popular listing",
        }
    }
}

/// One strategy's opinion about one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredListing {
    pub listing_id: Uuid,
    pub score: f64,
    pub recommendation_type: RecommendationType,
}

impl ScoredListing {
    pub fn new(listing_id: Uuid, score: f64, recommendation_type: RecommendationType) -> Self {
        Self { listing_id, score, recommendation_type }
    }

    pub fn reason(&self) -> &'static str {
        self.recommendation_type.reason()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub listing: Listing,
    pub recommendation_score: f64,
    pub reason: String,
    pub recommendation_type: RecommendationType,
}
