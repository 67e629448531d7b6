//! The four scoring strategies. Each one is a pure function over the request
//! snapshot and returns at most one entry per listing, never a listing the
//! user already favorited and never one missing from the catalog.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use super::{profile::ContentProfile, similarity::SimilarTastes};
use crate::models::{
    listingmodel::Listing,
    recommendationmodel::{RecommendationType, ScoredListing},
    usermodel::User,
};

const COLLABORATIVE_FAVORITE_WEIGHT: f64 = 0.8;

const CONTENT_REGION_WEIGHT: f64 = 0.30;
const CONTENT_TYPE_WEIGHT: f64 = 0.20;
const CONTENT_PRICE_CLOSE: f64 = 0.20;
const CONTENT_PRICE_NEAR: f64 = 0.10;
const CONTENT_AREA_CLOSE: f64 = 0.15;
const CONTENT_AREA_NEAR: f64 = 0.075;
const CONTENT_FEATURE_WEIGHT: f64 = 0.05;

const PREFERENCE_REGION_WEIGHT: f64 = 0.40;
const PREFERENCE_BUDGET_WEIGHT: f64 = 0.30;
const PREFERENCE_SOFT_BUDGET_WEIGHT: f64 = 0.10;
const PREFERENCE_SOFT_BUDGET_TOLERANCE: f64 = 0.10;
const PREFERENCE_AVAILABLE_WEIGHT: f64 = 0.20;
const PREFERENCE_HISTORY_SCALE: f64 = 0.1;
const PREFERENCE_HISTORY_CAP: f64 = 0.10;

pub const POPULAR_SCORE: f64 = 0.5;

/// Listings favorited by similar users, 0.8 per favorite, averaged over the
/// number of similar users.
pub fn collaborative(
    similar: &SimilarTastes,
    catalog: &[Listing],
    favorite_ids: &HashSet<Uuid>,
) -> Vec<ScoredListing> {
    if similar.is_empty() {
        return vec![];
    }

    let known: HashSet<Uuid> = catalog.iter().map(|l| l.id).collect();
    let mut order: Vec<Uuid> = Vec::new();
    let mut sums: HashMap<Uuid, f64> = HashMap::new();

    for (_, listing_id) in &similar.favorites {
        if favorite_ids.contains(listing_id) || !known.contains(listing_id) {
            continue;
        }
        let sum = sums.entry(*listing_id).or_insert_with(|| {
            order.push(*listing_id);
            0.0
        });
        *sum += COLLABORATIVE_FAVORITE_WEIGHT;
    }

    let similar_count = similar.users.len() as f64;
    order
        .into_iter()
        .map(|id| {
            let score = (sums[&id] / similar_count).min(1.0);
            ScoredListing::new(id, score, RecommendationType::Collaborative)
        })
        .collect()
}

/// Attribute similarity to the user's favorites.
pub fn content_based(
    profile: Option<&ContentProfile<'_>>,
    catalog: &[Listing],
    favorite_ids: &HashSet<Uuid>,
) -> Vec<ScoredListing> {
    let Some(profile) = profile else {
        return vec![];
    };

    catalog
        .iter()
        .filter(|l| !favorite_ids.contains(&l.id))
        .map(|listing| {
            let score = content_score(profile, listing).min(1.0);
            ScoredListing::new(listing.id, score, RecommendationType::ContentBased)
        })
        .collect()
}

fn content_score(profile: &ContentProfile<'_>, listing: &Listing) -> f64 {
    let mut score = 0.0;

    if same_region(&listing.region, &profile.region) {
        score += CONTENT_REGION_WEIGHT;
    }

    if let (Some(preferred), Some(kind)) = (&profile.listing_type, &listing.listing_type) {
        if preferred == kind {
            score += CONTENT_TYPE_WEIGHT;
        }
    }

    score += proximity_bonus(
        listing.price_value(),
        profile.mean_price,
        CONTENT_PRICE_CLOSE,
        CONTENT_PRICE_NEAR,
    );
    score += proximity_bonus(
        listing.area,
        profile.mean_area,
        CONTENT_AREA_CLOSE,
        CONTENT_AREA_NEAR,
    );

    for favorite in profile.favorites {
        score += listing.common_features(favorite) as f64 * CONTENT_FEATURE_WEIGHT;
    }

    score
}

/// `close` within 20% of the mean, `near` within 40%. A non-positive mean
/// carries no information.
fn proximity_bonus(value: f64, mean: f64, close: f64, near: f64) -> f64 {
    if mean <= 0.0 {
        return 0.0;
    }
    let diff = (value - mean).abs() / mean;
    if diff < 0.2 {
        close
    } else if diff < 0.4 {
        near
    } else {
        0.0
    }
}

/// Explicit preferences, availability and past engagement. Listings with no
/// signal at all are left out.
pub fn preference_based(
    user: &User,
    catalog: &[Listing],
    favorite_ids: &HashSet<Uuid>,
    interaction_scores: &HashMap<Uuid, f64>,
    today: NaiveDate,
) -> Vec<ScoredListing> {
    catalog
        .iter()
        .filter(|l| !favorite_ids.contains(&l.id))
        .filter_map(|listing| {
            let mut score = 0.0;

            if let Some(region) = &user.preferred_region {
                if same_region(&listing.region, region) {
                    score += PREFERENCE_REGION_WEIGHT;
                }
            }

            if let Some(budget) = user.max_budget {
                score += budget_bonus(listing.price_value(), budget);
            }

            if listing.is_available_on(today) {
                score += PREFERENCE_AVAILABLE_WEIGHT;
            }

            let history = interaction_scores.get(&listing.id).copied().unwrap_or(0.0);
            if history > 0.0 {
                score += (history * PREFERENCE_HISTORY_SCALE).min(PREFERENCE_HISTORY_CAP);
            }

            (score > 0.0).then(|| {
                ScoredListing::new(listing.id, score.min(1.0), RecommendationType::PreferenceBased)
            })
        })
        .collect()
}

/// Within budget, or failing that, less than 10% over it. Never both.
fn budget_bonus(price: f64, budget: f64) -> f64 {
    if price <= budget {
        PREFERENCE_BUDGET_WEIGHT
    } else if budget > 0.0 && (price - budget) / budget < PREFERENCE_SOFT_BUDGET_TOLERANCE {
        PREFERENCE_SOFT_BUDGET_WEIGHT
    } else {
        0.0
    }
}

/// Up to `wanted` listings at a flat score: busiest first, then the rest of
/// the catalog in catalog order. `exclude` holds favorites and listings
/// already recommended.
pub fn popular(
    popular_ids: &[(Uuid, i64)],
    catalog: &[Listing],
    exclude: &HashSet<Uuid>,
    wanted: usize,
) -> Vec<ScoredListing> {
    let known: HashSet<Uuid> = catalog.iter().map(|l| l.id).collect();
    let mut seen: HashSet<Uuid> = HashSet::new();

    popular_ids
        .iter()
        .map(|(id, _)| *id)
        .filter(|id| known.contains(id))
        .chain(catalog.iter().map(|l| l.id))
        .filter(|id| !exclude.contains(id) && seen.insert(*id))
        .take(wanted)
        .map(|id| ScoredListing::new(id, POPULAR_SCORE, RecommendationType::Popular))
        .collect()
}

/// Best first, equal scores keep their incoming order, at most `limit` kept.
pub fn rank(mut scored: Vec<ScoredListing>, limit: usize) -> Vec<ScoredListing> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

fn same_region(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
