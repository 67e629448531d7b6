use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "interaction_type", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionType {
    View,     // listing page opened
    Click,    // listing card clicked
    Favorite, // added to favorites
    Search,   // listing shown in search results
}

impl InteractionType {
    /// Score stored when the caller does not supply one.
    pub fn default_score(&self) -> f64 {
        match self {
            InteractionType::Favorite => 1.0,
            InteractionType::Click => 0.7,
            InteractionType::View => 0.5,
            InteractionType::Search => 0.3,
        }
    }

    /// Kinds that count when looking for users with similar taste.
    pub fn is_strong_signal(&self) -> bool {
        matches!(self, InteractionType::Favorite | InteractionType::Click)
    }

    pub fn to_str(&self) -> &str {
        match self {
            InteractionType::View => "view",
            InteractionType::Click => "click",
            InteractionType::Favorite => "favorite",
            InteractionType::Search => "search",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(InteractionType::View),
            "click" => Ok(InteractionType::Click),
            "favorite" => Ok(InteractionType::Favorite),
            "search" => Ok(InteractionType::Search),
            other => Err(format!("Unknown interaction type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub interaction_type: InteractionType,
    pub search_query: Option<String>,
    pub interaction_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Interaction about to be written. The score is resolved here so every store
/// persists the same value for the same input.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub interaction_type: InteractionType,
    pub search_query: Option<String>,
    pub interaction_score: f64,
}

impl NewInteraction {
    pub fn new(
        user_id: Uuid,
        listing_id: Uuid,
        interaction_type: InteractionType,
        search_query: Option<String>,
        score: Option<f64>,
    ) -> Self {
        let interaction_score = match score {
            Some(s) if (0.0..=1.0).contains(&s) => s,
            Some(s) => {
                tracing::warn!(
                    "Interaction score {} for user {} on listing {} is outside [0, 1]; clamping",
                    s, user_id, listing_id
                );
                if s.is_nan() { interaction_type.default_score() } else { s.clamp(0.0, 1.0) }
            }
            None => interaction_type.default_score(),
        };

        Self {
            user_id,
            listing_id,
            interaction_type,
            search_query,
            interaction_score,
        }
    }
}
