use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    interactionmodel::Interaction,
    recommendationmodel::Recommendation,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationQueryDto {
    pub user_id: Uuid,
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RecordInteractionDto {
    pub user_id: Uuid,
    pub listing_id: Uuid,
    #[validate(length(min = 1, message = "Interaction type is required"))]
    pub interaction_type: String,
    #[validate(length(max = 500, message = "Search query must be at most 500 characters"))]
    pub search_query: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "Score must be between 0 and 1"))]
    pub score: Option<f64>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQueryDto {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationListResponseDto {
    pub status: String,
    pub results: usize,
    pub data: Vec<Recommendation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionListResponseDto {
    pub status: String,
    pub results: usize,
    pub data: Vec<Interaction>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_outside_bounds_is_rejected() {
        let mut query = RecommendationQueryDto { user_id: Uuid::new_v4(), limit: Some(0) };
        assert!(query.validate().is_err());

        query.limit = Some(51);
        assert!(query.validate().is_err());

        query.limit = None;
        assert!(query.validate().is_ok());
    }

    #[test]
    fn interaction_score_must_be_a_probability() {
        let body = RecordInteractionDto {
            user_id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            interaction_type: "click".into(),
            search_query: None,
            score: Some(1.5),
        };
        assert!(body.validate().is_err());

        let body = RecordInteractionDto { score: Some(0.4), ..body };
        assert!(body.validate().is_ok());
    }
}
