use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::cache::CacheHelper,
    dtos::recommendationdtos::{
        HistoryQueryDto, InteractionListResponseDto, RecommendationListResponseDto,
        RecommendationQueryDto, RecordInteractionDto, Response,
    },
    error::HttpError,
    models::{interactionmodel::InteractionType, recommendationmodel::Recommendation},
    AppState,
};

pub fn recommendation_handler() -> Router {
    Router::new()
        .route("/", get(get_recommendations))
        .route("/interactions", post(record_interaction))
        .route("/interactions/:user_id", get(get_interaction_history))
        .route(
            "/listings/:listing_id/interactions",
            delete(remove_listing_interactions),
        )
}

pub async fn get_recommendations(
    Query(query): Query<RecommendationQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let limit = query.limit.unwrap_or(app_state.env.default_limit);
    let cache_key = CacheHelper::feed_key(query.user_id, limit);

    // Try cached feed first
    if let Some(redis) = &app_state.db_client.redis_client {
        if let Ok(Some(cached)) = CacheHelper::get::<Vec<Recommendation>>(redis, &cache_key).await {
            return Ok(Json(RecommendationListResponseDto {
                status: "success".to_string(),
                results: cached.len(),
                data: cached,
            }));
        }
    }

    let recommendations = app_state
        .recommendation_service
        .get_recommendations(query.user_id, limit)
        .await?;

    if let Some(redis) = &app_state.db_client.redis_client {
        if let Err(e) = CacheHelper::set(redis, &cache_key, &recommendations, app_state.env.feed_cache_ttl).await {
            tracing::warn!("Failed to cache recommendations for {}: {}", query.user_id, e);
        }
    }

    Ok(Json(RecommendationListResponseDto {
        status: "success".to_string(),
        results: recommendations.len(),
        data: recommendations,
    }))
}

pub async fn record_interaction(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RecordInteractionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let interaction_type = body
        .interaction_type
        .parse::<InteractionType>()
        .map_err(|e| HttpError::bad_request(e))?;

    app_state
        .interaction_tracker
        .record_interaction(
            body.user_id,
            body.listing_id,
            interaction_type,
            body.search_query,
            body.score,
        )
        .await;

    // Cached feeds for this user are stale now
    if let Some(redis) = &app_state.db_client.redis_client {
        if let Err(e) = CacheHelper::delete_pattern(redis, &CacheHelper::feed_pattern(body.user_id)).await {
            tracing::warn!("Failed to invalidate feed cache for {}: {}", body.user_id, e);
        }
    }

    Ok(Json(Response {
        status: "success",
        message: "Interaction recorded".to_string(),
    }))
}

pub async fn get_interaction_history(
    Path(user_id): Path<Uuid>,
    Query(query): Query<HistoryQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let interactions = app_state
        .interaction_tracker
        .get_user_interactions(user_id, query.limit.unwrap_or(20))
        .await?;

    Ok(Json(InteractionListResponseDto {
        status: "success".to_string(),
        results: interactions.len(),
        data: interactions,
    }))
}

pub async fn remove_listing_interactions(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .interaction_tracker
        .remove_listing_interactions(listing_id)
        .await?;

    Ok(Json(Response {
        status: "success",
        message: format!("Removed {} interactions", removed),
    }))
}
