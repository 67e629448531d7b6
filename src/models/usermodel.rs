use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Tenant-side view of a user. Only the explicit preferences matter to the
/// recommendation engine; the rest of the account lives with the auth service.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub preferred_region: Option<String>,
    pub max_budget: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}
