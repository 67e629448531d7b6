use uuid::Uuid;

use crate::db::{interactiondb::InteractionExt, listingdb::FavoriteExt};

/// Users who favorited or clicked a listing the target user also favorited or
/// clicked, together with everything those users have favorited.
#[derive(Debug, Clone, Default)]
pub struct SimilarTastes {
    pub users: Vec<Uuid>,
    /// `(user_id, listing_id)` favorites of `users`.
    pub favorites: Vec<(Uuid, Uuid)>,
}

impl SimilarTastes {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

pub async fn find_similar_tastes<S>(store: &S, user_id: Uuid) -> Result<SimilarTastes, sqlx::Error>
where
    S: InteractionExt + FavoriteExt + ?Sized,
{
    let mut users = store.get_similar_users(user_id).await?;
    users.retain(|u| *u != user_id);
    users.dedup();

    if users.is_empty() {
        return Ok(SimilarTastes::default());
    }

    let favorites = store.get_favorite_pairs(&users).await?;
    tracing::debug!(
        "Similarity: user {} has {} similar users holding {} favorites",
        user_id,
        users.len(),
        favorites.len()
    );

    Ok(SimilarTastes { users, favorites })
}
