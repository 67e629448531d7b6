pub mod cache;
pub mod db;
pub mod interactiondb;
pub mod listingdb;
pub mod userdb;

#[cfg(test)]
pub mod memory;

use self::{
    interactiondb::InteractionExt,
    listingdb::{FavoriteExt, ListingExt},
    userdb::UserExt,
};

/// Everything the recommendation services read or write.
pub trait RecoStore: UserExt + ListingExt + FavoriteExt + InteractionExt + Send + Sync {}

impl<T> RecoStore for T where T: UserExt + ListingExt + FavoriteExt + InteractionExt + Send + Sync {}
