pub mod interactionmodel;
pub mod listingmodel;
pub mod recommendationmodel;
pub mod usermodel;
