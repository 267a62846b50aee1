pub mod listing;
pub mod user;

pub use listing::{Listing, ListingInput, ListingStore};
pub use user::User;
