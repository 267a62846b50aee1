pub mod connection;
pub mod listings;
pub mod users;
pub mod wishlist;

pub use connection::{init_db, Database};
