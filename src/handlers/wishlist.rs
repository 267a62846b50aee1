use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, AuthUser};
use crate::db::{listings, wishlist, Database};
use crate::errors::ServerError;
use crate::responses::{created_response, json_response, ResultResp};

#[derive(Debug, Deserialize)]
pub struct WishlistBody {
    pub listing_id: i64,
}

/// GET /api/v1/wishlist
pub fn list(db: &Database, user: &AuthUser) -> ResultResp {
    let items = db.with_conn(|conn| wishlist::listings_for_user(conn, user.id))?;
    json_response(&json!({
        "count": items.len(),
        "wishlist": items,
    }))
}

/// POST /api/v1/wishlist — the listing must exist.
pub fn add(db: &Database, user: &AuthUser, body: &WishlistBody) -> ResultResp {
    let now = auth::now_unix();

    let inserted = db.with_conn(|conn| {
        if listings::get_listing(conn, body.listing_id)?.is_none() {
            return Err(ServerError::NotFound("Listing not found".into()));
        }
        wishlist::add_item(conn, user.id, body.listing_id, now)
    })?;

    if inserted {
        created_response(&json!({ "message": "Listing added to wishlist" }))
    } else {
        json_response(&json!({ "message": "Listing already in wishlist" }))
    }
}

/// DELETE /api/v1/wishlist/{listing_id}
pub fn remove(db: &Database, user: &AuthUser, listing_id: i64) -> ResultResp {
    let removed = db.with_conn(|conn| wishlist::remove_item(conn, user.id, listing_id))?;
    if !removed {
        return Err(ServerError::NotFound("Listing not in wishlist".into()));
    }
    json_response(&json!({ "message": "Listing removed from wishlist" }))
}
