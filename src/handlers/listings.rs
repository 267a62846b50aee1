use chrono::Utc;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db::{listings, Database};
use crate::domain::listing::ListingInput;
use crate::errors::ServerError;
use crate::responses::{created_response, json_response, ResultResp};

/// GET /api/v1/listings
pub fn list(db: &Database) -> ResultResp {
    let listings = db.with_conn(|conn| listings::list_listings(conn))?;
    json_response(&json!({
        "count": listings.len(),
        "listings": listings,
    }))
}

/// GET /api/v1/listings/{id}
pub fn get(db: &Database, id: i64) -> ResultResp {
    let listing = db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or_else(|| ServerError::NotFound("Listing not found".into()))?;
    json_response(&listing)
}

/// POST /api/v1/listings — the creator becomes the owner.
pub fn create(db: &Database, user: &AuthUser, input: &ListingInput) -> ResultResp {
    input.validate()?;

    let now = Utc::now().naive_utc();
    let listing =
        db.with_conn(|conn| listings::insert_listing(conn, input, Some(user.id), now))?;
    created_response(&listing)
}

/// PUT /api/v1/listings/{id} — owner only.
pub fn update(db: &Database, user: &AuthUser, id: i64, input: &ListingInput) -> ResultResp {
    input.validate()?;

    let listing = db.with_conn(|conn| {
        let existing = listings::get_listing(conn, id)?
            .ok_or_else(|| ServerError::NotFound("Listing not found".into()))?;
        if existing.owner_id != Some(user.id) {
            return Err(ServerError::Forbidden("You do not own this listing.".into()));
        }

        listings::update_listing(conn, id, input)?;
        listings::get_listing(conn, id)?.ok_or(ServerError::InternalError)
    })?;

    json_response(&listing)
}

/// DELETE /api/v1/listings/{id} — owner only.
pub fn delete(db: &Database, user: &AuthUser, id: i64) -> ResultResp {
    db.with_conn(|conn| {
        let existing = listings::get_listing(conn, id)?
            .ok_or_else(|| ServerError::NotFound("Listing not found".into()))?;
        if existing.owner_id != Some(user.id) {
            return Err(ServerError::Forbidden("You do not own this listing.".into()));
        }

        listings::delete_listing(conn, id)?;
        Ok(())
    })?;

    json_response(&json!({ "message": "Listing deleted" }))
}
