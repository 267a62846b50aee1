use rusqlite::{params, Connection};

use crate::db::listings;
use crate::domain::listing::Listing;
use crate::errors::ServerError;

/// Returns false when the listing was already wishlisted.
pub fn add_item(
    conn: &Connection,
    user_id: i64,
    listing_id: i64,
    now: i64,
) -> Result<bool, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into wishlist_items (user_id, listing_id, created_at) values (?, ?, ?)",
            params![user_id, listing_id, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert wishlist item failed: {e}")))?;
    Ok(inserted == 1)
}

/// Returns false when there was nothing to remove.
pub fn remove_item(conn: &Connection, user_id: i64, listing_id: i64) -> Result<bool, ServerError> {
    let removed = conn
        .execute(
            "delete from wishlist_items where user_id = ? and listing_id = ?",
            params![user_id, listing_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete wishlist item failed: {e}")))?;
    Ok(removed == 1)
}

/// Wishlisted listings in the order they were added.
pub fn listings_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select l.id, l.title, l.price, l.property_type, l.bedrooms, l.bathrooms,
                   l.area_sqft, l.address, l.city, l.state, l.zip_code, l.description,
                   l.owner_id, l.created_at
            from wishlist_items w
            join listings l on l.id = w.listing_id
            where w.user_id = ?
            order by w.id
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare wishlist query failed: {e}")))?;

    let rows = stmt
        .query_map(params![user_id], listings::listing_from_row)
        .map_err(|e| ServerError::DbError(format!("query wishlist failed: {e}")))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(format!("read wishlist row failed: {e}")))?);
    }
    Ok(out)
}
