use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::connection::Database;
use crate::domain::listing::{Listing, ListingInput, ListingStore};
use crate::errors::ServerError;

const LISTING_COLUMNS: &str = "id, title, price, property_type, bedrooms, bathrooms, \
     area_sqft, address, city, state, zip_code, description, owner_id, created_at";

pub(crate) fn listing_from_row(row: &Row) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        property_type: row.get(3)?,
        bedrooms: row.get(4)?,
        bathrooms: row.get(5)?,
        area_sqft: row.get(6)?,
        address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        zip_code: row.get(10)?,
        description: row.get(11)?,
        owner_id: row.get(12)?,
        created_at: row.get(13)?,
    })
}

pub fn get_listing(conn: &Connection, id: i64) -> Result<Option<Listing>, ServerError> {
    conn.query_row(
        &format!("select {LISTING_COLUMNS} from listings where id = ?"),
        params![id],
        listing_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

pub fn list_listings(conn: &Connection) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(&format!("select {LISTING_COLUMNS} from listings order by id"))
        .map_err(|e| ServerError::DbError(format!("prepare listings query failed: {e}")))?;

    let rows = stmt
        .query_map([], listing_from_row)
        .map_err(|e| ServerError::DbError(format!("query listings failed: {e}")))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(format!("read listing row failed: {e}")))?);
    }
    Ok(out)
}

pub fn count_listings(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from listings", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count listings failed: {e}")))
}

/// Insert and return the stored row (id assigned by SQLite).
pub fn insert_listing(
    conn: &Connection,
    input: &ListingInput,
    owner_id: Option<i64>,
    now: NaiveDateTime,
) -> Result<Listing, ServerError> {
    conn.execute(
        r#"
        insert into listings (
            title, price, property_type, bedrooms, bathrooms, area_sqft,
            address, city, state, zip_code, description, owner_id, created_at
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
        params![
            input.title.trim(),
            input.price,
            input.property_type,
            input.bedrooms,
            input.bathrooms,
            input.area_sqft,
            input.address,
            input.city,
            input.state,
            input.zip_code,
            input.description,
            owner_id,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;

    let id = conn.last_insert_rowid();
    get_listing(conn, id)?.ok_or(ServerError::InternalError)
}

/// Returns false when no row with that id exists.
pub fn update_listing(
    conn: &Connection,
    id: i64,
    input: &ListingInput,
) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            r#"
            update listings set
                title = ?1, price = ?2, property_type = ?3, bedrooms = ?4,
                bathrooms = ?5, area_sqft = ?6, address = ?7, city = ?8,
                state = ?9, zip_code = ?10, description = ?11
            where id = ?12
            "#,
            params![
                input.title.trim(),
                input.price,
                input.property_type,
                input.bedrooms,
                input.bathrooms,
                input.area_sqft,
                input.address,
                input.city,
                input.state,
                input.zip_code,
                input.description,
                id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update listing failed: {e}")))?;

    Ok(updated == 1)
}

pub fn delete_listing(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let deleted = conn
        .execute("delete from listings where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;
    Ok(deleted == 1)
}

impl ListingStore for Database {
    fn get_by_id(&self, id: i64) -> Result<Option<Listing>, ServerError> {
        self.with_conn(|conn| get_listing(conn, id))
    }

    fn get_all(&self) -> Result<Vec<Listing>, ServerError> {
        self.with_conn(|conn| list_listings(conn))
    }
}
