use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::auth::{self, passwords};
use crate::db::{listings, users, Database};
use crate::domain::listing::ListingInput;
use crate::errors::ServerError;
use crate::responses::{json_response, json_with_status, ResultResp};

/// GET /ping
pub fn ping() -> ResultResp {
    json_response(&json!({ "status": "ok" }))
}

/// GET /health — verifies the database answers a trivial query.
pub fn health(db: &Database) -> ResultResp {
    let probe = db.with_conn(|conn| {
        conn.query_row("select 1", [], |r| r.get::<_, i64>(0))
            .map_err(|e| ServerError::DbError(format!("health probe failed: {e}")))
    });

    match probe {
        Ok(_) => json_response(&json!({ "status": "ok", "database": "connected" })),
        Err(e) => json_with_status(
            500,
            &json!({
                "status": "error",
                "database": "disconnected",
                "error": e.to_string(),
            }),
        ),
    }
}

const SEED_PASSWORD: &str = "homehaven123";

fn seed_listing(
    title: &str,
    price: f64,
    property_type: &str,
    bedrooms: i64,
    bathrooms: f64,
    area_sqft: f64,
    address: &str,
    city: &str,
    state: &str,
    zip_code: &str,
    description: &str,
) -> ListingInput {
    ListingInput {
        title: title.into(),
        price,
        property_type: property_type.into(),
        bedrooms,
        bathrooms,
        area_sqft,
        address: address.into(),
        city: city.into(),
        state: state.into(),
        zip_code: zip_code.into(),
        description: Some(description.into()),
    }
}

/// GET /seed — populate sample users and listings once; a second call
/// reports the existing user count instead of inserting again.
pub fn seed(db: &Database) -> ResultResp {
    let existing = db.with_conn(|conn| users::count_users(conn))?;
    if existing > 0 {
        return json_response(&json!({
            "message": "Database already seeded",
            "users": existing,
        }));
    }

    let now = auth::now_unix();
    let created = Utc::now().naive_utc();

    let sample_users = [
        ("admin@homehaven.com", "admin"),
        ("user1@homehaven.com", "user1"),
        ("user2@homehaven.com", "user2"),
    ];

    let sample_listings = [
        seed_listing(
            "Modern Downtown Condo",
            525_000.0,
            "Condo",
            2,
            2.0,
            1100.0,
            "400 W 5th St",
            "Austin",
            "TX",
            "78701",
            "Floor-to-ceiling windows, walkable to everything.",
        ),
        seed_listing(
            "Craftsman with Big Yard",
            689_000.0,
            "House",
            3,
            2.0,
            1850.0,
            "27 Alder Ave",
            "Portland",
            "OR",
            "97214",
            "Restored 1920s woodwork, detached studio out back.",
        ),
        seed_listing(
            "Lakefront Cabin",
            430_000.0,
            "Cabin",
            2,
            1.0,
            950.0,
            "8 Shoreline Rd",
            "Coeur d'Alene",
            "ID",
            "83814",
            "Private dock and wraparound deck.",
        ),
        seed_listing(
            "Family Home Near Schools",
            815_000.0,
            "House",
            4,
            3.0,
            2600.0,
            "1120 Maple Ct",
            "Naperville",
            "IL",
            "60540",
            "Cul-de-sac lot, finished basement, three-car garage.",
        ),
        seed_listing(
            "Starter Bungalow",
            289_000.0,
            "House",
            2,
            1.0,
            880.0,
            "63 Ivy St",
            "Tulsa",
            "OK",
            "74104",
            "Updated kitchen, new roof in 2023.",
        ),
    ];

    let (users_created, listings_created) = db.with_conn(|conn| {
        let mut owner_id = None;
        for (email, username) in &sample_users {
            let (salt, hash) = passwords::hash_password(SEED_PASSWORD);
            let user = users::create_user(conn, email, username, &hash, &salt, now)?;
            owner_id.get_or_insert(user.id);
        }

        for input in &sample_listings {
            listings::insert_listing(conn, input, owner_id, created)?;
        }

        Ok((sample_users.len(), sample_listings.len()))
    })?;

    info!(users_created, listings_created, "seeded database");

    json_response(&json!({
        "message": "Database seeded successfully",
        "users_created": users_created,
        "listings_created": listings_created,
    }))
}
