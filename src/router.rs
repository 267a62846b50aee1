use astra::Request;
use serde::de::DeserializeOwned;
use std::io::Read;

use crate::ai::gateway::ChatGateway;
use crate::auth;
use crate::db::Database;
use crate::errors::ServerError;
use crate::handlers::{ai, auth as auth_handlers, listings, system, users, wishlist};
use crate::responses::ResultResp;

/// Dispatch one request. The SQLite handle and the chat gateway are
/// passed in explicitly; handlers never reach for globals.
pub fn handle(mut req: Request, db: &Database, gateway: &dyn ChatGateway) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().trim_matches('/').to_string();
    let segments: Vec<&str> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    };

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["ping"]) => system::ping(),
        ("GET", ["health"]) => system::health(db),
        ("GET", ["seed"]) => system::seed(db),

        ("POST", ["api", "v1", "auth", "register"]) => {
            let body = read_json_body(&mut req)?;
            auth_handlers::register(db, &body)
        }
        ("POST", ["api", "v1", "auth", "login"]) => {
            let body = read_json_body(&mut req)?;
            auth_handlers::login(db, &body)
        }
        ("POST", ["api", "v1", "auth", "logout"]) => {
            auth::require_user(&req, db)?;
            let token = auth::bearer_token(&req).ok_or(ServerError::InternalError)?;
            auth_handlers::logout(db, token)
        }

        ("GET", ["api", "v1", "users", "me"]) => {
            let user = auth::require_user(&req, db)?;
            users::me(db, &user)
        }

        ("GET", ["api", "v1", "listings"]) => listings::list(db),
        ("GET", ["api", "v1", "listings", id]) => listings::get(db, parse_id(id)?),
        ("POST", ["api", "v1", "listings"]) => {
            let user = auth::require_user(&req, db)?;
            let input = read_json_body(&mut req)?;
            listings::create(db, &user, &input)
        }
        ("PUT", ["api", "v1", "listings", id]) => {
            let user = auth::require_user(&req, db)?;
            let id = parse_id(id)?;
            let input = read_json_body(&mut req)?;
            listings::update(db, &user, id, &input)
        }
        ("DELETE", ["api", "v1", "listings", id]) => {
            let user = auth::require_user(&req, db)?;
            listings::delete(db, &user, parse_id(id)?)
        }

        ("GET", ["api", "v1", "wishlist"]) => {
            let user = auth::require_user(&req, db)?;
            wishlist::list(db, &user)
        }
        ("POST", ["api", "v1", "wishlist"]) => {
            let user = auth::require_user(&req, db)?;
            let body = read_json_body(&mut req)?;
            wishlist::add(db, &user, &body)
        }
        ("DELETE", ["api", "v1", "wishlist", listing_id]) => {
            let user = auth::require_user(&req, db)?;
            wishlist::remove(db, &user, parse_id(listing_id)?)
        }

        ("POST", ["api", "v1", "ai", "chat", "listing", id]) => {
            auth::require_user(&req, db)?;
            let listing_id = parse_id(id)?;
            let body: ai::ChatBody = read_json_body(&mut req)?;
            ai::chat_about_listing(db, gateway, listing_id, &body)
        }
        ("POST", ["api", "v1", "ai", "search"]) => {
            auth::require_user(&req, db)?;
            let body: ai::SearchBody = read_json_body(&mut req)?;
            ai::search_listings(db, gateway, &body)
        }

        _ => Err(ServerError::NotFound("Resource not found".into())),
    }
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .map_err(|_| ServerError::NotFound("Resource not found".into()))
}

fn read_json_body<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("unreadable request body: {e}")))?;

    if buf.trim().is_empty() {
        return Err(ServerError::BadRequest("JSON body is required.".into()));
    }

    serde_json::from_str(&buf)
        .map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}
