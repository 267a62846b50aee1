use serde::Deserialize;
use serde_json::json;

use crate::ai::gateway::{ChatGateway, CompletionRequest};
use crate::ai::prompt;
use crate::ai::reply::{self, SearchReply};
use crate::domain::listing::ListingStore;
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};

pub const CHAT_MESSAGE_MAX_CHARS: usize = 500;
pub const SEARCH_QUERY_MAX_CHARS: usize = 300;

const TEMPERATURE: f64 = 0.7;
const CHAT_MAX_TOKENS: u32 = 300;
const SEARCH_MAX_TOKENS: u32 = 400;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub query: String,
}

/// POST /api/v1/ai/chat/listing/{listing_id}
///
/// Validation runs before any store or gateway access; a gateway
/// failure propagates untouched (no retry).
pub fn chat_about_listing(
    store: &dyn ListingStore,
    gateway: &dyn ChatGateway,
    listing_id: i64,
    body: &ChatBody,
) -> ResultResp {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ServerError::BadRequest("Message is required.".into()));
    }
    if message.chars().count() > CHAT_MESSAGE_MAX_CHARS {
        return Err(ServerError::BadRequest(format!(
            "Message is too long, no more than {CHAT_MESSAGE_MAX_CHARS} characters allowed"
        )));
    }

    let listing = store
        .get_by_id(listing_id)?
        .ok_or_else(|| ServerError::NotFound("Listing not found".into()))?;

    let system = prompt::chat_system_prompt(&listing);
    let generated = gateway
        .complete(CompletionRequest {
            system: &system,
            user: message,
            temperature: TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        })
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    json_response(&json!({
        "message": generated,
        "listing_id": listing_id,
    }))
}

/// POST /api/v1/ai/search
///
/// The reply is interpreted best-effort: an unparsable reply becomes
/// the message itself with no recommendations. Ids that do not resolve
/// in the store are dropped silently.
pub fn search_listings(
    store: &dyn ListingStore,
    gateway: &dyn ChatGateway,
    body: &SearchBody,
) -> ResultResp {
    let query = body.query.trim();
    if query.is_empty() {
        return Err(ServerError::BadRequest("Query is required.".into()));
    }
    if query.chars().count() > SEARCH_QUERY_MAX_CHARS {
        return Err(ServerError::BadRequest(format!(
            "Query is too long, no more than {SEARCH_QUERY_MAX_CHARS} characters allowed"
        )));
    }

    let listings = store.get_all()?;
    if listings.is_empty() {
        return Err(ServerError::NotFound("No listings available".into()));
    }

    let system = prompt::search_system_prompt(&listings, query);
    let generated = gateway
        .complete(CompletionRequest {
            system: &system,
            user: query,
            temperature: TEMPERATURE,
            max_tokens: SEARCH_MAX_TOKENS,
        })
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    let (message, property_ids) = match reply::interpret(&generated) {
        SearchReply::Parsed {
            message,
            property_ids,
        } => (message, property_ids),
        SearchReply::Unparsed { raw } => (raw, Vec::new()),
    };

    let mut recommended = Vec::new();
    for id in property_ids {
        if let Some(listing) = store.get_by_id(id)? {
            recommended.push(listing);
        }
    }

    json_response(&json!({
        "message": message,
        "recommended_listings": recommended,
    }))
}
