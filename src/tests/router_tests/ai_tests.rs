use astra::Body;
use http::{Method, Request};
use serde_json::json;

use crate::tests::utils::{
    body_json, create_authenticated_user, dispatch, init_test_db, insert_listing,
    FailingGateway, PanickingGateway, ScriptedGateway,
};

fn chat_request(listing_id: i64, token: &str, message: &str) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/ai/chat/listing/{listing_id}"))
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap()
}

fn search_request(token: &str, query: &str) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/ai/search")
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

#[test]
fn chat_requires_a_bearer_token() {
    let db = init_test_db();
    let listing_id = insert_listing(&db, "Bungalow", None);

    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/ai/chat/listing/{listing_id}"))
        .body(Body::from(json!({ "message": "hi" }).to_string()))
        .unwrap();

    let resp = dispatch(req, &db, &PanickingGateway);
    assert_eq!(resp.status(), 401);
}

#[test]
fn chat_rejects_empty_message_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Bungalow", None);

    let resp = dispatch(chat_request(listing_id, &token, "   "), &db, &PanickingGateway);

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Message is required.");
}

#[test]
fn chat_rejects_overlong_message_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Bungalow", None);

    let long = "x".repeat(501);
    let resp = dispatch(chat_request(listing_id, &token, &long), &db, &PanickingGateway);

    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["error"],
        "Message is too long, no more than 500 characters allowed"
    );
}

#[test]
fn chat_length_limit_is_checked_before_the_store() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");

    // Unknown listing AND an overlong message: validation wins.
    let long = "x".repeat(501);
    let resp = dispatch(chat_request(999, &token, &long), &db, &PanickingGateway);
    assert_eq!(resp.status(), 400);
}

#[test]
fn chat_unknown_listing_is_404_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");

    let resp = dispatch(chat_request(999, &token, "Tell me more"), &db, &PanickingGateway);

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Listing not found");
}

#[test]
fn chat_happy_path_echoes_listing_id() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Bungalow", None);

    let gateway = ScriptedGateway::replying("A lovely three-bed close to downtown.");
    let resp = dispatch(
        chat_request(listing_id, &token, "Tell me about this house"),
        &db,
        &gateway,
    );

    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["message"], "A lovely three-bed close to downtown.");
    assert_eq!(body["listing_id"], listing_id);
    assert_eq!(gateway.calls.get(), 1);
}

#[test]
fn chat_gateway_failure_is_a_502() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Bungalow", None);

    let resp = dispatch(chat_request(listing_id, &token, "hello"), &db, &FailingGateway);

    assert_eq!(resp.status(), 502);
    assert!(body_json(resp)["error"].as_str().unwrap().contains("gateway"));
}

#[test]
fn search_rejects_empty_query_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    insert_listing(&db, "Bungalow", None);

    let resp = dispatch(search_request(&token, ""), &db, &PanickingGateway);

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Query is required.");
}

#[test]
fn search_rejects_overlong_query_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    insert_listing(&db, "Bungalow", None);

    let long = "q".repeat(301);
    let resp = dispatch(search_request(&token, &long), &db, &PanickingGateway);

    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(resp)["error"],
        "Query is too long, no more than 300 characters allowed"
    );
}

#[test]
fn search_with_empty_catalog_is_404_without_calling_gateway() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");

    let resp = dispatch(search_request(&token, "anything cozy"), &db, &PanickingGateway);

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "No listings available");
}

#[test]
fn search_resolves_parsed_ids_and_drops_misses() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Bungalow", None);

    let reply = json!({ "message": "m", "property_ids": [listing_id, listing_id + 999] });
    let gateway = ScriptedGateway::replying(&reply.to_string());

    let resp = dispatch(search_request(&token, "a small house"), &db, &gateway);

    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["message"], "m");

    let recommended = body["recommended_listings"].as_array().unwrap();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0]["id"], listing_id);
    assert_eq!(recommended[0]["title"], "Bungalow");
    assert_eq!(gateway.calls.get(), 1);
}

#[test]
fn search_unparsable_reply_degrades_to_raw_message() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    insert_listing(&db, "Bungalow", None);

    let gateway = ScriptedGateway::replying("I could not narrow this down, sorry.");
    let resp = dispatch(search_request(&token, "castle with a moat"), &db, &gateway);

    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["message"], "I could not narrow this down, sorry.");
    assert_eq!(body["recommended_listings"].as_array().unwrap().len(), 0);
}

#[test]
fn search_gateway_failure_is_a_502() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    insert_listing(&db, "Bungalow", None);

    let resp = dispatch(search_request(&token, "anything"), &db, &FailingGateway);
    assert_eq!(resp.status(), 502);
}
