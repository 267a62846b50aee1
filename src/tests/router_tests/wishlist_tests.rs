use astra::Body;
use http::{Method, Request};
use serde_json::json;

use crate::tests::utils::{
    body_json, create_authenticated_user, dispatch, init_test_db, insert_listing,
    PanickingGateway,
};

fn add_request(token: &str, listing_id: i64) -> astra::Request {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/wishlist")
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "listing_id": listing_id }).to_string()))
        .unwrap()
}

fn list_request(token: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri("/api/v1/wishlist")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[test]
fn add_list_remove_roundtrip() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Dream House", None);

    let resp = dispatch(add_request(&token, listing_id), &db, &PanickingGateway);
    assert_eq!(resp.status(), 201);

    let body = body_json(dispatch(list_request(&token), &db, &PanickingGateway));
    assert_eq!(body["count"], 1);
    assert_eq!(body["wishlist"][0]["title"], "Dream House");

    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/v1/wishlist/{listing_id}"))
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(dispatch(req, &db, &PanickingGateway).status(), 200);

    let body = body_json(dispatch(list_request(&token), &db, &PanickingGateway));
    assert_eq!(body["count"], 0);
}

#[test]
fn adding_twice_reports_already_wishlisted() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Dream House", None);

    assert_eq!(dispatch(add_request(&token, listing_id), &db, &PanickingGateway).status(), 201);

    let resp = dispatch(add_request(&token, listing_id), &db, &PanickingGateway);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["message"], "Listing already in wishlist");
}

#[test]
fn adding_unknown_listing_is_404() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");

    let resp = dispatch(add_request(&token, 777), &db, &PanickingGateway);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Listing not found");
}

#[test]
fn removing_absent_entry_is_404() {
    let db = init_test_db();
    let (_, token) = create_authenticated_user(&db, "buyer@example.com", "buyer");
    let listing_id = insert_listing(&db, "Dream House", None);

    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/v1/wishlist/{listing_id}"))
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let resp = dispatch(req, &db, &PanickingGateway);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Listing not in wishlist");
}

#[test]
fn wishlists_are_scoped_per_user() {
    let db = init_test_db();
    let (_, token_a) = create_authenticated_user(&db, "a@example.com", "usera");
    let (_, token_b) = create_authenticated_user(&db, "b@example.com", "userb");
    let listing_id = insert_listing(&db, "Dream House", None);

    dispatch(add_request(&token_a, listing_id), &db, &PanickingGateway);

    let body = body_json(dispatch(list_request(&token_b), &db, &PanickingGateway));
    assert_eq!(body["count"], 0);
}
