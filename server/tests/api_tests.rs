// tests/api_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use serde_json::{json, Value};

#[actix_rt::test]
async fn test_health() {
  let (state, _store) = test_state();
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_rt::test]
async fn test_signup_then_signin_returns_usable_token() {
  let (state, _store) = test_state();
  let app = test_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/auth/signup")
    .set_json(json!({ "email": "New.User@Example.com", "password": PASSWORD }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["success"], true);
  assert_eq!(body["data"]["email"], "new.user@example.com");
  assert!(body["data"].get("passwordHash").is_none());

  let req = test::TestRequest::post()
    .uri("/api/auth/signin")
    .set_json(json!({ "email": "new.user@example.com", "password": PASSWORD }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["email"], "new.user@example.com");
  let token = body["token"].as_str().expect("token").to_string();

  let req = test::TestRequest::get()
    .uri("/api/cart")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[actix_rt::test]
async fn test_signup_rejects_duplicates_and_bad_input() {
  let (state, _store) = test_state();
  signed_in_user(&state, JANE).await;
  let app = test_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/auth/signup")
    .set_json(json!({ "email": "JANE@example.com", "password": PASSWORD }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::post()
    .uri("/api/auth/signup")
    .set_json(json!({ "email": "not-an-email", "password": PASSWORD }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::post()
    .uri("/api/auth/signup")
    .set_json(json!({ "email": "long@example.com", "password": "this-password-is-far-too-long" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_signin_wrong_password_is_401() {
  let (state, _store) = test_state();
  signed_in_user(&state, JANE).await;
  let app = test_app!(state);

  for (email, password) in [(JANE, "wrong1"), ("nobody@example.com", PASSWORD)] {
    let req = test::TestRequest::post()
      .uri("/api/auth/signin")
      .set_json(json!({ "email": email, "password": password }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email or password.");
  }
}

#[actix_rt::test]
async fn test_signout_revokes_token() {
  let (state, _store) = test_state();
  let (_user_id, token) = signed_in_user(&state, JANE).await;
  let app = test_app!(state);

  let req = test::TestRequest::post()
    .uri("/api/auth/signout")
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/cart")
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_products_are_listed_by_title_and_fetched_by_id() {
  let (state, _store) = test_state();
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  let titles: Vec<&str> = body["data"]
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["title"].as_str().unwrap())
    .collect();
  let mut sorted = titles.clone();
  sorted.sort();
  assert_eq!(titles, sorted);
  assert_eq!(titles.len(), 6);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/p-101").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["data"]["title"], "Ceramic Pour-Over Set");
  assert_eq!(body["data"]["priceCents"], 4450);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/nope").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["success"], false);
  assert_eq!(body["code"], "not_found");
}
