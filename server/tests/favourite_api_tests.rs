// tests/favourite_api_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use serde_json::{json, Value};

#[actix_rt::test]
async fn test_favourites_round_trip() {
  let (state, _store) = test_state();
  let (_user_id, token) = signed_in_user(&state, JANE).await;
  let app = test_app!(state);

  for product in ["p-100", "p-102", "p-100"] {
    let req = test::TestRequest::put()
      .uri(&format!("/api/favourites/{}", product))
      .insert_header(bearer(&token))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
  }

  let req = test::TestRequest::get()
    .uri("/api/favourites")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(body["data"], json!([{ "productId": "p-100" }, { "productId": "p-102" }]));

  let req = test::TestRequest::delete()
    .uri("/api/favourites/p-100")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(body["data"], json!([{ "productId": "p-102" }]));

  let req = test::TestRequest::delete()
    .uri("/api/favourites")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
  assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[actix_rt::test]
async fn test_favourite_unknown_product_is_404() {
  let (state, _store) = test_state();
  let (_user_id, token) = signed_in_user(&state, JANE).await;
  let app = test_app!(state);

  let req = test::TestRequest::put()
    .uri("/api/favourites/ghost")
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  // Removing something that was never there is fine.
  let req = test::TestRequest::delete()
    .uri("/api/favourites/ghost")
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_favourites_require_token() {
  let (state, _store) = test_state();
  let app = test_app!(state);

  let req = test::TestRequest::get().uri("/api/favourites").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri("/api/favourites")
    .insert_header(bearer("made-up-token"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}
