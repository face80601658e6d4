// storefront_server/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, cart_handlers, favourite_handlers, product_handlers};
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use tracing::warn;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies get the same `{ success: false, ... }` shape as every other error.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
    warn!(path = %req.path(), error = %err, "Rejected request body.");
    AppError::Validation("Malformed request body.".to_string()).into()
  })
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/signup", web::post().to(auth_handlers::signup_handler))
          .route("/signin", web::post().to(auth_handlers::signin_handler))
          .route("/signout", web::post().to(auth_handlers::signout_handler)),
      )
      .service(
        web::resource("/cart")
          .route(web::get().to(cart_handlers::get_cart_handler))
          .route(web::patch().to(cart_handlers::replace_cart_handler))
          .default_service(web::to(cart_handlers::unsupported_method_handler)),
      )
      .service(
        web::resource("/cart/items/{product_id}")
          .route(web::put().to(cart_handlers::put_cart_item_handler))
          .route(web::delete().to(cart_handlers::delete_cart_item_handler)),
      )
      .service(
        web::resource("/favourites")
          .route(web::get().to(favourite_handlers::get_favourites_handler))
          .route(web::delete().to(favourite_handlers::clear_favourites_handler)),
      )
      .service(
        web::resource("/favourites/{product_id}")
          .route(web::put().to(favourite_handlers::put_favourite_handler))
          .route(web::delete().to(favourite_handlers::delete_favourite_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      ),
  );
}
