// storefront_server/src/models/mod.rs

//! Database rows. The API speaks the `storefront` model types; these convert into them.

pub mod cart_item;
pub mod product;
pub mod user;

pub use cart_item::{CartLineRow, FavouriteRow};
pub use product::ProductRow;
pub use user::User;
