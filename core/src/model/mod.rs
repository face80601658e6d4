// storefront/src/model/mod.rs

//! Wire and state types shared by the client store and the API server.

pub mod cart;
pub mod favourite;
pub mod product;

pub use cart::{CartItem, CartViolation};
pub use favourite::FavouriteItem;
pub use product::{Product, ProductId};
