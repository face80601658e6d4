// storefront/src/lib.rs

//! Storefront cart and favourites core.
//!
//!  - `model`: products, cart lines and favourites, with the list operations
//!    that keep one entry per product.
//!  - `membership`: is a product in the cart / favourites?
//!  - `store`: the client state container and its action dispatchers, synced
//!    to a `CartBackend` either by full snapshot or per line item.
//!  - `flow`: the async step engine every action runs through; the API server
//!    uses it for its request handlers too.
//!  - `credentials`: sign-in form rules.

pub mod credentials;
pub mod error;
pub mod flow;
pub mod membership;
pub mod model;
pub mod store;

pub use crate::credentials::{validate_credentials, Credentials};
pub use crate::error::{BackendError, ErrorKind, FlowError, FlowResult, StoreError, StoreResult};
pub use crate::flow::{Flow, FlowControl, FlowOutcome, FlowRegistry, Handler, Shared, StepDef};
pub use crate::membership::{membership, Membership};
pub use crate::model::{CartItem, FavouriteItem, Product, ProductId};
pub use crate::store::{ClientStore, MemoryBackend, OpStatus, Operation, SyncOptions, SyncStrategy, UpdateMode};
