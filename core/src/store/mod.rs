// storefront/src/store/mod.rs

//! Client-side cart and favourite state.
//!
//! A `ClientStore` is created by the application shell and handed to whatever
//! needs it; there is no global instance. Reads are synchronous snapshots,
//! actions are async and run through a registered flow per operation.

pub mod backend;
pub mod flows;
pub mod ops;
pub mod state;

pub use backend::{CartBackend, MemoryBackend};
pub use ops::{AddFavourite, AddToCart, ClearFavourites, ListOp, RemoveFavourite, RemoveFromCart};
pub use state::{CartState, FavouriteState, OpStatus, Operation, Session, StoreState};

use crate::error::{StoreError, StoreResult};
use crate::flow::{FlowOutcome, FlowRegistry, Shared};
use crate::membership::{membership, Membership};
use crate::model::{cart, CartItem, FavouriteItem, ProductId};
use flows::{build_mutation_flow, MutationCtx};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// When local state changes relative to the backend call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateMode {
  /// Apply locally first; undo that change if the backend fails.
  #[default]
  Optimistic,
  /// Apply locally only once the backend has accepted the change.
  Pessimistic,
}

/// How cart changes reach the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStrategy {
  /// Send the whole cart on every change (`PATCH /api/cart`). Two clients
  /// writing from stale snapshots race; the last write wins.
  Snapshot,
  /// Send an idempotent upsert/delete for the one product that changed.
  #[default]
  LineItem,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
  pub mode: UpdateMode,
  pub strategy: SyncStrategy,
}

/// Cart count shown on the navbar badge is capped at this value.
pub const BADGE_CAP: u64 = 99;

pub struct ClientStore {
  state: Shared<StoreState>,
  backend: Arc<dyn CartBackend>,
  options: SyncOptions,
  flows: Arc<FlowRegistry<StoreError>>,
}

impl ClientStore {
  pub fn new(backend: Arc<dyn CartBackend>, options: SyncOptions) -> Self {
    let flows = FlowRegistry::<StoreError>::new();
    flows.register(build_mutation_flow::<AddToCart>());
    flows.register(build_mutation_flow::<RemoveFromCart>());
    flows.register(build_mutation_flow::<AddFavourite>());
    flows.register(build_mutation_flow::<RemoveFavourite>());
    flows.register(build_mutation_flow::<ClearFavourites>());
    info!(?options, "Client store ready.");

    Self {
      state: Shared::new(StoreState::default()),
      backend,
      options,
      flows: Arc::new(flows),
    }
  }

  pub fn options(&self) -> SyncOptions {
    self.options
  }

  /// Handle onto the live state, for views that want to read it directly.
  pub fn state(&self) -> Shared<StoreState> {
    self.state.clone()
  }

  pub fn snapshot(&self) -> StoreState {
    self.state.read().clone()
  }

  // --- Session ---

  /// Marks `email` as signed in and loads its persisted cart and favourites.
  #[instrument(name = "ClientStore::sign_in", skip(self), err(Display))]
  pub async fn sign_in(&self, email: &str) -> StoreResult<()> {
    let cart_items = self.backend.fetch_cart(email).await?;
    let favourites = self.backend.fetch_favourites(email).await?;
    if let Err(violation) = cart::validate_snapshot(&cart_items) {
      warn!(%violation, "Persisted cart breaks an invariant; loading it anyway.");
    }
    self.state.update(|state| {
      state.session = Session {
        is_logged: true,
        email: Some(email.to_string()),
      };
      state.cart = CartState {
        items: cart_items,
        ..CartState::default()
      };
      state.favourite = FavouriteState {
        items: favourites,
        ..FavouriteState::default()
      };
    });
    Ok(())
  }

  /// Forgets the session and both lists.
  pub fn sign_out(&self) {
    self.state.update(|state| *state = StoreState::default());
  }

  pub fn is_logged(&self) -> bool {
    self.state.read().session.is_logged
  }

  // --- Reads ---

  pub fn membership(&self, product_id: &ProductId) -> Membership {
    let state = self.state.read();
    membership(product_id, &state.cart.items, &state.favourite.items)
  }

  pub fn cart_items(&self) -> Vec<CartItem> {
    self.state.read().cart.items.clone()
  }

  pub fn favourite_items(&self) -> Vec<FavouriteItem> {
    self.state.read().favourite.items.clone()
  }

  /// Sum of quantities across the cart.
  pub fn cart_count(&self) -> u64 {
    cart::total_quantity(&self.state.read().cart.items)
  }

  /// Navbar badge text: nothing for an empty cart, `"99+"` from 99 up.
  pub fn cart_badge(&self) -> Option<String> {
    match self.cart_count() {
      0 => None,
      n if n >= BADGE_CAP => Some(format!("{}+", BADGE_CAP)),
      n => Some(n.to_string()),
    }
  }

  pub fn favourite_count(&self) -> usize {
    self.state.read().favourite.items.len()
  }

  pub fn status(&self, op: Operation) -> OpStatus {
    self.state.read().status(op)
  }

  pub fn acknowledge(&self, op: Operation) {
    self.state.update(|state| state.status_mut(op).acknowledge());
  }

  // --- Actions ---

  /// Adds `qty` of a product. Adding a product already in the cart changes
  /// nothing and reports `FlowOutcome::Stopped`.
  #[instrument(name = "ClientStore::add_to_cart", skip(self, product_id), fields(product_id = %product_id))]
  pub async fn add_to_cart(&self, product_id: ProductId, qty: u32) -> StoreResult<FlowOutcome> {
    self
      .dispatch(AddToCart {
        item: CartItem { product_id, qty },
      })
      .await
  }

  /// Removes a product's line. Removing an absent product is a no-op.
  #[instrument(name = "ClientStore::remove_from_cart", skip(self, product_id), fields(product_id = %product_id))]
  pub async fn remove_from_cart(&self, product_id: ProductId) -> StoreResult<FlowOutcome> {
    self.dispatch(RemoveFromCart { product_id }).await
  }

  /// Product-card button: remove when present, otherwise add one.
  pub async fn toggle_cart(&self, product_id: ProductId) -> StoreResult<FlowOutcome> {
    if self.membership(&product_id).in_cart {
      self.remove_from_cart(product_id).await
    } else {
      self.add_to_cart(product_id, 1).await
    }
  }

  #[instrument(name = "ClientStore::add_to_favourite", skip(self, product_id), fields(product_id = %product_id))]
  pub async fn add_to_favourite(&self, product_id: ProductId) -> StoreResult<FlowOutcome> {
    self.dispatch(AddFavourite { product_id }).await
  }

  #[instrument(name = "ClientStore::remove_from_favourite", skip(self, product_id), fields(product_id = %product_id))]
  pub async fn remove_from_favourite(&self, product_id: ProductId) -> StoreResult<FlowOutcome> {
    self.dispatch(RemoveFavourite { product_id }).await
  }

  pub async fn toggle_favourite(&self, product_id: ProductId) -> StoreResult<FlowOutcome> {
    if self.membership(&product_id).in_favourite {
      self.remove_from_favourite(product_id).await
    } else {
      self.add_to_favourite(product_id).await
    }
  }

  #[instrument(name = "ClientStore::clear_favourites", skip(self))]
  pub async fn clear_favourites(&self) -> StoreResult<FlowOutcome> {
    self.dispatch(ClearFavourites).await
  }

  async fn dispatch<Op: ListOp>(&self, op: Op) -> StoreResult<FlowOutcome> {
    let ctx = Shared::new(MutationCtx::new(
      self.state.clone(),
      self.backend.clone(),
      self.options,
      op,
    ));
    self.flows.run(ctx).await
  }
}
