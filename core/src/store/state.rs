// storefront/src/store/state.rs

//! Plain data held by the client store.

use crate::error::ErrorKind;
use crate::model::{CartItem, FavouriteItem};

/// Per-operation request status: `Idle -> Pending -> {Succeeded, Failed}`,
/// back to `Idle` once the UI acknowledges the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpStatus {
  #[default]
  Idle,
  Pending,
  Succeeded,
  Failed(ErrorKind),
}

impl OpStatus {
  pub fn is_loading(&self) -> bool {
    matches!(self, OpStatus::Pending)
  }

  pub fn error(&self) -> Option<ErrorKind> {
    match self {
      OpStatus::Failed(kind) => Some(*kind),
      _ => None,
    }
  }

  /// Returns a settled status to `Idle`. A pending request is left alone.
  pub fn acknowledge(&mut self) {
    if matches!(self, OpStatus::Succeeded | OpStatus::Failed(_)) {
      *self = OpStatus::Idle;
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
  pub items: Vec<CartItem>,
  pub add: OpStatus,
  pub remove: OpStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteState {
  pub items: Vec<FavouriteItem>,
  pub add: OpStatus,
  pub remove: OpStatus,
  pub clear: OpStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  pub is_logged: bool,
  pub email: Option<String>,
}

impl Session {
  /// The signed-in email, if any.
  pub fn email(&self) -> Option<&str> {
    if self.is_logged {
      self.email.as_deref()
    } else {
      None
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
  pub session: Session,
  pub cart: CartState,
  pub favourite: FavouriteState,
}

/// Names the status slot an action reports through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  CartAdd,
  CartRemove,
  FavouriteAdd,
  FavouriteRemove,
  FavouriteClear,
}

impl StoreState {
  pub fn status(&self, op: Operation) -> OpStatus {
    match op {
      Operation::CartAdd => self.cart.add,
      Operation::CartRemove => self.cart.remove,
      Operation::FavouriteAdd => self.favourite.add,
      Operation::FavouriteRemove => self.favourite.remove,
      Operation::FavouriteClear => self.favourite.clear,
    }
  }

  pub fn status_mut(&mut self, op: Operation) -> &mut OpStatus {
    match op {
      Operation::CartAdd => &mut self.cart.add,
      Operation::CartRemove => &mut self.cart.remove,
      Operation::FavouriteAdd => &mut self.favourite.add,
      Operation::FavouriteRemove => &mut self.favourite.remove,
      Operation::FavouriteClear => &mut self.favourite.clear,
    }
  }
}
