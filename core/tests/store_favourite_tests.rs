// tests/store_favourite_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::Arc;
use storefront::store::CartBackend;
use storefront::{ClientStore, ErrorKind, FavouriteItem, FlowOutcome, MemoryBackend, OpStatus, Operation, SyncOptions};

#[tokio::test]
#[serial]
async fn test_favourites_add_remove_are_persisted() {
  setup_tracing();
  let (store, backend) = signed_in_store(SyncOptions::default()).await;

  store.add_to_favourite(pid("p1")).await.unwrap();
  store.add_to_favourite(pid("p2")).await.unwrap();
  assert_eq!(store.favourite_count(), 2);
  assert_eq!(
    backend.favourites_of(EMAIL).unwrap(),
    vec![FavouriteItem::new("p1"), FavouriteItem::new("p2")]
  );

  store.remove_from_favourite(pid("p1")).await.unwrap();
  assert_eq!(store.favourite_items(), vec![FavouriteItem::new("p2")]);
  assert_eq!(backend.favourites_of(EMAIL).unwrap(), vec![FavouriteItem::new("p2")]);
  assert_eq!(store.status(Operation::FavouriteRemove), OpStatus::Succeeded);
}

#[tokio::test]
#[serial]
async fn test_favourite_add_is_unique() {
  setup_tracing();
  let (store, backend) = signed_in_store(SyncOptions::default()).await;
  store.add_to_favourite(pid("p1")).await.unwrap();
  let calls = backend.mutation_count();

  let outcome = store.add_to_favourite(pid("p1")).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Stopped);
  assert_eq!(store.favourite_count(), 1);
  assert_eq!(backend.mutation_count(), calls);
}

#[tokio::test]
#[serial]
async fn test_toggle_favourite_flips_membership() {
  setup_tracing();
  let (store, _backend) = signed_in_store(SyncOptions::default()).await;

  store.toggle_favourite(pid("p1")).await.unwrap();
  let m = store.membership(&pid("p1"));
  assert!(m.in_favourite);
  assert!(!m.in_cart);

  store.toggle_favourite(pid("p1")).await.unwrap();
  assert!(!store.membership(&pid("p1")).in_favourite);
}

#[tokio::test]
#[serial]
async fn test_clear_favourites() {
  setup_tracing();
  let (store, backend) = signed_in_store(SyncOptions::default()).await;
  store.add_to_favourite(pid("p1")).await.unwrap();
  store.add_to_favourite(pid("p2")).await.unwrap();

  assert_eq!(store.clear_favourites().await.unwrap(), FlowOutcome::Completed);

  assert_eq!(store.favourite_count(), 0);
  assert!(backend.favourites_of(EMAIL).unwrap().is_empty());
  assert_eq!(store.status(Operation::FavouriteClear), OpStatus::Succeeded);

  // Nothing left to clear: no request.
  let calls = backend.mutation_count();
  assert_eq!(store.clear_favourites().await.unwrap(), FlowOutcome::Stopped);
  assert_eq!(backend.mutation_count(), calls);
}

#[tokio::test]
#[serial]
async fn test_favourite_failure_restores_list() {
  setup_tracing();
  let (store, backend) = signed_in_store(SyncOptions::default()).await;
  store.add_to_favourite(pid("p1")).await.unwrap();

  backend.fail_with(Some(ErrorKind::Unavailable));
  assert!(store.clear_favourites().await.is_err());

  assert_eq!(store.favourite_items(), vec![FavouriteItem::new("p1")]);
  assert_eq!(store.status(Operation::FavouriteClear), OpStatus::Failed(ErrorKind::Unavailable));
  // Cart statuses are independent of favourite statuses.
  assert_eq!(store.status(Operation::CartAdd), OpStatus::Idle);
}

#[tokio::test]
#[serial]
async fn test_failed_favourite_add_keeps_concurrent_remove_and_clear() {
  setup_tracing();
  let inner = Arc::new(MemoryBackend::new());
  inner.register_user(EMAIL);
  inner.add_favourite(EMAIL, &pid("p1")).await.unwrap();
  let backend = Arc::new(FailingAddBackend::new(inner.clone()));
  let store = Arc::new(ClientStore::new(backend.clone(), SyncOptions::default()));
  store.sign_in(EMAIL).await.unwrap();

  let add = {
    let store = store.clone();
    tokio::spawn(async move { store.add_to_favourite(pid("p2")).await })
  };
  while !store.status(Operation::FavouriteAdd).is_loading() {
    tokio::task::yield_now().await;
  }

  store.remove_from_favourite(pid("p1")).await.unwrap();
  assert_eq!(store.favourite_items(), vec![FavouriteItem::new("p2")]);

  backend.release(1);
  assert!(add.await.unwrap().is_err());
  assert!(store.favourite_items().is_empty());
  assert!(inner.favourites_of(EMAIL).unwrap().is_empty());

  // Same again, with a clear landing while the add is in flight.
  inner.add_favourite(EMAIL, &pid("p3")).await.unwrap();
  store.sign_in(EMAIL).await.unwrap();
  let add = {
    let store = store.clone();
    tokio::spawn(async move { store.add_to_favourite(pid("p4")).await })
  };
  while !store.status(Operation::FavouriteAdd).is_loading() {
    tokio::task::yield_now().await;
  }

  store.clear_favourites().await.unwrap();
  backend.release(1);
  assert!(add.await.unwrap().is_err());
  assert!(store.favourite_items().is_empty());
  assert!(inner.favourites_of(EMAIL).unwrap().is_empty());
}
