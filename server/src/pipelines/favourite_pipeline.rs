// storefront_server/src/pipelines/favourite_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::{FavouriteAction, FavouriteCtxData};
use storefront::{Flow, FlowControl, FlowRegistry, Shared, StepDef};
use tracing::debug;

pub fn register_favourite_flow(registry: &FlowRegistry<AppError>) {
  let mut flow = Flow::<FavouriteCtxData, AppError>::new(
    "favourites",
    [
      StepDef::required("check_product")
        .skip_if(|ctx: &Shared<FavouriteCtxData>| !matches!(ctx.read().action, FavouriteAction::Add(_))),
      StepDef::required("write_favourites"),
      StepDef::required("load_favourites"),
    ],
  );

  flow.on("check_product", |ctx_data: Shared<FavouriteCtxData>| {
    Box::pin(async move {
      let (action, catalog) = {
        let guard = ctx_data.read();
        (guard.action.clone(), guard.app_state.catalog.clone())
      };
      if let FavouriteAction::Add(product_id) = action {
        if catalog.find_product(&product_id).await?.is_none() {
          return Err(AppError::NotFound(format!("Product {} not found.", product_id)));
        }
      }
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  flow.on("write_favourites", |ctx_data: Shared<FavouriteCtxData>| {
    Box::pin(async move {
      let (user_id, action, users) = {
        let guard = ctx_data.read();
        (guard.session.user_id, guard.action.clone(), guard.app_state.users.clone())
      };
      match &action {
        FavouriteAction::Add(product_id) => users.add_favourite(user_id, product_id).await?,
        FavouriteAction::Remove(product_id) => users.remove_favourite(user_id, product_id).await?,
        FavouriteAction::Clear => users.clear_favourites(user_id).await?,
      }
      debug!(user_id = %user_id, ?action, "Favourites written.");
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  flow.on("load_favourites", |ctx_data: Shared<FavouriteCtxData>| {
    Box::pin(async move {
      let (user_id, users) = {
        let guard = ctx_data.read();
        (guard.session.user_id, guard.app_state.users.clone())
      };
      let favourites = users.favourites(user_id).await?;
      ctx_data.write().favourites = Some(favourites);
      Ok::<_, AppError>(FlowControl::Continue)
    })
  });

  registry.register(flow);
  tracing::info!("Favourites flow registered.");
}
