//! HTTP Handlers
//!
//! Every handler runs behind the bearer middleware; the owner is always
//! the authenticated caller.

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::{
    CreateItemUseCase, DeleteItemUseCase, GetItemUseCase, ListItemsUseCase, UpdateItemUseCase,
};
use crate::domain::repository::GroceryRepository;
use crate::error::GroceryResult;
use crate::presentation::dto::{CreateItemRequest, GroceryItemResponse, UpdateItemRequest};

/// Shared state for grocery handlers
pub struct GroceryAppState<G> {
    pub repo: Arc<G>,
}

impl<G> Clone for GroceryAppState<G> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /grocery
pub async fn create_item<G>(
    State(state): State<GroceryAppState<G>>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<CreateItemRequest>,
) -> GroceryResult<(StatusCode, Json<GroceryItemResponse>)>
where
    G: GroceryRepository + Send + Sync + 'static,
{
    let item = CreateItemUseCase::new(state.repo.clone())
        .execute(user.user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /grocery
pub async fn list_items<G>(
    State(state): State<GroceryAppState<G>>,
    user: AuthenticatedUser,
) -> GroceryResult<Json<Vec<GroceryItemResponse>>>
where
    G: GroceryRepository + Send + Sync + 'static,
{
    let items = ListItemsUseCase::new(state.repo.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /grocery/{id}
pub async fn get_item<G>(
    State(state): State<GroceryAppState<G>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> GroceryResult<Json<GroceryItemResponse>>
where
    G: GroceryRepository + Send + Sync + 'static,
{
    let item = GetItemUseCase::new(state.repo.clone())
        .execute(user.user_id, &id)
        .await?;

    Ok(Json(item.into()))
}

/// PATCH /grocery/{id}
pub async fn update_item<G>(
    State(state): State<GroceryAppState<G>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateItemRequest>,
) -> GroceryResult<Json<GroceryItemResponse>>
where
    G: GroceryRepository + Send + Sync + 'static,
{
    let item = UpdateItemUseCase::new(state.repo.clone())
        .execute(user.user_id, &id, req.into())
        .await?;

    Ok(Json(item.into()))
}

/// DELETE /grocery/{id}
pub async fn delete_item<G>(
    State(state): State<GroceryAppState<G>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> GroceryResult<StatusCode>
where
    G: GroceryRepository + Send + Sync + 'static,
{
    DeleteItemUseCase::new(state.repo.clone())
        .execute(user.user_id, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
