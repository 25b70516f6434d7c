use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{AddFavoriteRequest, AddFavoriteResponse, FavoriteStatus};
use crate::{
    db::StoreError,
    error::{ApiError, ApiResult},
    recipes::dto::RecipeResponse,
    state::AppState,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", post(add_favorite).get(list_favorites))
        .route(
            "/favorites/:recipe_id",
            get(check_favorite).delete(remove_favorite),
        )
}

/// POST /favorites { recipeId }
///
/// The lookups give the 404/400 answers for the common case; the unique and
/// foreign-key constraints behind `create_favorite` settle concurrent adds.
#[instrument(skip(state, payload))]
pub async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AddFavoriteResponse>)> {
    let Json(AddFavoriteRequest { recipe_id }) = payload?;

    if state.store.find_recipe(recipe_id).await?.is_none() {
        warn!(recipe_id, "favorite for unknown recipe");
        return Err(ApiError::RecipeNotFound);
    }
    if state.store.find_favorite(recipe_id).await?.is_some() {
        warn!(recipe_id, "recipe already in favorites");
        return Err(ApiError::AlreadyFavorite);
    }

    match state.store.create_favorite(recipe_id).await {
        Ok(fav) => {
            info!(recipe_id, favorite_id = fav.id, "favorite added");
            Ok((StatusCode::CREATED, Json(AddFavoriteResponse { success: true })))
        }
        Err(StoreError::Conflict(constraint)) => {
            warn!(recipe_id, %constraint, "lost favorite race");
            Err(ApiError::AlreadyFavorite)
        }
        Err(StoreError::NotFound { entity: "recipe", .. }) => Err(ApiError::RecipeNotFound),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let rows = state.store.list_favorite_recipes().await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn check_favorite(
    State(state): State<AppState>,
    recipe_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<FavoriteStatus>> {
    let Path(recipe_id) = recipe_id?;
    let favorite = state.store.find_favorite(recipe_id).await?;
    Ok(Json(FavoriteStatus {
        is_favorite: favorite.is_some(),
    }))
}

#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    recipe_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(recipe_id) = recipe_id?;
    state.store.delete_favorite(recipe_id).await?;
    info!(recipe_id, "favorite removed");
    Ok(StatusCode::OK)
}
