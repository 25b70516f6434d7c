use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{RecipeRequest, RecipeResponse};
use super::services::encode_recipe;
use crate::{error::ApiResult, state::AppState};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe).get(list_recipes))
        .route("/recipes/:id", put(update_recipe).delete(delete_recipe))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecipeResponse>)> {
    let Json(body) = payload?;
    let row = state.store.create_recipe(encode_recipe(body)?).await?;
    info!(recipe_id = row.id, "recipe created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let rows = state.store.list_recipes().await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<Json<RecipeResponse>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let row = state.store.update_recipe(id, encode_recipe(body)?).await?;
    info!(recipe_id = id, "recipe updated");
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store.delete_recipe(id).await?;
    info!(recipe_id = id, "recipe deleted");
    Ok(StatusCode::OK)
}
