use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub recipe_id: i32,
}

#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}
