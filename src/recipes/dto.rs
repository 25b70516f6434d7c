use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// `amount` is free-form: clients send strings ("200 g") as well as bare numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: serde_json::Value,
}

/// Body of `POST /recipes` and `PUT /recipes/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub cooking_time: String,
    pub calories: String,
    #[serde(default)]
    pub image: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i32,
    pub name: String,
    pub cooking_time: String,
    pub calories: String,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}
