use serde::de::DeserializeOwned;
use tracing::warn;

use super::dto::{Ingredient, RecipeRequest, RecipeResponse};
use crate::db::{NewRecipe, RecipeRow};

/// Turns a request into storable columns. `ingredients` and `steps` become
/// JSON text and an empty `image` is stored as null.
pub fn encode_recipe(req: RecipeRequest) -> serde_json::Result<NewRecipe> {
    Ok(NewRecipe {
        ingredients: serde_json::to_string(&req.ingredients)?,
        steps: serde_json::to_string(&req.steps)?,
        name: req.name,
        cooking_time: req.cooking_time,
        calories: req.calories,
        image: req.image.filter(|s| !s.is_empty()),
    })
}

// Stored text that does not decode yields an empty list.
fn decode_list<T: DeserializeOwned>(recipe_id: i32, field: &'static str, raw: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(recipe_id, field, error = %e, "stored value is not valid JSON; using []");
            Vec::new()
        }
    }
}

pub fn decode_ingredients(recipe_id: i32, raw: &str) -> Vec<Ingredient> {
    decode_list(recipe_id, "ingredients", raw)
}

pub fn decode_steps(recipe_id: i32, raw: &str) -> Vec<String> {
    decode_list(recipe_id, "steps", raw)
}

impl From<RecipeRow> for RecipeResponse {
    fn from(r: RecipeRow) -> Self {
        Self {
            ingredients: decode_ingredients(r.id, &r.ingredients),
            steps: decode_steps(r.id, &r.steps),
            id: r.id,
            name: r.name,
            cooking_time: r.cooking_time,
            calories: r.calories,
            image: r.image,
            created_at: r.created_at,
        }
    }
}
