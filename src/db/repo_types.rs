use sqlx::FromRow;
use time::OffsetDateTime;

/// Recipe record as stored; `ingredients` and `steps` hold JSON text.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecipeRow {
    pub id: i32,
    pub name: String,
    pub cooking_time: String,
    pub calories: String,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
    pub ingredients: String,
    pub steps: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FavoriteRecipeRow {
    pub id: i32,
    pub recipe_id: i32, // unique, references recipes.id
    pub created_at: OffsetDateTime,
}

/// Column values for an insert or a full-row update.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub cooking_time: String,
    pub calories: String,
    pub image: Option<String>,
    pub ingredients: String,
    pub steps: String,
}
