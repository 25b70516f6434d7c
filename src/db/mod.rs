use async_trait::async_trait;

#[cfg(test)]
pub mod memory;
pub mod pg;
pub mod repo_types;

pub use repo_types::{FavoriteRecipeRow, NewRecipe, RecipeRow};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Typed reads and writes over the `recipes` and `favorite_recipes` tables.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<RecipeRow, StoreError>;
    async fn list_recipes(&self) -> Result<Vec<RecipeRow>, StoreError>;
    async fn find_recipe(&self, id: i32) -> Result<Option<RecipeRow>, StoreError>;
    /// Replaces every writable column; a missing id is `StoreError::NotFound`.
    async fn update_recipe(&self, id: i32, recipe: NewRecipe) -> Result<RecipeRow, StoreError>;
    async fn delete_recipe(&self, id: i32) -> Result<(), StoreError>;

    async fn create_favorite(&self, recipe_id: i32) -> Result<FavoriteRecipeRow, StoreError>;
    async fn find_favorite(&self, recipe_id: i32)
        -> Result<Option<FavoriteRecipeRow>, StoreError>;
    /// Recipes that currently have a favorite marker, in favorite order.
    async fn list_favorite_recipes(&self) -> Result<Vec<RecipeRow>, StoreError>;
    async fn delete_favorite(&self, recipe_id: i32) -> Result<(), StoreError>;
}
