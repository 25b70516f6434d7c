use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;

use super::{FavoriteRecipeRow, NewRecipe, RecipeRow, RecipeStore, StoreError};
use crate::config::AppConfig;

const RECIPE_COLUMNS: &str =
    "id, name, cooking_time, calories, image, created_at, ingredients, steps";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps Postgres constraint failures onto `StoreError`; 23505 is a unique
/// violation, 23503 a foreign-key violation.
fn classify(err: sqlx::Error, recipe_id: i32) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Conflict(constraint);
            }
            Some("23503") => {
                return StoreError::NotFound {
                    entity: "recipe",
                    id: recipe_id,
                }
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<RecipeRow, StoreError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            INSERT INTO recipes (name, cooking_time, calories, image, ingredients, steps)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(&recipe.name)
        .bind(&recipe.cooking_time)
        .bind(&recipe.calories)
        .bind(&recipe.image)
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .fetch_one(&self.pool)
        .await?;
        debug!(recipe_id = row.id, "recipe inserted");
        Ok(row)
    }

    async fn list_recipes(&self) -> Result<Vec<RecipeRow>, StoreError> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_recipe(&self, id: i32) -> Result<Option<RecipeRow>, StoreError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_recipe(&self, id: i32, recipe: NewRecipe) -> Result<RecipeRow, StoreError> {
        sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            UPDATE recipes
               SET name = $2, cooking_time = $3, calories = $4, image = $5,
                   ingredients = $6, steps = $7
             WHERE id = $1
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&recipe.name)
        .bind(&recipe.cooking_time)
        .bind(&recipe.calories)
        .bind(&recipe.image)
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "recipe",
            id,
        })
    }

    async fn delete_recipe(&self, id: i32) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "recipe",
                id,
            });
        }
        Ok(())
    }

    async fn create_favorite(&self, recipe_id: i32) -> Result<FavoriteRecipeRow, StoreError> {
        sqlx::query_as::<_, FavoriteRecipeRow>(
            r#"
            INSERT INTO favorite_recipes (recipe_id)
            VALUES ($1)
            RETURNING id, recipe_id, created_at
            "#,
        )
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, recipe_id))
    }

    async fn find_favorite(
        &self,
        recipe_id: i32,
    ) -> Result<Option<FavoriteRecipeRow>, StoreError> {
        let row = sqlx::query_as::<_, FavoriteRecipeRow>(
            "SELECT id, recipe_id, created_at FROM favorite_recipes WHERE recipe_id = $1",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_favorite_recipes(&self) -> Result<Vec<RecipeRow>, StoreError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT r.id, r.name, r.cooking_time, r.calories, r.image, r.created_at,
                   r.ingredients, r.steps
              FROM favorite_recipes f
              JOIN recipes r ON r.id = f.recipe_id
             ORDER BY f.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_favorite(&self, recipe_id: i32) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM favorite_recipes WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "favorite",
                id: recipe_id,
            });
        }
        Ok(())
    }
}
