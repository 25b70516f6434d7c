use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{FavoriteRecipeRow, NewRecipe, RecipeRow, RecipeStore, StoreError};

/// In-process store with the same constraints as the Postgres schema:
/// one favorite per recipe, favorites must reference a recipe, and deleting
/// a recipe removes its favorite.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    recipes: Vec<RecipeRow>,
    favorites: Vec<FavoriteRecipeRow>,
    next_recipe_id: i32,
    next_favorite_id: i32,
}

impl MemoryStore {
    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<RecipeRow, StoreError> {
        let mut t = self.tables();
        t.next_recipe_id += 1;
        let row = RecipeRow {
            id: t.next_recipe_id,
            name: recipe.name,
            cooking_time: recipe.cooking_time,
            calories: recipe.calories,
            image: recipe.image,
            created_at: OffsetDateTime::now_utc(),
            ingredients: recipe.ingredients,
            steps: recipe.steps,
        };
        t.recipes.push(row.clone());
        Ok(row)
    }

    async fn list_recipes(&self) -> Result<Vec<RecipeRow>, StoreError> {
        Ok(self.tables().recipes.clone())
    }

    async fn find_recipe(&self, id: i32) -> Result<Option<RecipeRow>, StoreError> {
        Ok(self.tables().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn update_recipe(&self, id: i32, recipe: NewRecipe) -> Result<RecipeRow, StoreError> {
        let mut t = self.tables();
        let row = t
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                entity: "recipe",
                id,
            })?;
        row.name = recipe.name;
        row.cooking_time = recipe.cooking_time;
        row.calories = recipe.calories;
        row.image = recipe.image;
        row.ingredients = recipe.ingredients;
        row.steps = recipe.steps;
        Ok(row.clone())
    }

    async fn delete_recipe(&self, id: i32) -> Result<(), StoreError> {
        let mut t = self.tables();
        let before = t.recipes.len();
        t.recipes.retain(|r| r.id != id);
        if t.recipes.len() == before {
            return Err(StoreError::NotFound {
                entity: "recipe",
                id,
            });
        }
        t.favorites.retain(|f| f.recipe_id != id);
        Ok(())
    }

    async fn create_favorite(&self, recipe_id: i32) -> Result<FavoriteRecipeRow, StoreError> {
        let mut t = self.tables();
        if !t.recipes.iter().any(|r| r.id == recipe_id) {
            return Err(StoreError::NotFound {
                entity: "recipe",
                id: recipe_id,
            });
        }
        if t.favorites.iter().any(|f| f.recipe_id == recipe_id) {
            return Err(StoreError::Conflict("favorite_recipes_recipe_id_key".into()));
        }
        t.next_favorite_id += 1;
        let row = FavoriteRecipeRow {
            id: t.next_favorite_id,
            recipe_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.favorites.push(row.clone());
        Ok(row)
    }

    async fn find_favorite(
        &self,
        recipe_id: i32,
    ) -> Result<Option<FavoriteRecipeRow>, StoreError> {
        Ok(self
            .tables()
            .favorites
            .iter()
            .find(|f| f.recipe_id == recipe_id)
            .cloned())
    }

    async fn list_favorite_recipes(&self) -> Result<Vec<RecipeRow>, StoreError> {
        let t = self.tables();
        let rows = t
            .favorites
            .iter()
            .filter_map(|f| t.recipes.iter().find(|r| r.id == f.recipe_id).cloned())
            .collect();
        Ok(rows)
    }

    async fn delete_favorite(&self, recipe_id: i32) -> Result<(), StoreError> {
        let mut t = self.tables();
        let before = t.favorites.len();
        t.favorites.retain(|f| f.recipe_id != recipe_id);
        if t.favorites.len() == before {
            return Err(StoreError::NotFound {
                entity: "favorite",
                id: recipe_id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> NewRecipe {
        NewRecipe {
            name: name.into(),
            cooking_time: "10 min".into(),
            calories: "120".into(),
            image: None,
            ingredients: "[]".into(),
            steps: "[]".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryStore::default();
        let a = store.create_recipe(sample("a")).await.unwrap();
        let b = store.create_recipe(sample("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn second_favorite_for_same_recipe_conflicts() {
        let store = MemoryStore::default();
        let r = store.create_recipe(sample("a")).await.unwrap();
        store.create_favorite(r.id).await.unwrap();
        let err = store.create_favorite(r.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn recipe_delete_drops_its_favorite() {
        let store = MemoryStore::default();
        let r = store.create_recipe(sample("a")).await.unwrap();
        store.create_favorite(r.id).await.unwrap();
        store.delete_recipe(r.id).await.unwrap();
        assert!(store.find_favorite(r.id).await.unwrap().is_none());
    }
}
