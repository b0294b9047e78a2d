use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        menu::{
            entities::{Ingredient, MacroTotals, Meal, MealFeedback, Menu},
            ports::MenuRepository,
        },
    },
    entity::{
        meal_feedback::{ActiveModel as FeedbackActiveModel, Entity as FeedbackEntity},
        meal_ingredients::{Column as IngredientColumn, Entity as IngredientEntity},
        menu_meals::{Column as MealColumn, Entity as MealEntity},
        recommended_menus::{ActiveModel, Column, Entity},
    },
    infrastructure::menu::mappers::{ingredient_active_model, meal_active_model, menu_active_model},
};

#[derive(Debug, Clone)]
pub struct PostgresMenuRepository {
    pub db: DatabaseConnection,
}

impl PostgresMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_meals(&self, menu_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Meal>>, CoreError> {
        if menu_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let meal_models = MealEntity::find()
            .filter(MealColumn::MenuId.is_in(menu_ids.to_vec()))
            .order_by(MealColumn::DayNumber, Order::Asc)
            .order_by(MealColumn::CreatedAt, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load menu meals: {}", e);
                CoreError::InternalServerError
            })?;

        let meal_ids: Vec<Uuid> = meal_models.iter().map(|m| m.id).collect();
        let ingredient_models = if meal_ids.is_empty() {
            Vec::new()
        } else {
            IngredientEntity::find()
                .filter(IngredientColumn::MealId.is_in(meal_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to load meal ingredients: {}", e);
                    CoreError::InternalServerError
                })?
        };

        let mut ingredients_by_meal: HashMap<Uuid, Vec<Ingredient>> = HashMap::new();
        for model in &ingredient_models {
            ingredients_by_meal
                .entry(model.meal_id)
                .or_default()
                .push(Ingredient::from(model));
        }

        let mut meals_by_menu: HashMap<Uuid, Vec<Meal>> = HashMap::new();
        for model in &meal_models {
            let mut meal = Meal::from(model);
            meal.ingredients = ingredients_by_meal.remove(&meal.id).unwrap_or_default();
            meals_by_menu.entry(model.menu_id).or_default().push(meal);
        }

        Ok(meals_by_menu)
    }
}

impl MenuRepository for PostgresMenuRepository {
    async fn create_menu(&self, menu: Menu) -> Result<Menu, CoreError> {
        let menu_model = menu_active_model(&menu);
        let meal_models: Vec<_> = menu.meals.iter().map(meal_active_model).collect();
        let ingredient_models: Vec<_> = menu
            .meals
            .iter()
            .flat_map(|m| m.ingredients.iter().map(ingredient_active_model))
            .collect();

        // All-or-nothing: a caller must never observe a partially written menu.
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    Entity::insert(menu_model).exec(txn).await?;
                    if !meal_models.is_empty() {
                        MealEntity::insert_many(meal_models).exec(txn).await?;
                    }
                    if !ingredient_models.is_empty() {
                        IngredientEntity::insert_many(ingredient_models)
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                error!("Failed to create menu: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(menu)
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Menu>, CoreError> {
        let menu_models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get menus: {}", e);
                CoreError::InternalServerError
            })?;

        let menu_ids: Vec<Uuid> = menu_models.iter().map(|m| m.id).collect();
        let mut meals_by_menu = self.load_meals(&menu_ids).await?;

        Ok(menu_models
            .iter()
            .map(|model| {
                let mut menu = Menu::from(model);
                menu.meals = meals_by_menu.remove(&menu.id).unwrap_or_default();
                menu
            })
            .collect())
    }

    async fn get_by_id(&self, menu_id: Uuid, user_id: Uuid) -> Result<Option<Menu>, CoreError> {
        let menu_model = Entity::find()
            .filter(Column::Id.eq(menu_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get menu: {}", e);
                CoreError::InternalServerError
            })?;

        let Some(menu_model) = menu_model else {
            return Ok(None);
        };

        let mut meals_by_menu = self.load_meals(&[menu_model.id]).await?;
        let mut menu = Menu::from(&menu_model);
        menu.meals = meals_by_menu.remove(&menu.id).unwrap_or_default();

        Ok(Some(menu))
    }

    async fn update_meal_content(&self, meal: Meal) -> Result<Meal, CoreError> {
        let meal_model = meal_active_model(&meal);
        let ingredient_models: Vec<_> =
            meal.ingredients.iter().map(ingredient_active_model).collect();
        let meal_id = meal.id;

        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    MealEntity::update(meal_model).exec(txn).await?;
                    IngredientEntity::delete_many()
                        .filter(IngredientColumn::MealId.eq(meal_id))
                        .exec(txn)
                        .await?;
                    if !ingredient_models.is_empty() {
                        IngredientEntity::insert_many(ingredient_models)
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                error!("Failed to update meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(meal)
    }

    async fn update_menu_totals(
        &self,
        menu_id: Uuid,
        totals: MacroTotals,
        estimated_cost: f64,
    ) -> Result<(), CoreError> {
        let model = ActiveModel {
            id: Set(menu_id),
            total_calories: Set(totals.calories),
            total_protein_g: Set(totals.protein_g),
            total_carbs_g: Set(totals.carbs_g),
            total_fats_g: Set(totals.fats_g),
            total_fiber_g: Set(totals.fiber_g),
            estimated_cost: Set(estimated_cost),
            ..Default::default()
        };

        Entity::update(model).exec(&self.db).await.map_err(|e| {
            error!("Failed to update menu totals: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }

    async fn set_meal_favorite(&self, meal_id: Uuid, is_favorite: bool) -> Result<(), CoreError> {
        let model = crate::entity::menu_meals::ActiveModel {
            id: Set(meal_id),
            is_favorite: Set(is_favorite),
            ..Default::default()
        };

        MealEntity::update(model).exec(&self.db).await.map_err(|e| {
            error!("Failed to update meal favorite: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }

    async fn add_meal_feedback(&self, feedback: MealFeedback) -> Result<(), CoreError> {
        let model = FeedbackActiveModel {
            id: Set(feedback.id),
            meal_id: Set(feedback.meal_id),
            user_id: Set(feedback.user_id),
            liked: Set(feedback.liked),
            created_at: Set(feedback.created_at.fixed_offset()),
        };

        FeedbackEntity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to record meal feedback: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn set_menu_started(&self, menu_id: Uuid, date: NaiveDate) -> Result<(), CoreError> {
        let model = ActiveModel {
            id: Set(menu_id),
            started_on: Set(Some(date)),
            ..Default::default()
        };

        Entity::update(model).exec(&self.db).await.map_err(|e| {
            error!("Failed to start menu: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }
}
