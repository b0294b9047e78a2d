use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::{MacroTotals, Meal, MealFeedback, Menu},
        value_objects::{GenerateMenuInput, ReplaceMealInput, ShoppingList},
    },
};

/// Repository trait for menu persistence
#[cfg_attr(test, mockall::automock)]
pub trait MenuRepository: Send + Sync {
    /// Persists the menu together with its meals and ingredients in one
    /// transaction. A caller must never observe a partially written menu.
    fn create_menu(&self, menu: Menu) -> impl Future<Output = Result<Menu, CoreError>> + Send;

    fn get_by_user(&self, user_id: Uuid)
    -> impl Future<Output = Result<Vec<Menu>, CoreError>> + Send;

    fn get_by_id(
        &self,
        menu_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<Menu>, CoreError>> + Send;

    /// Overwrites the meal row and its ingredient list in place.
    fn update_meal_content(
        &self,
        meal: Meal,
    ) -> impl Future<Output = Result<Meal, CoreError>> + Send;

    fn update_menu_totals(
        &self,
        menu_id: Uuid,
        totals: MacroTotals,
        estimated_cost: f64,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn set_meal_favorite(
        &self,
        meal_id: Uuid,
        is_favorite: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn add_meal_feedback(
        &self,
        feedback: MealFeedback,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn set_menu_started(
        &self,
        menu_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for menu generation and mutation business logic
#[cfg_attr(test, mockall::automock)]
pub trait MenuService: Send + Sync {
    fn generate_menu(
        &self,
        input: GenerateMenuInput,
    ) -> impl Future<Output = Result<Menu, CoreError>> + Send;

    fn get_user_menus(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Menu>, CoreError>> + Send;

    fn get_menu(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
    ) -> impl Future<Output = Result<Menu, CoreError>> + Send;

    fn replace_meal(
        &self,
        input: ReplaceMealInput,
    ) -> impl Future<Output = Result<Meal, CoreError>> + Send;

    /// Idempotent set of the favorite flag. Returns the applied state.
    fn favorite_meal(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
        meal_id: Uuid,
        is_favorite: bool,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn record_meal_feedback(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
        meal_id: Uuid,
        liked: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn shopping_list(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn start_menu_today(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
