use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::menu::entities::MealType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MealsPerDay {
    #[serde(rename = "3_main")]
    ThreeMain,
    #[serde(rename = "3_plus_2_snacks")]
    ThreePlusTwoSnacks,
    #[serde(rename = "2_plus_1_intermediate")]
    TwoPlusOneIntermediate,
}

impl MealsPerDay {
    /// Ordered slot pattern for one day.
    pub fn slots(&self) -> &'static [MealType] {
        match self {
            MealsPerDay::ThreeMain => &[MealType::Breakfast, MealType::Lunch, MealType::Dinner],
            MealsPerDay::ThreePlusTwoSnacks => &[
                MealType::Breakfast,
                MealType::Snack,
                MealType::Lunch,
                MealType::Snack,
                MealType::Dinner,
            ],
            MealsPerDay::TwoPlusOneIntermediate => &[
                MealType::Breakfast,
                MealType::Intermediate,
                MealType::Dinner,
            ],
        }
    }

    pub fn slots_per_day(&self) -> usize {
        self.slots().len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MealChangeFrequency {
    Daily,
    // rename_all would produce "every3_days"; the wire value keeps the
    // underscore before the digit.
    #[serde(rename = "every_3_days")]
    Every3Days,
    Weekly,
    Automatic,
}

impl MealChangeFrequency {
    /// How many consecutive days share the same meal line-up. Daily forces
    /// maximal variety; weekly and automatic favor repetition for shopping
    /// efficiency.
    pub fn block_days(&self) -> u32 {
        match self {
            MealChangeFrequency::Daily => 1,
            MealChangeFrequency::Every3Days => 3,
            MealChangeFrequency::Weekly => 7,
            MealChangeFrequency::Automatic => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateMenuInput {
    pub user_id: Uuid,
    pub days: i32,
    pub meals_per_day: MealsPerDay,
    pub meal_change_frequency: MealChangeFrequency,
    pub include_leftovers: bool,
    pub same_meal_times: bool,
    pub target_calories: Option<f64>,
    pub dietary_preferences: Option<Vec<String>>,
    pub excluded_ingredients: Option<Vec<String>>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ReplaceMealInput {
    pub user_id: Uuid,
    pub menu_id: Uuid,
    pub meal_id: Uuid,
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingList {
    pub total_estimated_cost: f64,
    /// Keyed by ingredient category; BTreeMap keeps the grouping
    /// deterministic across derivations.
    pub categories: BTreeMap<String, Vec<ShoppingItem>>,
}
