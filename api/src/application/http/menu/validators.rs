use nutriplan_core::domain::menu::value_objects::{MealChangeFrequency, MealsPerDay};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_days() -> i32 {
    7
}

fn default_meals_per_day() -> MealsPerDay {
    MealsPerDay::ThreeMain
}

fn default_frequency() -> MealChangeFrequency {
    MealChangeFrequency::Daily
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateMenuValidator {
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 30, message = "Days must be between 1 and 30"))]
    pub days: i32,

    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: MealsPerDay,

    #[serde(default = "default_frequency")]
    pub meal_change_frequency: MealChangeFrequency,

    #[serde(default)]
    pub include_leftovers: bool,

    #[serde(default = "default_true")]
    pub same_meal_times: bool,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "target_calories must be positive"))]
    pub target_calories: Option<f64>,

    #[serde(default)]
    pub dietary_preferences: Option<Vec<String>>,

    #[serde(default)]
    pub excluded_ingredients: Option<Vec<String>>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "budget must be positive"))]
    pub budget: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplaceMealValidator {
    pub meal_id: Uuid,

    #[serde(default)]
    pub preferences: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct FavoriteMealValidator {
    pub meal_id: Uuid,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct MealFeedbackValidator {
    pub meal_id: Uuid,
    pub liked: bool,
}
