use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dietary onboarding questionnaire. Generation requires one; chat uses it
/// for restrictions and allergies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserQuestionnaire {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dietary_style: Option<String>,
    pub allergies: Vec<String>,
    pub daily_food_budget: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_calories: f64,
    pub goal_protein_g: f64,
    pub goal_carbs_g: f64,
    pub goal_fats_g: f64,
    pub created_at: DateTime<Utc>,
}

/// Macros consumed so far today, summed from the user's logged meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyIntake {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}
