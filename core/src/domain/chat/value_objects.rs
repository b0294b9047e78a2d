use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::profile::entities::DailyIntake;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hebrew,
    English,
}

impl Language {
    pub fn is_hebrew(&self) -> bool {
        matches!(self, Language::Hebrew)
    }
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub response: String,
    /// None when the exchange could not be persisted.
    pub message_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct DailyGoals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// Snapshot of the user's nutritional state injected into the system prompt.
#[derive(Debug, Clone, Default)]
pub struct NutritionContext {
    pub daily_goals: Option<DailyGoals>,
    pub today_intake: DailyIntake,
    pub restrictions: Vec<String>,
    pub allergies: Vec<String>,
}
