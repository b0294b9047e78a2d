use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        profile::{
            entities::{DailyIntake, NutritionPlan, UserQuestionnaire},
            ports::ProfileRepository,
        },
    },
    entity::{logged_meals, nutrition_plans, user_questionnaires},
};

#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pub db: DatabaseConnection,
}

impl PostgresProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProfileRepository for PostgresProfileRepository {
    async fn get_questionnaire(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserQuestionnaire>, CoreError> {
        let model = user_questionnaires::Entity::find()
            .filter(user_questionnaires::Column::UserId.eq(user_id))
            .order_by_desc(user_questionnaires::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get questionnaire: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.as_ref().map(UserQuestionnaire::from))
    }

    async fn get_nutrition_plan(&self, user_id: Uuid) -> Result<Option<NutritionPlan>, CoreError> {
        let model = nutrition_plans::Entity::find()
            .filter(nutrition_plans::Column::UserId.eq(user_id))
            .order_by_desc(nutrition_plans::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get nutrition plan: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.as_ref().map(NutritionPlan::from))
    }

    async fn get_today_intake(&self, user_id: Uuid) -> Result<DailyIntake, CoreError> {
        let start_of_day = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let end_of_day = start_of_day + Duration::days(1);

        let models = logged_meals::Entity::find()
            .filter(logged_meals::Column::UserId.eq(user_id))
            .filter(logged_meals::Column::CreatedAt.gte(start_of_day))
            .filter(logged_meals::Column::CreatedAt.lt(end_of_day))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get today's intake: {}", e);
                CoreError::InternalServerError
            })?;

        let mut intake = DailyIntake::default();
        for model in &models {
            intake.calories += model.calories.unwrap_or(0.0);
            intake.protein_g += model.protein_g.unwrap_or(0.0);
            intake.carbs_g += model.carbs_g.unwrap_or(0.0);
            intake.fats_g += model.fats_g.unwrap_or(0.0);
        }

        Ok(intake)
    }
}
