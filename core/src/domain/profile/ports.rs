use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::entities::{DailyIntake, NutritionPlan, UserQuestionnaire},
};

/// Repository trait for user nutrition state reads
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn get_questionnaire(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<UserQuestionnaire>, CoreError>> + Send;

    fn get_nutrition_plan(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<NutritionPlan>, CoreError>> + Send;

    fn get_today_intake(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<DailyIntake, CoreError>> + Send;
}
