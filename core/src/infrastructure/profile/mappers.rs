use crate::{
    domain::profile::entities::{NutritionPlan, UserQuestionnaire},
    entity::{nutrition_plans, user_questionnaires},
};

impl From<&user_questionnaires::Model> for UserQuestionnaire {
    fn from(model: &user_questionnaires::Model) -> Self {
        // Allergies are stored as a JSON array of strings; anything else in
        // the column is treated as no allergies.
        let allergies = model
            .allergies
            .as_ref()
            .and_then(|value| value.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: model.id,
            user_id: model.user_id,
            dietary_style: model.dietary_style.clone(),
            allergies,
            daily_food_budget: model.daily_food_budget,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<&nutrition_plans::Model> for NutritionPlan {
    fn from(model: &nutrition_plans::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            goal_calories: model.goal_calories,
            goal_protein_g: model.goal_protein_g,
            goal_carbs_g: model.goal_carbs_g,
            goal_fats_g: model.goal_fats_g,
            created_at: model.created_at.to_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn questionnaire_model(allergies: Option<serde_json::Value>) -> user_questionnaires::Model {
        user_questionnaires::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            dietary_style: Some("vegetarian".to_string()),
            allergies,
            daily_food_budget: Some(50.0),
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn maps_allergies_array() {
        let model = questionnaire_model(Some(serde_json::json!(["peanuts", "shellfish"])));
        let questionnaire = UserQuestionnaire::from(&model);
        assert_eq!(questionnaire.allergies, vec!["peanuts", "shellfish"]);
    }

    #[test]
    fn malformed_allergies_column_maps_to_empty() {
        let model = questionnaire_model(Some(serde_json::json!({"oops": true})));
        let questionnaire = UserQuestionnaire::from(&model);
        assert!(questionnaire.allergies.is_empty());

        let model = questionnaire_model(None);
        let questionnaire = UserQuestionnaire::from(&model);
        assert!(questionnaire.allergies.is_empty());
    }
}
