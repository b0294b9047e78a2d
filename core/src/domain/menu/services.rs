use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    chat::ports::ChatRepository,
    common::{entities::app_errors::CoreError, ports::LlmClient, services::Service},
    menu::{
        entities::{Meal, MealFeedback, Menu, MenuConfig},
        helpers::{build_shopping_list, fill_slots, group_candidates},
        planner::{candidates_needed, plan_slots},
        ports::{MenuRepository, MenuService},
        schema::{
            get_meal_replacement_schema, get_menu_generation_schema, parse_generated_meal,
            parse_generated_menu,
        },
        value_objects::{GenerateMenuInput, ReplaceMealInput, ShoppingList},
    },
    profile::{entities::UserQuestionnaire, ports::ProfileRepository},
};

/// Schema violations from the generation provider are retried once before
/// the request is surfaced as a retryable error.
const GENERATION_ATTEMPTS: usize = 2;

fn build_generation_prompt(
    questionnaire: &UserQuestionnaire,
    input: &GenerateMenuInput,
    needed: &std::collections::HashMap<crate::domain::menu::entities::MealType, usize>,
    budget: f64,
) -> String {
    let mut counts: Vec<String> = needed
        .iter()
        .map(|(t, n)| format!("{} {} option(s)", n, t.as_str()))
        .collect();
    counts.sort();

    let mut prompt = format!(
        "Create meal options for a {}-day personalized menu. Provide exactly: {}.",
        input.days,
        counts.join(", ")
    );

    if let Some(style) = &questionnaire.dietary_style {
        prompt.push_str(&format!(" Dietary style: {}.", style));
    }
    if !questionnaire.allergies.is_empty() {
        prompt.push_str(&format!(
            " Strictly avoid allergens: {}.",
            questionnaire.allergies.join(", ")
        ));
    }
    if let Some(preferences) = &input.dietary_preferences
        && !preferences.is_empty()
    {
        prompt.push_str(&format!(" Preferences: {}.", preferences.join(", ")));
    }
    if let Some(excluded) = &input.excluded_ingredients
        && !excluded.is_empty()
    {
        prompt.push_str(&format!(" Never use: {}.", excluded.join(", ")));
    }
    if let Some(calories) = input.target_calories {
        prompt.push_str(&format!(" Target roughly {:.0} kcal per day.", calories));
    }
    prompt.push_str(&format!(" Daily food budget: {:.2}.", budget));
    if input.include_leftovers {
        prompt.push_str(" Favor recipes whose leftovers work as later meals.");
    }

    prompt
}

fn build_replacement_prompt(meal: &Meal, preferences: Option<&str>) -> String {
    let mut prompt = format!(
        "Create one replacement {} for day {} of a menu. The current meal is '{}'; propose something different.",
        meal.meal_type.as_str(),
        meal.day_number,
        meal.name
    );
    if let Some(preferences) = preferences
        && !preferences.trim().is_empty()
    {
        prompt.push_str(&format!(" User preferences: {}.", preferences));
    }
    prompt
}

impl<M, C, P, L> Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    /// Load a menu owned by the caller or fail with a generic not-found.
    /// Menus of other users are indistinguishable from missing ones.
    async fn owned_menu(&self, user_id: Uuid, menu_id: Uuid) -> Result<Menu, CoreError> {
        self.menu_repository
            .get_by_id(menu_id, user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

impl<M, C, P, L> MenuService for Service<M, C, P, L>
where
    M: MenuRepository,
    C: ChatRepository,
    P: ProfileRepository,
    L: LlmClient,
{
    async fn generate_menu(&self, input: GenerateMenuInput) -> Result<Menu, CoreError> {
        // Fast-fail before any generation work.
        if input.days < 1 || input.days > 30 {
            return Err(CoreError::Validation(
                "Days must be between 1 and 30".to_string(),
            ));
        }

        let questionnaire = self
            .profile_repository
            .get_questionnaire(input.user_id)
            .await?
            .ok_or(CoreError::QuestionnaireMissing)?;

        let budget = input
            .budget
            .or(questionnaire.daily_food_budget)
            .ok_or(CoreError::BudgetMissing)?;

        let slots = plan_slots(input.days, input.meals_per_day, input.meal_change_frequency);
        let needed = candidates_needed(input.days, input.meals_per_day, input.meal_change_frequency);
        let prompt = build_generation_prompt(&questionnaire, &input, &needed, budget);
        let schema = get_menu_generation_schema();

        let mut last_error = CoreError::ExternalServiceError("menu generation failed".to_string());

        for attempt in 1..=GENERATION_ATTEMPTS {
            let raw = self
                .llm_client
                .generate_json(prompt.clone(), schema.clone())
                .await?;

            let assembled = parse_generated_menu(&raw).and_then(|payload| {
                let mut menu = Menu::new(MenuConfig {
                    user_id: input.user_id,
                    title: payload.title,
                    description: payload.description,
                    days_count: input.days,
                    dietary_category: payload.dietary_category,
                });

                let pools = group_candidates(payload.meals);
                menu.meals = fill_slots(menu.id, &slots, &pools, input.same_meal_times)?;

                let (totals, cost) = menu.derive_totals();
                menu.totals = totals;
                menu.estimated_cost = cost;
                Ok(menu)
            });

            match assembled {
                Ok(menu) => {
                    let menu = self.menu_repository.create_menu(menu).await?;
                    tracing::debug!(
                        "Generated menu {} with {} meals for user {}",
                        menu.id,
                        menu.meals.len(),
                        input.user_id
                    );
                    return Ok(menu);
                }
                Err(e) => {
                    tracing::warn!("Menu generation attempt {} rejected: {}", attempt, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn get_user_menus(&self, user_id: Uuid) -> Result<Vec<Menu>, CoreError> {
        let menus = self.menu_repository.get_by_user(user_id).await?;
        tracing::debug!("Found {} menus for user {}", menus.len(), user_id);
        Ok(menus)
    }

    async fn get_menu(&self, user_id: Uuid, menu_id: Uuid) -> Result<Menu, CoreError> {
        self.owned_menu(user_id, menu_id).await
    }

    async fn replace_meal(&self, input: ReplaceMealInput) -> Result<Meal, CoreError> {
        let mut menu = self.owned_menu(input.user_id, input.menu_id).await?;

        let position = menu
            .meals
            .iter()
            .position(|m| m.id == input.meal_id)
            .ok_or(CoreError::NotFound)?;

        let prompt = build_replacement_prompt(&menu.meals[position], input.preferences.as_deref());
        let schema = get_meal_replacement_schema();
        let expected_type = menu.meals[position].meal_type;

        let mut last_error = CoreError::ExternalServiceError("meal replacement failed".to_string());

        for attempt in 1..=GENERATION_ATTEMPTS {
            let raw = self
                .llm_client
                .generate_json(prompt.clone(), schema.clone())
                .await?;

            match parse_generated_meal(&raw).and_then(|meal| meal.into_content(expected_type)) {
                Ok(content) => {
                    menu.meals[position].apply_content(content);
                    let updated = self
                        .menu_repository
                        .update_meal_content(menu.meals[position].clone())
                        .await?;

                    // Keep menu-level aggregates consistent with the new meal.
                    let (totals, cost) = menu.derive_totals();
                    self.menu_repository
                        .update_menu_totals(menu.id, totals, cost)
                        .await?;

                    return Ok(updated);
                }
                Err(e) => {
                    tracing::warn!("Meal replacement attempt {} rejected: {}", attempt, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn favorite_meal(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
        meal_id: Uuid,
        is_favorite: bool,
    ) -> Result<bool, CoreError> {
        let menu = self.owned_menu(user_id, menu_id).await?;

        if !menu.meals.iter().any(|m| m.id == meal_id) {
            return Err(CoreError::NotFound);
        }

        self.menu_repository
            .set_meal_favorite(meal_id, is_favorite)
            .await?;

        Ok(is_favorite)
    }

    async fn record_meal_feedback(
        &self,
        user_id: Uuid,
        menu_id: Uuid,
        meal_id: Uuid,
        liked: bool,
    ) -> Result<(), CoreError> {
        let menu = self.owned_menu(user_id, menu_id).await?;

        if !menu.meals.iter().any(|m| m.id == meal_id) {
            return Err(CoreError::NotFound);
        }

        self.menu_repository
            .add_meal_feedback(MealFeedback::new(meal_id, user_id, liked))
            .await
    }

    async fn shopping_list(&self, user_id: Uuid, menu_id: Uuid) -> Result<ShoppingList, CoreError> {
        let menu = self.owned_menu(user_id, menu_id).await?;
        Ok(build_shopping_list(&menu))
    }

    async fn start_menu_today(&self, user_id: Uuid, menu_id: Uuid) -> Result<(), CoreError> {
        let menu = self.owned_menu(user_id, menu_id).await?;

        self.menu_repository
            .set_menu_started(menu.id, Utc::now().date_naive())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        chat::ports::MockChatRepository,
        common::ports::MockLlmClient,
        menu::{
            entities::{Ingredient, MacroTotals, MealContent, MealType},
            ports::MockMenuRepository,
            value_objects::{MealChangeFrequency, MealsPerDay},
        },
        profile::ports::MockProfileRepository,
    };
    use serde_json::json;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn questionnaire(user_id: Uuid, budget: Option<f64>) -> UserQuestionnaire {
        UserQuestionnaire {
            id: Uuid::new_v4(),
            user_id,
            dietary_style: Some("mediterranean".to_string()),
            allergies: vec!["peanuts".to_string()],
            daily_food_budget: budget,
            created_at: Utc::now(),
        }
    }

    fn generate_input(user_id: Uuid, days: i32) -> GenerateMenuInput {
        GenerateMenuInput {
            user_id,
            days,
            meals_per_day: MealsPerDay::ThreeMain,
            meal_change_frequency: MealChangeFrequency::Daily,
            include_leftovers: false,
            same_meal_times: true,
            target_calories: Some(2000.0),
            dietary_preferences: None,
            excluded_ingredients: None,
            budget: None,
        }
    }

    fn generated_meal_json(name: &str, meal_type: &str) -> serde_json::Value {
        json!({
            "name": name,
            "meal_type": meal_type,
            "calories": 500.0,
            "protein_g": 25.0,
            "carbs_g": 40.0,
            "fats_g": 20.0,
            "ingredients": [
                { "name": "rice", "quantity": 100.0, "unit": "g", "category": "grains", "estimated_cost": 1.0 }
            ]
        })
    }

    fn full_menu_payload(days: i32) -> String {
        let mut meals = Vec::new();
        for day in 0..days {
            meals.push(generated_meal_json(&format!("Breakfast {}", day), "breakfast"));
            meals.push(generated_meal_json(&format!("Lunch {}", day), "lunch"));
            meals.push(generated_meal_json(&format!("Dinner {}", day), "dinner"));
        }
        json!({
            "title": "Mediterranean week",
            "description": "Generated plan",
            "dietary_category": "mediterranean",
            "meals": meals
        })
        .to_string()
    }

    fn service_with(
        menu: MockMenuRepository,
        profile: MockProfileRepository,
        llm: MockLlmClient,
    ) -> Service<MockMenuRepository, MockChatRepository, MockProfileRepository, MockLlmClient>
    {
        Service::new(menu, MockChatRepository::new(), profile, llm)
    }

    fn owned_menu_with_meal(user_id: Uuid) -> Menu {
        let mut menu = Menu::new(MenuConfig {
            user_id,
            title: "Existing".to_string(),
            description: None,
            days_count: 1,
            dietary_category: None,
        });
        let content = MealContent {
            name: "Old lunch".to_string(),
            totals: MacroTotals {
                calories: 600.0,
                protein_g: 30.0,
                carbs_g: 50.0,
                fats_g: 25.0,
                fiber_g: 4.0,
            },
            prep_time_minutes: Some(20),
            difficulty_level: Some("easy".to_string()),
            instructions: None,
            allergens: Vec::new(),
            ingredients: vec![Ingredient {
                id: Uuid::new_v4(),
                meal_id: Uuid::nil(),
                name: "pasta".to_string(),
                quantity: 120.0,
                unit: "g".to_string(),
                category: "grains".to_string(),
                calories: None,
                protein_g: None,
                carbs_g: None,
                fats_g: None,
                estimated_cost: Some(2.0),
            }],
        };
        menu.meals
            .push(Meal::new(menu.id, 1, MealType::Lunch, None, content));
        let (totals, cost) = menu.derive_totals();
        menu.totals = totals;
        menu.estimated_cost = cost;
        menu
    }

    #[tokio::test]
    async fn generation_rejects_out_of_range_days_before_any_work() {
        for days in [0, 31] {
            let mut profile = MockProfileRepository::new();
            profile.expect_get_questionnaire().never();
            let mut menu_repo = MockMenuRepository::new();
            menu_repo.expect_create_menu().never();
            let mut llm = MockLlmClient::new();
            llm.expect_generate_json().never();

            let service = service_with(menu_repo, profile, llm);
            let err = service
                .generate_menu(generate_input(Uuid::new_v4(), days))
                .await
                .unwrap_err();

            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn generation_requires_questionnaire() {
        let user_id = Uuid::new_v4();
        let mut profile = MockProfileRepository::new();
        profile
            .expect_get_questionnaire()
            .returning(|_| Box::pin(async { Ok(None) }));
        let mut menu_repo = MockMenuRepository::new();
        menu_repo.expect_create_menu().never();

        let service = service_with(menu_repo, profile, MockLlmClient::new());
        let err = service
            .generate_menu(generate_input(user_id, 7))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::QuestionnaireMissing);
    }

    #[tokio::test]
    async fn generation_requires_a_budget() {
        let user_id = Uuid::new_v4();
        let mut profile = MockProfileRepository::new();
        profile
            .expect_get_questionnaire()
            .returning(move |_| Box::pin(async move { Ok(Some(questionnaire(user_id, None))) }));

        let service = service_with(MockMenuRepository::new(), profile, MockLlmClient::new());
        let err = service
            .generate_menu(generate_input(user_id, 7))
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::BudgetMissing);
    }

    #[tokio::test]
    async fn generated_menu_has_days_times_slots_meals() {
        let user_id = Uuid::new_v4();
        let days = 3;

        let mut profile = MockProfileRepository::new();
        profile.expect_get_questionnaire().returning(move |_| {
            Box::pin(async move { Ok(Some(questionnaire(user_id, Some(30.0)))) })
        });

        let mut llm = MockLlmClient::new();
        llm.expect_generate_json()
            .times(1)
            .returning(move |_, _| Box::pin(async move { Ok(full_menu_payload(days)) }));

        let mut menu_repo = MockMenuRepository::new();
        menu_repo
            .expect_create_menu()
            .times(1)
            .withf(move |menu: &Menu| {
                menu.meals.len() == (days * 3) as usize
                    && menu
                        .meals
                        .iter()
                        .all(|m| m.day_number >= 1 && m.day_number <= days)
            })
            .returning(|menu| Box::pin(async move { Ok(menu) }));

        let service = service_with(menu_repo, profile, llm);
        let menu = service
            .generate_menu(generate_input(user_id, days))
            .await
            .unwrap();

        assert_eq!(menu.days_count, days);
        // Aggregates are the sum of the meals at generation time.
        assert_eq!(menu.totals.calories, 500.0 * (days * 3) as f64);
        assert_eq!(menu.estimated_cost, 1.0 * (days * 3) as f64);
    }

    #[tokio::test]
    async fn malformed_generation_output_is_retried_once() {
        let user_id = Uuid::new_v4();

        let mut profile = MockProfileRepository::new();
        profile.expect_get_questionnaire().returning(move |_| {
            Box::pin(async move { Ok(Some(questionnaire(user_id, Some(30.0)))) })
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();
        let mut llm = MockLlmClient::new();
        llm.expect_generate_json().times(2).returning(move |_, _| {
            let n = calls_in_mock.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if n == 0 {
                    Ok("not json".to_string())
                } else {
                    Ok(full_menu_payload(1))
                }
            })
        });

        let mut menu_repo = MockMenuRepository::new();
        menu_repo
            .expect_create_menu()
            .times(1)
            .returning(|menu| Box::pin(async move { Ok(menu) }));

        let service = service_with(menu_repo, profile, llm);
        assert!(service.generate_menu(generate_input(user_id, 1)).await.is_ok());
    }

    #[tokio::test]
    async fn persistent_schema_violations_surface_as_external_error() {
        let user_id = Uuid::new_v4();

        let mut profile = MockProfileRepository::new();
        profile.expect_get_questionnaire().returning(move |_| {
            Box::pin(async move { Ok(Some(questionnaire(user_id, Some(30.0)))) })
        });

        let mut llm = MockLlmClient::new();
        llm.expect_generate_json()
            .times(2)
            .returning(|_, _| Box::pin(async { Ok("not json".to_string()) }));

        let mut menu_repo = MockMenuRepository::new();
        menu_repo.expect_create_menu().never();

        let service = service_with(menu_repo, profile, llm);
        let err = service
            .generate_menu(generate_input(user_id, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn replacing_a_meal_in_a_foreign_menu_is_not_found() {
        let user_id = Uuid::new_v4();

        let mut menu_repo = MockMenuRepository::new();
        // Ownership filter yields nothing for another user's menu.
        menu_repo
            .expect_get_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        menu_repo.expect_update_meal_content().never();
        menu_repo.expect_update_menu_totals().never();

        let service = service_with(menu_repo, MockProfileRepository::new(), MockLlmClient::new());
        let err = service
            .replace_meal(ReplaceMealInput {
                user_id,
                menu_id: Uuid::new_v4(),
                meal_id: Uuid::new_v4(),
                preferences: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::NotFound);
    }

    #[tokio::test]
    async fn replacing_a_meal_keeps_slot_and_recomputes_totals() {
        let user_id = Uuid::new_v4();
        let menu = owned_menu_with_meal(user_id);
        let menu_id = menu.id;
        let meal_id = menu.meals[0].id;

        let mut menu_repo = MockMenuRepository::new();
        let stored = menu.clone();
        menu_repo
            .expect_get_by_id()
            .returning(move |_, _| {
                let stored = stored.clone();
                Box::pin(async move { Ok(Some(stored)) })
            });
        menu_repo
            .expect_update_meal_content()
            .times(1)
            .withf(move |meal: &Meal| {
                meal.id == meal_id
                    && meal.meal_type == MealType::Lunch
                    && meal.day_number == 1
                    && meal.name == "New lunch"
            })
            .returning(|meal| Box::pin(async move { Ok(meal) }));
        menu_repo
            .expect_update_menu_totals()
            .times(1)
            .withf(move |id, totals, cost| {
                *id == menu_id && totals.calories == 450.0 && (*cost - 3.0).abs() < 1e-9
            })
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let replacement = json!({
            "name": "New lunch",
            "meal_type": "lunch",
            "calories": 450.0,
            "protein_g": 35.0,
            "carbs_g": 30.0,
            "fats_g": 18.0,
            "ingredients": [
                { "name": "quinoa", "quantity": 100.0, "unit": "g", "category": "grains", "estimated_cost": 3.0 }
            ]
        })
        .to_string();

        let mut llm = MockLlmClient::new();
        llm.expect_generate_json()
            .times(1)
            .returning(move |_, _| {
                let replacement = replacement.clone();
                Box::pin(async move { Ok(replacement) })
            });

        let service = service_with(menu_repo, MockProfileRepository::new(), llm);
        let meal = service
            .replace_meal(ReplaceMealInput {
                user_id,
                menu_id,
                meal_id,
                preferences: Some("more protein".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(meal.name, "New lunch");
        assert_eq!(meal.id, meal_id);
    }

    #[tokio::test]
    async fn favorite_set_then_unset_restores_original_state() {
        let user_id = Uuid::new_v4();
        let menu = owned_menu_with_meal(user_id);
        let menu_id = menu.id;
        let meal_id = menu.meals[0].id;
        let original = menu.meals[0].is_favorite;

        let flag = Arc::new(std::sync::Mutex::new(original));

        let mut menu_repo = MockMenuRepository::new();
        let stored = menu.clone();
        menu_repo.expect_get_by_id().returning(move |_, _| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });
        let flag_in_mock = flag.clone();
        menu_repo
            .expect_set_meal_favorite()
            .times(2)
            .returning(move |_, value| {
                *flag_in_mock.lock().unwrap() = value;
                Box::pin(async { Ok(()) })
            });

        let service = service_with(menu_repo, MockProfileRepository::new(), MockLlmClient::new());
        service
            .favorite_meal(user_id, menu_id, meal_id, true)
            .await
            .unwrap();
        service
            .favorite_meal(user_id, menu_id, meal_id, false)
            .await
            .unwrap();

        assert_eq!(*flag.lock().unwrap(), original);
    }

    #[tokio::test]
    async fn feedback_on_unknown_meal_is_not_found() {
        let user_id = Uuid::new_v4();
        let menu = owned_menu_with_meal(user_id);
        let menu_id = menu.id;

        let mut menu_repo = MockMenuRepository::new();
        let stored = menu.clone();
        menu_repo.expect_get_by_id().returning(move |_, _| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });
        menu_repo.expect_add_meal_feedback().never();

        let service = service_with(menu_repo, MockProfileRepository::new(), MockLlmClient::new());
        let err = service
            .record_meal_feedback(user_id, menu_id, Uuid::new_v4(), true)
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::NotFound);
    }

    #[tokio::test]
    async fn shopping_list_is_stable_across_derivations() {
        let user_id = Uuid::new_v4();
        let menu = owned_menu_with_meal(user_id);
        let menu_id = menu.id;

        let mut menu_repo = MockMenuRepository::new();
        let stored = menu.clone();
        menu_repo.expect_get_by_id().returning(move |_, _| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });

        let service = service_with(menu_repo, MockProfileRepository::new(), MockLlmClient::new());
        let first = service.shopping_list(user_id, menu_id).await.unwrap();
        let second = service.shopping_list(user_id, menu_id).await.unwrap();

        assert_eq!(first, second);
        assert!((first.total_estimated_cost - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn start_today_stamps_current_date() {
        let user_id = Uuid::new_v4();
        let menu = owned_menu_with_meal(user_id);
        let menu_id = menu.id;

        let mut menu_repo = MockMenuRepository::new();
        let stored = menu.clone();
        menu_repo.expect_get_by_id().returning(move |_, _| {
            let stored = stored.clone();
            Box::pin(async move { Ok(Some(stored)) })
        });
        menu_repo
            .expect_set_menu_started()
            .times(1)
            .withf(move |id, date| *id == menu_id && *date == Utc::now().date_naive())
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let service = service_with(menu_repo, MockProfileRepository::new(), MockLlmClient::new());
        service.start_menu_today(user_id, menu_id).await.unwrap();
    }
}
