use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{
        entities::{Meal, MealType, Menu},
        planner::{PlannedSlot, default_slot_time, pick_candidate},
        schema::GeneratedMeal,
        value_objects::{ShoppingItem, ShoppingList},
    },
};

/// Group generated candidates by their declared meal type. Candidates with a
/// type outside the enumerated set are dropped here and rejected later if a
/// slot ends up without any candidate.
pub fn group_candidates(meals: Vec<GeneratedMeal>) -> HashMap<MealType, Vec<GeneratedMeal>> {
    let mut pools: HashMap<MealType, Vec<GeneratedMeal>> = HashMap::new();
    for meal in meals {
        if let Some(meal_type) = MealType::parse(&meal.meal_type) {
            pools.entry(meal_type).or_default().push(meal);
        }
    }
    pools
}

/// Fill every planned slot from the candidate pools, producing one persisted
/// meal per slot. Repeated candidates across days become separate meal rows
/// with identical content.
pub fn fill_slots(
    menu_id: uuid::Uuid,
    slots: &[PlannedSlot],
    pools: &HashMap<MealType, Vec<GeneratedMeal>>,
    same_meal_times: bool,
) -> Result<Vec<Meal>, CoreError> {
    let mut use_counts: HashMap<MealType, Vec<usize>> = pools
        .iter()
        .map(|(t, pool)| (*t, vec![0; pool.len()]))
        .collect();
    let mut meals = Vec::with_capacity(slots.len());
    let mut day_occurrence: HashMap<(i32, MealType), usize> = HashMap::new();

    for slot in slots {
        let pool = pools.get(&slot.meal_type).ok_or_else(|| {
            CoreError::ExternalServiceError(format!(
                "no candidates generated for meal type '{}'",
                slot.meal_type.as_str()
            ))
        })?;
        let counts = use_counts.entry(slot.meal_type).or_default();

        let index = pick_candidate(pool.len(), slot.variety_key, counts).ok_or_else(|| {
            CoreError::ExternalServiceError(format!(
                "no candidates generated for meal type '{}'",
                slot.meal_type.as_str()
            ))
        })?;
        counts[index] += 1;

        let occurrence = day_occurrence
            .entry((slot.day_number, slot.meal_type))
            .or_insert(0);
        let scheduled_time = same_meal_times
            .then(|| default_slot_time(slot.meal_type, *occurrence).to_string());
        *occurrence += 1;

        let content = pool[index].clone().into_content(slot.meal_type)?;
        meals.push(Meal::new(
            menu_id,
            slot.day_number,
            slot.meal_type,
            scheduled_time,
            content,
        ));
    }

    Ok(meals)
}

/// Traverse every meal × ingredient, grouping by category. Ingredients
/// lacking a cost contribute zero. Deterministic for a fixed menu state.
pub fn build_shopping_list(menu: &Menu) -> ShoppingList {
    // (category, name, unit) -> (quantity, cost)
    let mut grouped: BTreeMap<(String, String, String), (f64, f64)> = BTreeMap::new();

    for meal in &menu.meals {
        for ingredient in &meal.ingredients {
            let key = (
                ingredient.category.clone(),
                ingredient.name.clone(),
                ingredient.unit.clone(),
            );
            let entry = grouped.entry(key).or_insert((0.0, 0.0));
            entry.0 += ingredient.quantity;
            entry.1 += ingredient.estimated_cost.unwrap_or(0.0);
        }
    }

    let mut categories: BTreeMap<String, Vec<ShoppingItem>> = BTreeMap::new();
    let mut total = 0.0;

    for ((category, name, unit), (quantity, cost)) in grouped {
        total += cost;
        categories.entry(category).or_default().push(ShoppingItem {
            name,
            quantity,
            unit,
            estimated_cost: cost,
        });
    }

    ShoppingList {
        total_estimated_cost: total,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::{
        entities::{Ingredient, MacroTotals, MealContent, MenuConfig},
        planner::plan_slots,
        value_objects::{MealChangeFrequency, MealsPerDay},
    };
    use serde_json::json;

    fn ingredient(name: &str, category: &str, cost: Option<f64>) -> Ingredient {
        Ingredient {
            id: uuid::Uuid::new_v4(),
            meal_id: uuid::Uuid::nil(),
            name: name.to_string(),
            quantity: 1.0,
            unit: "unit".to_string(),
            category: category.to_string(),
            calories: None,
            protein_g: None,
            carbs_g: None,
            fats_g: None,
            estimated_cost: cost,
        }
    }

    fn menu_with_ingredients() -> Menu {
        let mut menu = Menu::new(MenuConfig {
            user_id: uuid::Uuid::new_v4(),
            title: "Test menu".to_string(),
            description: None,
            days_count: 1,
            dietary_category: None,
        });

        let content = MealContent {
            name: "Salad".to_string(),
            totals: MacroTotals::default(),
            prep_time_minutes: None,
            difficulty_level: None,
            instructions: None,
            allergens: Vec::new(),
            ingredients: vec![
                ingredient("tomatoes", "vegetables", Some(3.5)),
                ingredient("lettuce", "vegetables", None),
                ingredient("chicken breast", "meat", Some(12.0)),
            ],
        };
        menu.meals
            .push(Meal::new(menu.id, 1, MealType::Lunch, None, content));
        menu
    }

    #[test]
    fn shopping_list_totals_equal_sum_of_categories() {
        let menu = menu_with_ingredients();
        let list = build_shopping_list(&menu);

        let category_sum: f64 = list
            .categories
            .values()
            .flatten()
            .map(|i| i.estimated_cost)
            .sum();
        assert!((list.total_estimated_cost - category_sum).abs() < 1e-9);
        assert!((list.total_estimated_cost - 15.5).abs() < 1e-9);
    }

    #[test]
    fn missing_costs_contribute_zero() {
        let menu = menu_with_ingredients();
        let list = build_shopping_list(&menu);

        let vegetables = &list.categories["vegetables"];
        let lettuce = vegetables.iter().find(|i| i.name == "lettuce").unwrap();
        assert_eq!(lettuce.estimated_cost, 0.0);
    }

    #[test]
    fn deriving_twice_yields_identical_lists() {
        let menu = menu_with_ingredients();
        assert_eq!(build_shopping_list(&menu), build_shopping_list(&menu));
    }

    fn candidate(name: &str, meal_type: &str) -> GeneratedMeal {
        serde_json::from_value(json!({
            "name": name,
            "meal_type": meal_type,
            "calories": 400.0,
            "protein_g": 20.0,
            "carbs_g": 30.0,
            "fats_g": 15.0,
            "ingredients": []
        }))
        .unwrap()
    }

    #[test]
    fn fill_slots_produces_one_meal_per_slot() {
        let slots = plan_slots(3, MealsPerDay::ThreeMain, MealChangeFrequency::Daily);
        let pools = group_candidates(vec![
            candidate("Oatmeal", "breakfast"),
            candidate("Shakshuka", "breakfast"),
            candidate("Granola", "breakfast"),
            candidate("Salad", "lunch"),
            candidate("Soup", "lunch"),
            candidate("Pasta", "lunch"),
            candidate("Fish", "dinner"),
            candidate("Stir fry", "dinner"),
            candidate("Tofu bowl", "dinner"),
        ]);

        let meals = fill_slots(uuid::Uuid::new_v4(), &slots, &pools, true).unwrap();
        assert_eq!(meals.len(), 9);
        for meal in &meals {
            assert!(meal.day_number >= 1 && meal.day_number <= 3);
            assert!(meal.scheduled_time.is_some());
        }
    }

    #[test]
    fn fill_slots_fails_when_a_type_has_no_candidates() {
        let slots = plan_slots(1, MealsPerDay::ThreeMain, MealChangeFrequency::Daily);
        let pools = group_candidates(vec![candidate("Oatmeal", "breakfast")]);

        assert!(fill_slots(uuid::Uuid::new_v4(), &slots, &pools, false).is_err());
    }

    #[test]
    fn short_pool_wraps_onto_least_used_candidates() {
        let slots = plan_slots(4, MealsPerDay::ThreeMain, MealChangeFrequency::Daily);
        let pools = group_candidates(vec![
            candidate("Oatmeal", "breakfast"),
            candidate("Shakshuka", "breakfast"),
            candidate("Salad", "lunch"),
            candidate("Soup", "lunch"),
            candidate("Fish", "dinner"),
            candidate("Stir fry", "dinner"),
        ]);

        let meals = fill_slots(uuid::Uuid::new_v4(), &slots, &pools, false).unwrap();
        let breakfasts: Vec<&str> = meals
            .iter()
            .filter(|m| m.meal_type == MealType::Breakfast)
            .map(|m| m.name.as_str())
            .collect();

        // Keys 0,1 are direct; keys 2,3 wrap onto the least-used candidates.
        assert_eq!(breakfasts, vec!["Oatmeal", "Shakshuka", "Oatmeal", "Shakshuka"]);
    }
}
