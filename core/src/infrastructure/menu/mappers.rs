use sea_orm::ActiveValue::Set;

use crate::{
    domain::menu::entities::{Ingredient, MacroTotals, Meal, MealType, Menu},
    entity::{meal_ingredients, menu_meals, recommended_menus},
};

impl From<&recommended_menus::Model> for Menu {
    fn from(model: &recommended_menus::Model) -> Self {
        // Note: meals are loaded separately
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title.clone(),
            description: model.description.clone(),
            days_count: model.days_count,
            dietary_category: model.dietary_category.clone(),
            totals: MacroTotals {
                calories: model.total_calories,
                protein_g: model.total_protein_g,
                carbs_g: model.total_carbs_g,
                fats_g: model.total_fats_g,
                fiber_g: model.total_fiber_g,
            },
            estimated_cost: model.estimated_cost,
            started_on: model.started_on,
            meals: Vec::new(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<&menu_meals::Model> for Meal {
    fn from(model: &menu_meals::Model) -> Self {
        // Note: ingredients are loaded separately. An unknown stored meal
        // type should not happen; snack is the least structural default.
        Self {
            id: model.id,
            menu_id: model.menu_id,
            name: model.name.clone(),
            meal_type: MealType::parse(&model.meal_type).unwrap_or(MealType::Snack),
            day_number: model.day_number,
            scheduled_time: model.scheduled_time.clone(),
            totals: MacroTotals {
                calories: model.calories,
                protein_g: model.protein_g,
                carbs_g: model.carbs_g,
                fats_g: model.fats_g,
                fiber_g: model.fiber_g,
            },
            prep_time_minutes: model.prep_time_minutes,
            difficulty_level: model.difficulty_level.clone(),
            instructions: model.instructions.clone(),
            allergens: model
                .allergens
                .clone()
                .and_then(|json| serde_json::from_value(json).ok())
                .unwrap_or_default(),
            is_favorite: model.is_favorite,
            ingredients: Vec::new(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&meal_ingredients::Model> for Ingredient {
    fn from(model: &meal_ingredients::Model) -> Self {
        Self {
            id: model.id,
            meal_id: model.meal_id,
            name: model.name.clone(),
            quantity: model.quantity,
            unit: model.unit.clone(),
            category: model.category.clone(),
            calories: model.calories,
            protein_g: model.protein_g,
            carbs_g: model.carbs_g,
            fats_g: model.fats_g,
            estimated_cost: model.estimated_cost,
        }
    }
}

pub fn menu_active_model(menu: &Menu) -> recommended_menus::ActiveModel {
    recommended_menus::ActiveModel {
        id: Set(menu.id),
        user_id: Set(menu.user_id),
        title: Set(menu.title.clone()),
        description: Set(menu.description.clone()),
        days_count: Set(menu.days_count),
        dietary_category: Set(menu.dietary_category.clone()),
        total_calories: Set(menu.totals.calories),
        total_protein_g: Set(menu.totals.protein_g),
        total_carbs_g: Set(menu.totals.carbs_g),
        total_fats_g: Set(menu.totals.fats_g),
        total_fiber_g: Set(menu.totals.fiber_g),
        estimated_cost: Set(menu.estimated_cost),
        started_on: Set(menu.started_on),
        created_at: Set(menu.created_at.fixed_offset()),
    }
}

pub fn meal_active_model(meal: &Meal) -> menu_meals::ActiveModel {
    menu_meals::ActiveModel {
        id: Set(meal.id),
        menu_id: Set(meal.menu_id),
        name: Set(meal.name.clone()),
        meal_type: Set(meal.meal_type.as_str().to_string()),
        day_number: Set(meal.day_number),
        scheduled_time: Set(meal.scheduled_time.clone()),
        calories: Set(meal.totals.calories),
        protein_g: Set(meal.totals.protein_g),
        carbs_g: Set(meal.totals.carbs_g),
        fats_g: Set(meal.totals.fats_g),
        fiber_g: Set(meal.totals.fiber_g),
        prep_time_minutes: Set(meal.prep_time_minutes),
        difficulty_level: Set(meal.difficulty_level.clone()),
        instructions: Set(meal.instructions.clone()),
        allergens: Set(if meal.allergens.is_empty() {
            None
        } else {
            serde_json::to_value(&meal.allergens).ok()
        }),
        is_favorite: Set(meal.is_favorite),
        created_at: Set(meal.created_at.fixed_offset()),
        updated_at: Set(meal.updated_at.fixed_offset()),
    }
}

pub fn ingredient_active_model(ingredient: &Ingredient) -> meal_ingredients::ActiveModel {
    meal_ingredients::ActiveModel {
        id: Set(ingredient.id),
        meal_id: Set(ingredient.meal_id),
        name: Set(ingredient.name.clone()),
        quantity: Set(ingredient.quantity),
        unit: Set(ingredient.unit.clone()),
        category: Set(ingredient.category.clone()),
        calories: Set(ingredient.calories),
        protein_g: Set(ingredient.protein_g),
        carbs_g: Set(ingredient.carbs_g),
        fats_g: Set(ingredient.fats_g),
        estimated_cost: Set(ingredient.estimated_cost),
    }
}
