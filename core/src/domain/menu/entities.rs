use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Intermediate,
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Intermediate => "intermediate",
        }
    }

    /// Strict parse. Generation output with a meal type outside the
    /// enumerated set is rejected, not coerced.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            "intermediate" => Some(MealType::Intermediate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub fiber_g: f64,
}

impl MacroTotals {
    pub fn add(&mut self, other: &MacroTotals) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fats_g += other.fats_g;
        self.fiber_g += other.fiber_g;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub days_count: i32,
    pub dietary_category: Option<String>,
    pub totals: MacroTotals,
    pub estimated_cost: f64,
    pub started_on: Option<NaiveDate>,
    pub meals: Vec<Meal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub days_count: i32,
    pub dietary_category: Option<String>,
}

impl Menu {
    pub fn new(config: MenuConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            title: config.title,
            description: config.description,
            days_count: config.days_count,
            dietary_category: config.dietary_category,
            totals: MacroTotals::default(),
            estimated_cost: 0.0,
            started_on: None,
            meals: Vec::new(),
            created_at: now,
        }
    }

    /// Sum of the current meals' macro totals and ingredient costs.
    pub fn derive_totals(&self) -> (MacroTotals, f64) {
        let mut totals = MacroTotals::default();
        let mut cost = 0.0;

        for meal in &self.meals {
            totals.add(&meal.totals);
            for ingredient in &meal.ingredients {
                cost += ingredient.estimated_cost.unwrap_or(0.0);
            }
        }

        (totals, cost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    pub day_number: i32,
    pub scheduled_time: Option<String>,
    pub totals: MacroTotals,
    pub prep_time_minutes: Option<i32>,
    pub difficulty_level: Option<String>,
    pub instructions: Option<String>,
    pub allergens: Vec<String>,
    pub is_favorite: bool,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MealContent {
    pub name: String,
    pub totals: MacroTotals,
    pub prep_time_minutes: Option<i32>,
    pub difficulty_level: Option<String>,
    pub instructions: Option<String>,
    pub allergens: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Meal {
    pub fn new(
        menu_id: Uuid,
        day_number: i32,
        meal_type: MealType,
        scheduled_time: Option<String>,
        content: MealContent,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();
        let id = Uuid::new_v7(timestamp);

        Self {
            id,
            menu_id,
            name: content.name,
            meal_type,
            day_number,
            scheduled_time,
            totals: content.totals,
            prep_time_minutes: content.prep_time_minutes,
            difficulty_level: content.difficulty_level,
            instructions: content.instructions,
            allergens: content.allergens,
            is_favorite: false,
            ingredients: content
                .ingredients
                .into_iter()
                .map(|i| Ingredient { meal_id: id, ..i })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replacement swaps the meal's content, not its slot: id, menu, day
    /// number, meal type and the favorite flag all survive.
    pub fn apply_content(&mut self, content: MealContent) {
        let (now, _) = generate_timestamp();

        self.name = content.name;
        self.totals = content.totals;
        self.prep_time_minutes = content.prep_time_minutes;
        self.difficulty_level = content.difficulty_level;
        self.instructions = content.instructions;
        self.allergens = content.allergens;
        self.ingredients = content
            .ingredients
            .into_iter()
            .map(|i| Ingredient {
                meal_id: self.id,
                ..i
            })
            .collect();
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    pub estimated_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealFeedback {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub user_id: Uuid,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

impl MealFeedback {
    pub fn new(meal_id: Uuid, user_id: Uuid, liked: bool) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            meal_id,
            user_id,
            liked,
            created_at: now,
        }
    }
}
