use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::entities::{Ingredient, MacroTotals, MealContent, MealType},
};

/// Untrusted meal payload as produced by the LLM. Coerced into
/// [`MealContent`] only after schema validation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedMeal {
    pub name: String,
    pub meal_type: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    #[serde(default)]
    pub prep_time_minutes: Option<i32>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub allergens: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Vec<GeneratedIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fats_g: Option<f64>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedMenuPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dietary_category: Option<String>,
    pub meals: Vec<GeneratedMeal>,
}

impl GeneratedMeal {
    /// Validate and coerce into domain content. The expected meal type comes
    /// from the slot plan; a mismatching or unknown type is a schema
    /// violation, as are non-finite or negative macro values.
    pub fn into_content(self, expected_type: MealType) -> Result<MealContent, CoreError> {
        let declared = MealType::parse(&self.meal_type).ok_or_else(|| {
            CoreError::ExternalServiceError(format!("unknown meal_type '{}'", self.meal_type))
        })?;

        if declared != expected_type {
            return Err(CoreError::ExternalServiceError(format!(
                "meal_type '{}' does not match requested slot '{}'",
                self.meal_type,
                expected_type.as_str()
            )));
        }

        let macros = [self.calories, self.protein_g, self.carbs_g, self.fats_g];
        if macros.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(CoreError::ExternalServiceError(
                "meal macro values must be non-negative numbers".to_string(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(CoreError::ExternalServiceError(
                "meal name must not be empty".to_string(),
            ));
        }

        Ok(MealContent {
            name: self.name,
            totals: MacroTotals {
                calories: self.calories,
                protein_g: self.protein_g,
                carbs_g: self.carbs_g,
                fats_g: self.fats_g,
                fiber_g: self.fiber_g.unwrap_or(0.0),
            },
            prep_time_minutes: self.prep_time_minutes,
            difficulty_level: self.difficulty_level,
            instructions: self.instructions,
            allergens: self.allergens.unwrap_or_default(),
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient {
                    id: crate::domain::common::generate_uuid_v7(),
                    meal_id: uuid::Uuid::nil(),
                    name: i.name,
                    quantity: i.quantity,
                    unit: i.unit,
                    category: i.category,
                    calories: i.calories,
                    protein_g: i.protein_g,
                    carbs_g: i.carbs_g,
                    fats_g: i.fats_g,
                    estimated_cost: i.estimated_cost,
                })
                .collect(),
        })
    }
}

pub fn parse_generated_menu(raw: &str) -> Result<GeneratedMenuPayload, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Failed to parse menu generation response: {}", e);
        CoreError::ExternalServiceError(format!("invalid menu payload: {}", e))
    })
}

pub fn parse_generated_meal(raw: &str) -> Result<GeneratedMeal, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Failed to parse meal replacement response: {}", e);
        CoreError::ExternalServiceError(format!("invalid meal payload: {}", e))
    })
}

fn meal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "meal_type": {
                "type": "string",
                "enum": ["breakfast", "lunch", "dinner", "snack", "intermediate"]
            },
            "calories": { "type": "number" },
            "protein_g": { "type": "number" },
            "carbs_g": { "type": "number" },
            "fats_g": { "type": "number" },
            "fiber_g": { "type": "number" },
            "prep_time_minutes": { "type": "integer" },
            "difficulty_level": {
                "type": "string",
                "enum": ["easy", "medium", "hard"]
            },
            "instructions": { "type": "string" },
            "allergens": {
                "type": "array",
                "items": { "type": "string" }
            },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "number" },
                        "unit": { "type": "string" },
                        "category": { "type": "string" },
                        "calories": { "type": "number" },
                        "protein_g": { "type": "number" },
                        "carbs_g": { "type": "number" },
                        "fats_g": { "type": "number" },
                        "estimated_cost": { "type": "number" }
                    },
                    "required": ["name", "quantity", "unit", "category"]
                }
            }
        },
        "required": ["name", "meal_type", "calories", "protein_g", "carbs_g", "fats_g", "ingredients"]
    })
}

/// Returns the JSON schema for full menu generation LLM responses
pub fn get_menu_generation_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "dietary_category": { "type": "string" },
            "meals": {
                "type": "array",
                "items": meal_schema()
            }
        },
        "required": ["title", "meals"]
    })
}

/// Returns the JSON schema for single meal replacement LLM responses
pub fn get_meal_replacement_schema() -> serde_json::Value {
    meal_schema()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_meal_json() -> String {
        json!({
            "name": "Shakshuka",
            "meal_type": "breakfast",
            "calories": 420.0,
            "protein_g": 22.0,
            "carbs_g": 18.0,
            "fats_g": 28.0,
            "fiber_g": 5.0,
            "ingredients": [
                { "name": "eggs", "quantity": 3.0, "unit": "unit", "category": "dairy_eggs", "estimated_cost": 2.1 },
                { "name": "tomatoes", "quantity": 400.0, "unit": "g", "category": "vegetables" }
            ]
        })
        .to_string()
    }

    #[test]
    fn valid_meal_coerces_into_content() {
        let meal = parse_generated_meal(&valid_meal_json()).unwrap();
        let content = meal.into_content(MealType::Breakfast).unwrap();

        assert_eq!(content.name, "Shakshuka");
        assert_eq!(content.totals.calories, 420.0);
        assert_eq!(content.ingredients.len(), 2);
    }

    #[test]
    fn unknown_meal_type_is_rejected() {
        let raw = valid_meal_json().replace("breakfast", "brunch");
        let meal = parse_generated_meal(&raw).unwrap();
        assert!(meal.into_content(MealType::Breakfast).is_err());
    }

    #[test]
    fn slot_mismatch_is_rejected() {
        let meal = parse_generated_meal(&valid_meal_json()).unwrap();
        assert!(meal.into_content(MealType::Dinner).is_err());
    }

    #[test]
    fn missing_macro_field_is_rejected() {
        let raw = json!({
            "name": "Shakshuka",
            "meal_type": "breakfast",
            "calories": 420.0,
            "ingredients": []
        })
        .to_string();

        assert!(parse_generated_meal(&raw).is_err());
    }

    #[test]
    fn negative_macros_are_rejected() {
        let raw = valid_meal_json().replace("22.0", "-22.0");
        let meal = parse_generated_meal(&raw).unwrap();
        assert!(meal.into_content(MealType::Breakfast).is_err());
    }
}
