pub mod chat_messages;
pub mod logged_meals;
pub mod meal_feedback;
pub mod meal_ingredients;
pub mod menu_meals;
pub mod nutrition_plans;
pub mod recommended_menus;
pub mod user_questionnaires;
