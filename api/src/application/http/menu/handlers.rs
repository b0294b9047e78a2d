pub mod favorite_meal;
pub mod generate_menu;
pub mod get_menu;
pub mod get_menus;
pub mod get_shopping_list;
pub mod meal_feedback;
pub mod replace_meal;
pub mod start_menu_today;
