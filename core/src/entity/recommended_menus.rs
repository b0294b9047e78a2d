use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recommended_menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub days_count: i32,
    pub dietary_category: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub total_calories: f64,
    #[sea_orm(column_type = "Double")]
    pub total_protein_g: f64,
    #[sea_orm(column_type = "Double")]
    pub total_carbs_g: f64,
    #[sea_orm(column_type = "Double")]
    pub total_fats_g: f64,
    #[sea_orm(column_type = "Double")]
    pub total_fiber_g: f64,
    #[sea_orm(column_type = "Double")]
    pub estimated_cost: f64,
    pub started_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_meals::Entity")]
    MenuMeals,
}

impl Related<super::menu_meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuMeals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
