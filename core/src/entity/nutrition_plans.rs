use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "nutrition_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub goal_calories: f64,
    #[sea_orm(column_type = "Double")]
    pub goal_protein_g: f64,
    #[sea_orm(column_type = "Double")]
    pub goal_carbs_g: f64,
    #[sea_orm(column_type = "Double")]
    pub goal_fats_g: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
