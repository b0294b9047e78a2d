use sea_orm::entity::prelude::*;

/// Meals the user actually logged (photo analysis or manual entry). Read
/// here only to sum today's intake for the chat context.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "logged_meals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub calories: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub protein_g: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub carbs_g: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub fats_g: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
