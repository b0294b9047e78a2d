use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "meal_ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub calories: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub protein_g: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub carbs_g: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub fats_g: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub estimated_cost: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu_meals::Entity",
        from = "Column::MealId",
        to = "super::menu_meals::Column::Id"
    )]
    Meal,
}

impl Related<super::menu_meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
