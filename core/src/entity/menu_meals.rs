use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_meals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub menu_id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub day_number: i32,
    pub scheduled_time: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub calories: f64,
    #[sea_orm(column_type = "Double")]
    pub protein_g: f64,
    #[sea_orm(column_type = "Double")]
    pub carbs_g: f64,
    #[sea_orm(column_type = "Double")]
    pub fats_g: f64,
    #[sea_orm(column_type = "Double")]
    pub fiber_g: f64,
    pub prep_time_minutes: Option<i32>,
    pub difficulty_level: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub allergens: Option<Json>,
    pub is_favorite: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recommended_menus::Entity",
        from = "Column::MenuId",
        to = "super::recommended_menus::Column::Id"
    )]
    Menu,
    #[sea_orm(has_many = "super::meal_ingredients::Entity")]
    Ingredients,
}

impl Related<super::recommended_menus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::meal_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
