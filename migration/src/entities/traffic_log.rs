use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "traffic_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub path: String,
    pub device_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
