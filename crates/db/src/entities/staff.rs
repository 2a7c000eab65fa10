//! `SeaORM` Entity for the staff directory table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub staff_type: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_tasks::Entity")]
    EventTasks,
}

impl Related<super::event_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
