//! `SeaORM` Entity for the task_templates table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "task_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub task_name: String,
    pub description: Option<String>,
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
