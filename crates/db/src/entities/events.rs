//! `SeaORM` Entity for the events table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EventStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub organizer: Option<String>,
    pub start_date: Option<DateTimeWithTimeZone>,
    pub location: Option<String>,
    pub format: Option<String>,
    pub script_link: Option<String>,
    pub timeline_link: Option<String>,
    pub status: EventStatus,
    pub outcome_summary: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_finances::Entity")]
    EventFinances,
    #[sea_orm(has_many = "super::event_tasks::Entity")]
    EventTasks,
    #[sea_orm(has_many = "super::event_staff::Entity")]
    EventStaff,
}

impl Related<super::event_finances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventFinances.def()
    }
}

impl Related<super::event_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTasks.def()
    }
}

impl Related<super::event_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventStaff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
