//! `SeaORM` Entity for the services catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_name: String,
    pub base_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_finances::Entity")]
    EventFinances,
}

impl Related<super::event_finances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventFinances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
