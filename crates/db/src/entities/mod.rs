//! `SeaORM` entity definitions.

pub mod event_finances;
pub mod event_staff;
pub mod event_tasks;
pub mod events;
pub mod profiles;
pub mod sea_orm_active_enums;
pub mod services;
pub mod staff;
pub mod task_templates;
