//! Postgres enum mappings and conversions to/from domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event lifecycle status (`event_status` PG enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Event is scheduled for a future day.
    #[sea_orm(string_value = "planning")]
    Planning,
    /// Event is scheduled for today.
    #[sea_orm(string_value = "running")]
    Running,
    /// Event's scheduled day has passed.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Event was canceled manually.
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

impl From<EventStatus> for eventra_core::status::EventStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Planning => Self::Planning,
            EventStatus::Running => Self::Running,
            EventStatus::Completed => Self::Completed,
            EventStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<eventra_core::status::EventStatus> for EventStatus {
    fn from(status: eventra_core::status::EventStatus) -> Self {
        match status {
            eventra_core::status::EventStatus::Planning => Self::Planning,
            eventra_core::status::EventStatus::Running => Self::Running,
            eventra_core::status::EventStatus::Completed => Self::Completed,
            eventra_core::status::EventStatus::Canceled => Self::Canceled,
        }
    }
}

/// Per-event task status (`task_status` PG enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Being worked on.
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Finished.
    #[sea_orm(string_value = "done")]
    Done,
}

/// Account role (`user_role` PG enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access including role management.
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    /// Administrative access.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Regular staff access.
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl From<UserRole> for eventra_shared::Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin => Self::SuperAdmin,
            UserRole::Admin => Self::Admin,
            UserRole::Staff => Self::Staff,
        }
    }
}

impl From<eventra_shared::Role> for UserRole {
    fn from(role: eventra_shared::Role) -> Self {
        match role {
            eventra_shared::Role::SuperAdmin => Self::SuperAdmin,
            eventra_shared::Role::Admin => Self::Admin,
            eventra_shared::Role::Staff => Self::Staff,
        }
    }
}
