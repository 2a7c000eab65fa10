//! Staff directory and per-event staff assignment repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{event_staff, events, staff};

/// Error types for staff operations.
#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    /// Staff member not found.
    #[error("Staff not found: {0}")]
    NotFound(Uuid),

    /// Staff assignment not found.
    #[error("Staff assignment not found: {0}")]
    AssignmentNotFound(Uuid),

    /// Owning event not found.
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a staff directory entry.
#[derive(Debug, Clone)]
pub struct CreateStaffInput {
    /// Full name.
    pub full_name: String,
    /// Staff type (internal, vendor, volunteer, ...).
    pub staff_type: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
}

/// Input for updating a staff directory entry.
#[derive(Debug, Clone, Default)]
pub struct UpdateStaffInput {
    /// New full name.
    pub full_name: Option<String>,
    /// New staff type.
    pub staff_type: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New department.
    pub department: Option<String>,
}

/// Input for assigning a person to an event.
#[derive(Debug, Clone)]
pub struct CreateEventStaffInput {
    /// Owning event.
    pub event_id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Staff type.
    pub staff_type: Option<String>,
    /// Task assigned for this event.
    pub assigned_task: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Input for updating an event staff assignment.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventStaffInput {
    /// New full name.
    pub full_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New staff type.
    pub staff_type: Option<String>,
    /// New assigned task.
    pub assigned_task: Option<String>,
    /// New note.
    pub note: Option<String>,
}

/// Repository for the staff directory and per-event assignments.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    db: DatabaseConnection,
}

impl StaffRepository {
    /// Creates a new staff repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Staff directory
    // ========================================================================

    /// Creates a staff directory entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateStaffInput) -> Result<staff::Model, StaffError> {
        let member = staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            staff_type: Set(input.staff_type),
            phone: Set(input.phone),
            department: Set(input.department),
        };

        Ok(member.insert(&self.db).await?)
    }

    /// Gets a staff member by ID.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::NotFound` if the member does not exist.
    pub async fn get(&self, staff_id: Uuid) -> Result<staff::Model, StaffError> {
        staff::Entity::find_by_id(staff_id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::NotFound(staff_id))
    }

    /// Lists the staff directory, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<staff::Model>, StaffError> {
        Ok(staff::Entity::find()
            .order_by_asc(staff::Column::FullName)
            .all(&self.db)
            .await?)
    }

    /// Updates a staff directory entry.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::NotFound` if the member does not exist.
    pub async fn update(
        &self,
        staff_id: Uuid,
        input: UpdateStaffInput,
    ) -> Result<staff::Model, StaffError> {
        let member = staff::Entity::find_by_id(staff_id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::NotFound(staff_id))?;

        let mut active: staff::ActiveModel = member.into();
        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(staff_type) = input.staff_type {
            active.staff_type = Set(Some(staff_type));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(department) = input.department {
            active.department = Set(Some(department));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a staff directory entry. Task rows pointing at the member
    /// keep their row with the link cleared (`ON DELETE SET NULL`).
    ///
    /// # Errors
    ///
    /// Returns `StaffError::NotFound` if the member does not exist.
    pub async fn delete(&self, staff_id: Uuid) -> Result<(), StaffError> {
        let result = staff::Entity::delete_by_id(staff_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StaffError::NotFound(staff_id));
        }
        Ok(())
    }

    // ========================================================================
    // Per-event assignments
    // ========================================================================

    /// Assigns a person to an event.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::EventNotFound` if the event does not exist.
    pub async fn assign(
        &self,
        input: CreateEventStaffInput,
    ) -> Result<event_staff::Model, StaffError> {
        self.ensure_event_exists(input.event_id).await?;

        let assignment = event_staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(input.event_id),
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            department: Set(input.department),
            staff_type: Set(input.staff_type),
            assigned_task: Set(input.assigned_task),
            note: Set(input.note),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(assignment.insert(&self.db).await?)
    }

    /// Assigns several people to one event in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::EventNotFound` if the event does not exist;
    /// nothing is inserted if any row fails.
    pub async fn assign_bulk(
        &self,
        event_id: Uuid,
        inputs: Vec<CreateEventStaffInput>,
    ) -> Result<Vec<event_staff::Model>, StaffError> {
        self.ensure_event_exists(event_id).await?;

        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let assignment = event_staff::ActiveModel {
                id: Set(Uuid::new_v4()),
                event_id: Set(event_id),
                full_name: Set(input.full_name),
                phone: Set(input.phone),
                department: Set(input.department),
                staff_type: Set(input.staff_type),
                assigned_task: Set(input.assigned_task),
                note: Set(input.note),
                created_at: Set(chrono::Utc::now().into()),
            };
            created.push(assignment.insert(&txn).await?);
        }
        txn.commit().await?;

        Ok(created)
    }

    /// Gets one assignment by ID.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::AssignmentNotFound` if it does not exist.
    pub async fn get_assignment(&self, id: Uuid) -> Result<event_staff::Model, StaffError> {
        event_staff::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::AssignmentNotFound(id))
    }

    /// Lists the assignments for one event, ordered by full name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_assignments(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<event_staff::Model>, StaffError> {
        Ok(event_staff::Entity::find()
            .filter(event_staff::Column::EventId.eq(event_id))
            .order_by_asc(event_staff::Column::FullName)
            .all(&self.db)
            .await?)
    }

    /// Updates an assignment.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::AssignmentNotFound` if it does not exist.
    pub async fn update_assignment(
        &self,
        id: Uuid,
        input: UpdateEventStaffInput,
    ) -> Result<event_staff::Model, StaffError> {
        let assignment = event_staff::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StaffError::AssignmentNotFound(id))?;

        let mut active: event_staff::ActiveModel = assignment.into();
        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(department) = input.department {
            active.department = Set(Some(department));
        }
        if let Some(staff_type) = input.staff_type {
            active.staff_type = Set(Some(staff_type));
        }
        if let Some(assigned_task) = input.assigned_task {
            active.assigned_task = Set(Some(assigned_task));
        }
        if let Some(note) = input.note {
            active.note = Set(Some(note));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an assignment.
    ///
    /// # Errors
    ///
    /// Returns `StaffError::AssignmentNotFound` if it does not exist.
    pub async fn delete_assignment(&self, id: Uuid) -> Result<(), StaffError> {
        let result = event_staff::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StaffError::AssignmentNotFound(id));
        }
        Ok(())
    }

    async fn ensure_event_exists(&self, event_id: Uuid) -> Result<(), StaffError> {
        events::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(StaffError::EventNotFound(event_id))
    }
}
