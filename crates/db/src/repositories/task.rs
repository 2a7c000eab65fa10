//! Task template and per-event task repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    event_tasks, events, sea_orm_active_enums::TaskStatus, staff, task_templates,
};

/// Error types for task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Task template not found.
    #[error("Task template not found: {0}")]
    TemplateNotFound(Uuid),

    /// Event task not found.
    #[error("Event task not found: {0}")]
    NotFound(Uuid),

    /// Owning event not found.
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// Assigned staff member not found.
    #[error("Staff not found: {0}")]
    StaffNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a task template.
#[derive(Debug, Clone)]
pub struct CreateTaskTemplateInput {
    /// Task name.
    pub task_name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for updating a task template.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskTemplateInput {
    /// New name.
    pub task_name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Input for creating an event task.
#[derive(Debug, Clone)]
pub struct CreateEventTaskInput {
    /// Owning event.
    pub event_id: Uuid,
    /// Template this task instantiates, if any.
    pub task_id: Option<Uuid>,
    /// Assigned staff member, if any.
    pub staff_id: Option<Uuid>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Input for updating an event task.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventTaskInput {
    /// New assigned staff member.
    pub staff_id: Option<Uuid>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New note.
    pub note: Option<String>,
}

/// Repository for task templates and per-event tasks.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    db: DatabaseConnection,
}

impl TaskRepository {
    /// Creates a new task repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Task templates
    // ========================================================================

    /// Creates a task template.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_template(
        &self,
        input: CreateTaskTemplateInput,
    ) -> Result<task_templates::Model, TaskError> {
        let template = task_templates::ActiveModel {
            id: Set(Uuid::new_v4()),
            task_name: Set(input.task_name),
            description: Set(input.description),
        };

        Ok(template.insert(&self.db).await?)
    }

    /// Gets a template by ID.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::TemplateNotFound` if it does not exist.
    pub async fn get_template(&self, template_id: Uuid) -> Result<task_templates::Model, TaskError> {
        task_templates::Entity::find_by_id(template_id)
            .one(&self.db)
            .await?
            .ok_or(TaskError::TemplateNotFound(template_id))
    }

    /// Lists all task templates, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_templates(&self) -> Result<Vec<task_templates::Model>, TaskError> {
        Ok(task_templates::Entity::find()
            .order_by_asc(task_templates::Column::TaskName)
            .all(&self.db)
            .await?)
    }

    /// Updates a task template.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::TemplateNotFound` if it does not exist.
    pub async fn update_template(
        &self,
        template_id: Uuid,
        input: UpdateTaskTemplateInput,
    ) -> Result<task_templates::Model, TaskError> {
        let template = task_templates::Entity::find_by_id(template_id)
            .one(&self.db)
            .await?
            .ok_or(TaskError::TemplateNotFound(template_id))?;

        let mut active: task_templates::ActiveModel = template.into();
        if let Some(task_name) = input.task_name {
            active.task_name = Set(task_name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a task template. Event tasks pointing at it keep their row
    /// with the link cleared (`ON DELETE SET NULL`).
    ///
    /// # Errors
    ///
    /// Returns `TaskError::TemplateNotFound` if it does not exist.
    pub async fn delete_template(&self, template_id: Uuid) -> Result<(), TaskError> {
        let result = task_templates::Entity::delete_by_id(template_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(TaskError::TemplateNotFound(template_id));
        }
        Ok(())
    }

    // ========================================================================
    // Per-event tasks
    // ========================================================================

    /// Creates a task for an event. New tasks start Pending.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EventNotFound` if the event does not exist,
    /// `TaskError::TemplateNotFound`/`TaskError::StaffNotFound` for dangling
    /// links.
    pub async fn create_task(
        &self,
        input: CreateEventTaskInput,
    ) -> Result<event_tasks::Model, TaskError> {
        self.ensure_event_exists(input.event_id).await?;
        if let Some(task_id) = input.task_id {
            self.get_template(task_id).await?;
        }
        if let Some(staff_id) = input.staff_id {
            self.ensure_staff_exists(staff_id).await?;
        }

        let task = event_tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(input.event_id),
            task_id: Set(input.task_id),
            staff_id: Set(input.staff_id),
            status: Set(TaskStatus::Pending),
            note: Set(input.note),
        };

        Ok(task.insert(&self.db).await?)
    }

    /// Gets an event task by ID.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if it does not exist.
    pub async fn get_task(&self, task_id: Uuid) -> Result<event_tasks::Model, TaskError> {
        event_tasks::Entity::find_by_id(task_id)
            .one(&self.db)
            .await?
            .ok_or(TaskError::NotFound(task_id))
    }

    /// Lists the tasks for one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tasks_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<event_tasks::Model>, TaskError> {
        Ok(event_tasks::Entity::find()
            .filter(event_tasks::Column::EventId.eq(event_id))
            .all(&self.db)
            .await?)
    }

    /// Lists the tasks assigned to one staff member, across events.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tasks_by_staff(
        &self,
        staff_id: Uuid,
    ) -> Result<Vec<event_tasks::Model>, TaskError> {
        Ok(event_tasks::Entity::find()
            .filter(event_tasks::Column::StaffId.eq(staff_id))
            .all(&self.db)
            .await?)
    }

    /// Updates an event task (assignee, status, note).
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if it does not exist.
    pub async fn update_task(
        &self,
        task_id: Uuid,
        input: UpdateEventTaskInput,
    ) -> Result<event_tasks::Model, TaskError> {
        let task = event_tasks::Entity::find_by_id(task_id)
            .one(&self.db)
            .await?
            .ok_or(TaskError::NotFound(task_id))?;

        if let Some(staff_id) = input.staff_id {
            self.ensure_staff_exists(staff_id).await?;
        }

        let mut active: event_tasks::ActiveModel = task.into();
        if let Some(staff_id) = input.staff_id {
            active.staff_id = Set(Some(staff_id));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(note) = input.note {
            active.note = Set(Some(note));
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an event task.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if it does not exist.
    pub async fn delete_task(&self, task_id: Uuid) -> Result<(), TaskError> {
        let result = event_tasks::Entity::delete_by_id(task_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(TaskError::NotFound(task_id));
        }
        Ok(())
    }

    async fn ensure_event_exists(&self, event_id: Uuid) -> Result<(), TaskError> {
        events::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(TaskError::EventNotFound(event_id))
    }

    async fn ensure_staff_exists(&self, staff_id: Uuid) -> Result<(), TaskError> {
        staff::Entity::find_by_id(staff_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(TaskError::StaffNotFound(staff_id))
    }
}
