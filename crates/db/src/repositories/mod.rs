//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod catalog;
pub mod event;
pub mod finance;
pub mod profile;
pub mod staff;
pub mod task;

pub use catalog::{CatalogError, CatalogRepository, CreateServiceInput, UpdateServiceInput};
pub use event::{CreateEventInput, EventError, EventRepository, UpdateEventInput};
pub use finance::{
    CreateFinanceLineInput, FinanceError, FinanceLineWithService, FinanceRepository,
    UpdateFinanceLineInput,
};
pub use profile::{CreateProfileInput, ProfileError, ProfileRepository, UpdateProfileInput};
pub use staff::{
    CreateEventStaffInput, CreateStaffInput, StaffError, StaffRepository, UpdateEventStaffInput,
    UpdateStaffInput,
};
pub use task::{
    CreateEventTaskInput, CreateTaskTemplateInput, TaskError, TaskRepository,
    UpdateEventTaskInput, UpdateTaskTemplateInput,
};
