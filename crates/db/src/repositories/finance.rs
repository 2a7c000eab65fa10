//! Finance line repository and summary computation.
//!
//! The repository materializes finance lines (with their linked catalog
//! service, if any) and hands them to the pure aggregator in `eventra-core`;
//! all arithmetic happens there.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use eventra_core::finance::{FinanceLine, FinanceSummary, summarize};
use eventra_shared::types::{EventId, FinanceLineId, ServiceId};

use crate::entities::{event_finances, events, services};

/// Error types for finance line operations.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// Finance line not found.
    #[error("Finance line not found: {0}")]
    NotFound(Uuid),

    /// Owning event not found.
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// Linked catalog service not found.
    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a finance line.
#[derive(Debug, Clone)]
pub struct CreateFinanceLineInput {
    /// Owning event.
    pub event_id: Uuid,
    /// Linked catalog service, if any.
    pub service_id: Option<Uuid>,
    /// Free-text service name.
    pub service_name: Option<String>,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Overrun amount.
    pub extra_amount: Decimal,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

/// Input for updating a finance line. All fields are replaced, matching the
/// full-record update the clients send.
#[derive(Debug, Clone)]
pub struct UpdateFinanceLineInput {
    /// Linked catalog service; `None` clears the link.
    pub service_id: Option<Uuid>,
    /// Free-text service name; `None` clears it.
    pub service_name: Option<String>,
    /// Planned amount.
    pub estimated_amount: Decimal,
    /// Note on the planned amount.
    pub estimated_note: Option<String>,
    /// Overrun amount.
    pub extra_amount: Decimal,
    /// Note on the overrun.
    pub extra_note: Option<String>,
}

/// Finance line joined with its linked catalog service.
#[derive(Debug, Clone)]
pub struct FinanceLineWithService {
    /// Finance line record.
    pub line: event_finances::Model,
    /// Linked catalog service, when set and still present.
    pub service: Option<services::Model>,
}

/// Finance repository for CRUD and summary operations.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    db: DatabaseConnection,
}

impl FinanceRepository {
    /// Creates a new finance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a finance line for an event.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::EventNotFound` if the owning event does not
    /// exist, `FinanceError::ServiceNotFound` if a linked service does not.
    pub async fn create(
        &self,
        input: CreateFinanceLineInput,
    ) -> Result<event_finances::Model, FinanceError> {
        self.ensure_event_exists(input.event_id).await?;
        if let Some(service_id) = input.service_id {
            self.ensure_service_exists(service_id).await?;
        }

        let line = event_finances::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(input.event_id),
            service_id: Set(input.service_id),
            service_name: Set(input.service_name),
            estimated_amount: Set(input.estimated_amount),
            estimated_note: Set(input.estimated_note),
            extra_amount: Set(input.extra_amount),
            extra_note: Set(input.extra_note),
        };

        Ok(line.insert(&self.db).await?)
    }

    /// Gets a finance line by ID, with its linked service.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NotFound` if the line does not exist.
    pub async fn get(&self, line_id: Uuid) -> Result<FinanceLineWithService, FinanceError> {
        let (line, service) = event_finances::Entity::find_by_id(line_id)
            .find_also_related(services::Entity)
            .one(&self.db)
            .await?
            .ok_or(FinanceError::NotFound(line_id))?;

        Ok(FinanceLineWithService { line, service })
    }

    /// Lists all finance lines with their linked services.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<FinanceLineWithService>, FinanceError> {
        let rows = event_finances::Entity::find()
            .find_also_related(services::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(line, service)| FinanceLineWithService { line, service })
            .collect())
    }

    /// Lists the finance lines belonging to one event.
    ///
    /// An event with no lines yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<FinanceLineWithService>, FinanceError> {
        let rows = event_finances::Entity::find()
            .filter(event_finances::Column::EventId.eq(event_id))
            .find_also_related(services::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(line, service)| FinanceLineWithService { line, service })
            .collect())
    }

    /// Computes the finance summary for one event.
    ///
    /// The aggregate always has every field present; an event with no
    /// finance lines gets an all-zero summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(&self, event_id: Uuid) -> Result<FinanceSummary, FinanceError> {
        let rows = self.list_by_event(event_id).await?;
        let lines: Vec<FinanceLine> = rows.into_iter().map(to_core_line).collect();

        Ok(summarize(EventId::from_uuid(event_id), lines))
    }

    /// Updates a finance line in place.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NotFound` if the line does not exist,
    /// `FinanceError::ServiceNotFound` if a linked service does not.
    pub async fn update(
        &self,
        line_id: Uuid,
        input: UpdateFinanceLineInput,
    ) -> Result<event_finances::Model, FinanceError> {
        let line = event_finances::Entity::find_by_id(line_id)
            .one(&self.db)
            .await?
            .ok_or(FinanceError::NotFound(line_id))?;

        if let Some(service_id) = input.service_id {
            self.ensure_service_exists(service_id).await?;
        }

        let mut active: event_finances::ActiveModel = line.into();
        active.service_id = Set(input.service_id);
        active.service_name = Set(input.service_name);
        active.estimated_amount = Set(input.estimated_amount);
        active.estimated_note = Set(input.estimated_note);
        active.extra_amount = Set(input.extra_amount);
        active.extra_note = Set(input.extra_note);

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a finance line.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NotFound` if the line does not exist.
    pub async fn delete(&self, line_id: Uuid) -> Result<(), FinanceError> {
        let result = event_finances::Entity::delete_by_id(line_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(FinanceError::NotFound(line_id));
        }
        Ok(())
    }

    async fn ensure_event_exists(&self, event_id: Uuid) -> Result<(), FinanceError> {
        events::Entity::find_by_id(event_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(FinanceError::EventNotFound(event_id))
    }

    async fn ensure_service_exists(&self, service_id: Uuid) -> Result<(), FinanceError> {
        services::Entity::find_by_id(service_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(FinanceError::ServiceNotFound(service_id))
    }
}

/// Maps a joined row to the pure aggregation input. The catalog name,
/// when the join produced one, carries the up-to-date display name.
fn to_core_line(row: FinanceLineWithService) -> FinanceLine {
    FinanceLine {
        id: FinanceLineId::from_uuid(row.line.id),
        service_id: row.line.service_id.map(ServiceId::from_uuid),
        service_name: row.line.service_name,
        catalog_name: row.service.map(|s| s.service_name),
        estimated_amount: row.line.estimated_amount,
        estimated_note: row.line.estimated_note,
        extra_amount: row.line.extra_amount,
        extra_note: row.line.extra_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(
        service: Option<services::Model>,
        free_text: Option<&str>,
    ) -> FinanceLineWithService {
        FinanceLineWithService {
            line: event_finances::Model {
                id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                service_id: service.as_ref().map(|s| s.id),
                service_name: free_text.map(ToString::to_string),
                estimated_amount: dec!(1000000),
                estimated_note: Some("Standard package".to_string()),
                extra_amount: dec!(200000),
                extra_note: None,
            },
            service,
        }
    }

    fn sound_system() -> services::Model {
        services::Model {
            id: Uuid::new_v4(),
            service_name: "Sound System".to_string(),
            base_price: dec!(1000000),
        }
    }

    #[test]
    fn test_joined_service_becomes_catalog_name() {
        let line = to_core_line(row(Some(sound_system()), Some("Old name")));
        assert_eq!(line.catalog_name.as_deref(), Some("Sound System"));
        assert_eq!(line.service_name.as_deref(), Some("Old name"));
    }

    #[test]
    fn test_unlinked_row_keeps_free_text_only() {
        let line = to_core_line(row(None, Some("Custom Decor")));
        assert_eq!(line.catalog_name, None);
        assert_eq!(line.service_name.as_deref(), Some("Custom Decor"));
    }

    #[test]
    fn test_amounts_pass_through_exactly() {
        let line = to_core_line(row(None, None));
        assert_eq!(line.estimated_amount, dec!(1000000));
        assert_eq!(line.extra_amount, dec!(200000));
        assert_eq!(line.total(), dec!(1200000));
    }
}
