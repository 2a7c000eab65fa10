//! Catalog service repository.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::services;

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Service not found.
    #[error("Service not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a catalog service.
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    /// Display name of the service offering.
    pub service_name: String,
    /// Base price used to prefill finance estimates.
    pub base_price: Decimal,
}

/// Input for updating a catalog service.
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceInput {
    /// New name.
    pub service_name: Option<String>,
    /// New base price.
    pub base_price: Option<Decimal>,
}

/// Repository for the reusable services catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a catalog service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateServiceInput) -> Result<services::Model, CatalogError> {
        let service = services::ActiveModel {
            id: Set(Uuid::new_v4()),
            service_name: Set(input.service_name),
            base_price: Set(input.base_price),
        };

        Ok(service.insert(&self.db).await?)
    }

    /// Gets a service by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the service does not exist.
    pub async fn get(&self, service_id: Uuid) -> Result<services::Model, CatalogError> {
        services::Entity::find_by_id(service_id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(service_id))
    }

    /// Lists all catalog services, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<services::Model>, CatalogError> {
        Ok(services::Entity::find()
            .order_by_asc(services::Column::ServiceName)
            .all(&self.db)
            .await?)
    }

    /// Updates a service.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the service does not exist.
    pub async fn update(
        &self,
        service_id: Uuid,
        input: UpdateServiceInput,
    ) -> Result<services::Model, CatalogError> {
        let service = services::Entity::find_by_id(service_id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(service_id))?;

        let mut active: services::ActiveModel = service.into();
        if let Some(service_name) = input.service_name {
            active.service_name = Set(service_name);
        }
        if let Some(base_price) = input.base_price {
            active.base_price = Set(base_price);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a service. Finance lines keep their row; the link is cleared
    /// by the database (`ON DELETE SET NULL`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the service does not exist.
    pub async fn delete(&self, service_id: Uuid) -> Result<(), CatalogError> {
        let result = services::Entity::delete_by_id(service_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound(service_id));
        }
        Ok(())
    }
}
