//! Account profile repository.
//!
//! Profiles mirror accounts from the external identity provider. Creation
//! uses the provider's subject ID so tokens and profiles line up.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{profiles, sea_orm_active_enums::UserRole};

/// Error types for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Profile not found.
    #[error("Profile not found: {0}")]
    NotFound(Uuid),

    /// Profile already exists for this identity.
    #[error("Profile already exists: {0}")]
    AlreadyExists(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a profile.
#[derive(Debug, Clone)]
pub struct CreateProfileInput {
    /// Identity provider subject ID.
    pub id: Uuid,
    /// Account email.
    pub email: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Account role.
    pub role: UserRole,
}

/// Input for updating a profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New email.
    pub email: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

/// Repository for account profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a profile for an identity.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::AlreadyExists` when the identity already has a
    /// profile.
    pub async fn create(&self, input: CreateProfileInput) -> Result<profiles::Model, ProfileError> {
        let existing = profiles::Entity::find_by_id(input.id).one(&self.db).await?;
        if existing.is_some() {
            return Err(ProfileError::AlreadyExists(input.id));
        }

        let profile = profiles::ActiveModel {
            id: Set(input.id),
            email: Set(input.email),
            full_name: Set(input.full_name),
            role: Set(input.role),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(profile.insert(&self.db).await?)
    }

    /// Gets a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist.
    pub async fn get(&self, profile_id: Uuid) -> Result<profiles::Model, ProfileError> {
        profiles::Entity::find_by_id(profile_id)
            .one(&self.db)
            .await?
            .ok_or(ProfileError::NotFound(profile_id))
    }

    /// Lists all profiles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<profiles::Model>, ProfileError> {
        Ok(profiles::Entity::find()
            .order_by_desc(profiles::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Updates a profile (email, name, role).
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist.
    pub async fn update(
        &self,
        profile_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<profiles::Model, ProfileError> {
        let profile = profiles::Entity::find_by_id(profile_id)
            .one(&self.db)
            .await?
            .ok_or(ProfileError::NotFound(profile_id))?;

        let mut active: profiles::ActiveModel = profile.into();
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(full_name) = input.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist.
    pub async fn delete(&self, profile_id: Uuid) -> Result<(), ProfileError> {
        let result = profiles::Entity::delete_by_id(profile_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ProfileError::NotFound(profile_id));
        }
        Ok(())
    }
}
