//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, validation_messages};
use crate::repository::UserRepository;

/// User service providing business logic operations.
///
/// The service normalizes and validates input, then orchestrates repository
/// operations. It deliberately does not pre-check email uniqueness: that
/// constraint belongs to the storage layer, which is the only place a race
/// between concurrent writers can be decided.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, mut input: CreateUser) -> UserResult<User> {
        input.normalize();

        if !input.has_required_fields() {
            return Err(UserError::MissingRequiredFields);
        }

        input
            .validate()
            .map_err(|e| UserError::Validation(validation_messages(&e)))?;

        self.repository.create(input).await
    }

    /// List all users, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Apply a partial update to an existing user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, mut input: UpdateUser) -> UserResult<User> {
        input.normalize();

        if input.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        input
            .validate()
            .map_err(|e| UserError::Validation(validation_messages(&e)))?;

        self.repository
            .update_by_id(id, input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user, returning its last snapshot
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .delete_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn create_input(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            age: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_normalizes_email() {
        let service = service();

        let user = service
            .create_user(create_input("Ann", "  ANN@X.COM "))
            .await
            .unwrap();

        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_user_requires_name_and_email() {
        let service = service();

        let result = service.create_user(create_input("", "ann@x.com")).await;
        assert!(matches!(result, Err(UserError::MissingRequiredFields)));

        let result = service.create_user(create_input("Ann", "   ")).await;
        assert!(matches!(result, Err(UserError::MissingRequiredFields)));

        // Nothing was persisted along the way
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_user_collects_validation_messages() {
        let service = service();

        let mut input = create_input("Ann", "not-an-email");
        input.age = Some(200);

        let result = service.create_user(input).await;
        match result {
            Err(UserError::Validation(messages)) => {
                assert_eq!(
                    messages,
                    vec![
                        "Age must be between 0 and 150".to_string(),
                        "Please enter a valid email".to_string(),
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let service = service();

        service.create_user(create_input("Ann", "ann@x.com")).await.unwrap();
        let result = service.create_user(create_input("Ann 2", "Ann@X.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let service = service();
        let result = service.get_user(Uuid::now_v7()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_user_rejects_empty_payload() {
        let service = service();
        let user = service.create_user(create_input("Ann", "ann@x.com")).await.unwrap();

        let result = service.update_user(user.id, UpdateUser::default()).await;
        assert!(matches!(result, Err(UserError::EmptyUpdate)));

        // Stored document is untouched
        let fetched = service.get_user(user.id).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_update_user_applies_subset() {
        let service = service();
        let user = service.create_user(create_input("Ann", "ann@x.com")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let changes = UpdateUser {
            address: Some("  12 Main St ".to_string()),
            ..Default::default()
        };
        let updated = service.update_user(user.id, changes).await.unwrap();

        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.age, None);
        assert_eq!(updated.address.as_deref(), Some("12 Main St"));
        assert!(updated.updated_at > user.updated_at);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let service = service();

        let changes = UpdateUser {
            name: Some("Somebody".to_string()),
            ..Default::default()
        };
        let result = service.update_user(Uuid::now_v7(), changes).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_returns_snapshot_then_404s() {
        let service = service();
        let user = service.create_user(create_input("Ann", "ann@x.com")).await.unwrap();

        let deleted = service.delete_user(user.id).await.unwrap();
        assert_eq!(deleted.id, user.id);

        let result = service.get_user(user.id).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();
        repo.expect_update_by_id().never();

        let service = UserService::new(repo);

        let result = service.create_user(create_input("", "")).await;
        assert!(matches!(result, Err(UserError::MissingRequiredFields)));

        let result = service.update_user(Uuid::now_v7(), UpdateUser::default()).await;
        assert!(matches!(result, Err(UserError::EmptyUpdate)));
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces_as_database_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|| Err(UserError::Database("connection reset".to_string())));

        let service = UserService::new(repo);
        let result = service.list_users().await;
        assert!(matches!(result, Err(UserError::Database(_))));
    }
}
