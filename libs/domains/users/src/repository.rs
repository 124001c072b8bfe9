use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence.
///
/// This trait defines the data access interface for users. Implementations
/// can use different storage backends (MongoDB, in-memory, ...). Email
/// uniqueness is a constraint of the storage layer: every implementation
/// must reject a write that would duplicate an existing email, including
/// under concurrent writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning identifier and timestamps
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// List all users, newest first
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Apply a partial update; `None` when no such user exists
    async fn update_by_id(&self, id: Uuid, changes: UpdateUser) -> UserResult<Option<User>>;

    /// Remove a user, returning its last snapshot
    async fn delete_by_id(&self, id: Uuid) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// The email unique constraint is enforced inside the write lock, so
/// concurrent creates with the same email resolve to exactly one winner.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email));
        if email_exists {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = User::new(input);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        // Newest first
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, changes: UpdateUser) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(mut user) = users.get(&id).cloned() else {
            return Ok(None);
        };

        if let Some(ref new_email) = changes.email {
            let email_taken = users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(new_email));
            if email_taken {
                return Err(UserError::DuplicateEmail(new_email.clone()));
            }
        }

        user.apply_update(changes);
        users.insert(id, user.clone());

        tracing::info!(user_id = %id, "Updated user");
        Ok(Some(user))
    }

    async fn delete_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let removed = users.remove(&id);
        if removed.is_some() {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            age: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(create_input("Test User", "test@example.com"))
            .await
            .unwrap();
        assert_eq!(created.email, "test@example.com");

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_input("User 1", "test@example.com"))
            .await
            .unwrap();

        let result = repo.create(create_input("User 2", "test@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

        // Uniqueness is case-insensitive
        let result = repo.create(create_input("User 3", "TEST@EXAMPLE.COM")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(create_input("First", "first@example.com")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo
            .create(create_input("Second", "second@example.com"))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update_by_id(Uuid::now_v7(), UpdateUser::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_input("User 1", "one@example.com")).await.unwrap();
        let two = repo.create(create_input("User 2", "two@example.com")).await.unwrap();

        let changes = UpdateUser {
            email: Some("one@example.com".to_string()),
            ..Default::default()
        };
        let result = repo.update_by_id(two.id, changes).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_to_own_email_is_allowed() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(create_input("User", "me@example.com")).await.unwrap();

        let changes = UpdateUser {
            email: Some("me@example.com".to_string()),
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = repo.update_by_id(user.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_returns_last_snapshot() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(create_input("User", "me@example.com")).await.unwrap();

        let deleted = repo.delete_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, user.id);
        assert_eq!(deleted.email, "me@example.com");

        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.delete_by_id(user.id).await.unwrap().is_none());
    }
}
