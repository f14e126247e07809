//! In-Memory Repository Implementation
//!
//! Process-local store with the same uniqueness and ordering rules as the
//! PostgreSQL repository. Used by tests and for running without a database.

use std::collections::HashMap;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    /// Insertion order, tie-breaker for equal `created_at`
    sequence: HashMap<UserId, u64>,
    next_sequence: u64,
}

impl Store {
    fn email_taken(&self, email: &Email, except: Option<&UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(&u.user_id) != except && u.email == *email)
    }

    fn user_name_taken(&self, user_name: &UserName, except: Option<&UserId>) -> bool {
        self.users.values().any(|u| {
            Some(&u.user_id) != except
                && u
                    .user_name
                    .as_ref()
                    .is_some_and(|n| n.canonical() == user_name.canonical())
        })
    }
}

/// In-memory user repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut store = self.store.write().await;

        if store.users.contains_key(&user.user_id) {
            return Err(AuthError::Internal(format!(
                "Duplicate user id {}",
                user.user_id
            )));
        }
        if store.email_taken(&user.email, None) {
            return Err(AuthError::EmailTaken);
        }
        if let Some(user_name) = &user.user_name {
            if store.user_name_taken(user_name, None) {
                return Err(AuthError::UserNameTaken);
            }
        }

        let seq = store.next_sequence;
        store.next_sequence += 1;
        store.sequence.insert(user.user_id, seq);
        store.users.insert(user.user_id, user.clone());

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.store.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == *email).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| {
                u.user_name
                    .as_ref()
                    .is_some_and(|n| n.canonical() == user_name.canonical())
            })
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.store.read().await.email_taken(email, None))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.store.read().await.user_name_taken(user_name, None))
    }

    async fn list(&self, offset: i64, limit: i64) -> AuthResult<Vec<User>> {
        let store = self.store.read().await;

        let mut users: Vec<&User> = store.users.values().collect();
        users.sort_by_key(|u| (u.created_at, store.sequence.get(&u.user_id).copied()));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(users
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if store.email_taken(&user.email, Some(&user.user_id)) {
            return Err(AuthError::EmailTaken);
        }
        if let Some(user_name) = &user.user_name {
            if store.user_name_taken(user_name, Some(&user.user_id)) {
                return Err(AuthError::UserNameTaken);
            }
        }

        store.users.insert(user.user_id, user.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, user_name: &str) -> User {
        User::new_without_password(
            Email::new(email).unwrap(),
            UserName::new(user_name).unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("alice@example.com", "Alice");
        repo.create(&alice).await.unwrap();

        let by_email = repo
            .find_by_email(&Email::new("ALICE@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.user_id), Some(alice.user_id));

        let by_name = repo
            .find_by_user_name(&UserName::new("alice").unwrap())
            .await
            .unwrap();
        assert_eq!(by_name.map(|u| u.user_id), Some(alice.user_id));

        assert!(repo.find_by_id(&UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice@example.com", "alice")).await.unwrap();

        assert!(matches!(
            repo.create(&user("alice@example.com", "other")).await,
            Err(AuthError::EmailTaken)
        ));
        assert!(matches!(
            repo.create(&user("other@example.com", "ALICE")).await,
            Err(AuthError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_update_checks_other_rows_only() {
        let repo = InMemoryUserRepository::new();
        let mut alice = user("alice@example.com", "alice");
        let bob = user("bob@example.com", "bob");
        repo.create(&alice).await.unwrap();
        repo.create(&bob).await.unwrap();

        alice.deactivate();
        repo.update(&alice).await.unwrap();
        assert!(!repo.find_by_id(&alice.user_id).await.unwrap().unwrap().is_active);

        alice.email = bob.email.clone();
        assert!(matches!(
            repo.update(&alice).await,
            Err(AuthError::EmailTaken)
        ));

        let ghost = user("ghost@example.com", "ghost");
        assert!(matches!(
            repo.update(&ghost).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_paged() {
        let repo = InMemoryUserRepository::new();
        for i in 0..4 {
            repo.create(&user(&format!("u{i}@example.com"), &format!("user{i}")))
                .await
                .unwrap();
        }

        let page = repo.list(1, 2).await.unwrap();
        let names: Vec<_> = page
            .iter()
            .filter_map(|u| u.user_name.as_ref().map(|n| n.original().to_string()))
            .collect();
        assert_eq!(names, ["user1", "user2"]);
    }
}
