//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres repository, including user name
//! uniqueness. Used by tests and local experiments.

use std::collections::HashMap;
use std::sync::Mutex;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: HashMap<UserId, User>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| AuthError::Internal("User table lock poisoned".into()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<Option<UserId>> {
        let mut table = self.lock()?;

        if table
            .rows
            .values()
            .any(|existing| existing.username() == user.username())
        {
            return Ok(None);
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);
        table.rows.insert(id, user.clone().with_id(id));

        Ok(Some(id))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.lock()?.rows.get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let user_id = user
            .id()
            .ok_or_else(|| AuthError::Internal("Cannot update an unsaved user".into()))?;

        let mut table = self.lock()?;
        if let Some(row) = table.rows.get_mut(&user_id) {
            *row = user.clone();
        }
        Ok(())
    }
}
