//! 用户与角色内存存储实现

use super::table::InMemoryTable;
use crate::error::StorageError;
use crate::models::{RoleRow, UserRow, role_columns, user_columns};
use crate::traits::{RoleStore, UserStore};
use crate::validation::ensure_required;
use domain::{Role, RoleField, User, UserField, now_ms};
use fam_query::{CancellationToken, Page, PagedQuery, QueryEngine};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemoryUserStore {
    table: Arc<InMemoryTable<UserRow>>,
    engine: QueryEngine<UserField, UserRow>,
}

impl InMemoryUserStore {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            table: Arc::default(),
            engine: QueryEngine::new()?,
        })
    }

    /// 共享的底层表（资产的 assignedTo 引用它）
    pub fn table(&self) -> Arc<InMemoryTable<UserRow>> {
        self.table.clone()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(
        &self,
        query: PagedQuery<UserField>,
        cancel: &CancellationToken,
    ) -> Result<Page<User>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(self.table.as_ref(), query, cancel)
            .await?)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StorageError> {
        Ok(self.table.find(user_id)?.map(User::from))
    }

    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        ensure_required("username", &user.username)?;
        ensure_required("email", &user.email)?;
        let row = UserRow::from_domain(&user, now_ms());
        Ok(self.table.insert(row, &[user_columns::USERNAME])?.into())
    }
}

pub struct InMemoryRoleStore {
    table: InMemoryTable<RoleRow>,
    engine: QueryEngine<RoleField, RoleRow>,
}

impl InMemoryRoleStore {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            table: InMemoryTable::new(),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn list_roles(
        &self,
        query: PagedQuery<RoleField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Role>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_role(&self, role_id: Uuid) -> Result<Option<Role>, StorageError> {
        Ok(self.table.find(role_id)?.map(Role::from))
    }

    async fn create_role(&self, role: Role) -> Result<Role, StorageError> {
        ensure_required("name", &role.name)?;
        let row = RoleRow::from_domain(&role, now_ms());
        Ok(self.table.insert(row, &[role_columns::NAME])?.into())
    }
}
