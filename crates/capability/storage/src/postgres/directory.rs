//! Postgres 用户与角色存储实现

use super::table::{PgEntity, PgTable};
use crate::error::StorageError;
use crate::models::{RoleRow, UserRow};
use crate::traits::{RoleStore, UserStore};
use crate::validation::ensure_required;
use domain::{Role, RoleField, User, UserField, now_ms};
use fam_query::{CancellationToken, Page, PagedQuery, QueryEngine};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

impl PgEntity for UserRow {
    fn from_row(row: &PgRow, _includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            is_active: row.try_get("is_active")?,
            role_id: row.try_get("role_id")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
        })
    }
}

impl PgEntity for RoleRow {
    fn from_row(row: &PgRow, _includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        Ok(RoleRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            rank: row.try_get("rank")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
        })
    }
}

pub struct PgUserStore {
    table: PgTable<UserRow>,
    engine: QueryEngine<UserField, UserRow>,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn list_users(
        &self,
        query: PagedQuery<UserField>,
        cancel: &CancellationToken,
    ) -> Result<Page<User>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StorageError> {
        Ok(self.table.find(user_id, &[]).await?.map(User::from))
    }

    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        ensure_required("username", &user.username)?;
        ensure_required("email", &user.email)?;
        let row = UserRow::from_domain(&user, now_ms());
        sqlx::query(
            "insert into users (id, username, email, full_name, is_active, role_id, \
             created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(row.id)
        .bind(&row.username)
        .bind(&row.email)
        .bind(&row.full_name)
        .bind(row.is_active)
        .bind(row.role_id)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
        Ok(row.into())
    }
}

pub struct PgRoleStore {
    table: PgTable<RoleRow>,
    engine: QueryEngine<RoleField, RoleRow>,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl RoleStore for PgRoleStore {
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
        Ok(self.table.find(role_id, &[]).await?.map(Role::from))
    }

    async fn create_role(&self, role: Role) -> Result<Role, StorageError> {
        ensure_required("name", &role.name)?;
        let row = RoleRow::from_domain(&role, now_ms());
        sqlx::query(
            "insert into roles (id, name, description, rank, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.rank)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
        Ok(row.into())
    }
}
