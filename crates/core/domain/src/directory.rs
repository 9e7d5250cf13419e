//! 用户与角色

use uuid::Uuid;

/// 系统用户。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub role_id: Option<Uuid>,
    pub created_at_ms: i64,
}

/// 角色。`rank` 越小越靠前。
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub rank: i64,
    pub created_at_ms: i64,
}

domain_fields! {
    UserField for "User" {
        Id => ("id", Uuid),
        Username => ("username", String),
        Email => ("email", String),
        FullName => ("fullName", String),
        IsActive => ("isActive", Bool),
        RoleId => ("roleId", Uuid),
        CreatedAt => ("createdAt", I64),
    }
}

domain_fields! {
    RoleField for "Role" {
        Id => ("id", Uuid),
        Name => ("name", String),
        Description => ("description", String),
        Rank => ("rank", I64),
        CreatedAt => ("createdAt", I64),
    }
}
