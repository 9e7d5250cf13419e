use domain::{
    Location, LocationField, Role, RoleField, Supplier, SupplierField, User, UserField,
};
use fam_query::{CancellationToken, PageRequest, PagedQuery, field};
use fam_storage::{
    InMemoryLocationStore, InMemoryRoleStore, InMemorySupplierStore, InMemoryUserStore,
    LocationStore, RoleStore, StorageErrorKind, SupplierStore, UserStore,
};
use uuid::Uuid;

fn supplier(name: &str, is_active: bool) -> Supplier {
    Supplier {
        id: Uuid::new_v4(),
        name: name.to_string(),
        contact_email: None,
        phone: None,
        is_active,
        created_at_ms: 0,
    }
}

fn location(name: &str, parent_id: Option<Uuid>) -> Location {
    Location {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: None,
        parent_id,
        created_at_ms: 0,
    }
}

fn first_page<F>() -> PagedQuery<F> {
    PagedQuery::new(PageRequest::new(1, 20).expect("page"))
}

#[tokio::test]
async fn suppliers_default_to_name_order_and_filter_active() {
    let store = InMemorySupplierStore::new().expect("store");
    for (name, active) in [("Zeta Parts", true), ("Acme", false), ("Midway", true)] {
        store
            .create_supplier(supplier(name, active))
            .await
            .expect("create");
    }
    let cancel = CancellationToken::new();

    let all = store
        .list_suppliers(first_page(), &cancel)
        .await
        .expect("list");
    let names: Vec<_> = all.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Midway", "Zeta Parts"]);

    let active = store
        .list_suppliers(
            first_page().filter(Some(field(SupplierField::IsActive).eq(true))),
            &cancel,
        )
        .await
        .expect("active");
    assert_eq!(active.total, 2);
}

#[tokio::test]
async fn supplier_names_are_unique_until_deleted() {
    let store = InMemorySupplierStore::new().expect("store");
    let acme = store
        .create_supplier(supplier("Acme", true))
        .await
        .expect("create");
    let err = store
        .create_supplier(supplier("Acme", true))
        .await
        .expect_err("duplicate");
    assert_eq!(err.kind(), StorageErrorKind::Conflict);

    assert!(store.delete_supplier(acme.id).await.expect("delete"));
    assert!(store.find_supplier(acme.id).await.expect("find").is_none());
    store
        .create_supplier(supplier("Acme", true))
        .await
        .expect("name free after delete");
}

#[tokio::test]
async fn child_locations_filter_by_parent() {
    let store = InMemoryLocationStore::new().expect("store");
    let hq = store
        .create_location(location("HQ", None))
        .await
        .expect("hq");
    for name in ["HQ Floor 2", "HQ Floor 1"] {
        store
            .create_location(location(name, Some(hq.id)))
            .await
            .expect("child");
    }
    let err = store
        .create_location(location("Orphan", Some(Uuid::new_v4())))
        .await
        .expect_err("missing parent");
    assert_eq!(err.kind(), StorageErrorKind::InvalidInput);

    let children = store
        .list_locations(
            first_page().filter(Some(field(LocationField::ParentId).eq(hq.id))),
            &CancellationToken::new(),
        )
        .await
        .expect("children");
    let names: Vec<_> = children.items.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["HQ Floor 1", "HQ Floor 2"]);
}

#[tokio::test]
async fn roles_order_by_rank_then_name() {
    let store = InMemoryRoleStore::new().expect("store");
    for (name, rank) in [("viewer", 3), ("auditor", 2), ("admin", 1), ("manager", 2)] {
        store
            .create_role(Role {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: None,
                rank,
                created_at_ms: 0,
            })
            .await
            .expect("create");
    }
    let roles = store
        .list_roles(first_page(), &CancellationToken::new())
        .await
        .expect("list");
    let names: Vec<_> = roles.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["admin", "auditor", "manager", "viewer"]);

    let senior = store
        .list_roles(
            first_page().filter(Some(field(RoleField::Rank).le(2_i64))),
            &CancellationToken::new(),
        )
        .await
        .expect("filtered");
    assert_eq!(senior.total, 3);
}

#[tokio::test]
async fn users_search_and_duplicate_username() {
    let store = InMemoryUserStore::new().expect("store");
    let role_id = Uuid::new_v4();
    for (username, active) in [("alice", true), ("bob", false), ("alicia", true)] {
        store
            .create_user(User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                full_name: username.to_uppercase(),
                is_active: active,
                role_id: Some(role_id),
                created_at_ms: 0,
            })
            .await
            .expect("create");
    }
    let found = store
        .list_users(
            first_page()
                .filter(Some(
                    field(UserField::Username)
                        .contains("ali")
                        .and(field(UserField::IsActive).eq(true)),
                ))
                .sort(Some("-username")),
            &CancellationToken::new(),
        )
        .await
        .expect("search");
    let names: Vec<_> = found.items.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alicia", "alice"]);

    let err = store
        .create_user(User {
            id: Uuid::new_v4(),
            username: "bob".to_string(),
            email: "bob2@example.com".to_string(),
            full_name: "Bob".to_string(),
            is_active: true,
            role_id: None,
            created_at_ms: 0,
        })
        .await
        .expect_err("duplicate username");
    assert_eq!(err.kind(), StorageErrorKind::Conflict);
}
