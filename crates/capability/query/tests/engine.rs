use async_trait::async_trait;
use fam_query::{
    Collection, Column, DomainField, FieldKind, PageRequest, PagedQuery, QueryEngine, QueryError,
    SortKey, StorageEntity, StorageFilter, StorageQuery, Value, field,
};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BookField {
    Id,
    Title,
    Pages,
    Shelf,
}

impl DomainField for BookField {
    const ENTITY: &'static str = "Book";

    fn name(self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Pages => "pages",
            BookField::Shelf => "shelf",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            BookField::Id | BookField::Pages => FieldKind::I64,
            BookField::Title | BookField::Shelf => FieldKind::String,
        }
    }

    fn all() -> &'static [Self] {
        &[BookField::Id, BookField::Title, BookField::Pages, BookField::Shelf]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BookRow {
    id: i64,
    title: String,
}

const ID: Column = Column::new("id", "id", FieldKind::I64).sortable();
const TITLE: Column = Column::new("title", "title", FieldKind::String).sortable();
const PAGES: Column = Column::new("pages", "page_count", FieldKind::I64);
const DEFAULT_ORDER: &[SortKey] = &[TITLE.asc()];

impl StorageEntity for BookRow {
    const TABLE: &'static str = "books";

    fn columns() -> &'static [Column] {
        &[ID, TITLE, PAGES]
    }

    fn id_column() -> Column {
        ID
    }

    fn default_order() -> &'static [SortKey] {
        DEFAULT_ORDER
    }

    fn relations() -> &'static [&'static str] {
        &["author"]
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "title" => self.title.as_str().into(),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Book {
    title: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book { title: row.title }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("spy failure")]
struct SpyError;

/// 记录调用顺序的存储集合，不执行真实过滤。
#[derive(Default)]
struct SpyCollection {
    calls: Mutex<Vec<&'static str>>,
    last_query: Mutex<Option<StorageQuery>>,
    total: u64,
    fail_fetch: bool,
}

impl SpyCollection {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls").clone()
    }
}

#[async_trait]
impl Collection<BookRow> for SpyCollection {
    type Error = SpyError;

    async fn count(&self, _filter: Option<&StorageFilter>) -> Result<u64, SpyError> {
        self.calls.lock().expect("calls").push("count");
        Ok(self.total)
    }

    async fn fetch(&self, query: &StorageQuery) -> Result<Vec<BookRow>, SpyError> {
        self.calls.lock().expect("calls").push("fetch");
        *self.last_query.lock().expect("query") = Some(query.clone());
        if self.fail_fetch {
            return Err(SpyError);
        }
        Ok(vec![BookRow {
            id: 1,
            title: "Dune".to_string(),
        }])
    }
}

fn engine() -> QueryEngine<BookField, BookRow> {
    QueryEngine::new().expect("engine")
}

fn query(page: u32, page_size: u32) -> PagedQuery<BookField> {
    PagedQuery::new(PageRequest::new(page, page_size).expect("page"))
}

#[tokio::test]
async fn count_runs_before_fetch_with_page_window() {
    let spy = SpyCollection {
        total: 42,
        ..SpyCollection::default()
    };
    let page = engine()
        .execute::<Book, _>(&spy, query(3, 10).sort(Some("-title")))
        .await
        .expect("execute");

    assert_eq!(spy.calls(), vec!["count", "fetch"]);
    assert_eq!(page.total, 42);
    assert_eq!(page.page, 3);
    assert_eq!(page.items, vec![Book { title: "Dune".to_string() }]);

    let plan = spy.last_query.lock().expect("query").clone().expect("fetched");
    assert_eq!(plan.skip, 20);
    assert_eq!(plan.take, 10);
    assert_eq!(plan.order, vec![TITLE.desc(), ID.asc()]);
}

#[tokio::test]
async fn translation_failure_never_touches_storage() {
    let spy = SpyCollection::default();
    let err = engine()
        .execute::<Book, _>(&spy, query(1, 5).filter(Some(field(BookField::Shelf).eq("A"))))
        .await
        .expect_err("unmapped member");
    assert!(matches!(err, QueryError::Translation(_)));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn empty_result_still_reports_total() {
    let spy = SpyCollection::default();
    let page = engine()
        .execute::<Book, _>(&spy, query(1, 5))
        .await
        .expect("execute");
    assert_eq!(page.total, 0);
    assert_eq!(spy.calls(), vec!["count", "fetch"]);
}

#[tokio::test]
async fn storage_failure_is_propagated() {
    let spy = SpyCollection {
        fail_fetch: true,
        ..SpyCollection::default()
    };
    let err = engine()
        .execute::<Book, _>(&spy, query(1, 5))
        .await
        .expect_err("fetch fails");
    assert!(matches!(err, QueryError::Storage(_)));
}

#[tokio::test]
async fn cancelled_token_stops_before_first_round_trip() {
    let spy = SpyCollection::default();
    let cancel = fam_query::CancellationToken::new();
    cancel.cancel();
    let err = engine()
        .execute_with_cancel::<Book, _>(&spy, query(1, 5), &cancel)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, QueryError::Cancelled));
    assert!(spy.calls().is_empty());
}

#[test]
fn plan_validates_includes_and_rebinds_columns() {
    let engine = engine();
    let plan = engine
        .plan(
            &query(1, 5)
                .filter(Some(field(BookField::Pages).gt(300_i64)))
                .include("Author")
                .include("author"),
        )
        .expect("plan");
    assert_eq!(plan.includes, vec!["author"]);
    assert_eq!(
        plan.filter,
        Some(fam_query::Expr::Compare(
            PAGES,
            fam_query::CompareOp::Gt,
            Value::I64(300)
        ))
    );

    let err = engine
        .plan(&query(1, 5).include("publisher"))
        .expect_err("unknown include");
    assert!(matches!(err, QueryError::UnknownInclude(name) if name == "publisher"));
}
