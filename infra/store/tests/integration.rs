use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tempfile::TempDir;
use veranda_store::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Library {
    books: Vec<Book>,
    members: Vec<Member>,
    profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Book {
    id: String,
    title: String,
    copies: u32,
    tags: Vec<String>,
    created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Member {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Profile {
    name: String,
    motto: String,
    hours: Hours,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Hours {
    open: String,
    close: String,
}

impl Entity for Book {
    const KIND: &'static str = "book";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        let draft: Self = serde_json::from_value(payload).map_err(|err| {
            StoreError::Validation { message: err.to_string().into(), context: None }
        })?;
        if draft.title.trim().is_empty() {
            return Err(StoreError::Validation {
                message: "title must not be empty".into(),
                context: None,
            });
        }
        Ok(draft)
    }

    fn set_created_at(&mut self, timestamp: String) {
        self.created_at = timestamp;
    }
}

impl Entity for Member {
    const KIND: &'static str = "member";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn sanitize(payload: Value) -> Result<Self, StoreError> {
        serde_json::from_value(payload)
            .map_err(|err| StoreError::Validation { message: err.to_string().into(), context: None })
    }
}

impl Section for Profile {
    const KIND: &'static str = "profile";
}

impl HasCollection<Book> for Library {
    fn collection(&self) -> &[Book] {
        &self.books
    }

    fn collection_mut(&mut self) -> &mut Vec<Book> {
        &mut self.books
    }
}

impl HasCollection<Member> for Library {
    fn collection(&self) -> &[Member] {
        &self.members
    }

    fn collection_mut(&mut self) -> &mut Vec<Member> {
        &mut self.members
    }
}

impl HasSingleton<Profile> for Library {
    fn singleton(&self) -> &Profile {
        &self.profile
    }

    fn singleton_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }
}

async fn open_store(temp: &TempDir) -> DocumentStore<Library> {
    DocumentStore::builder().path(temp.path().join("library.json")).open().await.unwrap()
}

#[tokio::test]
async fn test_open_seeds_missing_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let store = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();

    assert!(path.exists(), "seeding must persist the default document");
    assert!(store.snapshot().books.is_empty());
}

#[tokio::test]
async fn test_open_without_create_requires_existing_document() {
    let temp = TempDir::new().unwrap();

    let err = DocumentStore::<Library>::builder()
        .path(temp.path().join("library.json"))
        .create(false)
        .open()
        .await
        .expect_err("expected error");

    match err {
        StoreError::FileNotFound { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_document_fails_to_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let err =
        DocumentStore::<Library>::builder().path(&path).open().await.expect_err("expected error");

    match err {
        StoreError::Malformed { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_created_at() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let created = books.insert(json!({"title": "Dune", "copies": 2})).await.unwrap();

    assert_eq!(created.id.len(), 12);
    assert_eq!(created.title, "Dune");
    assert_eq!(created.copies, 2);
    assert!(created.created_at.ends_with('Z'), "created_at must be UTC ISO-8601");
    assert_eq!(books.list(), vec![created]);
}

#[tokio::test]
async fn test_insert_defaults_unset_fields() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let created = books.insert(json!({"title": "Bare"})).await.unwrap();

    assert_eq!(created.copies, 0);
    assert!(created.tags.is_empty());
}

#[tokio::test]
async fn test_insert_rejects_invalid_payload() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let err = books.insert(json!({"title": "   "})).await.expect_err("expected error");

    match err {
        StoreError::Validation { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(books.list().is_empty(), "rejected insert must not mutate");
}

#[tokio::test]
async fn test_inserted_ids_are_unique_and_stable() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    for i in 0..10 {
        books.insert(json!({"title": format!("Book {i}")})).await.unwrap();
    }

    let first = books.list();
    let mut ids: Vec<String> = first.iter().map(|b| b.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10, "ids must be unique within the collection");

    let second = books.list();
    assert_eq!(first, second, "ids must be stable across list calls");
}

#[tokio::test]
async fn test_update_merges_shallow_and_preserves_id() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let created = books
        .insert(json!({"title": "Old", "copies": 3, "tags": ["a", "b"]}))
        .await
        .unwrap();

    let updated = books
        .update_by_id(&created.id, json!({"title": "New", "id": "forged", "tags": ["c"]}))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id, "id is immutable");
    assert_eq!(updated.title, "New");
    assert_eq!(updated.copies, 3, "untouched fields keep their values");
    assert_eq!(updated.tags, ["c"], "arrays replace wholesale");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let err = books.update_by_id("missing", json!({"title": "X"})).await.expect_err("expected error");

    match err {
        StoreError::NotFound { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_rejects_untypable_patch() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let created = books.insert(json!({"title": "Typed"})).await.unwrap();
    let err = books
        .update_by_id(&created.id, json!({"copies": {"not": "a number"}}))
        .await
        .expect_err("expected error");

    match err {
        StoreError::Validation { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(books.list(), vec![created], "rejected update must not mutate");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    let created = books.insert(json!({"title": "Gone"})).await.unwrap();

    assert!(books.delete_by_id(&created.id).await.unwrap());
    assert!(!books.delete_by_id(&created.id).await.unwrap(), "absent id deletes succeed");
    assert!(!books.delete_by_id("never-existed").await.unwrap());
    assert!(books.list().is_empty());
}

#[tokio::test]
async fn test_replace_all_preserves_supplied_order() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.collection::<Book>();

    books.insert(json!({"title": "first"})).await.unwrap();

    let replacement = vec![
        Book { id: "b2".into(), title: "second".into(), ..Book::default() },
        Book { id: "b1".into(), title: "first".into(), ..Book::default() },
    ];
    let returned = books.replace_all(replacement.clone()).await.unwrap();

    assert_eq!(returned, replacement);
    assert_eq!(books.list(), replacement);
}

#[tokio::test]
async fn test_guarded_delete_refuses_to_empty_collection() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let books = store.guarded::<Book>();

    let only = books.insert(json!({"title": "Suite", "copies": 5})).await.unwrap();

    let err = books.delete_by_id(&only.id).await.expect_err("expected error");
    match err {
        StoreError::Invariant { ref message, .. } => {
            assert_eq!(message, "cannot delete the last remaining book");
        },
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(books.list().len(), 1, "guarded delete must not mutate");

    let second = books.insert(json!({"title": "Second"})).await.unwrap();
    assert!(books.delete_by_id(&only.id).await.unwrap());

    let remaining = books.list();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
}

#[tokio::test]
async fn test_singleton_merge_changes_only_supplied_fields() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;
    let profile = store.singleton::<Profile>();

    profile
        .update(json!({"name": "Central", "motto": "Read more", "hours": {"open": "08:00", "close": "20:00"}}))
        .await
        .unwrap();

    let merged = profile.update(json!({"hours": {"close": "22:00"}})).await.unwrap();

    assert_eq!(merged.name, "Central");
    assert_eq!(merged.motto, "Read more");
    assert_eq!(merged.hours.open, "08:00", "sub-records merge field-by-field");
    assert_eq!(merged.hours.close, "22:00");
    assert_eq!(profile.get(), merged);
}

#[tokio::test]
async fn test_commits_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");

    let created = {
        let store = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();
        let books = store.collection::<Book>();
        books.insert(json!({"title": "Persisted", "copies": 1})).await.unwrap()
    };

    let reopened = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();
    assert_eq!(reopened.collection::<Book>().list(), vec![created]);
}

#[tokio::test]
async fn test_compressed_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.bin");

    let created = {
        let store = DocumentStore::<Library>::builder()
            .path(&path)
            .compression(Compression::Lz4)
            .open()
            .await
            .unwrap();
        store.collection::<Book>().insert(json!({"title": "Packed"})).await.unwrap()
    };

    let reopened = DocumentStore::<Library>::builder()
        .path(&path)
        .compression(Compression::Lz4)
        .open()
        .await
        .unwrap();
    assert_eq!(reopened.collection::<Book>().list(), vec![created]);
}

#[tokio::test]
async fn test_fresh_tmp_files_survive_open() {
    let temp = TempDir::new().unwrap();
    let stray = temp.path().join("library.json.vtmp.99");
    std::fs::write(&stray, b"mid-write").unwrap();

    let _store = open_store(&temp).await;

    assert!(stray.exists(), "recent temp files must not be purged");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_to_distinct_collections_both_survive() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");
    let store = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();

    let books = store.collection::<Book>();
    let members = store.collection::<Member>();

    let book_task = tokio::spawn(async move { books.insert(json!({"title": "Raced"})).await });
    let member_task =
        tokio::spawn(async move { members.insert(json!({"name": "Racer"})).await });

    let book = book_task.await.unwrap().unwrap();
    let member = member_task.await.unwrap().unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.books.len(), 1);
    assert_eq!(snapshot.members.len(), 1);

    drop(store);
    let reopened = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();
    let durable = reopened.snapshot();
    assert_eq!(durable.books, vec![book], "concurrent book insert must survive on disk");
    assert_eq!(durable.members, vec![member], "concurrent member insert must survive on disk");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_commits_are_all_applied() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp).await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let books = store.collection::<Book>();
        tasks.push(tokio::spawn(async move {
            books.insert(json!({"title": format!("Book {i}")})).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.collection::<Book>().list().len(), 16);
}

#[tokio::test]
async fn test_reload_picks_up_external_changes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("library.json");
    let store = DocumentStore::<Library>::builder().path(&path).open().await.unwrap();

    let mut external = Library::default();
    external.profile.name = "Edited by hand".to_owned();
    std::fs::write(&path, serde_json::to_vec_pretty(&external).unwrap()).unwrap();

    store.reload().await.unwrap();
    assert_eq!(store.snapshot().profile.name, "Edited by hand");
}
