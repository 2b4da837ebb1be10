//! A whole-document store with typed repositories.
//!
//! The entire dataset lives in one serialized document. Reads are lock-free
//! against the last committed snapshot; every mutation is a serialized
//! load-modify-save commit, persisted atomically before it is published.
//!
//! # Core Features
//!
//! - **Snapshot reads**: [`DocumentStore::snapshot`] returns the committed
//!   document without locking or disk access.
//! - **Single-writer commits**: concurrent mutations to unrelated members of
//!   the document are serialized through one writer gate and can never lose
//!   each other's writes.
//! - **Atomic persistence**: unique temp write + `fsync` + `rename`; a crash
//!   never leaves a torn document, and stale temp files are purged on open.
//! - **Typed repositories**: [`Collection`] (identity-keyed CRUD with
//!   per-kind sanitizers), [`Singleton`] (partial-merge records), and
//!   [`Guarded`] (collections that must never be emptied by a delete).
//! - **Transparent compression**: optional LZ4 for the on-disk form.
//!
//! # Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::{Value, json};
//! use veranda_store::{
//!     Collection, DocumentStore, Entity, HasCollection, StoreError,
//! };
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(default, rename_all = "camelCase")]
//! struct Inventory {
//!     items: Vec<Item>,
//! }
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(default, rename_all = "camelCase")]
//! struct Item {
//!     id: String,
//!     label: String,
//! }
//!
//! impl Entity for Item {
//!     const KIND: &'static str = "item";
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn set_id(&mut self, id: String) {
//!         self.id = id;
//!     }
//!
//!     fn sanitize(payload: Value) -> Result<Self, StoreError> {
//!         serde_json::from_value(payload).map_err(|err| StoreError::Validation {
//!             message: err.to_string().into(),
//!             context: None,
//!         })
//!     }
//! }
//!
//! impl HasCollection<Item> for Inventory {
//!     fn collection(&self) -> &[Item] {
//!         &self.items
//!     }
//!
//!     fn collection_mut(&mut self) -> &mut Vec<Item> {
//!         &mut self.items
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StoreError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let path = tmp.path().join("inventory.json");
//!     let store = DocumentStore::<Inventory>::builder().path(&path).open().await?;
//!
//!     let items: Collection<Inventory, Item> = store.collection();
//!     let created = items.insert(json!({"label": "lantern"})).await?;
//!
//!     assert_eq!(created.label, "lantern");
//!     assert_eq!(items.list().len(), 1);
//!     Ok(())
//! }
//! ```

mod builder;
mod collection;
mod document;
mod engine;
mod error;
mod guard;
mod maintenance;
mod merge;
mod singleton;

pub use builder::StoreBuilder;
pub use collection::Collection;
pub use document::{Document, Entity, HasCollection, HasSingleton, Section};
pub use engine::{Compression, DocumentStore, Mutation};
pub use error::{StoreError, StoreErrorExt};
pub use guard::Guarded;
pub use singleton::Singleton;
