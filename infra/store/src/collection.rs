//! Typed CRUD over one identity-keyed collection of the document.

use crate::document::{Document, Entity, HasCollection};
use crate::engine::{DocumentStore, Mutation};
use crate::error::StoreError;
use crate::merge;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::marker::PhantomData;
use veranda_kernel::safe_nanoid;

/// A repository view over the document's collection of `E`.
///
/// The view holds a clone of the store handle; it is cheap to construct and
/// clone. Reads come from the committed snapshot, mutations go through the
/// store's writer gate.
#[derive(Debug)]
pub struct Collection<D: Document, E: Entity> {
    pub(crate) store: DocumentStore<D>,
    _entity: PhantomData<E>,
}

impl<D: Document, E: Entity> Clone for Collection<D, E> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), _entity: PhantomData }
    }
}

impl<D: Document> DocumentStore<D> {
    /// Returns a typed repository over the document's collection of `E`.
    #[must_use]
    pub fn collection<E>(&self) -> Collection<D, E>
    where
        D: HasCollection<E>,
        E: Entity,
    {
        Collection { store: self.clone(), _entity: PhantomData }
    }
}

impl<D, E> Collection<D, E>
where
    D: HasCollection<E>,
    E: Entity,
{
    /// Full ordered sequence of entities, insertion order preserved.
    #[must_use]
    pub fn list(&self) -> Vec<E> {
        self.store.snapshot().collection().to_vec()
    }

    /// Sanitizes `payload`, assigns a fresh id and creation stamp, appends
    /// the entity, and persists.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] when the payload fails the
    /// entity's sanitizer, or the store's I/O errors when persisting fails.
    pub async fn insert(&self, payload: Value) -> Result<E, StoreError> {
        let mut entity = E::sanitize(payload)?;

        self.store
            .update(move |doc| {
                let items = doc.collection_mut();

                let mut id = safe_nanoid!();
                while items.iter().any(|existing| existing.id() == id) {
                    id = safe_nanoid!();
                }
                entity.set_id(id);
                entity.set_created_at(now_rfc3339());

                items.push(entity.clone());
                Ok(Mutation::Commit(entity))
            })
            .await
    }

    /// Shallow-merges `patch` over the entity with the given id and persists.
    ///
    /// Fields absent from `patch` keep their stored values; the `id` field is
    /// immutable even when the patch supplies one.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no entity carries `id`, and
    /// [`StoreError::Validation`] if the patch is not an object or the merged
    /// value no longer matches the entity's shape.
    pub async fn update_by_id(&self, id: &str, patch: Value) -> Result<E, StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::Validation {
                message: "payload must be a JSON object".into(),
                context: None,
            });
        };

        let id = id.to_owned();
        self.store
            .update(move |doc| {
                let items = doc.collection_mut();
                let Some(slot) = items.iter_mut().find(|existing| existing.id() == id) else {
                    return Err(StoreError::NotFound {
                        message: format!("{} {id} does not exist", E::KIND).into(),
                        context: None,
                    });
                };

                let mut current = serde_json::to_value(&*slot)?;
                merge::merge_entity(&mut current, patch);

                let merged: E = serde_json::from_value(current).map_err(|err| {
                    StoreError::Validation {
                        message: err.to_string().into(),
                        context: Some(format!("Patch does not fit {}", E::KIND).into()),
                    }
                })?;

                *slot = merged.clone();
                Ok(Mutation::Commit(merged))
            })
            .await
    }

    /// Removes the first entity with the given id.
    ///
    /// Returns `true` when an entity was removed. An absent id is a success
    /// without mutation: deletes are idempotent.
    ///
    /// # Errors
    /// Returns the store's I/O errors when persisting the removal fails.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let id = id.to_owned();
        self.store
            .update(move |doc| {
                let items = doc.collection_mut();
                let Some(index) = items.iter().position(|existing| existing.id() == id) else {
                    return Ok(Mutation::Noop(false));
                };

                items.remove(index);
                Ok(Mutation::Commit(true))
            })
            .await
    }

    /// Wholesale replacement of the collection, preserving the supplied
    /// order. No per-entity validation is applied; this is the reorder
    /// primitive.
    ///
    /// # Errors
    /// Returns the store's I/O errors when persisting fails.
    pub async fn replace_all(&self, entries: Vec<E>) -> Result<Vec<E>, StoreError> {
        self.store
            .update(move |doc| {
                *doc.collection_mut() = entries.clone();
                Ok(Mutation::Commit(entries))
            })
            .await
    }
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
