//! Deletion guard for collections that must never become empty.

use crate::collection::Collection;
use crate::document::{Document, Entity, HasCollection};
use crate::engine::{DocumentStore, Mutation};
use crate::error::StoreError;
use serde_json::Value;

/// Wraps a [`Collection`] so that a delete can never remove the last
/// remaining entity.
///
/// Everything except deletion delegates unchanged. The length check and the
/// removal happen inside one commit, so a concurrent delete cannot slip past
/// the check.
#[derive(Debug)]
pub struct Guarded<D: Document, E: Entity> {
    inner: Collection<D, E>,
}

impl<D: Document, E: Entity> Clone for Guarded<D, E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<D: Document> DocumentStore<D> {
    /// Returns a deletion-guarded repository over the document's collection
    /// of `E`.
    #[must_use]
    pub fn guarded<E>(&self) -> Guarded<D, E>
    where
        D: HasCollection<E>,
        E: Entity,
    {
        Guarded { inner: self.collection() }
    }
}

impl<D, E> Guarded<D, E>
where
    D: HasCollection<E>,
    E: Entity,
{
    /// See [`Collection::list`].
    #[must_use]
    pub fn list(&self) -> Vec<E> {
        self.inner.list()
    }

    /// See [`Collection::insert`].
    ///
    /// # Errors
    /// Same as [`Collection::insert`].
    pub async fn insert(&self, payload: Value) -> Result<E, StoreError> {
        self.inner.insert(payload).await
    }

    /// See [`Collection::update_by_id`].
    ///
    /// # Errors
    /// Same as [`Collection::update_by_id`].
    pub async fn update_by_id(&self, id: &str, patch: Value) -> Result<E, StoreError> {
        self.inner.update_by_id(id, patch).await
    }

    /// Removes the entity with the given id unless it is the last one.
    ///
    /// The length check runs before the lookup, matching the guarded
    /// contract: a collection holding a single entity rejects every delete.
    ///
    /// # Errors
    /// Returns [`StoreError::Invariant`] when the collection would be
    /// emptied, otherwise behaves like [`Collection::delete_by_id`].
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let id = id.to_owned();
        self.inner
            .store
            .update(move |doc| {
                let items = doc.collection_mut();
                if items.len() <= 1 {
                    return Err(StoreError::Invariant {
                        message: format!("cannot delete the last remaining {}", E::KIND).into(),
                        context: None,
                    });
                }

                let Some(index) = items.iter().position(|existing| existing.id() == id) else {
                    return Ok(Mutation::Noop(false));
                };

                items.remove(index);
                Ok(Mutation::Commit(true))
            })
            .await
    }
}
