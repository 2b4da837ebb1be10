//! Partial-merge updates over one record-valued member of the document.

use crate::document::{Document, HasSingleton, Section};
use crate::engine::{DocumentStore, Mutation};
use crate::error::StoreError;
use crate::merge;
use serde_json::Value;
use std::marker::PhantomData;

/// A repository view over the document's singleton record `S`.
///
/// Singletons are never created or destroyed; the only mutation is a partial
/// merge over the current record.
#[derive(Debug)]
pub struct Singleton<D: Document, S: Section> {
    store: DocumentStore<D>,
    _section: PhantomData<S>,
}

impl<D: Document, S: Section> Clone for Singleton<D, S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), _section: PhantomData }
    }
}

impl<D: Document> DocumentStore<D> {
    /// Returns a typed repository over the document's singleton `S`.
    #[must_use]
    pub fn singleton<S>(&self) -> Singleton<D, S>
    where
        D: HasSingleton<S>,
        S: Section,
    {
        Singleton { store: self.clone(), _section: PhantomData }
    }
}

impl<D, S> Singleton<D, S>
where
    D: HasSingleton<S>,
    S: Section,
{
    /// Current record.
    #[must_use]
    pub fn get(&self) -> S {
        self.store.snapshot().singleton().clone()
    }

    /// Merges `patch` over the current record and persists.
    ///
    /// The merge is one level deep: a supplied object merges field-by-field
    /// into a stored object under the same key; scalars and arrays replace
    /// wholesale. Fields absent from `patch` keep their stored values.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] if the patch is not an object or
    /// the merged value no longer matches the record's shape, and the
    /// store's I/O errors when persisting fails.
    pub async fn update(&self, patch: Value) -> Result<S, StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::Validation {
                message: "payload must be a JSON object".into(),
                context: None,
            });
        };

        self.store
            .update(move |doc| {
                let slot = doc.singleton_mut();

                let mut current = serde_json::to_value(&*slot)?;
                merge::merge_section(&mut current, patch);

                let merged: S = serde_json::from_value(current).map_err(|err| {
                    StoreError::Validation {
                        message: err.to_string().into(),
                        context: Some(format!("Patch does not fit {}", S::KIND).into()),
                    }
                })?;

                *slot = merged.clone();
                Ok(Mutation::Commit(merged))
            })
            .await
    }
}
