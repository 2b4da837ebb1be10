//! Traits tying a document type to the typed repositories.
//!
//! A document is the single serialized root. Its named members are either
//! collections (ordered sequences of [`Entity`] values) or singletons
//! (record-valued [`Section`]s). A document type opts into repository
//! access by implementing [`HasCollection`] and [`HasSingleton`] per member.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A whole-document root: cloneable, serializable, and seedable from defaults.
pub trait Document:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Document for T where
    T: Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// An identity-keyed member of a collection.
///
/// `sanitize` is the declarative boundary between untyped inbound payloads
/// and the stored form: it coerces supplied fields, drops unknown keys,
/// fills kind-specific defaults, and rejects payloads missing required
/// fields. Identity and creation stamps are assigned by the repository,
/// never by the payload.
pub trait Entity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Human-readable singular label, used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Coerces and validates an inbound payload into the stored form.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] when a required field is missing
    /// or malformed.
    fn sanitize(payload: Value) -> Result<Self, StoreError>;

    /// Stamps the creation timestamp on kinds that carry one.
    fn set_created_at(&mut self, _timestamp: String) {}
}

/// A record-valued singleton member: never created or destroyed, only merged.
pub trait Section:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Human-readable label, used in error messages.
    const KIND: &'static str;
}

/// Documents holding an ordered collection of `E`.
pub trait HasCollection<E: Entity>: Document {
    fn collection(&self) -> &[E];

    fn collection_mut(&mut self) -> &mut Vec<E>;
}

/// Documents holding a singleton record `S`.
pub trait HasSingleton<S: Section>: Document {
    fn singleton(&self) -> &S;

    fn singleton_mut(&mut self) -> &mut S;
}
