use std::ops::Deref;
use std::sync::Arc;

use axum::extract::FromRef;
use veranda_domain::{AppConfig, SiteDocument};
use veranda_media::MediaStore;
use veranda_store::DocumentStore;

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: AppConfig,
    pub store: DocumentStore<SiteDocument>,
    pub media: MediaStore,
}

/// Shared application state handed to every handler.
///
/// Cloning is cheap; all members are themselves shared handles.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn new(config: AppConfig, store: DocumentStore<SiteDocument>, media: MediaStore) -> Self {
        Self { inner: Arc::new(ApiStateInner { config, store, media }) }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for AppConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for DocumentStore<SiteDocument> {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.store.clone()
    }
}

impl FromRef<ApiState> for MediaStore {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.media.clone()
    }
}
