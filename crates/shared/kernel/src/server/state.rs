use crate::store::FeatureStore;
use axum::extract::FromRef;
use flip_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[flip_derive::flip_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub store: Arc<dyn FeatureStore>,
}

/// Cheaply clonable state handed to every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Arc<dyn FeatureStore> {
    fn from_ref(state: &ApiState) -> Self {
        Arc::clone(&state.inner.store)
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    store: Option<Arc<dyn FeatureStore>>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn FeatureStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Finalizes the state; the config falls back to defaults, the store is mandatory.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] if no store was provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let store = self.store.ok_or_else(|| ApiStateError::Validation {
            message: "FeatureStore not provided".into(),
            context: None,
        })?;
        let config = self.config.unwrap_or_default();

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, store }) })
    }
}
