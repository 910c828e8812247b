//! Feature store contract consumed by the read path, plus an in-memory reference store.

use flip_domain::Feature;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

#[flip_derive::flip_error]
pub enum StoreError {
    /// No feature is registered under the requested uid.
    #[error("Feature '{uid}' does not exist{}", format_context(.context))]
    FeatureNotFound { uid: String, context: Option<Cow<'static, str>> },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Read access to the features owned by the application.
///
/// Implementations must be safe to call from many request tasks at once.
pub trait FeatureStore: Debug + Send + Sync {
    /// # Errors
    /// Returns [`StoreError::FeatureNotFound`] when `uid` is unknown.
    fn find_by_id(&self, uid: &str) -> Result<Feature, StoreError>;

    fn exists(&self, uid: &str) -> bool {
        self.find_by_id(uid).is_ok()
    }

    /// All features, ordered by uid.
    ///
    /// # Errors
    /// Returns [`StoreError::Internal`] if the backing storage cannot be read.
    fn find_all(&self) -> Result<Vec<Feature>, StoreError>;

    /// Number of stored features. Override when the backend can count without loading.
    ///
    /// # Errors
    /// Returns [`StoreError::Internal`] if the backing storage cannot be read.
    fn count(&self) -> Result<usize, StoreError> {
        self.find_all().map(|features| features.len())
    }
}

/// Process-local store backed by a sorted map behind a read-mostly lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeatureStore {
    features: Arc<RwLock<BTreeMap<String, Feature>>>,
}

impl InMemoryFeatureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a feature, keyed by its uid.
    pub fn insert(&self, feature: Feature) {
        self.features.write().insert(feature.uid().to_owned(), feature);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.read().len()
    }
}

impl FromIterator<Feature> for InMemoryFeatureStore {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let features = iter.into_iter().map(|f| (f.uid().to_owned(), f)).collect();
        Self { features: Arc::new(RwLock::new(features)) }
    }
}

impl FeatureStore for InMemoryFeatureStore {
    fn find_by_id(&self, uid: &str) -> Result<Feature, StoreError> {
        self.features
            .read()
            .get(uid)
            .cloned()
            .ok_or_else(|| StoreError::FeatureNotFound { uid: uid.to_owned(), context: None })
    }

    fn exists(&self, uid: &str) -> bool {
        self.features.read().contains_key(uid)
    }

    fn find_all(&self) -> Result<Vec<Feature>, StoreError> {
        Ok(self.features.read().values().cloned().collect())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryFeatureStore {
        ["F1", "F2", "F3"]
            .into_iter()
            .map(|uid| Feature::new(uid).expect("valid uid"))
            .collect()
    }

    #[test]
    fn finds_known_feature() {
        let store = store();
        assert_eq!(store.find_by_id("F2").unwrap().uid(), "F2");
        assert!(store.exists("F3"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn unknown_feature_does_not_exist() {
        let err = store().find_by_id("F_DOESNOTEXIST").unwrap_err();
        assert!(matches!(err, StoreError::FeatureNotFound { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn find_all_is_sorted_by_uid() {
        let store = store();
        store.insert(Feature::new("A0").unwrap());
        let uids: Vec<_> = store.find_all().unwrap().iter().map(|f| f.uid().to_owned()).collect();
        assert_eq!(uids, ["A0", "F1", "F2", "F3"]);
    }

    /// Store that only knows how to list, so `count` falls back to `find_all`.
    #[derive(Debug)]
    struct ListOnly(InMemoryFeatureStore);

    impl FeatureStore for ListOnly {
        fn find_by_id(&self, uid: &str) -> Result<Feature, StoreError> {
            self.0.find_by_id(uid)
        }

        fn find_all(&self) -> Result<Vec<Feature>, StoreError> {
            self.0.find_all()
        }
    }

    #[test]
    fn count_tracks_inserts() {
        let store = store();
        assert_eq!(store.count().unwrap(), 3);
        store.insert(Feature::new("F4").unwrap());
        store.insert(Feature::new("F4").unwrap().with_enable(true));
        assert_eq!(store.count().unwrap(), 4);

        let listed = ListOnly(store);
        assert_eq!(listed.count().unwrap(), 4);
        assert_eq!(InMemoryFeatureStore::new().count().unwrap(), 0);
    }
}
