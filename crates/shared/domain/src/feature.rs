use crate::constants::json;
use crate::strategy::{FlippingContext, FlippingStrategy, StrategyRef};
use crate::DomainError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A named toggle with metadata and an optional activation strategy.
///
/// The uid is validated on construction and never changes afterwards; the
/// remaining fields are set through the consuming `with_*` methods while the
/// feature is being assembled.
#[derive(Debug, Clone)]
pub struct Feature {
    uid: String,
    enable: bool,
    description: Option<String>,
    group: Option<String>,
    permissions: BTreeSet<String>,
    flipping_strategy: Option<Arc<dyn FlippingStrategy>>,
}

impl Feature {
    /// Creates a disabled feature without metadata.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidUid`] if `uid` is empty or whitespace.
    pub fn new(uid: impl Into<String>) -> Result<Self, DomainError> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(DomainError::InvalidUid {
                message: "feature uid cannot be empty".into(),
                context: None,
            });
        }

        Ok(Self {
            uid,
            enable: false,
            description: None,
            group: None,
            permissions: BTreeSet::new(),
            flipping_strategy: None,
        })
    }

    #[must_use]
    pub const fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Replaces the permission set; duplicates collapse.
    #[must_use]
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn FlippingStrategy>) -> Self {
        self.flipping_strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enable
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Role identifiers; empty means unrestricted.
    #[must_use]
    pub const fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    #[must_use]
    pub fn flipping_strategy(&self) -> Option<&dyn FlippingStrategy> {
        self.flipping_strategy.as_deref()
    }

    /// `enable` gated by the strategy, when one is attached.
    #[must_use]
    pub fn is_active(&self, context: &FlippingContext) -> bool {
        self.enable
            && self.flipping_strategy.as_ref().is_none_or(|s| s.evaluate(&self.uid, context))
    }

    fn strategy_ref(&self) -> Option<StrategyRef> {
        self.flipping_strategy.as_ref().map(|s| s.to_ref())
    }
}

/// Strategies compare by type name and parameters.
impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
            && self.enable == other.enable
            && self.description == other.description
            && self.group == other.group
            && self.permissions == other.permissions
            && self.strategy_ref() == other.strategy_ref()
    }
}

impl Eq for Feature {}

/// Canonical document shape: `uid` and `enable` always, the rest only when present.
impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let strategy = self.strategy_ref();
        let len = 2
            + usize::from(self.description.is_some())
            + usize::from(self.group.is_some())
            + usize::from(!self.permissions.is_empty())
            + usize::from(strategy.is_some());

        let mut doc = serializer.serialize_struct("Feature", len)?;
        doc.serialize_field(json::UID, &self.uid)?;
        doc.serialize_field(json::ENABLE, &self.enable)?;

        match &self.description {
            Some(description) => doc.serialize_field(json::DESCRIPTION, description)?,
            None => doc.skip_field(json::DESCRIPTION)?,
        }
        match &self.group {
            Some(group) => doc.serialize_field(json::GROUP, group)?,
            None => doc.skip_field(json::GROUP)?,
        }
        if self.permissions.is_empty() {
            doc.skip_field(json::PERMISSIONS)?;
        } else {
            doc.serialize_field(json::PERMISSIONS, &self.permissions)?;
        }
        match &strategy {
            Some(strategy) => doc.serialize_field(json::FLIPPING_STRATEGY, strategy)?,
            None => doc.skip_field(json::FLIPPING_STRATEGY)?,
        }

        doc.end()
    }
}
