//! Filters that can veto a push before any delivery job is queued.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::services::payload::NotificationPayload;
use crate::services::recipient::PushRecipient;

/// A predicate over `(recipient, payload)`. Returning `false` vetoes delivery.
pub trait PushFilter: Send + Sync {
    /// Name used in logs when the filter vetoes.
    fn name(&self) -> &str;

    /// Whether delivery may proceed.
    fn allows(&self, recipient: &PushRecipient, payload: &NotificationPayload) -> bool;
}

/// Adapter turning a closure into a named [`PushFilter`].
pub struct FnFilter<F> {
    name: String,
    predicate: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&PushRecipient, &NotificationPayload) -> bool + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> PushFilter for FnFilter<F>
where
    F: Fn(&PushRecipient, &NotificationPayload) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn allows(&self, recipient: &PushRecipient, payload: &NotificationPayload) -> bool {
        (self.predicate)(recipient, payload)
    }
}

/// Drops notification types configured as never-pushed.
#[derive(Debug, Clone)]
pub struct SuppressedTypesFilter {
    codes: HashSet<i32>,
}

impl SuppressedTypesFilter {
    /// Create a filter for the given type codes.
    pub fn new(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }
}

impl PushFilter for SuppressedTypesFilter {
    fn name(&self) -> &str {
        "suppressed_notification_types"
    }

    fn allows(&self, _recipient: &PushRecipient, payload: &NotificationPayload) -> bool {
        !self.codes.contains(&payload.notification_type.code())
    }
}

/// Ordered filter chain, fixed at composition time.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn PushFilter>>,
}

impl FilterChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter; filters run in the order they were added.
    #[must_use]
    pub fn with(mut self, filter: impl PushFilter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Name of the first filter that vetoes, if any.
    ///
    /// Filters after the first veto are not evaluated.
    #[must_use]
    pub fn first_veto(
        &self,
        recipient: &PushRecipient,
        payload: &NotificationPayload,
    ) -> Option<&str> {
        self.filters
            .iter()
            .find(|filter| !filter.allows(recipient, payload))
            .map(|filter| filter.name())
    }

    /// Number of registered filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}
