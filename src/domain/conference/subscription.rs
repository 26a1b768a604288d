//! Conference event package subscription tracking

use crate::domain::shared::events::{DomainEvent, EventMetadata};
use crate::domain::shared::value_objects::IdentityAddress;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Event package name of conference roster notifications
pub const CONFERENCE_EVENT_PACKAGE: &str = "conference";

/// A device's SUBSCRIBE to the conference event package
///
/// Shared between the subscription layer and the device through `Arc`; the
/// device holds at most one counted reference.
#[derive(Debug)]
pub struct ConferenceSubscription {
    metadata: EventMetadata,
    subscriber: IdentityAddress,
    dialog_id: String,
    expires: u32,
}

impl ConferenceSubscription {
    pub fn new(subscriber: IdentityAddress, dialog_id: String, expires: u32) -> Self {
        Self {
            metadata: EventMetadata::new(CONFERENCE_EVENT_PACKAGE),
            subscriber,
            dialog_id,
            expires,
        }
    }

    pub fn subscriber(&self) -> &IdentityAddress {
        &self.subscriber
    }

    pub fn dialog_id(&self) -> &str {
        &self.dialog_id
    }

    pub fn expires(&self) -> u32 {
        self.expires
    }
}

impl DomainEvent for ConferenceSubscription {
    fn event_type(&self) -> &str {
        &self.metadata.event_type
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }
}

/// Slot holding at most one subscription reference
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    event: Option<Arc<ConferenceSubscription>>,
}

impl SubscriptionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self) -> bool {
        self.event.is_some()
    }

    pub fn event(&self) -> Option<&Arc<ConferenceSubscription>> {
        self.event.as_ref()
    }

    /// Store `event`, releasing the reference previously held.
    pub fn set(&mut self, event: Option<Arc<ConferenceSubscription>>) {
        match (&self.event, &event) {
            (Some(old), Some(new)) => debug!(
                "Replacing conference subscription {} with {}",
                old.dialog_id(),
                new.dialog_id()
            ),
            (None, Some(new)) => debug!(
                "Conference subscription set: {} for {}",
                new.dialog_id(),
                new.subscriber()
            ),
            (Some(old), None) => debug!("Conference subscription cleared: {}", old.dialog_id()),
            (None, None) => {}
        }
        // The previous reference is dropped here
        self.event = event;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(dialog: &str) -> Arc<ConferenceSubscription> {
        let subscriber = IdentityAddress::parse("sip:alice@example.com;gr=xyz").unwrap();
        Arc::new(ConferenceSubscription::new(subscriber, dialog.to_string(), 3600))
    }

    #[test]
    fn test_subscription_metadata() {
        let ev = subscription("dialog-1");
        assert_eq!(ev.event_type(), CONFERENCE_EVENT_PACKAGE);
        assert_eq!(ev.dialog_id(), "dialog-1");
        assert_eq!(ev.expires(), 3600);
        assert!(ev.occurred_at() <= Utc::now());
    }

    #[test]
    fn test_replace_releases_previous_reference() {
        let e1 = subscription("dialog-1");
        let e2 = subscription("dialog-2");
        let mut tracker = SubscriptionTracker::new();
        assert!(!tracker.is_subscribed());

        tracker.set(Some(Arc::clone(&e1)));
        assert_eq!(Arc::strong_count(&e1), 2);
        assert!(tracker.is_subscribed());

        tracker.set(Some(Arc::clone(&e2)));
        assert_eq!(Arc::strong_count(&e1), 1);
        assert_eq!(Arc::strong_count(&e2), 2);
        assert_eq!(tracker.event().unwrap().dialog_id(), "dialog-2");

        tracker.set(None);
        assert_eq!(Arc::strong_count(&e2), 1);
        assert!(!tracker.is_subscribed());
        assert!(tracker.event().is_none());
    }

    #[test]
    fn test_last_holder_destroys_event() {
        let ev = subscription("dialog-1");
        let weak = Arc::downgrade(&ev);
        let mut tracker = SubscriptionTracker::new();

        tracker.set(Some(ev));
        assert!(weak.upgrade().is_some());

        tracker.set(None);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_drop_releases_reference() {
        let ev = subscription("dialog-1");
        {
            let mut tracker = SubscriptionTracker::new();
            tracker.set(Some(Arc::clone(&ev)));
            assert_eq!(Arc::strong_count(&ev), 2);
        }
        assert_eq!(Arc::strong_count(&ev), 1);
    }
}
