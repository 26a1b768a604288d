//! Participant device entity
//!
//! One endpoint through which a participant takes part in a conference. The
//! device is owned by its participant and is deliberately not `Clone`; other
//! components refer to it by address. Everything here is plain in-memory
//! bookkeeping mutated from the conference's serialized event loop.

use super::media::MediaCapabilities;
use super::ports::{CallSession, ConferenceCore, Participant};
use super::subscription::{ConferenceSubscription, SubscriptionTracker};
use super::value_object::{MediaDirection, MediaKind, MembershipState, SecurityLevel};
use crate::domain::shared::value_objects::IdentityAddress;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Conference participant device
#[derive(Default)]
pub struct ParticipantDevice {
    /// Back-reference to the owning participant, `None` for a placeholder
    participant: Option<Weak<dyn Participant>>,
    /// GRUU, fixed for the device's lifetime
    address: IdentityAddress,
    name: String,
    capability_descriptor: String,
    state: MembershipState,
    /// Set on the first transition to `Present`
    time_of_joining: Option<DateTime<Utc>>,
    media: MediaCapabilities,
    session: Option<Arc<dyn CallSession>>,
    subscription: SubscriptionTracker,
    /// Caller-owned data, never kept alive by the device
    user_data: Option<Weak<dyn Any + Send + Sync>>,
}

impl ParticipantDevice {
    /// Create a device bound to `participant`, all media inactive
    pub fn new(
        participant: Weak<dyn Participant>,
        address: IdentityAddress,
        name: impl Into<String>,
    ) -> Self {
        Self::with_media(participant, address, name, MediaCapabilities::new())
    }

    /// Create a device with initial media directions
    pub fn with_media(
        participant: Weak<dyn Participant>,
        address: IdentityAddress,
        name: impl Into<String>,
        media: MediaCapabilities,
    ) -> Self {
        let device = Self {
            participant: Some(participant),
            address,
            name: name.into(),
            capability_descriptor: String::new(),
            state: MembershipState::default(),
            time_of_joining: None,
            media,
            session: None,
            subscription: SubscriptionTracker::new(),
            user_data: None,
        };
        if !device.is_valid() {
            warn!("Participant device created without a valid address");
        }
        debug!("Participant device created: {}", device.address);
        device
    }

    pub fn address(&self) -> &IdentityAddress {
        &self.address
    }

    pub fn is_valid(&self) -> bool {
        self.address.is_valid()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Owning participant, `None` once it has been dropped
    pub fn participant(&self) -> Option<Arc<dyn Participant>> {
        self.participant.as_ref()?.upgrade()
    }

    /// Core of the owning participant
    pub fn core(&self) -> Option<Arc<dyn ConferenceCore>> {
        self.participant()?.core()
    }

    pub fn state(&self) -> MembershipState {
        self.state
    }

    /// Record a new membership state.
    ///
    /// Any transition is accepted. The first entry into `Present` stamps the
    /// time of joining; later entries leave it untouched.
    pub fn set_state(&mut self, state: MembershipState) {
        if !self.state.is_expected_transition(state) {
            warn!(
                "Unusual state transition for device {}: {} -> {}",
                self.address, self.state, state
            );
        }

        if state == MembershipState::Present && self.time_of_joining.is_none() {
            self.time_of_joining = Some(Utc::now());
        }

        if self.state != state {
            info!(
                "Device {} state: {} -> {}",
                self.address, self.state, state
            );
        }
        self.state = state;
    }

    pub fn is_in_conference(&self) -> bool {
        self.state == MembershipState::Present
    }

    pub fn time_of_joining(&self) -> Option<DateTime<Utc>> {
        self.time_of_joining
    }

    pub fn session(&self) -> Option<Arc<dyn CallSession>> {
        self.session.clone()
    }

    pub fn set_session(&mut self, session: Option<Arc<dyn CallSession>>) {
        match &session {
            Some(s) => debug!("Device {} attached to session {}", self.address, s.id()),
            None => debug!("Device {} detached from its session", self.address),
        }
        self.session = session;
    }

    /// Security level granted by the core's encryption engine, whatever its type.
    ///
    /// Without a core or an engine the device is in clear text.
    pub fn security_level(&self) -> SecurityLevel {
        let Some(engine) = self.core().and_then(|core| core.encryption_engine()) else {
            warn!(
                "No encryption engine available for device {}, assuming clear text",
                self.address
            );
            return SecurityLevel::ClearText;
        };

        debug!(
            "Querying {:?} encryption engine for device {}",
            engine.engine_type(),
            self.address
        );
        engine.security_level(&self.address)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    pub fn subscription_event(&self) -> Option<&Arc<ConferenceSubscription>> {
        self.subscription.event()
    }

    /// Hold `event`, releasing the previously held subscription. `None` clears the slot.
    pub fn set_subscription_event(&mut self, event: Option<Arc<ConferenceSubscription>>) {
        self.subscription.set(event);
    }

    pub fn capability_descriptor(&self) -> &str {
        &self.capability_descriptor
    }

    pub fn set_capability_descriptor(&mut self, descriptor: impl Into<String>) {
        self.capability_descriptor = descriptor.into();
    }

    /// Caller data, if it is still alive and of type `T`
    pub fn user_data<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let data = self.user_data.as_ref()?.upgrade()?;
        data.downcast::<T>().ok()
    }

    /// Remember `data` without taking ownership of it
    pub fn set_user_data<T: Any + Send + Sync>(&mut self, data: &Arc<T>) {
        let weak: Weak<T> = Arc::downgrade(data);
        self.user_data = Some(weak);
    }

    pub fn clear_user_data(&mut self) {
        self.user_data = None;
    }

    pub fn direction(&self, kind: MediaKind) -> MediaDirection {
        self.media.direction(kind)
    }

    /// Returns false when `direction` is already the stored value
    pub fn set_direction(&mut self, kind: MediaKind, direction: MediaDirection) -> bool {
        self.media.set_direction(kind, direction)
    }

    pub fn audio_direction(&self) -> MediaDirection {
        self.direction(MediaKind::Audio)
    }

    pub fn video_direction(&self) -> MediaDirection {
        self.direction(MediaKind::Video)
    }

    pub fn text_direction(&self) -> MediaDirection {
        self.direction(MediaKind::Text)
    }

    pub fn set_audio_direction(&mut self, direction: MediaDirection) -> bool {
        self.set_direction(MediaKind::Audio, direction)
    }

    pub fn set_video_direction(&mut self, direction: MediaDirection) -> bool {
        self.set_direction(MediaKind::Video, direction)
    }

    pub fn set_text_direction(&mut self, direction: MediaDirection) -> bool {
        self.set_direction(MediaKind::Text, direction)
    }

    /// Refresh all directions from the attached session after a renegotiation.
    ///
    /// Returns true if any direction changed.
    pub fn update_media(&mut self) -> bool {
        let changed = self.media.update_from(self.session.as_deref());
        if changed {
            debug!("Media of device {} updated", self.address);
        }
        changed
    }

    pub fn media(&self) -> &MediaCapabilities {
        &self.media
    }

    /// Diagnostic view of the device
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            address: self.address.to_string(),
            name: self.name.clone(),
            state: self.state,
            time_of_joining: self.time_of_joining,
            media: self.media.iter().collect(),
            subscribed: self.is_subscribed(),
            subscription_expires: self.subscription_event().map(|ev| ev.expires()),
            session: self.session.as_ref().map(|s| s.id().to_string()),
        }
    }
}

impl PartialEq for ParticipantDevice {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for ParticipantDevice {}

impl Hash for ParticipantDevice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Debug for ParticipantDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantDevice")
            .field("address", &self.address)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("time_of_joining", &self.time_of_joining)
            .field("media", &self.media)
            .field("subscribed", &self.is_subscribed())
            .field("has_session", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for ParticipantDevice {
    fn drop(&mut self) {
        if self.subscription.is_subscribed() {
            debug!("Releasing conference subscription of device {}", self.address);
            self.subscription.set(None);
        }
    }
}

/// Serializable view of a device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub address: String,
    pub name: String,
    pub state: MembershipState,
    pub time_of_joining: Option<DateTime<Utc>>,
    pub media: BTreeMap<MediaKind, MediaDirection>,
    pub subscribed: bool,
    pub subscription_expires: Option<u32>,
    pub session: Option<String>,
}

impl DeviceSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
