//! Conference bounded context - participant devices
//!
//! A [`ParticipantDevice`] is the in-memory record the conference layer keeps
//! for one endpoint of a participant: membership state, negotiated media
//! directions, conference event subscription and the attached call session.

pub mod device;
pub mod media;
pub mod ports;
pub mod subscription;
pub mod value_object;

pub use device::{DeviceSnapshot, ParticipantDevice};
pub use media::MediaCapabilities;
pub use ports::{CallSession, ConferenceCore, EncryptionEngine, EncryptionEngineType, Participant};
pub use subscription::{ConferenceSubscription, SubscriptionTracker, CONFERENCE_EVENT_PACKAGE};
pub use value_object::{MediaDirection, MediaKind, MembershipState, SecurityLevel};
