//! Ports to the collaborators a conference device depends on
//!
//! The device never owns these objects. The participant is reached through a
//! weak back-reference, the call session is shared, and the core and its
//! encryption engine are looked up on demand.

use super::value_object::{MediaDirection, MediaKind, SecurityLevel};
use crate::domain::shared::value_objects::{IdentityAddress, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Installed encryption engine variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionEngineType {
    /// No end-to-end encryption
    None,
    /// Point-to-point media encryption only
    PointToPoint,
    /// End-to-end encryption for groups (X3DH based)
    LimeX3dh,
}

/// Encryption engine of the conference core
#[cfg_attr(test, mockall::automock)]
pub trait EncryptionEngine: Send + Sync {
    fn engine_type(&self) -> EncryptionEngineType;

    /// Security level the engine grants to the given device address
    fn security_level(&self, address: &IdentityAddress) -> SecurityLevel;
}

/// Core the owning conference runs in
#[cfg_attr(test, mockall::automock)]
pub trait ConferenceCore: Send + Sync {
    fn encryption_engine(&self) -> Option<Arc<dyn EncryptionEngine>>;
}

/// Participant owning one or more devices
#[cfg_attr(test, mockall::automock)]
pub trait Participant: Send + Sync {
    fn address(&self) -> IdentityAddress;

    /// The core, if the participant is still attached to one
    fn core(&self) -> Option<Arc<dyn ConferenceCore>>;
}

/// Call session established with a device
#[cfg_attr(test, mockall::automock)]
pub trait CallSession: Send + Sync {
    fn id(&self) -> SessionId;

    /// Direction negotiated for `kind`, `None` when the stream is absent
    fn negotiated_direction(&self, kind: MediaKind) -> Option<MediaDirection>;
}
