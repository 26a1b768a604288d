//! Conference device value objects

use crate::domain::shared::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership state of a device in a conference
///
/// The SIP layer drives transitions; the device only stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MembershipState {
    /// Server-hosted roster entry, no INVITE dispatched yet
    ScheduledForJoining,
    /// An INVITE has been sent
    #[default]
    Joining,
    /// The SIP session is established
    Present,
    /// A BYE is pending
    Leaving,
    /// The session is terminated
    Left,
    /// A BYE will be sent shortly
    ScheduledForLeaving,
}

impl MembershipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipState::ScheduledForJoining => "ScheduledForJoining",
            MembershipState::Joining => "Joining",
            MembershipState::Present => "Present",
            MembershipState::Leaving => "Leaving",
            MembershipState::Left => "Left",
            MembershipState::ScheduledForLeaving => "ScheduledForLeaving",
        }
    }

    /// Whether moving to `next` follows the usual join/leave path.
    ///
    /// Informational only: [`ParticipantDevice::set_state`] accepts any
    /// transition and merely logs the unusual ones.
    ///
    /// [`ParticipantDevice::set_state`]: super::device::ParticipantDevice::set_state
    pub fn is_expected_transition(&self, next: MembershipState) -> bool {
        use MembershipState::*;

        match (self, next) {
            (a, b) if *a == b => true,
            // Devices start in `Joining`; server-hosted rosters step back before the INVITE
            (Joining, ScheduledForJoining) => true,
            (ScheduledForJoining, Joining) => true,
            (Joining, Present) | (Joining, Left) => true,
            (Present, Leaving) | (Present, ScheduledForLeaving) | (Present, Left) => true,
            (ScheduledForLeaving, Leaving) => true,
            (Leaving, Left) => true,
            _ => false,
        }
    }
}

impl fmt::Display for MembershipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media kinds a conference device can negotiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    Text,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Audio, MediaKind::Video, MediaKind::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Text => "text",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negotiated media direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaDirection {
    /// Send and receive media
    SendRecv,
    /// Send only
    SendOnly,
    /// Receive only
    RecvOnly,
    /// No media flow
    #[default]
    Inactive,
}

impl MediaDirection {
    /// SDP attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaDirection::SendRecv => "sendrecv",
            MediaDirection::SendOnly => "sendonly",
            MediaDirection::RecvOnly => "recvonly",
            MediaDirection::Inactive => "inactive",
        }
    }
}

impl fmt::Display for MediaDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sendrecv" => Ok(MediaDirection::SendRecv),
            "sendonly" => Ok(MediaDirection::SendOnly),
            "recvonly" => Ok(MediaDirection::RecvOnly),
            "inactive" => Ok(MediaDirection::Inactive),
            other => Err(DomainError::ValidationError(format!(
                "unknown media direction '{}'",
                other
            ))),
        }
    }
}

/// Security level in effect for a device, weakest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SecurityLevel {
    /// Identity could not be trusted
    Unsafe,
    /// No encryption
    ClearText,
    /// End-to-end encrypted, identity not verified
    Encrypted,
    /// End-to-end encrypted and verified
    Safe,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecurityLevel::Unsafe => "Unsafe",
            SecurityLevel::ClearText => "ClearText",
            SecurityLevel::Encrypted => "Encrypted",
            SecurityLevel::Safe => "Safe",
        };
        f.write_str(s)
    }
}
