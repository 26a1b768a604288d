//! Media capability store
//!
//! Keeps exactly one negotiated direction per [`MediaKind`]. Setters report
//! whether the stored value changed so callers can skip redundant
//! renegotiation signaling.

use super::ports::CallSession;
use super::value_object::{MediaDirection, MediaKind};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCapabilities {
    directions: BTreeMap<MediaKind, MediaDirection>,
}

impl MediaCapabilities {
    /// All kinds inactive
    pub fn new() -> Self {
        Self::with_directions(
            MediaDirection::Inactive,
            MediaDirection::Inactive,
            MediaDirection::Inactive,
        )
    }

    pub fn with_directions(audio: MediaDirection, video: MediaDirection, text: MediaDirection) -> Self {
        let directions = BTreeMap::from([
            (MediaKind::Audio, audio),
            (MediaKind::Video, video),
            (MediaKind::Text, text),
        ]);
        Self { directions }
    }

    pub fn direction(&self, kind: MediaKind) -> MediaDirection {
        self.directions.get(&kind).copied().unwrap_or_default()
    }

    /// Store `direction` for `kind`, returning true if it differs from the previous value.
    pub fn set_direction(&mut self, kind: MediaKind, direction: MediaDirection) -> bool {
        let previous = self.directions.insert(kind, direction);
        let changed = previous != Some(direction);
        if changed {
            debug!(
                "{} direction: {} -> {}",
                kind,
                previous.unwrap_or_default(),
                direction
            );
        }
        changed
    }

    /// Recompute every kind from the session's negotiation.
    ///
    /// Without a session, or for a stream the session does not carry, the
    /// direction falls back to inactive. Returns true if any kind changed.
    pub fn update_from(&mut self, session: Option<&dyn CallSession>) -> bool {
        let mut changed = false;
        for kind in MediaKind::ALL {
            let direction = session
                .and_then(|s| s.negotiated_direction(kind))
                .unwrap_or(MediaDirection::Inactive);
            changed |= self.set_direction(kind, direction);
        }
        changed
    }

    pub fn iter(&self) -> impl Iterator<Item = (MediaKind, MediaDirection)> + '_ {
        self.directions.iter().map(|(kind, dir)| (*kind, *dir))
    }
}

impl Default for MediaCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conference::ports::MockCallSession;

    #[test]
    fn test_one_entry_per_kind() {
        let caps = MediaCapabilities::new();
        assert_eq!(caps.iter().count(), 3);
        for kind in MediaKind::ALL {
            assert_eq!(caps.direction(kind), MediaDirection::Inactive);
        }
    }

    #[test]
    fn test_set_direction_reports_change() {
        let mut caps = MediaCapabilities::new();

        assert!(caps.set_direction(MediaKind::Audio, MediaDirection::SendRecv));
        assert!(!caps.set_direction(MediaKind::Audio, MediaDirection::SendRecv));
        assert_eq!(caps.direction(MediaKind::Audio), MediaDirection::SendRecv);

        // Setting the current default is not a change
        assert!(!caps.set_direction(MediaKind::Video, MediaDirection::Inactive));
        assert_eq!(caps.iter().count(), 3);
    }

    #[test]
    fn test_every_kind_kept_across_updates() {
        let mut caps = MediaCapabilities::with_directions(
            MediaDirection::SendRecv,
            MediaDirection::SendOnly,
            MediaDirection::RecvOnly,
        );
        for kind in MediaKind::ALL {
            caps.set_direction(kind, MediaDirection::Inactive);
            assert!(!caps.set_direction(kind, MediaDirection::Inactive));
        }
        caps.update_from(None);

        let kinds: Vec<MediaKind> = caps.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, MediaKind::ALL.to_vec());
    }

    #[test]
    fn test_update_from_session() {
        let mut session = MockCallSession::new();
        session
            .expect_negotiated_direction()
            .returning(|kind| match kind {
                MediaKind::Audio => Some(MediaDirection::SendRecv),
                MediaKind::Video => Some(MediaDirection::RecvOnly),
                MediaKind::Text => None,
            });

        let mut caps = MediaCapabilities::new();
        assert!(caps.update_from(Some(&session)));
        assert_eq!(caps.direction(MediaKind::Audio), MediaDirection::SendRecv);
        assert_eq!(caps.direction(MediaKind::Video), MediaDirection::RecvOnly);
        assert_eq!(caps.direction(MediaKind::Text), MediaDirection::Inactive);

        // Same negotiation again changes nothing
        assert!(!caps.update_from(Some(&session)));
    }

    #[test]
    fn test_update_without_session_deactivates() {
        let mut caps = MediaCapabilities::with_directions(
            MediaDirection::SendRecv,
            MediaDirection::Inactive,
            MediaDirection::Inactive,
        );

        assert!(caps.update_from(None));
        assert_eq!(caps.direction(MediaKind::Audio), MediaDirection::Inactive);
        assert!(!caps.update_from(None));
    }
}
