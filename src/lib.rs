//! Conference participant devices
//!
//! In-memory model of one device of a conference participant: identity,
//! membership state, per-media negotiated directions, security level lookup
//! and conference event subscription bookkeeping. Signaling, media
//! negotiation and encryption are external collaborators reached through the
//! traits in [`domain::conference::ports`].

pub mod config;
pub mod domain;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
