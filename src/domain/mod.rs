//! Domain layer
//!
//! This layer contains:
//! - Shared kernel: errors, identity addresses, event metadata
//! - Conference context: the participant device entity, its value objects
//!   and the ports to the collaborators it consults

pub mod conference;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
