//! Shared value objects used across multiple bounded contexts

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Call session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity address of a device (GRUU)
///
/// A SIP or SIPS URI reduced to the parts that identify an endpoint:
/// scheme, user, domain, optional port and the `gr` parameter. The default
/// value is empty and fails [`IdentityAddress::is_valid`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityAddress {
    scheme: String,
    username: Option<String>,
    domain: String,
    port: Option<u16>,
    gruu: Option<String>,
}

impl IdentityAddress {
    pub fn new(username: Option<String>, domain: String, gruu: Option<String>) -> Self {
        Self {
            scheme: "sip".to_string(),
            username,
            domain,
            port: None,
            gruu,
        }
    }

    /// Parse `sip:user@host[:port][;gr=...]`, ignoring any other URI parameter.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        let (scheme, rest) = uri
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidAddress(format!("missing scheme in '{}'", uri)))?;

        let scheme = scheme.to_ascii_lowercase();
        if scheme != "sip" && scheme != "sips" {
            return Err(DomainError::InvalidAddress(format!(
                "unsupported scheme '{}'",
                scheme
            )));
        }

        let mut parts = rest.split(';');
        let user_host = parts.next().unwrap_or_default();
        let gruu = parts
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.eq_ignore_ascii_case("gr"))
            .map(|(_, value)| value.to_string());

        let (username, host_port) = match user_host.rsplit_once('@') {
            Some((user, host)) if !user.is_empty() => (Some(user.to_string()), host),
            Some((_, host)) => (None, host),
            None => (None, user_host),
        };

        let (domain, port) = match host_port.split_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    DomainError::InvalidAddress(format!("invalid port '{}'", port))
                })?;
                (host, Some(port))
            }
            None => (host_port, None),
        };

        if domain.is_empty() {
            return Err(DomainError::InvalidAddress(format!(
                "missing domain in '{}'",
                uri
            )));
        }

        Ok(Self {
            scheme,
            username,
            domain: domain.to_string(),
            port,
            gruu,
        })
    }

    /// Validity predicate: a known scheme and a domain.
    pub fn is_valid(&self) -> bool {
        (self.scheme == "sip" || self.scheme == "sips") && !self.domain.is_empty()
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn gruu(&self) -> Option<&str> {
        self.gruu.as_deref()
    }
}

impl FromStr for IdentityAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for IdentityAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }

        write!(f, "{}:", self.scheme)?;
        if let Some(user) = &self.username {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.domain)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(gruu) = &self.gruu {
            write!(f, ";gr={}", gruu)?;
        }
        Ok(())
    }
}
