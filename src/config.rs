//! Session configuration.
//!
//! [`SessionConfig`] carries the identities and limits a [`Session`](crate::Session)
//! is created with. Build it through [`SessionConfig::builder`], which checks
//! that the read buffer can hold at least one maximum-size PDU.

use std::num::NonZeroUsize;

use crate::{
    error::ConfigError,
    identity::LdpIdentifier,
    wire::{DEFAULT_MAX_PDU_LEN, PDU_HEADER_LEN},
};

/// Default keepalive time in seconds, used until the peer advertises one.
pub const DEFAULT_KEEPALIVE_TIME: u16 = 15;

/// Number of maximum-size PDUs the default read buffer holds.
const READ_BUFFER_PDUS: usize = 4;

/// Largest value LDP reserves to mean "use the default PDU length".
const RESERVED_MAX_PDU_LEN: u16 = 255;

/// Validated per-session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    local: LdpIdentifier,
    peer: LdpIdentifier,
    max_pdu_len: u16,
    read_buffer_capacity: NonZeroUsize,
    keepalive_time: u16,
}

impl SessionConfig {
    /// Start building a configuration for a session between `local` and `peer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::Ipv4Addr;
    ///
    /// use ldpframe::{LdpIdentifier, SessionConfig};
    ///
    /// let local = LdpIdentifier::new(Ipv4Addr::new(1, 1, 1, 1), 0);
    /// let peer = LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 0);
    /// let config = SessionConfig::builder(local, peer)
    ///     .max_pdu_len(1500)
    ///     .build()
    ///     .expect("valid configuration");
    /// assert_eq!(config.read_buffer_capacity().get(), 4 * 1504);
    /// ```
    #[must_use]
    pub fn builder(local: LdpIdentifier, peer: LdpIdentifier) -> SessionConfigBuilder {
        SessionConfigBuilder {
            local,
            peer,
            max_pdu_len: DEFAULT_MAX_PDU_LEN,
            read_buffer_capacity: None,
            keepalive_time: DEFAULT_KEEPALIVE_TIME,
        }
    }

    /// Local LDP identifier.
    #[must_use]
    pub const fn local(&self) -> LdpIdentifier { self.local }

    /// Peer LDP identifier.
    #[must_use]
    pub const fn peer(&self) -> LdpIdentifier { self.peer }

    /// Largest PDU length accepted before negotiation.
    #[must_use]
    pub const fn max_pdu_len(&self) -> u16 { self.max_pdu_len }

    /// Size of the per-session read buffer.
    #[must_use]
    pub const fn read_buffer_capacity(&self) -> NonZeroUsize { self.read_buffer_capacity }

    /// Keepalive time used until the peer advertises its own.
    #[must_use]
    pub const fn keepalive_time(&self) -> u16 { self.keepalive_time }
}

/// Builder for [`SessionConfig`].
#[derive(Clone, Copy, Debug)]
pub struct SessionConfigBuilder {
    local: LdpIdentifier,
    peer: LdpIdentifier,
    max_pdu_len: u16,
    read_buffer_capacity: Option<NonZeroUsize>,
    keepalive_time: u16,
}

impl SessionConfigBuilder {
    /// Set the maximum PDU length. Defaults to 4096.
    #[must_use]
    pub fn max_pdu_len(mut self, max_pdu_len: u16) -> Self {
        self.max_pdu_len = max_pdu_len;
        self
    }

    /// Set the read buffer size. Defaults to four maximum-size PDUs.
    #[must_use]
    pub fn read_buffer_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.read_buffer_capacity = Some(capacity);
        self
    }

    /// Set the default keepalive time in seconds. Defaults to 15.
    #[must_use]
    pub fn keepalive_time(mut self, seconds: u16) -> Self {
        self.keepalive_time = seconds;
        self
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the maximum PDU length is 255 or less, the
    /// read buffer cannot hold one maximum-size PDU, or the keepalive time is
    /// zero.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        if self.max_pdu_len <= RESERVED_MAX_PDU_LEN {
            return Err(ConfigError::MaxPduLenTooSmall {
                value: self.max_pdu_len,
            });
        }
        if self.keepalive_time == 0 {
            return Err(ConfigError::ZeroKeepaliveTime);
        }
        let required = usize::from(self.max_pdu_len) + PDU_HEADER_LEN;
        let read_buffer_capacity = match self.read_buffer_capacity {
            Some(capacity) if capacity.get() < required => {
                return Err(ConfigError::ReadBufferTooSmall {
                    capacity: capacity.get(),
                    required,
                });
            }
            Some(capacity) => capacity,
            None => NonZeroUsize::new(required * READ_BUFFER_PDUS).unwrap_or(NonZeroUsize::MIN),
        };
        Ok(SessionConfig {
            local: self.local,
            peer: self.peer,
            max_pdu_len: self.max_pdu_len,
            read_buffer_capacity,
            keepalive_time: self.keepalive_time,
        })
    }
}
