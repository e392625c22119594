//! Session-side contract of the receive path.
//!
//! [`Session`] owns the read buffer, the mutable [`SessionState`] and the
//! [`SessionBridge`] implemented by the surrounding system. The transport
//! calls [`Session::on_receive`] with either new bytes (append only) or
//! `None` (drain: frame and dispatch everything complete).
//!
//! Any decode error is fatal. The session logs it with both identities,
//! records the status code if none is set yet, marks itself as compromised
//! and asks the bridge to close. Nothing is decoded afterwards.

use crate::{
    buffer::ReadBuffer,
    config::SessionConfig,
    dispatch::{self, Message},
    error::{ReceiveError, StatusCode},
    framer::PduFramer,
    identity::LdpIdentifier,
    tlv::SessionParameters,
};

/// Events the receive path injects into the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// A Keepalive message arrived.
    RxKeepalive,
    /// An Initialization message was decoded.
    RxInitialized,
}

/// Callbacks into the session state machine and timer subsystem.
///
/// Each callback receives a read-only view of the session so it can inspect
/// identities, peer parameters and counters.
///
/// ```rust,ignore
/// use ldpframe::{SessionBridge, SessionEvent, SessionState};
///
/// struct Fsm;
///
/// impl SessionBridge for Fsm {
///     fn restart_keepalive_timeout(&mut self, session: &SessionState) {
///         timers::restart(session.peer(), session.keepalive_time());
///     }
///
///     fn fsm(&mut self, _session: &SessionState, event: SessionEvent) {
///         tracing::info!(?event, "session event");
///     }
///
///     fn close(&mut self, session: &SessionState) {
///         tracing::info!(code = ?session.error_code(), "closing session");
///     }
/// }
/// ```
pub trait SessionBridge {
    /// Postpone the keepalive timeout. Called for every received message.
    fn restart_keepalive_timeout(&mut self, session: &SessionState);

    /// Deliver a state-machine event.
    fn fsm(&mut self, session: &SessionState, event: SessionEvent);

    /// Terminate the session. Called at most once.
    fn close(&mut self, session: &SessionState);

    /// Receive an address or label family message.
    ///
    /// The receive path recognises these messages but does not decode them.
    /// The default implementation drops them.
    fn on_delegated_message(&mut self, _session: &SessionState, _message: &Message<'_>) {}
}

/// Receive counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Complete PDUs framed.
    pub pdu_rx: u64,
    /// Valid messages dispatched.
    pub message_rx: u64,
    /// Keepalive messages dispatched.
    pub keepalive_rx: u64,
}

/// Mutable per-session state shared with the [`SessionBridge`].
#[derive(Clone, Debug)]
pub struct SessionState {
    local: LdpIdentifier,
    peer: LdpIdentifier,
    max_pdu_len: u16,
    keepalive_time: u16,
    pub(crate) peer_parameters: Option<SessionParameters>,
    pub(crate) stats: SessionStats,
    decode_error: bool,
    error_code: Option<StatusCode>,
}

impl SessionState {
    fn new(config: &SessionConfig) -> Self {
        Self {
            local: config.local(),
            peer: config.peer(),
            max_pdu_len: config.max_pdu_len(),
            keepalive_time: config.keepalive_time(),
            peer_parameters: None,
            stats: SessionStats::default(),
            decode_error: false,
            error_code: None,
        }
    }

    /// Local LDP identifier.
    #[must_use]
    pub fn local(&self) -> LdpIdentifier { self.local }

    /// Peer LDP identifier every PDU must carry.
    #[must_use]
    pub fn peer(&self) -> LdpIdentifier { self.peer }

    /// Largest PDU length accepted from the peer.
    #[must_use]
    pub fn max_pdu_len(&self) -> u16 { self.max_pdu_len }

    /// Replace the maximum PDU length, typically with the negotiated value.
    pub fn set_max_pdu_len(&mut self, max_pdu_len: u16) { self.max_pdu_len = max_pdu_len; }

    /// Parameters from the peer's Initialization message, once received.
    #[must_use]
    pub fn peer_parameters(&self) -> Option<SessionParameters> { self.peer_parameters }

    /// Keepalive time in force: the peer's advertised value if known,
    /// otherwise the configured default.
    #[must_use]
    pub fn keepalive_time(&self) -> u16 {
        self.peer_parameters
            .map_or(self.keepalive_time, |parameters| parameters.keepalive_time)
    }

    /// Receive counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats { self.stats }

    /// Report whether a fatal decode error has occurred.
    #[must_use]
    pub fn decode_error(&self) -> bool { self.decode_error }

    /// Status code recorded for the session's termination, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<StatusCode> { self.error_code }

    /// Record `code` unless a status code is already set.
    ///
    /// Returns the code now in force.
    pub fn record_error(&mut self, code: StatusCode) -> StatusCode {
        *self.error_code.get_or_insert(code)
    }
}

/// Receive side of one LDP session.
///
/// # Examples
///
/// ```rust,ignore
/// let config = SessionConfig::builder(local, peer).build()?;
/// let mut session = Session::new(&config, bridge);
/// session.on_receive(Some(&bytes));
/// session.on_receive(None);
/// assert_eq!(session.state().stats().pdu_rx, 1);
/// ```
#[derive(Debug)]
pub struct Session<B> {
    state: SessionState,
    buffer: ReadBuffer,
    bridge: B,
}

impl<B: SessionBridge> Session<B> {
    /// Create a session with an empty read buffer.
    #[must_use]
    pub fn new(config: &SessionConfig, bridge: B) -> Self {
        Self {
            state: SessionState::new(config),
            buffer: ReadBuffer::with_capacity(config.read_buffer_capacity()),
            bridge,
        }
    }

    /// Ingress callback: `Some(bytes)` appends, `None` drains.
    pub fn on_receive(&mut self, bytes: Option<&[u8]>) {
        match bytes {
            Some(bytes) => self.receive(bytes),
            None => self.drain(),
        }
    }

    /// Append `bytes` to the read buffer without decoding.
    ///
    /// Closes the session if the bytes do not fit. Bytes arriving after a
    /// fatal error are discarded.
    pub fn receive(&mut self, bytes: &[u8]) {
        if self.state.decode_error {
            tracing::trace!(len = bytes.len(), "discarding bytes after decode error");
            return;
        }
        if let Err(err) = self.buffer.append(bytes) {
            tracing::error!(
                local = %self.state.local,
                peer = %self.state.peer,
                requested = err.requested,
                available = err.available,
                "receive error (read buffer exhausted)"
            );
            self.fail(err.into());
        }
    }

    /// Frame and dispatch every complete PDU in the read buffer.
    ///
    /// Partial PDUs stay buffered for the next drain. The buffer is compacted
    /// on every call.
    pub fn drain(&mut self) {
        if self.state.decode_error {
            self.buffer.compact();
            return;
        }
        let result = self.read_pdus();
        self.buffer.compact();
        if let Err(err) = result {
            tracing::warn!(
                local = %self.state.local,
                peer = %self.state.peer,
                error = %err,
                kind = err.kind(),
                "invalid PDU received"
            );
            self.fail(err);
        }
    }

    fn read_pdus(&mut self) -> Result<(), ReceiveError> {
        loop {
            let framer = PduFramer::new(self.state.max_pdu_len);
            let Some(pdu) = framer.frame(self.buffer.window())? else {
                return Ok(());
            };
            self.state.stats.pdu_rx += 1;
            crate::metrics::inc_pdus();
            if pdu.sender() != self.state.peer {
                return Err(ReceiveError::IdentityMismatch {
                    expected: self.state.peer,
                    found: pdu.sender(),
                });
            }
            let consumed = pdu.wire_len();
            dispatch::dispatch(&mut self.state, &mut self.bridge, pdu.messages())?;
            self.buffer.advance(consumed);
        }
    }

    fn fail(&mut self, err: ReceiveError) {
        crate::metrics::inc_decode_errors(err.kind());
        self.state.decode_error = true;
        self.state.record_error(err.status_code());
        self.bridge.close(&self.state);
    }

    /// Session state shared with the bridge.
    #[must_use]
    pub fn state(&self) -> &SessionState { &self.state }

    /// Mutable session state, for the state machine's own updates.
    pub fn state_mut(&mut self) -> &mut SessionState { &mut self.state }

    /// Read buffer holding undecoded bytes.
    #[must_use]
    pub fn buffer(&self) -> &ReadBuffer { &self.buffer }

    /// Bridge receiving session callbacks.
    #[must_use]
    pub fn bridge(&self) -> &B { &self.bridge }

    /// Consume the session and return its bridge.
    #[must_use]
    pub fn into_bridge(self) -> B { self.bridge }
}
