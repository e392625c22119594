//! A [`SessionBridge`] that records every callback in order.

use ldpframe::{
    Message,
    SessionBridge,
    SessionEvent,
    SessionState,
    StatusCode,
    wire::MessageType,
};

/// One callback made by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeCall {
    /// `restart_keepalive_timeout` was called.
    RestartKeepalive,
    /// `fsm` was called with this event.
    Event(SessionEvent),
    /// `on_delegated_message` was called.
    Delegated {
        /// Type of the delegated message.
        message_type: MessageType,
        /// Id of the delegated message.
        id: u32,
    },
    /// `close` was called; carries the error code in force at that moment.
    Close(Option<StatusCode>),
}

/// Records callbacks for later assertions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingBridge {
    calls: Vec<BridgeCall>,
}

impl RecordingBridge {
    /// Every callback in the order it happened.
    #[must_use]
    pub fn calls(&self) -> &[BridgeCall] { &self.calls }

    /// State-machine events only.
    #[must_use]
    pub fn events(&self) -> Vec<SessionEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::Event(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Delegated messages as `(type, id)` pairs.
    #[must_use]
    pub fn delegated(&self) -> Vec<(MessageType, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::Delegated { message_type, id } => Some((*message_type, *id)),
                _ => None,
            })
            .collect()
    }

    /// Number of keepalive timeout restarts.
    #[must_use]
    pub fn keepalive_restarts(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::RestartKeepalive))
    }

    /// Number of `close` calls.
    #[must_use]
    pub fn closes(&self) -> usize { self.count(|call| matches!(call, BridgeCall::Close(_))) }

    fn count(&self, predicate: impl Fn(&BridgeCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl SessionBridge for RecordingBridge {
    fn restart_keepalive_timeout(&mut self, _session: &SessionState) {
        self.calls.push(BridgeCall::RestartKeepalive);
    }

    fn fsm(&mut self, _session: &SessionState, event: SessionEvent) {
        self.calls.push(BridgeCall::Event(event));
    }

    fn close(&mut self, session: &SessionState) {
        self.calls.push(BridgeCall::Close(session.error_code()));
    }

    fn on_delegated_message(&mut self, _session: &SessionState, message: &Message<'_>) {
        self.calls.push(BridgeCall::Delegated {
            message_type: message.message_type(),
            id: message.id(),
        });
    }
}
