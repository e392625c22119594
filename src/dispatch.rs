//! Message iteration and routing for the payload of one PDU.
//!
//! [`Messages`] splits a PDU payload into [`Message`] views. [`dispatch`]
//! drives them into the session: counters, keepalive timer restarts and
//! state-machine events.

use crate::{
    error::{Field, HeaderFault, ReceiveError},
    session::{SessionBridge, SessionEvent, SessionState},
    tlv,
    wire::{MIN_MESSAGE_LEN, MessageHeader, MessageType},
};

/// One message borrowed from a PDU payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message<'a> {
    header: MessageHeader,
    body: &'a [u8],
}

impl<'a> Message<'a> {
    /// Decoded message type.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.header.message_type() }

    /// Message id chosen by the sender.
    #[must_use]
    pub const fn id(&self) -> u32 { self.header.id() }

    /// Fixed header fields.
    #[must_use]
    pub const fn header(&self) -> MessageHeader { self.header }

    /// Bytes following the message id.
    #[must_use]
    pub const fn body(&self) -> &'a [u8] { self.body }
}

/// Iterator over the messages in a PDU payload.
///
/// A remainder shorter than [`MIN_MESSAGE_LEN`] ends iteration without an
/// error. The first invalid message yields an error and ends iteration.
#[derive(Clone, Debug)]
pub struct Messages<'a> {
    rest: &'a [u8],
}

impl<'a> Messages<'a> {
    /// Iterate the messages in `payload`.
    #[must_use]
    pub const fn new(payload: &'a [u8]) -> Self { Self { rest: payload } }

    fn fail(&mut self, err: ReceiveError) -> Option<Result<Message<'a>, ReceiveError>> {
        self.rest = &[];
        Some(Err(err))
    }
}

impl<'a> Iterator for Messages<'a> {
    type Item = Result<Message<'a>, ReceiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < MIN_MESSAGE_LEN {
            return None;
        }
        let header = MessageHeader::parse(self.rest)?;
        let Some(message) = self.rest.get(..header.wire_len()) else {
            let available = self.rest.len();
            return self.fail(ReceiveError::TruncatedField {
                field: Field::Message,
                declared: header.wire_len(),
                available,
            });
        };
        if header.body_len().is_none() {
            return self.fail(
                HeaderFault::MessageTooShort {
                    length: header.length(),
                }
                .into(),
            );
        }
        self.rest = &self.rest[header.wire_len()..];
        Some(Ok(Message {
            header,
            body: &message[MIN_MESSAGE_LEN..],
        }))
    }
}

/// Route every message in `payload` into the session.
///
/// Each valid message bumps `message_rx` and restarts the keepalive timeout
/// before it is handled, whatever its type.
///
/// # Errors
///
/// Stops at the first message that fails validation or decoding. Messages
/// before it have already been delivered.
pub fn dispatch<B>(
    state: &mut SessionState,
    bridge: &mut B,
    payload: &[u8],
) -> Result<(), ReceiveError>
where
    B: SessionBridge + ?Sized,
{
    for message in Messages::new(payload) {
        let message = message?;
        let message_type = message.message_type();
        state.stats.message_rx += 1;
        crate::metrics::inc_messages(message_type);
        tracing::debug!(
            local = %state.local(),
            peer = %state.peer(),
            message_type = %message_type,
            message_id = message.id(),
            "read message"
        );
        bridge.restart_keepalive_timeout(state);

        match message_type {
            MessageType::Keepalive => {
                state.stats.keepalive_rx += 1;
                bridge.fsm(state, SessionEvent::RxKeepalive);
            }
            MessageType::Initialization => {
                if let Some(parameters) = tlv::decode_initialization(message.body())? {
                    state.peer_parameters = Some(parameters);
                }
                bridge.fsm(state, SessionEvent::RxInitialized);
            }
            MessageType::Notification => notification(state, &message),
            delegated if delegated.is_delegated() => {
                bridge.on_delegated_message(state, &message);
            }
            other => tracing::trace!(
                message_type = %other,
                code = other.code(),
                raw_type = message.header().raw_type(),
                unknown_bit = message.header().is_unknown_bit_set(),
                "ignoring message"
            ),
        }
    }
    Ok(())
}

// Notifications are accepted without interpretation; status handling lives
// with the state machine.
fn notification(_state: &SessionState, _message: &Message<'_>) {}
