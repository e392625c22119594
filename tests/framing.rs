//! Integration tests for PDU framing over fragmented input.

use std::num::NonZeroUsize;

use bytes::Bytes;
use ldpframe::{
    HeaderFault,
    ReceiveError,
    Session,
    SessionEvent,
    StatusCode,
    error::BufferExhausted,
};
use ldpframe_testing::{
    BridgeCall,
    PEER,
    PduBuilder,
    RecordingBridge,
    feed_in_chunks,
    session,
    session_with,
};
use rstest::rstest;

fn two_keepalive_pdus() -> Vec<u8> {
    let mut stream = PduBuilder::new(PEER).keepalive(1).keepalive(2).build().to_vec();
    stream.extend_from_slice(&PduBuilder::new(PEER).keepalive(3).build());
    stream
}

#[rstest]
fn minimum_pdu_is_accepted_without_dispatch(mut session: Session<RecordingBridge>) {
    let pdu = PduBuilder::new(PEER).build();
    assert_eq!(pdu.len(), 10);

    session.on_receive(Some(&pdu));
    session.on_receive(None);

    let stats = session.state().stats();
    assert_eq!(stats.pdu_rx, 1);
    assert_eq!(stats.message_rx, 0);
    assert!(session.bridge().calls().is_empty());
    assert!(session.buffer().is_empty());
}

#[rstest]
fn appending_alone_decodes_nothing(mut session: Session<RecordingBridge>) {
    session.on_receive(Some(&PduBuilder::new(PEER).keepalive(1).build()));
    assert_eq!(session.state().stats().pdu_rx, 0);
    assert_eq!(session.buffer().len(), 18);
}

#[rstest]
fn partial_pdu_waits_for_its_last_byte(mut session: Session<RecordingBridge>) {
    let pdu = PduBuilder::new(PEER).keepalive(9).build();
    let (head, tail) = pdu.split_at(pdu.len() - 1);

    session.on_receive(Some(head));
    session.on_receive(None);
    assert_eq!(session.state().stats().pdu_rx, 0);
    assert!(session.bridge().calls().is_empty());
    assert_eq!(session.buffer().window(), head);

    session.on_receive(Some(tail));
    session.on_receive(None);
    assert_eq!(session.state().stats().pdu_rx, 1);
    assert_eq!(session.bridge().events(), vec![SessionEvent::RxKeepalive]);
    assert!(session.buffer().is_empty());
}

#[rstest]
fn one_drain_consumes_every_complete_pdu(mut session: Session<RecordingBridge>) {
    let stream = two_keepalive_pdus();
    session.on_receive(Some(&stream));
    session.on_receive(None);

    let stats = session.state().stats();
    assert_eq!(stats.pdu_rx, 2);
    assert_eq!(stats.message_rx, 3);
    assert_eq!(stats.keepalive_rx, 3);
}

#[rstest]
#[case::single_bytes(1)]
#[case::odd_chunks(7)]
#[case::header_sized(10)]
#[case::whole(usize::MAX)]
fn fragmentation_does_not_change_outcome(#[case] chunk_size: usize) {
    let stream = two_keepalive_pdus();

    let mut whole = session();
    whole.on_receive(Some(&stream));
    whole.on_receive(None);

    let mut fragmented = session();
    feed_in_chunks(&mut fragmented, &stream, chunk_size.min(stream.len()));

    assert_eq!(fragmented.state().stats(), whole.state().stats());
    assert_eq!(fragmented.bridge(), whole.bridge());
    assert!(fragmented.buffer().is_empty());
}

#[rstest]
fn repeated_drains_on_empty_buffer_are_harmless(mut session: Session<RecordingBridge>) {
    session.on_receive(Some(&PduBuilder::new(PEER).build()));
    for _ in 0..5 {
        session.on_receive(None);
        assert_eq!(session.buffer().consumed_offset(), 0);
        assert_eq!(session.buffer().write_offset(), 0);
    }
    assert_eq!(session.state().stats().pdu_rx, 1);
    assert!(!session.state().decode_error());
}

#[rstest]
fn drain_compacts_partial_tail_to_front(mut session: Session<RecordingBridge>) {
    let mut stream = PduBuilder::new(PEER).keepalive(1).build().to_vec();
    let next = PduBuilder::new(PEER).keepalive(2).build();
    stream.extend_from_slice(&next[..5]);

    session.on_receive(Some(&stream));
    session.on_receive(None);

    assert_eq!(session.buffer().consumed_offset(), 0);
    assert_eq!(session.buffer().window(), &next[..5]);
}

#[test]
fn overflowing_append_closes_without_copying() {
    let mut session = session_with(|builder| {
        builder
            .max_pdu_len(300)
            .read_buffer_capacity(NonZeroUsize::new(320).expect("non-zero"))
    });
    session.on_receive(Some(&[0u8; 300]));
    session.on_receive(Some(&[0u8; 21]));

    assert_eq!(session.buffer().write_offset(), 300);
    assert!(session.state().decode_error());
    assert_eq!(session.state().error_code(), Some(StatusCode::INTERNAL_ERROR));
    assert_eq!(
        session.bridge().calls(),
        &[BridgeCall::Close(Some(StatusCode::INTERNAL_ERROR))]
    );
}

#[test]
fn compaction_frees_room_for_later_appends() {
    let mut session = session_with(|builder| {
        builder
            .max_pdu_len(300)
            .read_buffer_capacity(NonZeroUsize::new(304).expect("non-zero"))
    });
    let pdu: Bytes = PduBuilder::new(PEER).message(0x3E00, 1, &[0u8; 192]).build();
    for _ in 0..3 {
        session.on_receive(Some(&pdu));
        session.on_receive(None);
    }
    assert_eq!(session.state().stats().pdu_rx, 3);
    assert!(!session.state().decode_error());
}

#[rstest]
#[case::version(
    PduBuilder::new(PEER).version(2).keepalive(1).build(),
    HeaderFault::UnsupportedVersion { version: 2 }.into(),
    StatusCode::BAD_PROTOCOL_VERSION
)]
#[case::too_short(
    PduBuilder::new(PEER).pdu_length(5).raw(&[0; 4]).build(),
    HeaderFault::PduTooShort { length: 5, min: 6 }.into(),
    StatusCode::BAD_PDU_LENGTH
)]
#[case::too_long(
    PduBuilder::new(PEER).pdu_length(4097).build(),
    HeaderFault::PduTooLong { length: 4097, max: 4096 }.into(),
    StatusCode::BAD_PDU_LENGTH
)]
fn malformed_headers_close_the_session(
    mut session: Session<RecordingBridge>,
    #[case] bytes: Bytes,
    #[case] expected: ReceiveError,
    #[case] status: StatusCode,
) {
    assert_eq!(expected.status_code(), status);
    session.on_receive(Some(&bytes));
    session.on_receive(None);

    assert!(session.state().decode_error());
    assert_eq!(session.state().error_code(), Some(status));
    assert_eq!(session.state().stats().pdu_rx, 0);
    assert_eq!(session.bridge().closes(), 1);
}

#[test]
fn buffer_exhaustion_reports_sizes() {
    let err = ReceiveError::from(BufferExhausted {
        requested: 21,
        available: 20,
    });
    assert_eq!(err.kind(), "buffer_exhausted");
    assert!(err.to_string().contains("21 bytes requested"));
}
