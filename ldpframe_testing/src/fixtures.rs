//! Session fixtures and feeding helpers.

use std::{io, net::Ipv4Addr, num::NonZeroUsize};

use ldpframe::{
    LdpIdentifier,
    ReceiveEnd,
    Session,
    SessionConfig,
    SessionConfigBuilder,
    transport::receive_loop_with_chunk,
};
use rstest::fixture;
use tokio::io::{AsyncWriteExt, duplex};
use tokio_util::sync::CancellationToken;

use crate::bridge::RecordingBridge;

/// Local identity used by the fixtures.
pub const LOCAL: LdpIdentifier = LdpIdentifier::new(Ipv4Addr::new(1, 1, 1, 1), 0);

/// Peer identity used by the fixtures.
pub const PEER: LdpIdentifier = LdpIdentifier::new(Ipv4Addr::new(2, 2, 2, 2), 0);

/// Configuration between [`LOCAL`] and [`PEER`] with default limits.
#[fixture]
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
pub fn config() -> SessionConfig {
    SessionConfig::builder(LOCAL, PEER)
        .build()
        .expect("default configuration is valid")
}

/// Session between [`LOCAL`] and [`PEER`] recording its callbacks.
#[fixture]
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
pub fn session() -> Session<RecordingBridge> { Session::new(&config(), RecordingBridge::default()) }

/// Session whose configuration is adjusted by `customise`.
///
/// # Panics
///
/// Panics if the customised configuration is invalid.
pub fn session_with(
    customise: impl FnOnce(SessionConfigBuilder) -> SessionConfigBuilder,
) -> Session<RecordingBridge> {
    let config = customise(SessionConfig::builder(LOCAL, PEER))
        .build()
        .expect("customised configuration is valid");
    Session::new(&config, RecordingBridge::default())
}

/// Deliver `bytes` in chunks of `chunk_size`, draining after each chunk.
///
/// # Panics
///
/// Panics if `chunk_size` is zero.
pub fn feed_in_chunks(session: &mut Session<RecordingBridge>, bytes: &[u8], chunk_size: usize) {
    for chunk in bytes.chunks(chunk_size) {
        session.on_receive(Some(chunk));
        session.on_receive(None);
    }
}

/// Write `bytes` into an in-memory stream and drive `session` from it.
///
/// The writer is closed after the bytes are written, so the loop ends with
/// [`ReceiveEnd::Eof`] unless the session closes first.
///
/// # Errors
///
/// Propagates I/O errors from the in-memory stream.
pub async fn drive_with_chunks(
    session: &mut Session<RecordingBridge>,
    bytes: &[u8],
    chunk_size: NonZeroUsize,
) -> io::Result<ReceiveEnd> {
    let (mut client, mut server) = duplex(bytes.len().max(1));
    client.write_all(bytes).await?;
    drop(client);
    receive_loop_with_chunk(&mut server, session, &CancellationToken::new(), chunk_size).await
}
