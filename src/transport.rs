//! Drive a [`Session`] from an async byte stream.
//!
//! Each successful read is split into data events no larger than the free
//! space in the session's read buffer, each followed by a drain event, so
//! PDUs are decoded as soon as they are complete and a small buffer never
//! overflows on valid input. The loop ends on end-of-stream, on a fatal
//! decode error, or when the shutdown token is cancelled.

use std::{io, num::NonZeroUsize};

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::session::{Session, SessionBridge};

/// Default number of bytes requested per read.
pub const DEFAULT_READ_CHUNK: usize = 4096;

const DEFAULT_CHUNK: NonZeroUsize = match NonZeroUsize::new(DEFAULT_READ_CHUNK) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Why [`receive_loop`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiveEnd {
    /// The reader reported end-of-stream.
    Eof,
    /// The session hit a fatal decode error and was closed.
    Closed,
    /// The shutdown token was cancelled.
    Shutdown,
}

/// Feed `reader` into `session` until the stream ends.
///
/// # Errors
///
/// Returns any I/O error raised by `reader`. The session is left as it was
/// after the last successful read.
pub async fn receive_loop<R, B>(
    reader: &mut R,
    session: &mut Session<B>,
    shutdown: &CancellationToken,
) -> io::Result<ReceiveEnd>
where
    R: AsyncRead + Unpin,
    B: SessionBridge,
{
    receive_loop_with_chunk(reader, session, shutdown, DEFAULT_CHUNK).await
}

/// Like [`receive_loop`] with an explicit per-read chunk size.
///
/// # Errors
///
/// Returns any I/O error raised by `reader`.
pub async fn receive_loop_with_chunk<R, B>(
    reader: &mut R,
    session: &mut Session<B>,
    shutdown: &CancellationToken,
    chunk_size: NonZeroUsize,
) -> io::Result<ReceiveEnd>
where
    R: AsyncRead + Unpin,
    B: SessionBridge,
{
    let mut chunk = BytesMut::with_capacity(chunk_size.get());
    loop {
        chunk.clear();
        let read = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Ok(ReceiveEnd::Shutdown),
            result = reader.read_buf(&mut chunk) => result?,
        };
        if read == 0 {
            tracing::debug!(
                peer = %session.state().peer(),
                buffered = session.buffer().len(),
                "transport reached end of stream"
            );
            return Ok(ReceiveEnd::Eof);
        }
        if !deliver(session, &chunk) {
            return Ok(ReceiveEnd::Closed);
        }
    }
}

/// Hand `bytes` to `session` in pieces no larger than the room left in its
/// read buffer, draining after each piece.
///
/// Returns `false` once the session is compromised.
fn deliver<B: SessionBridge>(session: &mut Session<B>, mut bytes: &[u8]) -> bool {
    while !bytes.is_empty() {
        // a full buffer still takes one byte and reports the overflow
        let room = session.buffer().remaining_capacity().max(1);
        let (piece, rest) = bytes.split_at(room.min(bytes.len()));
        session.on_receive(Some(piece));
        session.on_receive(None);
        if session.state().decode_error() {
            return false;
        }
        bytes = rest;
    }
    true
}
