//! Criterion benchmarks for receive-path throughput.
//!
//! Measures a stream of keepalive PDUs delivered whole and in small chunks,
//! so the cost of partial-PDU buffering and compaction is visible.

use criterion::{BenchmarkId, Criterion, Throughput, black_box};
use ldpframe_testing::{PEER, PduBuilder, feed_in_chunks, session};

const PDUS: u32 = 256;

fn keepalive_stream() -> Vec<u8> {
    (0..PDUS)
        .flat_map(|id| {
            PduBuilder::new(PEER)
                .keepalive(id)
                .message(0x3E00, id, &[0; 24])
                .build()
        })
        .collect()
}

fn benchmark_drain(c: &mut Criterion) {
    let stream = keepalive_stream();
    let mut group = c.benchmark_group("session/drain");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    for chunk in [7usize, 64, 1500, stream.len()] {
        group.bench_function(BenchmarkId::from_parameter(chunk), |b| {
            b.iter(|| {
                let mut session = session();
                feed_in_chunks(&mut session, black_box(&stream), chunk);
                assert_eq!(session.state().stats().pdu_rx, u64::from(PDUS));
                black_box(session.state().stats())
            });
        });
    }

    group.finish();
}

/// Entrypoint for receive-path throughput benchmarks.
fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    benchmark_drain(&mut criterion);
    criterion.final_summary();
}
