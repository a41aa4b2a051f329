//! Listener-to-sink pipeline: decode outcomes, loss of bad records,
//! survival of the receive loop.

use std::sync::Arc;

use formrelay::config::RelayConfig;
use formrelay::lifecycle::Shutdown;
use formrelay::relay::{IngestListener, RelayClient};

mod common;

/// Bind a listener on an ephemeral loopback port and run it against a
/// capturing sink. Returns the client side and the sink.
async fn start_pipeline() -> (RelayClient, Arc<common::CapturingSink>, Shutdown) {
    let config = RelayConfig {
        bind_address: "127.0.0.1:0".to_string(),
        ..RelayConfig::default()
    };

    let listener = IngestListener::bind(&config).await.unwrap();
    let target = listener.local_addr().unwrap();

    let sink = Arc::new(common::CapturingSink::new());
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let worker_sink = sink.clone();
    tokio::spawn(async move {
        let _ = listener.run(worker_sink, rx).await;
    });

    (RelayClient::new(target), sink, shutdown)
}

#[tokio::test]
async fn test_wellformed_datagram_becomes_one_stamped_record() {
    let (client, sink, _shutdown) = start_pipeline().await;

    client.send(b"field=value").await.unwrap();
    common::wait_for_records(&sink, 1).await;

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("field"), Some("value"));
    assert!(records[0].get("date").is_some());
}

#[tokio::test]
async fn test_malformed_datagram_inserts_nothing_and_loop_survives() {
    let (client, sink, _shutdown) = start_pipeline().await;

    // A segment without '=': the whole record must be rejected.
    client.send(b"a=1&bad").await.unwrap();
    // The next datagram proves the listener is still alive.
    client.send(b"ok=yes").await.unwrap();

    common::wait_for_records(&sink, 1).await;

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1, "rejected payload must not be inserted");
    assert_eq!(records[0].get("ok"), Some("yes"));
    assert_eq!(records[0].get("a"), None);
}

#[tokio::test]
async fn test_identical_payloads_insert_distinct_records() {
    let (client, sink, _shutdown) = start_pipeline().await;

    client.send(b"field=value").await.unwrap();
    client.send(b"field=value").await.unwrap();

    common::wait_for_records(&sink, 2).await;

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 2, "no deduplication across submissions");
    assert_eq!(records[0].get("field"), records[1].get("field"));
}

#[tokio::test]
async fn test_urlencoded_payload_decoded_before_stamping() {
    let (client, sink, _shutdown) = start_pipeline().await;

    client.send(b"name=John+Doe&age=30").await.unwrap();
    common::wait_for_records(&sink, 1).await;

    let records = sink.records.lock().unwrap();
    assert_eq!(records[0].get("name"), Some("John Doe"));
    assert_eq!(records[0].get("age"), Some("30"));
}
