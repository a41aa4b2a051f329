//! Full path: HTTP POST → datagram relay → ingest listener → sink.

use std::sync::Arc;

use formrelay::config::RelayConfig;
use formrelay::lifecycle::Shutdown;
use formrelay::relay::IngestListener;

mod common;

#[tokio::test]
async fn test_submission_travels_from_browser_to_store() {
    // Ingest side: listener on an ephemeral loopback port, capturing sink.
    let relay_config = RelayConfig {
        bind_address: "127.0.0.1:0".to_string(),
        ..RelayConfig::default()
    };
    let listener = IngestListener::bind(&relay_config).await.unwrap();
    let relay_target = listener.local_addr().unwrap();

    let sink = Arc::new(common::CapturingSink::new());
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let worker_sink = sink.clone();
    tokio::spawn(async move {
        let _ = listener.run(worker_sink, rx).await;
    });

    // HTTP side, relaying to the listener.
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path()).await;
    let (addr, _http_shutdown) =
        common::start_http(dir.path().to_path_buf(), relay_target).await;

    let res = common::client()
        .post(format!("http://{}/message", addr))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("field=value")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 302);
    assert_eq!(res.headers().get("location").unwrap(), "/");

    common::wait_for_records(&sink, 1).await;

    let records = sink.records.lock().unwrap();
    assert_eq!(records[0].get("field"), Some("value"));
    assert!(records[0].get("date").is_some(), "record must be stamped");
    assert_eq!(records[0].len(), 2);
}
