//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use formrelay::config::HttpConfig;
use formrelay::http::HttpServer;
use formrelay::lifecycle::Shutdown;
use formrelay::relay::RelayClient;
use formrelay::store::{decode_record, Record, RecordSink, SinkError};

/// Write the page documents and a couple of static files into a fixture
/// directory.
#[allow(dead_code)]
pub async fn write_site(dir: &Path) {
    tokio::fs::write(dir.join("index.html"), "<h1>index</h1>")
        .await
        .unwrap();
    tokio::fs::write(dir.join("message.html"), "<form>message</form>")
        .await
        .unwrap();
    tokio::fs::write(dir.join("error.html"), "<h1>not found</h1>")
        .await
        .unwrap();
    tokio::fs::write(dir.join("style.css"), "body {}").await.unwrap();
    tokio::fs::write(dir.join("readme.xyzzy"), "plain text").await.unwrap();
}

/// Start an HTTP server on an ephemeral port, relaying to `relay_target`.
///
/// Returns the bound address and the shutdown handle; dropping the handle
/// stops the server.
#[allow(dead_code)]
pub async fn start_http(base_dir: PathBuf, relay_target: SocketAddr) -> (SocketAddr, Shutdown) {
    let config = HttpConfig {
        base_dir,
        ..HttpConfig::default()
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(&config, RelayClient::new(relay_target));
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// HTTP client that neither follows redirects nor pools connections.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Sink that decodes and stamps like the real one but keeps records in
/// memory instead of a database.
#[allow(dead_code)]
pub struct CapturingSink {
    pub records: Mutex<Vec<Record>>,
}

#[allow(dead_code)]
impl CapturingSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordSink for CapturingSink {
    async fn persist(&self, payload: &[u8]) -> Result<(), SinkError> {
        let record = decode_record(payload)?.stamp();
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Poll until the sink holds `expected` records, panicking after two seconds.
#[allow(dead_code)]
pub async fn wait_for_records(sink: &CapturingSink, expected: usize) {
    for _ in 0..40 {
        if sink.record_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!(
        "expected {} records, sink holds {}",
        expected,
        sink.record_count()
    );
}
